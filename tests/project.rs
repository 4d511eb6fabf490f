use sepstrat::error::StratError;
use sepstrat::matrix::SampleMatrix;
use sepstrat::project::{project, tally, vote_weights, ProjectOptions, SimilarityVote};
use sepstrat::reference;
use sepstrat::signature::{Signature, SrsGroup, MINIMAL_GENES};

fn minimal_input(rows: Vec<(&str, Vec<f32>)>) -> SampleMatrix {
    let genes: Vec<String> = MINIMAL_GENES.iter().map(|g| g.to_string()).collect();
    let mut ids = Vec::new();
    let mut values = Vec::new();
    for (id, row) in rows {
        ids.push(id.to_string());
        values.extend(row);
    }
    SampleMatrix::new(ids, genes, values).unwrap()
}

fn reference_row(group: SrsGroup) -> Vec<f32> {
    let set = reference::builtin(Signature::Minimal);
    let i = set.groups.iter().position(|g| *g == group).unwrap();
    set.matrix.row(i).to_vec()
}

#[test]
fn vote_weights_are_normalized() {
    let weights = vote_weights(&[(0, 0.9), (3, 0.6), (7, 0.3)]);
    let sum: f32 = weights.iter().map(|v| v.weight).sum();
    assert!((sum - 1.0).abs() < 1e-6);
    assert!(weights.iter().all(|v| v.weight >= 0.0));
    assert!(weights[0].weight > weights[2].weight);
}

#[test]
fn negative_similarities_contribute_nothing() {
    let weights = vote_weights(&[(0, 0.8), (1, -0.5)]);
    assert_eq!(weights[1].weight, 0.0);
    assert!((weights[0].weight - 1.0).abs() < 1e-6);
}

#[test]
fn all_non_positive_falls_back_to_uniform() {
    let weights = vote_weights(&[(0, -0.2), (1, 0.0)]);
    assert!((weights[0].weight - 0.5).abs() < 1e-6);
    assert!((weights[1].weight - 0.5).abs() < 1e-6);
}

#[test]
fn tally_breaks_ties_by_lowest_group_index() {
    let set = reference::builtin(Signature::Minimal);
    // One SRS1 neighbour and one SRS2 neighbour with equal weight.
    let srs1 = set
        .groups
        .iter()
        .position(|g| *g == SrsGroup::Srs1)
        .unwrap();
    let srs2 = set
        .groups
        .iter()
        .position(|g| *g == SrsGroup::Srs2)
        .unwrap();
    let votes = vec![
        SimilarityVote {
            ref_idx: srs1,
            weight: 0.5,
        },
        SimilarityVote {
            ref_idx: srs2,
            weight: 0.5,
        },
    ];
    let (group, probabilities, _) = tally(&votes, set);
    assert_eq!(group, SrsGroup::Srs1);
    assert!((probabilities[0] - 0.5).abs() < 1e-6);
    assert!((probabilities[1] - 0.5).abs() < 1e-6);
}

#[test]
fn projected_twin_matches_reference_group() {
    let twin = reference_row(SrsGroup::Srs3);
    let input = minimal_input(vec![("twin", twin)]);
    let result = project(&input, "minimal", &ProjectOptions::default()).unwrap();
    let s = &result.samples[0];
    assert_eq!(s.group, SrsGroup::Srs3);
    assert!(s.srsq < 0.2);
    assert!(!s.outlier);
}

#[test]
fn probabilities_sum_to_one() {
    let a = reference_row(SrsGroup::Srs1);
    let b = reference_row(SrsGroup::Srs2);
    let input = minimal_input(vec![("a", a), ("b", b)]);
    let result = project(&input, "minimal", &ProjectOptions::default()).unwrap();
    for sample in &result.samples {
        let sum: f32 = sample.probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }
}

#[test]
fn min_similarity_threshold_flags_low_confidence() {
    let twin = reference_row(SrsGroup::Srs2);
    let input = minimal_input(vec![("s1", twin)]);

    let strict = ProjectOptions {
        min_similarity: Some(2.0),
        ..Default::default()
    };
    let flagged = project(&input, "minimal", &strict).unwrap();
    assert!(flagged.samples[0].outlier);

    let lax = ProjectOptions {
        min_similarity: Some(-1.0),
        ..Default::default()
    };
    let unflagged = project(&input, "minimal", &lax).unwrap();
    assert!(!unflagged.samples[0].outlier);
}

#[test]
fn without_threshold_every_sample_gets_a_label() {
    let twin = reference_row(SrsGroup::Srs3);
    let far: Vec<f32> = twin.iter().map(|v| v + 50.0).collect();
    let input = minimal_input(vec![("near", twin), ("far", far)]);
    let result = project(&input, "minimal", &ProjectOptions::default()).unwrap();
    assert!(result.samples.iter().all(|s| !s.outlier));
}

#[test]
fn oversized_k_uses_whole_reference() {
    let twin = reference_row(SrsGroup::Srs1);
    let input = minimal_input(vec![("s1", twin)]);
    let opts = ProjectOptions {
        k: 500,
        ..Default::default()
    };
    let result = project(&input, "minimal", &opts).unwrap();
    let sum: f32 = result.samples[0].probabilities.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
}

#[test]
fn non_finite_value_is_an_error_not_a_panic() {
    let mut row = reference_row(SrsGroup::Srs2);
    row[3] = f32::NAN;
    let input = minimal_input(vec![("bad", row)]);
    let err = project(&input, "minimal", &ProjectOptions::default()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("non-finite"), "unexpected message: {}", msg);
    assert!(msg.contains("bad"));
}

#[test]
fn missing_columns_and_invalid_signature_errors() {
    let genes: Vec<String> = MINIMAL_GENES[..6].iter().map(|g| g.to_string()).collect();
    let short = SampleMatrix::new(vec!["s1".to_string()], genes, vec![7.0; 6]).unwrap();
    let err = project(&short, "minimal", &ProjectOptions::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StratError>(),
        Some(StratError::MissingColumns { .. })
    ));

    let input = minimal_input(vec![("s1", vec![7.0; 7])]);
    let err = project(&input, "bogus", &ProjectOptions::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StratError>(),
        Some(StratError::InvalidSignature(_))
    ));
}
