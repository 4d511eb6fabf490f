use sepstrat::align::{align, AlignOptions, Metric};
use sepstrat::error::StratError;
use sepstrat::math::stats::euclidean_distance;
use sepstrat::matrix::SampleMatrix;
use sepstrat::reference::{self, ReferenceSet};
use sepstrat::signature::{Signature, SrsGroup};

fn input_from_reference_rows(rows: Vec<(&str, Vec<f32>)>) -> SampleMatrix {
    let set = reference::builtin(Signature::Minimal);
    let genes = set.genes().to_vec();
    let mut ids = Vec::new();
    let mut values = Vec::new();
    for (id, row) in rows {
        ids.push(id.to_string());
        values.extend(row);
    }
    SampleMatrix::new(ids, genes, values).unwrap()
}

fn first_row_of_group(group: SrsGroup) -> Vec<f32> {
    let set = reference::builtin(Signature::Minimal);
    let i = set.groups.iter().position(|g| *g == group).unwrap();
    set.matrix.row(i).to_vec()
}

#[test]
fn outlier_consistency() {
    let twin = first_row_of_group(SrsGroup::Srs3);
    let extreme: Vec<f32> = twin.iter().map(|v| v + 50.0).collect();
    let input = input_from_reference_rows(vec![("twin", twin), ("far", extreme)]);
    let set = reference::builtin(Signature::Minimal);
    let opts = AlignOptions {
        k: 3,
        metric: Metric::Euclidean,
    };
    let alignment = align(&input, set, &opts).unwrap();

    for (i, &pairs) in alignment.pairs_per_sample.iter().enumerate() {
        assert_eq!(pairs == 0, alignment.outliers.contains(&i));
    }
    assert!(alignment.pairs_per_sample[0] >= 1);
    assert_eq!(alignment.pairs_per_sample[1], 0);
    assert_eq!(alignment.outliers, vec![1]);
}

#[test]
fn outlier_rows_stay_uncorrected() {
    let twin = first_row_of_group(SrsGroup::Srs3);
    let extreme: Vec<f32> = twin.iter().map(|v| v + 50.0).collect();
    let input = input_from_reference_rows(vec![("twin", twin), ("far", extreme.clone())]);
    let set = reference::builtin(Signature::Minimal);
    let opts = AlignOptions {
        k: 3,
        metric: Metric::Euclidean,
    };
    let alignment = align(&input, set, &opts).unwrap();
    assert_eq!(alignment.corrected.row(1), extreme.as_slice());
}

#[test]
fn merged_matrix_has_all_rows() {
    let twin = first_row_of_group(SrsGroup::Srs2);
    let input = input_from_reference_rows(vec![("s1", twin)]);
    let set = reference::builtin(Signature::Minimal);
    let alignment = align(&input, set, &AlignOptions::default()).unwrap();
    assert_eq!(alignment.merged.n_samples(), 1 + set.n_samples());
    assert_eq!(alignment.merged.sample_ids()[0], "s1");
}

#[test]
fn oversized_k_degrades_gracefully() {
    let twin = first_row_of_group(SrsGroup::Srs1);
    let input = input_from_reference_rows(vec![("s1", twin)]);
    let set = reference::builtin(Signature::Minimal);
    let opts = AlignOptions {
        k: 500,
        metric: Metric::Euclidean,
    };
    let alignment = align(&input, set, &opts).unwrap();
    assert!(alignment.pairs_per_sample[0] >= 1);
}

#[test]
fn mutual_pairs_reference_mutuality() {
    // Every reported pair must be mutual: the input appears in the
    // reference row's neighbour list and vice versa, so the pair count is
    // bounded by k per input sample.
    let twin = first_row_of_group(SrsGroup::Srs3);
    let input = input_from_reference_rows(vec![("s1", twin)]);
    let set = reference::builtin(Signature::Minimal);
    let opts = AlignOptions {
        k: 3,
        metric: Metric::Euclidean,
    };
    let alignment = align(&input, set, &opts).unwrap();
    assert!(alignment.pairs.len() <= 3);
    for pair in &alignment.pairs {
        assert_eq!(pair.input_idx, 0);
        assert!(pair.ref_idx < set.n_samples());
    }
}

#[test]
fn uniform_batch_shift_is_corrected_not_flagged() {
    // A systematic shift of the whole cohort must widen the mutuality gate
    // with it: every sample keeps its mutual pairs and the correction pulls
    // the rows back toward the reference, with no outlier flags.
    let set = reference::builtin(Signature::Minimal);
    let mut ids = Vec::new();
    let mut values = Vec::new();
    for i in 0..set.n_samples() {
        ids.push(format!("b{}", i));
        values.extend(set.matrix.row(i).iter().map(|v| v + 1.0));
    }
    let input = SampleMatrix::new(ids, set.genes().to_vec(), values).unwrap();
    let opts = AlignOptions {
        k: 7,
        metric: Metric::Euclidean,
    };
    let alignment = align(&input, set, &opts).unwrap();

    assert!(alignment.outliers.is_empty());
    assert!(alignment.pairs_per_sample.iter().all(|&c| c >= 1));
    for i in 0..set.n_samples() {
        let origin = set.matrix.row(i);
        let before = euclidean_distance(input.row(i), origin);
        let after = euclidean_distance(alignment.corrected.row(i), origin);
        assert!(
            after < before,
            "sample {} moved from {} to {} of its origin",
            i,
            before,
            after
        );
    }
}

#[test]
fn single_row_reference_disables_the_gate() {
    // One reference row gives no spacing estimate; the mutuality gate is
    // skipped instead of collapsing to zero and suppressing every pair.
    let set = reference::builtin(Signature::Minimal);
    let row = set.matrix.row(0).to_vec();
    let single = ReferenceSet {
        signature: Signature::Minimal,
        matrix: SampleMatrix::new(
            vec![set.matrix.sample_ids()[0].clone()],
            set.genes().to_vec(),
            row.clone(),
        )
        .unwrap(),
        groups: vec![set.groups[0]],
        srsq: vec![set.srsq[0]],
    };
    let near: Vec<f32> = row.iter().map(|v| v + 0.1).collect();
    let input = input_from_reference_rows(vec![("s1", near)]);
    let opts = AlignOptions {
        k: 3,
        metric: Metric::Euclidean,
    };
    let alignment = align(&input, &single, &opts).unwrap();
    assert_eq!(alignment.pairs_per_sample[0], 1);
    assert!(alignment.outliers.is_empty());
}

#[test]
fn empty_input_is_alignment_failure() {
    let set = reference::builtin(Signature::Minimal);
    let input = SampleMatrix::new(Vec::new(), set.genes().to_vec(), Vec::new()).unwrap();
    let err = align(&input, set, &AlignOptions::default()).unwrap_err();
    assert!(matches!(err, StratError::AlignmentFailure(_)));
}

#[test]
fn non_finite_value_is_alignment_failure() {
    let mut twin = first_row_of_group(SrsGroup::Srs3);
    twin[2] = f32::NAN;
    let input = input_from_reference_rows(vec![("bad", twin)]);
    let set = reference::builtin(Signature::Minimal);
    let err = align(&input, set, &AlignOptions::default()).unwrap_err();
    match err {
        StratError::AlignmentFailure(msg) => assert!(msg.contains("bad")),
        other => panic!("expected AlignmentFailure, got {:?}", other),
    }
}

#[test]
fn column_mismatch_detected() {
    let set = reference::builtin(Signature::Minimal);
    let input = SampleMatrix::new(
        vec!["s1".to_string()],
        vec!["G1".to_string()],
        vec![1.0],
    )
    .unwrap();
    let err = align(&input, set, &AlignOptions::default()).unwrap_err();
    assert!(matches!(err, StratError::ColumnMismatch(_)));
}

#[test]
fn cosine_metric_also_pairs_identical_rows() {
    let twin = first_row_of_group(SrsGroup::Srs3);
    let input = input_from_reference_rows(vec![("s1", twin)]);
    let set = reference::builtin(Signature::Minimal);
    let opts = AlignOptions {
        k: 3,
        metric: Metric::Cosine,
    };
    let alignment = align(&input, set, &opts).unwrap();
    assert!(alignment.pairs_per_sample[0] >= 1);
}
