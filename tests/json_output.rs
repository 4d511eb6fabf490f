use std::path::PathBuf;

use sepstrat::ctx::{CallKind, Ctx};
use sepstrat::io::json_writer::{build_report, write_json};
use sepstrat::matrix::SampleMatrix;
use sepstrat::pipeline::stage0_validate::Stage0Validate;
use sepstrat::pipeline::stage1_subset::Stage1Subset;
use sepstrat::pipeline::stage2_align::Stage2Align;
use sepstrat::pipeline::stage3_predict::Stage3Predict;
use sepstrat::pipeline::Pipeline;
use sepstrat::reference;
use sepstrat::schema::v1::StratReportV1;
use sepstrat::signature::{Signature, SrsGroup, MINIMAL_GENES};

fn run_stratify_ctx() -> Ctx {
    let set = reference::builtin(Signature::Minimal);
    let i = set
        .groups
        .iter()
        .position(|g| *g == SrsGroup::Srs3)
        .unwrap();
    let genes: Vec<String> = MINIMAL_GENES.iter().map(|g| g.to_string()).collect();
    let matrix = SampleMatrix::new(
        vec!["patient_A".to_string()],
        genes,
        set.matrix.row(i).to_vec(),
    )
    .unwrap();
    let mut ctx = Ctx::new(
        matrix,
        CallKind::Stratify,
        Signature::Minimal,
        3,
        PathBuf::from("."),
        "0.0.0-test",
    );
    let pipeline = Pipeline::new(vec![
        Box::new(Stage0Validate::new()),
        Box::new(Stage1Subset::new()),
        Box::new(Stage2Align::new()),
        Box::new(Stage3Predict::new()),
    ]);
    pipeline.run(&mut ctx).unwrap();
    ctx
}

#[test]
fn report_carries_alignment_meta_and_samples() {
    let ctx = run_stratify_ctx();
    let report = build_report(&ctx).unwrap();
    assert_eq!(report.tool_version, "0.0.0-test");
    assert_eq!(report.n_samples, 1);
    assert_eq!(report.per_sample.len(), 1);
    assert_eq!(report.per_sample[0].id, "patient_A");
    assert_eq!(report.per_sample[0].srs, "SRS3");
    let alignment = report.alignment.as_ref().unwrap();
    assert_eq!(alignment.k, 3);
    assert_eq!(alignment.metric, "euclidean");
    assert_eq!(alignment.n_outliers, 0);
}

#[test]
fn report_json_roundtrip() {
    let ctx = run_stratify_ctx();
    let report = build_report(&ctx).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sepstrat.json");
    write_json(&path, &report).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: StratReportV1 = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.per_sample.len(), 1);
    let p = &parsed.per_sample[0];
    let sum = p.p_srs1 + p.p_srs2 + p.p_srs3;
    assert!((sum - 1.0).abs() < 1e-6);
    assert!(!p.outlier);
}
