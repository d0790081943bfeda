//! End-to-end pipeline test: sample, compute features, aggregate, run
//! LOPO-CV and report on a reduced experiment.

use bbob_ela::aggregate::{create_feature_table, LabelTable, ID_COLUMNS};
use bbob_ela::bbob::Suite;
use bbob_ela::config::ExperimentConfig;
use bbob_ela::data::DataFrame;
use bbob_ela::features::{FeatureClass, FeatureListing};
use bbob_ela::model_selection::{clean_table, split_by_function};
use bbob_ela::report::AccuracyReport;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LABELS: [&str; 2] = ["multimodality", "separability"];

fn labels() -> Vec<String> {
    LABELS.iter().map(ToString::to_string).collect()
}

fn write_label_table(path: &Path) {
    let mut text = String::from("fid,multimodality,separability\n");
    for fun in 1u8..=24 {
        let modality = if fun <= 14 { "none" } else { "high" };
        let separable = if fun <= 5 { "high" } else { "none" };
        let _ = writeln!(text, "{fun},{modality},{separable}");
    }
    fs::write(path, text).expect("label table written");
}

fn experiment(root: &Path) -> ExperimentConfig {
    let mut config = ExperimentConfig::default()
        .with_root(root)
        .with_multiplier(20)
        .with_seed(Some(11))
        .with_feature_classes(&[FeatureClass::Basic, FeatureClass::ElaMeta])
        .with_reduction(&[], 2)
        .with_feature_dims(&[3])
        .with_table_dims(&[3])
        .with_n_trees(8);
    config.classification.labels = labels();
    config.classification.report_labels = labels();
    config
}

#[test]
fn test_pipeline_end_to_end() {
    let root = TempDir::new().expect("tempdir");
    let config = experiment(root.path());
    config.validate().expect("valid configuration");
    write_label_table(&config.paths.label_table);

    // sampling: 24 functions x 15 instances in d = 3
    let written = config
        .sampler()
        .sample_suite_dims(Suite::Bbob, &[3])
        .expect("sampled");
    assert_eq!(written.len(), 360);

    // features
    let summary = config
        .feature_computer()
        .run_all(&config.features.classes, &config.features.dims)
        .expect("features computed");
    assert_eq!(summary.written, 2 * 360);
    assert_eq!(summary.failed, 0);

    // aggregation
    let label_table =
        LabelTable::load(&config.paths.label_table, &config.classification.labels).expect("labels");
    let classes = config.aggregated_classes();
    assert_eq!(classes, ["basic", "ela_meta"]);
    let table = create_feature_table(
        &config.table_path(),
        &config.feature_dir(),
        &classes,
        &config.classification.dims,
        &label_table,
    )
    .expect("table written");

    let n_features: usize = classes
        .iter()
        .map(|class| {
            let path = config
                .feature_dir()
                .join(format!("{class}_bbob_f1_DIM3_i1.csv"));
            FeatureListing::read_csv(path).expect("listing").len()
        })
        .sum();
    assert_eq!(table.rows, 360);
    assert_eq!(table.columns, ID_COLUMNS.len() + LABELS.len() + n_features);

    // LOPO split: the held-out function is exactly the test partition
    let lopo = config.lopo_cv();
    let frame = lopo.load_table().expect("table readable");
    assert_eq!(frame.shape(), (360, table.columns));
    let dim_table = lopo.dimension_table(&frame, 3).expect("rows for d=3");
    let split = split_by_function(&dim_table, 7, "separability", &labels()).expect("split");
    assert_eq!(split.x_test.n_rows(), 15);
    assert_eq!(split.x_train.n_rows(), 345);
    assert_eq!(split.classes, ["high", "none"]);
    assert!(split.y_test.iter().all(|&y| split.classes[y] == "none"));
    assert!(!split
        .feature_names
        .iter()
        .any(|n| n == "fun" || n == "separability"));

    // classification of every label and held-out function
    let files = lopo
        .run_all(&config.classification.dims, &config.classification.labels)
        .expect("classified");
    assert_eq!(files, 2 * 24);

    let report = AccuracyReport::collect(
        lopo.results_dir(),
        &config.classification.report_labels,
        &config.classification.dims,
    )
    .expect("report collected");
    assert_eq!(report.labels.len(), 2);
    for entry in &report.labels {
        let (dim, acc) = entry.by_dimension[0];
        assert_eq!(dim, 3);
        assert!((0.0..=1.0).contains(&acc));
    }
    let text = report.to_string();
    assert!(text.contains("High level classification property=multimodality"));
    assert!(text.contains("Dimension=3, accuracy="));
}

#[test]
fn test_cleaning_drops_missing_and_constant_columns() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("table.csv");
    let mut text = String::from("dim,fun,instance,separability,signal,flat,spiky\n");
    for fun in 1..=4 {
        for instance in 1..=3 {
            let spiky = if fun == 2 && instance == 1 {
                "inf".to_string()
            } else {
                fun.to_string()
            };
            let _ = writeln!(
                text,
                "3,{fun},{instance},{},{},7.0,{spiky}",
                if fun % 2 == 0 { "high" } else { "none" },
                fun * 10 + instance
            );
        }
    }
    fs::write(&path, text).expect("written");

    let frame = DataFrame::read_csv(&path, &["separability"]).expect("readable");
    let cleaned = clean_table(frame, ID_COLUMNS.len() + 1);
    assert_eq!(cleaned.dropped_missing, ["spiky"]);
    assert_eq!(cleaned.dropped_constant, ["flat"]);
    assert_eq!(
        cleaned.frame.column_names(),
        ["dim", "fun", "instance", "separability", "signal"]
    );
}

#[test]
fn test_aggregation_over_two_dimensions() {
    let dir = TempDir::new().expect("tempdir");
    let feature_dir = dir.path().join("features");
    fs::create_dir_all(&feature_dir).expect("feature dir");

    let all_labels: Vec<String> = ExperimentConfig::default().classification.labels;
    let mut text = format!("fid,{}\n", all_labels.join(","));
    for fun in 1..=24 {
        let row: Vec<String> = (0..all_labels.len())
            .map(|i| format!("p{}", (fun + i) % 3))
            .collect();
        let _ = writeln!(text, "{fun},{}", row.join(","));
    }
    let label_path = dir.path().join("props.csv");
    fs::write(&label_path, text).expect("labels written");
    let label_table = LabelTable::load(&label_path, &all_labels).expect("labels");

    let classes = ["basic".to_string(), "tpca2_ela_meta".to_string()];
    let sizes = [4usize, 3];
    for &dim in &[3usize, 5] {
        for fun in 1..=24 {
            for instance in 1..=15 {
                for (class, &size) in classes.iter().zip(&sizes) {
                    let mut listing = FeatureListing::new();
                    for k in 0..size {
                        listing.push(format!("{class}.f{k}"), (dim * fun + instance + k) as f64);
                    }
                    listing
                        .write_csv(
                            feature_dir
                                .join(format!("{class}_bbob_f{fun}_DIM{dim}_i{instance}.csv")),
                        )
                        .expect("listing written");
                }
            }
        }
    }

    let table_path = dir.path().join("table.csv");
    let summary = create_feature_table(&table_path, &feature_dir, &classes, &[3, 5], &label_table)
        .expect("aggregated");
    assert_eq!(summary.rows, 720);
    assert_eq!(summary.columns, 3 + 8 + 4 + 3);

    let frame = DataFrame::read_csv(
        &table_path,
        &all_labels.iter().map(String::as_str).collect::<Vec<_>>(),
    )
    .expect("table readable");
    assert_eq!(frame.shape(), (720, 18));
    assert_eq!(frame.n_unique("dim").expect("dim column"), 2);
    assert_eq!(frame.column_names()[11], "basic.f0");
}
