use super::*;
use crate::data::Column;
use std::fmt::Write as _;

fn labels() -> Vec<String> {
    vec!["multimodality".to_string(), "fungroup".to_string()]
}

fn modality(fun: u8) -> &'static str {
    if fun % 3 == 0 {
        "high"
    } else {
        "none"
    }
}

/// Two dimensions, 24 functions, 15 instances; `signal` separates the
/// multimodality classes, `flat` is constant and `spiky` holds an infinity.
fn write_table(path: &Path) {
    let mut text =
        String::from("dim,fun,instance,multimodality,fungroup,signal,noise,flat,spiky\n");
    for dim in [3, 5] {
        for fun in 1..=24u8 {
            for inst in 1..=15u32 {
                let signal =
                    if modality(fun) == "high" { 10.0 } else { 0.0 } + f64::from(inst) * 0.01;
                let noise = f64::from((u32::from(fun) * 7 + inst * 3) % 11);
                let spiky = if dim == 3 && fun == 4 && inst == 2 {
                    "inf".to_string()
                } else {
                    inst.to_string()
                };
                let _ = writeln!(
                    text,
                    "{dim},{fun},{inst},{},{},{signal},{noise},1.5,{spiky}",
                    modality(fun),
                    fun / 6 + 1
                );
            }
        }
    }
    fs::write(path, text).expect("written");
}

#[test]
fn test_clean_table_drops_bad_columns() {
    let frame = DataFrame::new(vec![
        ("dim".to_string(), Column::Numeric(vec![2.0, 2.0, 2.0])),
        (
            "a".to_string(),
            Column::Numeric(vec![1.0, f64::NEG_INFINITY, 2.0]),
        ),
        ("b".to_string(), Column::Numeric(vec![3.0, 3.0, 3.0])),
        ("c".to_string(), Column::Numeric(vec![1.0, 2.0, 3.0])),
        ("d".to_string(), Column::Numeric(vec![1.0, f64::NAN, 3.0])),
    ])
    .expect("valid");
    let cleaned = clean_table(frame, 1);
    assert_eq!(
        cleaned.dropped_missing,
        vec!["a".to_string(), "d".to_string()]
    );
    assert_eq!(cleaned.dropped_constant, vec!["b".to_string()]);
    assert_eq!(cleaned.frame.column_names(), vec!["dim", "c"]);
}

#[test]
fn test_split_by_function() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = dir.path().join("table.csv");
    write_table(&table);
    let cv = LopoCv::new(&table, dir.path().join("res"), &labels());
    let frame = cv.load_table().expect("readable");
    let dim_table = cv.dimension_table(&frame, 5).expect("rows for dim 5");

    let split = split_by_function(&dim_table, 6, "multimodality", &labels()).expect("split");
    assert_eq!(split.x_test.n_rows(), 15);
    assert_eq!(split.x_train.n_rows(), 23 * 15);
    assert_eq!(split.classes, vec!["high".to_string(), "none".to_string()]);
    assert!(split.y_test.iter().all(|&c| c == 0));
    assert_eq!(split.feature_names, vec!["signal", "noise", "spiky"]);
    assert_eq!(split.x_train.n_cols(), 3);
}

#[test]
fn test_dimension_table_cleans_per_dimension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = dir.path().join("table.csv");
    write_table(&table);
    let cv = LopoCv::new(&table, dir.path(), &labels());
    let frame = cv.load_table().expect("readable");

    let d3 = cv.dimension_table(&frame, 3).expect("rows");
    assert!(d3.column("spiky").is_err());
    assert!(d3.column("flat").is_err());
    assert_eq!(d3.n_rows(), 360);

    assert!(cv.dimension_table(&frame, 7).is_err());
}

#[test]
fn test_run_job_writes_accuracy() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = dir.path().join("table.csv");
    write_table(&table);
    let cv = LopoCv::new(&table, dir.path().join("res"), &labels()).with_n_trees(20);

    let score = cv.run_job("multimodality", 3, 9).expect("job runs");
    assert_eq!(score, 1.0);
    let written = fs::read_to_string(cv.accuracy_path("multimodality", 3, 9)).expect("written");
    assert_eq!(written.trim().parse::<f64>().expect("float"), 1.0);
    assert!(cv
        .results_dir()
        .join("accuracy_multimodality_f9_DIM3.csv")
        .exists());
}

#[test]
fn test_unknown_label_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = dir.path().join("table.csv");
    write_table(&table);
    let cv = LopoCv::new(&table, dir.path(), &labels()).with_n_trees(2);
    let err = cv.run_job("separability", 3, 1).unwrap_err();
    assert!(matches!(err, ElaError::InvalidHyperparameter { .. }));
}

#[test]
fn test_missing_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cv = LopoCv::new(dir.path().join("none.csv"), dir.path(), &labels());
    assert!(matches!(
        cv.run_job("fungroup", 3, 1).unwrap_err(),
        ElaError::MissingInput { .. }
    ));
}
