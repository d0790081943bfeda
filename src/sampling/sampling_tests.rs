use super::*;
use crate::bbob::{Problem, Suite};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_method_from_str() {
    assert_eq!(
        "ilhs".parse::<SamplingMethod>().expect("known"),
        SamplingMethod::Ilhs
    );
    assert_eq!(
        "random".parse::<SamplingMethod>().expect("known"),
        SamplingMethod::Random
    );
    assert_eq!(
        "lhs".parse::<SamplingMethod>().expect("known"),
        SamplingMethod::Lhs
    );
}

#[test]
fn test_unknown_method() {
    let err = "sobol".parse::<SamplingMethod>().unwrap_err();
    assert_eq!(err.to_string(), "Sampling method sobol is not defined");
}

#[test]
fn test_unit_sample_in_unit_cube() {
    let mut rng = StdRng::seed_from_u64(1);
    for method in [
        SamplingMethod::Ilhs,
        SamplingMethod::Random,
        SamplingMethod::Lhs,
    ] {
        let m = unit_sample(method, 37, 4, &mut rng);
        assert_eq!(m.shape(), (37, 4));
        assert!(
            m.as_slice().iter().all(|&u| (0.0..=1.0).contains(&u)),
            "{method}"
        );
    }
}

#[test]
fn test_lhs_one_point_per_stratum() {
    let mut rng = StdRng::seed_from_u64(3);
    let n = 25;
    for method in [SamplingMethod::Lhs, SamplingMethod::Ilhs] {
        let m = unit_sample(method, n, 3, &mut rng);
        for j in 0..3 {
            let mut strata: Vec<usize> = m
                .column(j)
                .iter()
                .map(|u| ((u * n as f64).floor() as usize).min(n - 1))
                .collect();
            strata.sort_unstable();
            assert_eq!(strata, (0..n).collect::<Vec<_>>());
        }
    }
}

#[test]
fn test_lhs_uses_stratum_centres() {
    let mut rng = StdRng::seed_from_u64(5);
    let m = unit_sample(SamplingMethod::Lhs, 4, 2, &mut rng);
    let mut col = m.column(0);
    col.sort_by(f64::total_cmp);
    assert_eq!(col, vec![0.125, 0.375, 0.625, 0.875]);
}

#[test]
fn test_ilhs_keeps_most_spread_candidate() {
    for seed in 0..10 {
        let first = latin_hypercube(30, 2, true, &mut StdRng::seed_from_u64(seed));
        let improved = unit_sample(
            SamplingMethod::Ilhs,
            30,
            2,
            &mut StdRng::seed_from_u64(seed),
        );
        assert!(min_pairwise_distance(&improved) >= min_pairwise_distance(&first));
    }
}

#[test]
fn test_min_pairwise_distance() {
    let points = Matrix::from_vec(3, 2, vec![0.0, 0.0, 0.3, 0.4, 1.0, 1.0]).expect("valid");
    assert!((min_pairwise_distance(&points) - 0.25).abs() < 1e-12);
    let single = Matrix::from_vec(1, 2, vec![0.5, 0.5]).expect("valid");
    assert!(min_pairwise_distance(&single).is_infinite());
}

#[test]
fn test_rescale_roundtrip() {
    let mut rng = StdRng::seed_from_u64(9);
    let unit = unit_sample(SamplingMethod::Random, 10, 3, &mut rng);
    let lower = [-5.0, 0.0, 2.0];
    let upper = [5.0, 1.0, 10.0];
    let scaled = rescale(&unit, &lower, &upper).expect("bounds match");
    for row in scaled.rows() {
        for (j, v) in row.iter().enumerate() {
            assert!(*v >= lower[j] && *v <= upper[j]);
        }
    }
    let back = inverse_rescale(&scaled, &lower, &upper).expect("bounds match");
    for (a, b) in back.as_slice().iter().zip(unit.as_slice()) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn test_rescale_bound_mismatch() {
    let unit = Matrix::zeros(2, 3);
    assert!(rescale(&unit, &[0.0; 2], &[1.0; 3]).is_err());
    assert!(inverse_rescale(&unit, &[0.0; 3], &[1.0; 4]).is_err());
}

#[test]
fn test_create_sample_evaluates_points() {
    let problem = Problem::new(Suite::Bbob, 1, 2, 1).expect("valid");
    let mut rng = StdRng::seed_from_u64(0);
    let sample = create_sample(&problem, SamplingMethod::Lhs, 100, &mut rng).expect("sample");
    assert_eq!(sample.len(), 100);
    assert_eq!(sample.dim(), 2);
    for (y, row) in sample.y.iter().zip(sample.x.rows()) {
        assert!(row.iter().all(|v| (-5.0..=5.0).contains(v)));
        assert_eq!(*y, problem.evaluate(row));
    }
}

#[test]
fn test_sample_csv_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("s.csv");
    let x = Matrix::from_vec(2, 2, vec![0.1, -4.25, 3.0, 1e-7]).expect("shape");
    let sample = Sample::new(x, vec![79.48, -12.5]).expect("rows match");
    sample.write_csv(&path).expect("written");

    let text = std::fs::read_to_string(&path).expect("readable");
    assert_eq!(text.lines().next(), Some("79.48,0.1,-4.25"));

    let back = read_sample(&path).expect("parses");
    assert_eq!(back, sample);
}

#[test]
fn test_read_sample_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = read_sample(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, ElaError::MissingInput { .. }));
}

#[test]
fn test_read_sample_bad_cell() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "1.0,2.0\n3.0,abc\n").expect("write");
    let err = read_sample(&path).unwrap_err();
    assert!(matches!(err, ElaError::Parse { line: 2, .. }));
}

#[test]
fn test_sampler_writes_wrapped_instances() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sampler = Sampler::new(dir.path())
        .with_multiplier(2)
        .with_seed(Some(11));
    let written = sampler
        .sample_suite_dims(Suite::Bbob, &[2])
        .expect("sampled");
    assert_eq!(written.len(), 24 * 15);

    let set_dir = dir.path().join("lhs_multiplier2_sid0");
    assert!(set_dir.join("x_f_data_bbob_f1_DIM2_i1.csv").exists());
    assert!(set_dir.join("x_f_data_bbob_f24_DIM2_i15.csv").exists());
    assert!(!set_dir.join("x_f_data_bbob_f1_DIM2_i71.csv").exists());
    assert_eq!(written[14], set_dir.join("x_f_data_bbob_f1_DIM2_i15.csv"));
    assert_eq!(written[15], set_dir.join("x_f_data_bbob_f2_DIM2_i1.csv"));

    let sample = read_sample(set_dir.join("x_f_data_bbob_f3_DIM2_i7.csv")).expect("readable");
    assert_eq!(sample.len(), 4);
}

#[test]
fn test_sampler_skips_large_bbob_dimensions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sampler = Sampler::new(dir.path())
        .with_multiplier(1)
        .with_seed(Some(0));
    let written = sampler
        .sample_suite_dims(Suite::Bbob, &[20])
        .expect("sampled");
    assert!(written.is_empty());
}
