use super::*;

#[test]
fn test_average_ranks_with_ties() {
    let ranks = average_ranks(&[3.0, 1.0, 3.0, 2.0]);
    assert_eq!(ranks, vec![3.5, 1.0, 3.5, 2.0]);
}

#[test]
fn test_rank_weights_sum_to_one() {
    let y = [5.0, -1.0, 3.3, 3.3, 10.0, 0.0];
    let w = rank_weights(&y);
    assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    // best point gets the largest weight, worst gets zero
    let best = w[1];
    assert!(w.iter().all(|&v| v <= best));
    assert_eq!(w[4], 0.0);
}

#[test]
fn test_weighted_scale_shape_and_mismatch() {
    let x = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("valid");
    let scaled = weighted_scale(&x, &[0.0, 1.0, 2.0]).expect("lengths match");
    assert_eq!(scaled.shape(), (3, 2));
    // worst point has weight zero
    assert_eq!(scaled.row(2), &[0.0, 0.0]);
    assert!(weighted_scale(&x, &[1.0]).is_err());
}

#[test]
fn test_reduce_skips_when_not_reducing() {
    let x = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 7.0]).expect("valid");
    let y = [1.0, 2.0, 3.0];
    assert!(reduce(&x, &y, 2).expect("no error").is_none());
    assert!(reduce(&x, &y, 3).expect("no error").is_none());
}

#[test]
fn test_reduce_projects_to_components() {
    let rows: Vec<Vec<f64>> = (0..20)
        .map(|i| {
            let t = f64::from(i);
            vec![t, 0.5 * t + (t * 1.7).sin(), (t * 0.3).cos(), -t]
        })
        .collect();
    let x = Matrix::from_rows(&rows).expect("rectangular");
    let y: Vec<f64> = (0..20).map(|i| f64::from(i * i % 7)).collect();
    let reduced = reduce(&x, &y, 2).expect("no error").expect("reduced");
    assert_eq!(reduced.shape(), (20, 2));
}

#[test]
fn test_pca_sign_convention_deterministic() {
    let x = Matrix::from_vec(5, 2, vec![1.0, 1.1, 2.0, 1.9, 3.0, 3.2, 4.0, 3.9, 5.0, 5.1])
        .expect("valid");
    let mut pca = PCA::new(2);
    pca.fit(&x).expect("fits");
    let comps = pca.components().expect("fitted");
    for k in 0..2 {
        let row = comps.row(k);
        let pivot = row
            .iter()
            .copied()
            .fold(0.0_f64, |a, v| if v.abs() > a.abs() { v } else { a });
        assert!(pivot > 0.0);
    }
    let ratio = pca.explained_variance_ratio().expect("fitted");
    assert!(ratio[0] > ratio[1]);
    assert!((ratio.iter().sum::<f64>() - 1.0).abs() < 1e-10);
}

#[test]
fn test_pca_explained_variance_matches_covariance_trace() {
    let x = Matrix::from_vec(5, 2, vec![1.0, 0.5, 2.0, 2.5, 3.0, 1.5, 4.0, 4.5, 5.0, 3.0])
        .expect("valid");
    let cov = x.covariance();
    let trace = cov.get(0, 0) + cov.get(1, 1);

    let mut pca = PCA::new(2);
    pca.fit(&x).expect("fits");
    let variance = pca.explained_variance().expect("fitted");
    let ratio = pca.explained_variance_ratio().expect("fitted");
    assert!((variance.iter().sum::<f64>() - trace).abs() < 1e-10);
    for (v, r) in variance.iter().zip(ratio) {
        assert!((v / trace - r).abs() < 1e-10);
    }
}

#[test]
fn test_pca_rejects_too_many_components() {
    let x = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("valid");
    assert!(PCA::new(3).fit(&x).is_err());
    assert!(PCA::new(1).transform(&x).is_err());
}

#[test]
fn test_min_max_normalize() {
    let x = Matrix::from_vec(3, 2, vec![-2.0, 7.0, 0.0, 7.0, 2.0, 7.0]).expect("valid");
    let n = min_max_normalize(&x);
    assert_eq!(n.column(0), vec![0.0, 0.5, 1.0]);
    assert_eq!(n.column(1), vec![0.5, 0.5, 0.5]);
}

#[test]
fn test_reduction_components() {
    assert_eq!(Reduction::None.components(), None);
    assert_eq!(
        Reduction::WeightedPca { components: 2 }.components(),
        Some(2)
    );
}
