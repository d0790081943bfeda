use super::*;

#[test]
fn test_from_vec_rejects_bad_length() {
    let result = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0]);
    assert!(result.is_err());
}

#[test]
fn test_from_rows() {
    let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]])
        .expect("rows have equal length");
    assert_eq!(m.shape(), (3, 2));
    assert_eq!(m.get(2, 1), 6.0);
}

#[test]
fn test_from_rows_ragged() {
    let result = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
    assert!(result.is_err());
}

#[test]
fn test_row_and_column() {
    let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("valid shape");
    assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
    assert_eq!(m.column(2), vec![3.0, 6.0]);
    assert_eq!(m.rows().count(), 2);
}

#[test]
fn test_select_rows_and_columns() {
    let m = Matrix::from_vec(3, 3, (1..=9).map(f64::from).collect()).expect("valid shape");
    let rows = m.select_rows(&[2, 0]);
    assert_eq!(rows.as_slice(), &[7.0, 8.0, 9.0, 1.0, 2.0, 3.0]);

    let cols = m.select_columns(&[1]);
    assert_eq!(cols.shape(), (3, 1));
    assert_eq!(cols.as_slice(), &[2.0, 5.0, 8.0]);
}

#[test]
fn test_column_means_and_centered() {
    let m = Matrix::from_vec(3, 2, vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0]).expect("valid shape");
    assert_eq!(m.column_means(), vec![2.0, 20.0]);

    let c = m.centered();
    assert_eq!(c.column_means(), vec![0.0, 0.0]);
    assert_eq!(c.get(0, 1), -10.0);
}

#[test]
fn test_column_ranges() {
    let m = Matrix::from_vec(3, 2, vec![1.0, -1.0, 5.0, 0.0, 3.0, 4.0]).expect("valid shape");
    assert_eq!(m.column_ranges(), vec![(1.0, 5.0), (-1.0, 4.0)]);
}

#[test]
fn test_covariance_of_perfectly_correlated_columns() {
    let m =
        Matrix::from_vec(4, 2, vec![1.0, 2.0, 2.0, 4.0, 3.0, 6.0, 4.0, 8.0]).expect("valid shape");
    let cov = m.covariance();
    // var(x) = 5/3, cov(x, 2x) = 10/3, var(2x) = 20/3
    assert!((cov.get(0, 0) - 5.0 / 3.0).abs() < 1e-12);
    assert!((cov.get(0, 1) - 10.0 / 3.0).abs() < 1e-12);
    assert!((cov.get(1, 0) - cov.get(0, 1)).abs() < 1e-12);
    assert!((cov.get(1, 1) - 20.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_with_column() {
    let m = Matrix::from_vec(2, 1, vec![1.0, 2.0]).expect("valid shape");
    let wide = m.with_column(&[9.0, 8.0]).expect("matching length");
    assert_eq!(wide.shape(), (2, 2));
    assert_eq!(wide.as_slice(), &[1.0, 9.0, 2.0, 8.0]);
    assert!(m.with_column(&[1.0]).is_err());
}
