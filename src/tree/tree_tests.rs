use super::*;

fn two_blobs() -> (Matrix<f64>, Vec<usize>) {
    let mut data = Vec::new();
    let mut labels = Vec::new();
    for i in 0..20 {
        let t = f64::from(i) * 0.05;
        data.extend([t, 1.0 - t, 0.3]);
        labels.push(0);
        data.extend([5.0 + t, 4.0 - t, 0.3]);
        labels.push(1);
    }
    (Matrix::from_vec(40, 3, data).expect("valid"), labels)
}

#[test]
fn test_gini_impurity() {
    assert_eq!(gini_impurity(&[4, 0], 4), 0.0);
    assert!((gini_impurity(&[2, 2], 4) - 0.5).abs() < 1e-12);
    assert!((gini_impurity(&[1, 1, 1], 3) - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(gini_impurity(&[], 0), 0.0);
}

#[test]
fn test_majority_class_tie_breaks_low() {
    assert_eq!(majority_class([2, 1, 2, 1]), 1);
    assert_eq!(majority_class([3, 3, 0]), 3);
}

#[test]
fn test_tree_fits_training_data() {
    let (x, y) = two_blobs();
    let mut tree = DecisionTreeClassifier::new();
    tree.fit(&x, &y).expect("fit");
    assert_eq!(tree.predict(&x), y);
    assert_eq!(tree.root().expect("fitted").depth(), 1);
}

#[test]
fn test_tree_xor_needs_depth_two() {
    let x = Matrix::from_vec(
        8,
        2,
        vec![
            0.0, 0.0, 0.1, 0.1, 0.0, 1.0, 0.1, 0.9, 1.0, 0.0, 0.9, 0.1, 1.0, 1.0, 0.9, 0.9,
        ],
    )
    .expect("valid");
    let y = vec![0, 0, 1, 1, 1, 1, 0, 0];
    let mut tree = DecisionTreeClassifier::new().with_random_state(1);
    tree.fit(&x, &y).expect("fit");
    // no single split lowers impurity on balanced xor
    assert_eq!(tree.root().expect("fitted").depth(), 0);

    let mut stump = DecisionTreeClassifier::new().with_max_depth(0);
    stump.fit(&x, &y).expect("fit");
    assert_eq!(stump.predict(&x), vec![0; 8]);
}

#[test]
fn test_max_depth_is_respected() {
    let x = Matrix::from_vec(6, 1, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).expect("valid");
    let y = vec![0, 1, 0, 1, 0, 1];
    let mut tree = DecisionTreeClassifier::new().with_max_depth(2);
    tree.fit(&x, &y).expect("fit");
    assert!(tree.root().expect("fitted").depth() <= 2);
}

#[test]
fn test_fit_rejects_bad_input() {
    let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).expect("valid");
    let mut tree = DecisionTreeClassifier::new();
    assert!(tree.fit(&x, &[0]).is_err());

    let empty = Matrix::from_vec(0, 1, vec![]).expect("valid");
    assert!(tree.fit(&empty, &[]).is_err());

    let mut forest = RandomForestClassifier::new(0);
    assert!(forest.fit(&x, &[0, 1]).is_err());
}

#[test]
fn test_bootstrap_is_seeded() {
    let a = bootstrap_sample(50, Some(3));
    let b = bootstrap_sample(50, Some(3));
    let c = bootstrap_sample(50, Some(4));
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.iter().all(|&i| i < 50));
}

#[test]
fn test_forest_separates_blobs() {
    let (x, y) = two_blobs();
    let mut forest = RandomForestClassifier::new(25).with_random_state(0);
    forest.fit(&x, &y).expect("fit");
    assert_eq!(forest.trees().len(), 25);
    assert_eq!(forest.score(&x, &y), 1.0);

    let queries = Matrix::from_vec(2, 3, vec![0.2, 0.8, 0.3, 5.5, 3.5, 0.3]).expect("valid");
    assert_eq!(forest.predict(&queries), vec![0, 1]);
}

#[test]
fn test_forest_is_deterministic_with_seed() {
    let (x, y) = two_blobs();
    let queries =
        Matrix::from_vec(3, 3, vec![2.5, 2.5, 0.3, 2.4, 1.0, 0.3, 2.6, 3.0, 0.3]).expect("valid");
    let predict = |seed| {
        let mut forest = RandomForestClassifier::new(15).with_random_state(seed);
        forest.fit(&x, &y).expect("fit");
        forest.predict(&queries)
    };
    assert_eq!(predict(7), predict(7));
}

#[test]
fn test_forest_trees_follow_estimator_order() {
    let (x, y) = two_blobs();
    let mut forest = RandomForestClassifier::new(6).with_random_state(3);
    forest.fit(&x, &y).expect("fit");
    assert_eq!(forest.trees().len(), 6);
    for (i, tree) in forest.trees().iter().enumerate() {
        assert_eq!(tree.predict(&x), forest.fit_tree(&x, &y, i).predict(&x));
    }
}

#[test]
fn test_unfitted_forest_predicts_zero() {
    let forest = RandomForestClassifier::new(3);
    let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).expect("valid");
    assert_eq!(forest.predict(&x), vec![0, 0]);
}
