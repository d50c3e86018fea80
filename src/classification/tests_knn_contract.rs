// =========================================================================
// FALSIFY-KNN: nearest-neighbor voting contract
//
// Each test states one property that must hold for every corpus; a failing
// assertion message starts with FALSIFIED and names the property.
//
// References:
//   - Cover & Hart (1967) "Nearest Neighbor Pattern Classification"
// =========================================================================

use super::*;
use crate::distance::{Hamming, Manhattan};

fn corpus() -> Corpus {
    Corpus::new(
        vec![
            vec![0, 1, 3],
            vec![0, 1, 4],
            vec![1, 0, 3],
            vec![1, 1, 9],
            vec![2, 0, 0],
            vec![0, 1, 3],
        ],
        vec![0, 0, 1, 1, 1, -4],
        vec![true, true, false],
    )
    .expect("valid corpus")
}

/// FALSIFY-KNN-001: nearest returns exactly min(k, n) neighbors
#[test]
fn falsify_knn_001_neighbor_count() {
    let knn = KNearestNeighbors::new(corpus(), Manhattan).expect("metric fits corpus");
    for k in 0..10 {
        let got = knn.nearest(k, &[0, 1, 3]).expect("width ok").len();
        assert_eq!(
            got,
            k.min(6),
            "FALSIFIED KNN-001: k={k} returned {got} neighbors"
        );
    }
}

/// FALSIFY-KNN-002: neighbor distances are non-decreasing
#[test]
fn falsify_knn_002_sorted_ascending() {
    let knn = KNearestNeighbors::new(corpus(), Manhattan).expect("metric fits corpus");
    let n = knn.nearest(6, &[1, 0, 5]).expect("width ok");
    for w in n.windows(2) {
        assert!(
            w[0].distance <= w[1].distance,
            "FALSIFIED KNN-002: {} before {}",
            w[0],
            w[1]
        );
    }
}

/// FALSIFY-KNN-003: equal distances keep corpus insertion order
#[test]
fn falsify_knn_003_stable_ties() {
    let knn = KNearestNeighbors::new(corpus(), Hamming).expect("metric fits corpus");
    // samples 0 and 5 are identical to the query
    let n = knn.nearest(2, &[0, 1, 3]).expect("width ok");
    assert_eq!(
        (n[0].index, n[1].index),
        (0, 5),
        "FALSIFIED KNN-003: tie order {:?}",
        (n[0].index, n[1].index)
    );
}

/// FALSIFY-KNN-004: repeated queries give identical answers
#[test]
fn falsify_knn_004_deterministic() {
    let knn = KNearestNeighbors::new(corpus(), Hamming).expect("metric fits corpus");
    let first = knn.votes(4, &[1, 1, 3]).expect("width ok");
    for _ in 0..5 {
        assert_eq!(
            knn.votes(4, &[1, 1, 3]).expect("width ok"),
            first,
            "FALSIFIED KNN-004: tally changed between runs"
        );
    }
}

/// FALSIFY-KNN-005: raising the threshold never removes votes
#[test]
fn falsify_knn_005_threshold_monotone() {
    let knn = KNearestNeighbors::new(corpus(), Manhattan).expect("metric fits corpus");
    let mut previous = VoteTally::new();
    for threshold in [0.0, 0.5, 1.0, 2.0, 5.0, 50.0] {
        let tally = knn
            .votes_with_threshold(6, &[0, 1, 2], threshold)
            .expect("width ok");
        for (category, votes) in previous.iter() {
            assert!(
                tally.count(category) >= votes,
                "FALSIFIED KNN-005: category {category} lost votes at threshold {threshold}"
            );
        }
        previous = tally;
    }
}

/// FALSIFY-KNN-006: threshold 0 without an exact match gives no label
#[test]
fn falsify_knn_006_no_spurious_label() {
    let knn = KNearestNeighbors::new(corpus(), Manhattan).expect("metric fits corpus");
    let category = knn
        .classify_with_threshold(3, &[7, 7, 7], 0.0)
        .expect("width ok");
    assert_eq!(
        category, None,
        "FALSIFIED KNN-006: got {category:?} with an empty tally"
    );
}

/// FALSIFY-KNN-007: a single-label corpus always predicts that label
#[test]
fn falsify_knn_007_uniform_labels() {
    let corpus = Corpus::new(
        vec![vec![0, 0], vec![5, 1], vec![-3, 8]],
        vec![42, 42, 42],
        vec![false, true],
    )
    .expect("valid corpus");
    let knn = KNearestNeighbors::new(corpus, Manhattan).expect("metric fits corpus");
    for k in 1..5 {
        let category = knn
            .classify_with_threshold(k, &[100, 3], 1_000.0)
            .expect("width ok");
        assert_eq!(category, Some(42), "FALSIFIED KNN-007: k={k} gave {category:?}");
    }
}
