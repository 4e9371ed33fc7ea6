use rand::RngExt as _;
use typo_weight::analysis::clustered_positions::ClusteredPositions;
use typo_weight::analysis::orders::OrdersEstimator;
use typo_weight::analysis::single_positions::SinglePositions;
use typo_weight::analysis::smart_mean::smart_mean;
use typo_weight::pool::ArraysCache;
use typo_weight::prelude::*;

#[test]
fn positions_preview_round_trips() {
    let mut rng = rand::rng();
    for _ in 0..100 {
        let mut positions = ClusteredPositions::default();
        for _ in 0..rng.random_range(0..20) {
            positions.add(rng.random_range(0..50));
        }
        let before = positions.count();
        let adjustment = positions.adjust_to(rng.random_range(0..40));
        positions.teardown(adjustment);
        assert_eq!(positions.count(), before);
    }
}

#[test]
fn remove_cluster_takes_the_smallest_positions_first() {
    let mut rng = rand::rng();
    for _ in 0..100 {
        let mut positions = ClusteredPositions::default();
        for _ in 0..rng.random_range(0..20) {
            positions.add(rng.random_range(0..50));
        }
        let first = rng.random_range(0..50);
        let length = rng.random_range(0..10);
        let stored: Vec<usize> = positions.positions().to_vec();
        let eligible: Vec<usize> = stored.iter().copied().filter(|&p| p >= first).collect();
        let expected = length.min(eligible.len());

        assert_eq!(positions.remove_cluster(first, length), expected);
        let mut remaining = stored.clone();
        for p in &eligible[..expected] {
            let index = remaining.iter().position(|r| r == p).unwrap();
            remaining.remove(index);
        }
        assert_eq!(positions.positions(), remaining.as_slice());
    }
}

#[test]
fn forward_contiguous_sequences_are_accepted() {
    let mut rng = rand::rng();
    for len in 1..30 {
        let offset = rng.random_range(0..100);
        let mut orders = OrdersEstimator::default();
        orders.set(0, offset);
        for i in 1..len {
            orders.add(i, offset + i).unwrap();
        }
        assert!(orders.is_ok(), "len {len}");
    }
}

#[test]
fn backward_steps_score_lower() {
    let mut forward = OrdersEstimator::default();
    forward.set(0, 0);
    for i in 1..5 {
        forward.add(i, i).unwrap();
    }
    let mut backward = OrdersEstimator::default();
    backward.set(0, 0);
    for (p, v) in [(1, 1), (2, 2), (1, 3), (0, 4)] {
        backward.add(p, v).unwrap();
    }
    assert!(backward.quality_total() < forward.quality_total());
}

#[test]
fn smart_mean_favours_the_mode() {
    assert_eq!(smart_mean(&[5, 5, 5, 3, 3, 7], &DefaultPolicy), Ok(5));
    assert_eq!(smart_mean(&[1, 2, 3], &DefaultPolicy), Ok(2));
    assert_eq!(smart_mean(&[4, 4, 9, 9, 1], &DefaultPolicy), Ok(4));
}

#[test]
fn single_positions_capture_the_first_row() {
    let mut single = SinglePositions::default();
    single.add(1);
    single.add(2);
    single.miss();
    single.add(5);
    assert_eq!(single.uninterrupted_row(), &[1, 2]);
    assert_eq!(single.quantity(), 3);
    assert!(single.do_have_uninterrupted_row());
}

#[test]
fn arrays_come_back_clean() {
    let cache = ArraysCache::new(-3);
    for n in [1, 7, 64] {
        let mut array = cache.get(n);
        array.iter_mut().for_each(|x| *x = 42);
        cache.put(array);
        let array = cache.get(n);
        assert_eq!(array.len(), n);
        assert!(array.iter().all(|&x| x == -3));
        cache.put(array);
    }
}

#[test]
fn lower_weight_is_strictly_better() {
    let better: Output = Output::new("better", 1, 0.2, None);
    let worse: Output = Output::new("worse", 0, 0.5, None);
    assert!(better < worse);
    let mut outputs = vec![worse, better];
    rank(&mut outputs);
    assert_eq!(outputs[0].text(), "better");
}
