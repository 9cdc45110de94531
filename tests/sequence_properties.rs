use std::collections::HashSet;

use entrank::entropy::{information_content, positional_rank, symbol_counts};
use entrank::{
    PartitionOrder, SequenceCodec, section_count, sequence_rank, sequence_unrank, shape_rank,
    stirling2,
};
use num_bigint::BigUint;
use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn distinct(seq: &[usize]) -> usize {
    seq.iter().collect::<HashSet<_>>().len()
}

#[test]
fn literal_ranks_for_three_of_five() {
    let ranks: Vec<BigUint> = [[2, 2, 2], [2, 2, 3], [2, 3, 4]]
        .iter()
        .map(|seq| sequence_rank(seq, 5).unwrap())
        .collect();
    assert_eq!(
        ranks,
        vec![
            BigUint::from(2u32),
            BigUint::from(16u32),
            BigUint::from(124u32)
        ]
    );
}

#[test]
fn section_sizes_bound_ranks() {
    // Every single-symbol sequence comes before every two-symbol one.
    let one_symbol = section_count(8, 4, 1);
    for symbol in 0..4 {
        assert!(sequence_rank(&[symbol; 8], 4).unwrap() < one_symbol);
    }
    assert!(sequence_rank(&[0, 0, 0, 0, 0, 0, 0, 1], 4).unwrap() >= one_symbol);
}

#[test]
fn random_long_sequences_roundtrip() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..1000 {
        let seq: Vec<usize> = (0..100).map(|_| rng.gen_range(0..16)).collect();
        let rank = sequence_rank(&seq, 16).unwrap();
        assert_eq!(sequence_unrank(&rank, 100, 16).unwrap(), seq);
    }
}

#[test]
fn ranks_follow_information_better_than_positional_order() {
    // A constant sequence of the largest symbol has the top positional rank
    // but one of the lowest entropic ranks.
    let seq = [15; 32];
    let counts = symbol_counts(&seq, 16).unwrap();
    assert_eq!(information_content(&counts), 0.0);
    assert_eq!(sequence_rank(&seq, 16).unwrap(), BigUint::from(15u32));
    assert_eq!(
        positional_rank(&seq, 16).unwrap(),
        num_traits::pow(BigUint::from(16u32), 32) - 1u32
    );
}

#[test]
fn shape_order_starts_each_section_with_one_large_block() {
    let codec = SequenceCodec::new(10, 3).with_order(PartitionOrder::Shape);
    let first_two_symbol = section_count(10, 3, 1);
    let seq = codec.unrank(&first_two_symbol).unwrap();
    assert_eq!(distinct(&seq), 2);
    // Nine copies of one symbol and a single other symbol at the end.
    assert_eq!(seq.iter().filter(|&&s| s == seq[0]).count(), 9);
    assert_ne!(seq[9], seq[0]);
}

#[test]
fn shape_rank_covers_stirling_range() {
    let rgf = [1, 2, 3, 4, 5, 1, 2, 3, 4, 5, 1, 2];
    assert!(shape_rank(&rgf, 5).unwrap() < stirling2(12, 5));
}

proptest! {
    #[test]
    fn both_orders_roundtrip(seq in prop::collection::vec(0usize..12, 0..48)) {
        for order in [PartitionOrder::Growth, PartitionOrder::Shape] {
            let codec = SequenceCodec::new(seq.len(), 12).with_order(order);
            let rank = codec.rank(&seq).unwrap();
            prop_assert!(rank < codec.total());
            prop_assert_eq!(codec.unrank(&rank).unwrap(), seq.clone());
        }
    }

    #[test]
    fn fewer_symbols_rank_lower_in_both_orders(
        a in prop::collection::vec(0usize..3, 20),
        b in prop::collection::vec(0usize..5, 20),
    ) {
        prop_assume!(distinct(&a) < distinct(&b));
        for order in [PartitionOrder::Growth, PartitionOrder::Shape] {
            let codec = SequenceCodec::new(20, 5).with_order(order);
            prop_assert!(codec.rank(&a).unwrap() < codec.rank(&b).unwrap());
        }
    }
}
