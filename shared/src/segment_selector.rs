use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, WheelError};
use crate::multiplier_table::MultiplierSequence;

/// Picks the wedge the wheel should land on for a payout the server already decided.
///
/// Several wedges usually share a payout; one of them is drawn uniformly so
/// repeated plays don't always stop on the same spot. A payout that is not on
/// the wheel means the local table has drifted from the server's and is
/// reported rather than approximated.
pub fn select_index<R: Rng + ?Sized>(
    sequence: &MultiplierSequence,
    target_multiplier: f64,
    rng: &mut R,
) -> Result<usize> {
    let candidates: Vec<usize> = sequence.indices_of(target_multiplier).collect();
    match candidates.choose(rng) {
        Some(&index) => Ok(index),
        None => {
            log::warn!(
                "multiplier {} not found on {}-segment wheel",
                target_multiplier,
                sequence.len()
            );
            Err(WheelError::NoMatchingSegment { multiplier: target_multiplier })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiplier_table::{MultiplierTable, RiskLevel, SegmentCount};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn low_ten() -> MultiplierSequence {
        MultiplierTable::default().lookup(RiskLevel::Low, SegmentCount::Ten).clone()
    }

    #[test]
    fn test_selected_index_matches_value() {
        let table = MultiplierTable::default();
        let mut rng = StdRng::seed_from_u64(7);
        for risk in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            for segments in SegmentCount::ALL {
                let wheel = table.lookup(risk, segments);
                for value in wheel.distinct_sorted() {
                    for _ in 0..20 {
                        let index = select_index(wheel, value, &mut rng).unwrap();
                        assert_eq!(wheel.get(index), Some(value));
                    }
                }
            }
        }
    }

    #[test]
    fn test_selection_is_uniform() {
        let wheel = low_ten();
        let mut rng = StdRng::seed_from_u64(42);
        let mut hits = [0u32; 10];
        let trials = 70_000;
        for _ in 0..trials {
            hits[select_index(&wheel, 1.2, &mut rng).unwrap()] += 1;
        }
        // seven wedges pay 1.2
        let expected = trials as f64 / 7.0;
        for index in [1, 2, 3, 5, 6, 7, 8] {
            let deviation = (hits[index] as f64 - expected).abs() / expected;
            assert!(deviation < 0.05, "index {} hit {} times", index, hits[index]);
        }
        for index in [0, 4, 9] {
            assert_eq!(hits[index], 0);
        }
    }

    #[test]
    fn test_missing_multiplier_is_a_fault() {
        let wheel = low_ten();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_index(&wheel, 3.0, &mut rng),
            Err(WheelError::NoMatchingSegment { multiplier: 3.0 })
        );
    }

    #[test]
    fn test_zero_lands_on_losing_wedges() {
        let wheel = low_ten();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let index = select_index(&wheel, 0.0, &mut rng).unwrap();
            assert!(index == 4 || index == 9);
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let wheel = low_ten();
        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10).map(|_| select_index(&wheel, 1.2, &mut rng).unwrap()).collect::<Vec<_>>()
        };
        assert_eq!(picks(99), picks(99));
    }
}
