//! Competitive ("min") ranking over descending scores.
//!
//! A row's rank is one plus the number of rows scoring strictly higher, so
//! tied rows share a rank and the next distinct score skips by the size of
//! the tie group: scores `[90, 90, 70]` rank `[1, 1, 3]`.

use crate::error::ScoutError;
use crate::types::Score;
use crate::ScoutResult;

/// Rank of every score, in input order. 1 is best.
pub fn rank(scores: &[Score]) -> ScoutResult<Vec<u32>> {
    let mut sorted = scores.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    scores
        .iter()
        .map(|s| {
            let higher = sorted.partition_point(|x| x > s);
            u32::try_from(higher + 1).map_err(|_| ScoutError::InvalidInput {
                field: "scores".into(),
                reason: format!("{} rows exceed the rank range", scores.len()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_distinct_scores() {
        assert_eq!(rank(&[dec!(10), dec!(90), dec!(50)]).unwrap(), vec![3, 1, 2]);
    }

    #[test]
    fn test_tie_for_first_skips_second() {
        assert_eq!(rank(&[dec!(90), dec!(70), dec!(90)]).unwrap(), vec![1, 3, 1]);
    }

    #[test]
    fn test_tie_in_middle() {
        let r = rank(&[dec!(5), dec!(9), dec!(7), dec!(7), dec!(1)]).unwrap();
        assert_eq!(r, vec![4, 1, 2, 2, 5]);
    }

    #[test]
    fn test_all_tied() {
        assert_eq!(rank(&[dec!(3); 4]).unwrap(), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(rank(&[dec!(0)]).unwrap(), vec![1]);
        assert!(rank(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_max_score_gets_rank_one() {
        let scores = [dec!(12.5), dec!(99.9), dec!(45), dec!(99.8)];
        let r = rank(&scores).unwrap();
        let max = scores.iter().copied().max().unwrap_or(Decimal::ZERO);
        let i = scores.iter().position(|&s| s == max).unwrap();
        assert_eq!(r[i], 1);
    }

    #[test]
    fn test_equal_values_with_different_scale_tie() {
        // 50 and 50.00 are the same score
        assert_eq!(rank(&[dec!(50), dec!(50.00)]).unwrap(), vec![1, 1]);
    }
}
