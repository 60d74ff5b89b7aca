use std::cmp::Ordering;

/// An item with its derived tie-break values and dense rank.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub item: T,
    pub rank: usize,
    pub best_score: f64,
    pub second_best_score: f64,
}

/// Largest and second largest score, 0 when absent.
///
/// Works on a sorted copy; the caller's order is left alone.
pub fn best_two(scores: &[f64]) -> (f64, f64) {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    (
        sorted.first().copied().unwrap_or(0.0),
        sorted.get(1).copied().unwrap_or(0.0),
    )
}

fn compare_tie_break(a: (f64, f64), b: (f64, f64)) -> Ordering {
    // Primary: best score descending, then second best as tie-breaker
    b.0.total_cmp(&a.0).then_with(|| b.1.total_cmp(&a.1))
}

/// Rank items by best score, then second best score, both descending.
///
/// The sort is stable, so exact ties keep input order. Ranks are assigned by
/// position (1, 2, 3, ...) and are never shared.
pub fn rank_by<T, F>(items: Vec<T>, get_scores: F) -> Vec<Ranked<T>>
where
    F: Fn(&T) -> &[f64],
{
    let mut keyed: Vec<((f64, f64), T)> = items
        .into_iter()
        .map(|item| (best_two(get_scores(&item)), item))
        .collect();

    keyed.sort_by(|a, b| compare_tie_break(a.0, b.0));

    keyed
        .into_iter()
        .enumerate()
        .map(|(index, ((best_score, second_best_score), item))| Ranked {
            item,
            rank: index + 1,
            best_score,
            second_best_score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank_named(entries: Vec<(&'static str, Vec<f64>)>) -> Vec<Ranked<(&'static str, Vec<f64>)>> {
        rank_by(entries, |e| e.1.as_slice())
    }

    #[test]
    fn test_best_two() {
        assert_eq!(best_two(&[7.0, 10.0, 9.0]), (10.0, 9.0));
        assert_eq!(best_two(&[8.0]), (8.0, 0.0));
        assert_eq!(best_two(&[]), (0.0, 0.0));
        assert_eq!(best_two(&[10.0, 10.0]), (10.0, 10.0));
    }

    #[test]
    fn test_second_best_breaks_ties() {
        let ranked = rank_named(vec![
            ("C", vec![9.0, 9.0]),
            ("B", vec![10.0, 9.0]),
            ("A", vec![10.0, 10.0]),
        ]);
        let order: Vec<_> = ranked.iter().map(|r| r.item.0).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
        let ranks: Vec<_> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(ranked[1].best_score, 10.0);
        assert_eq!(ranked[1].second_best_score, 9.0);
    }

    #[test]
    fn test_exact_ties_keep_input_order_and_distinct_ranks() {
        let ranked = rank_named(vec![
            ("first", vec![10.0, 8.0]),
            ("second", vec![8.0, 10.0]),
            ("third", vec![10.0, 8.0, 1.0]),
        ]);
        let order: Vec<_> = ranked.iter().map(|r| (r.item.0, r.rank)).collect();
        assert_eq!(order, vec![("first", 1), ("second", 2), ("third", 3)]);
    }

    #[test]
    fn test_stored_score_order_untouched() {
        let ranked = rank_named(vec![("A", vec![1.0, 3.0, 2.0])]);
        assert_eq!(ranked[0].item.1, vec![1.0, 3.0, 2.0]);
        assert_eq!(ranked[0].best_score, 3.0);
    }

    #[test]
    fn test_empty_scores_rank_last() {
        let ranked = rank_named(vec![("none", vec![]), ("some", vec![1.0])]);
        assert_eq!(ranked[0].item.0, "some");
        assert_eq!(ranked[1].item.0, "none");
        assert_eq!(ranked[1].best_score, 0.0);
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_named(vec![]).is_empty());
    }
}
