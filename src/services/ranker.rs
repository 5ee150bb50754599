use crate::models::Ranked;

/// Sorts candidates by descending score and keeps the first `limit`
///
/// Equal scores keep their original candidate order. A `limit` larger than
/// the candidate count returns every candidate and a `limit` of zero returns
/// nothing. NaN scores sort after every real score.
pub fn rank<T, F>(candidates: Vec<T>, score_fn: F, limit: usize) -> Vec<Ranked<T>>
where
    F: Fn(&T) -> f64,
{
    if limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<Ranked<T>> = candidates
        .into_iter()
        .map(|item| {
            let score = score_fn(&item);
            Ranked { item, score }
        })
        .collect();

    // sort_by is stable, so ties fall back to candidate order
    scored.sort_by(|a, b| match (a.score.is_nan(), b.score.is_nan()) {
        (false, false) => b.score.total_cmp(&a.score),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    });
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(ranked: &[Ranked<&'static str>]) -> Vec<&'static str> {
        ranked.iter().map(|r| r.item).collect()
    }

    #[test]
    fn test_sorts_descending() {
        let scores = |c: &&str| match *c {
            "a" => 1.0,
            "b" => 3.0,
            _ => 2.0,
        };
        let ranked = rank(vec!["a", "b", "c"], scores, 3);

        assert_eq!(items(&ranked), vec!["b", "c", "a"]);
        assert_eq!(ranked[0].score, 3.0);
    }

    #[test]
    fn test_equal_scores_keep_original_order() {
        let ranked = rank(vec!["c1", "c2", "c3"], |_| 1.0, 3);
        assert_eq!(items(&ranked), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_ties_stable_among_mixed_scores() {
        let scores = |c: &&str| if c.starts_with('x') { 2.0 } else { 1.0 };
        let ranked = rank(vec!["a1", "x1", "a2", "x2", "a3"], scores, 5);

        assert_eq!(items(&ranked), vec!["x1", "x2", "a1", "a2", "a3"]);
    }

    #[test]
    fn test_truncation_keeps_highest_scores() {
        let candidates: Vec<u32> = vec![4, 9, 1, 7, 3];
        let ranked = rank(candidates.clone(), |c| *c as f64, 2);

        assert_eq!(ranked.len(), 2);
        let lowest_kept = ranked.iter().map(|r| r.score).fold(f64::MAX, f64::min);
        let omitted = candidates
            .iter()
            .filter(|c| !ranked.iter().any(|r| r.item == **c));
        for c in omitted {
            assert!((*c as f64) <= lowest_kept);
        }
    }

    #[test]
    fn test_limit_larger_than_candidates_returns_all() {
        let ranked = rank(vec!["a", "b"], |_| 0.0, 10);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_zero_limit_returns_empty() {
        let ranked = rank(vec!["a", "b"], |_| 1.0, 0);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_empty_candidates() {
        let ranked = rank(Vec::<&str>::new(), |_| 1.0, 3);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_nan_scores_sort_last() {
        let scores = |c: &&str| if *c == "broken" { f64::NAN } else { 0.5 };
        let ranked = rank(vec!["broken", "ok"], scores, 2);

        assert_eq!(items(&ranked), vec!["ok", "broken"]);
    }
}
