/// Sum of a participant's scores, with no clamping or rounding.
pub fn total(scores: &[f64]) -> f64 {
    // Explicit fold from +0.0 so an empty list totals 0, not -0
    scores.iter().fold(0.0, |acc, s| acc + s)
}

/// Sum of member totals, skipping members for which `is_excluded` holds.
///
/// Excluded members keep their own total; they just add nothing here.
pub fn team_total<T, F1, F2>(members: &[T], get_total: F1, is_excluded: F2) -> f64
where
    F1: Fn(&T) -> f64,
    F2: Fn(&T) -> bool,
{
    members
        .iter()
        .filter(|m| !is_excluded(m))
        .fold(0.0, |acc, m| acc + get_total(m))
}
