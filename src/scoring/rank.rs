/// Map a numeric column to [-1, 1] using percentile ranks.
///
/// Robust to scale differences, which keeps forces comparable across
/// columns. Ties share their average rank; missing values (NaN) are
/// excluded from ranking and stay missing in the output. A column with at
/// most one distinct value carries no discriminating information and maps
/// to all zeros.
///
/// `ascending=false` reverses the percentile before mapping, for columns
/// where a lower raw value means a higher force.
pub fn rank_to_unit(values: &[f64], ascending: bool) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let distinct = sorted.windows(2).filter(|w| w[0] != w[1]).count() + usize::from(n > 0);
    if distinct <= 1 {
        return vec![0.0; values.len()];
    }

    // distinct >= 2 implies n >= 2, so the span is never zero.
    let span = (n - 1) as f64;

    values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                return f64::NAN;
            }
            let below = sorted.partition_point(|&x| x < v);
            let at_or_below = sorted.partition_point(|&x| x <= v);
            // Ties occupy ordinal ranks below+1 ..= at_or_below; take the
            // average of the group (1-based).
            let avg_rank = (below + at_or_below + 1) as f64 / 2.0;
            let mut p = (avg_rank - 1.0) / span;
            if !ascending {
                p = 1.0 - p;
            }
            (2.0 * (p - 0.5)).clamp(-1.0, 1.0)
        })
        .collect()
}
