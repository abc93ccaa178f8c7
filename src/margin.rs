//! Margin statistics of the maximum.
//!
//! Small companions to the selection modes: how decisively the maximum
//! wins, either over the runner-up or over the mean of everything else.
//! Useful as confidence signals next to an `ARG_MAX`-style selection.

/// Margin of the maximum over the second-largest value.
///
/// Returns `None` for inputs shorter than two elements. Duplicated
/// maxima yield a margin of `0.0`.
///
/// ```rust
/// assert_eq!(onehot::max_vs_next(&[3.0, 9.0, 6.0]), Some(3.0));
/// assert_eq!(onehot::max_vs_next(&[7.0, 7.0]), Some(0.0));
/// ```
pub fn max_vs_next(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mut top = f64::NEG_INFINITY;
    let mut next = f64::NEG_INFINITY;
    for &x in values {
        if x > top {
            next = top;
            top = x;
        } else if x > next {
            next = x;
        }
    }
    Some(top - next)
}

/// Margin of the maximum over the mean of the remaining values.
///
/// Returns `None` for inputs shorter than two elements. Only the first
/// occurrence of the maximum is excluded from the mean.
pub fn max_vs_avg(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let (max_idx, max_val) = values
        .iter()
        .enumerate()
        .fold((0, values[0]), |(bi, bv), (i, &x)| {
            if x > bv {
                (i, x)
            } else {
                (bi, bv)
            }
        });
    let rest_sum: f64 = values
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != max_idx)
        .map(|(_, &x)| x)
        .sum();
    Some(max_val - rest_sum / (values.len() - 1) as f64)
}
