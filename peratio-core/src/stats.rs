//! Order statistics over plain value slices.

/// Classic median of `values`.
///
/// Values are copied and sorted ascending with `f64::total_cmp`; the input is
/// left untouched. Odd lengths return the middle element, even lengths the mean
/// of the two central elements. Returns `None` for an empty slice.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
