//! Rounded percentage arithmetic shared by completion metrics.

/// Returns `part / whole` as a percentage rounded half-up to the nearest
/// integer, or `0` when `whole` is zero.
///
/// `part` is clamped to `whole`, so the result always lies in `0..=100`.
#[must_use]
pub fn rounded_percentage(part: usize, whole: usize) -> u8 {
    let bounded = part.min(whole) as u128;
    let total = whole as u128;
    bounded
        .saturating_mul(200)
        .saturating_add(total)
        .checked_div(total.saturating_mul(2))
        .and_then(|value| u8::try_from(value).ok())
        .unwrap_or(0)
}
