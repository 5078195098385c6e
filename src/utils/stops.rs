//! Stop arithmetic
//!
//! One stop doubles or halves sensitivity. All helpers guard against
//! non-positive inputs so a bad catalog value can never produce NaN stops.

/// Tolerance for float noise when an ISO ratio is an exact power of two
const STOP_EPSILON: f64 = 1e-9;

/// Stops between two sensitivities: log2(to / from). Zero when either is non-positive.
#[inline]
pub fn stops_between(from: f64, to: f64) -> f64 {
    if from <= 0.0 || to <= 0.0 {
        return 0.0;
    }
    libm::log2(to / from)
}

/// Whole stops needed to climb from `from` up to `to`, rounded up.
///
/// Returns 0 when `to <= from`.
#[inline]
pub fn whole_stops_up(from: f64, to: f64) -> u8 {
    let stops = stops_between(from, to);
    if stops <= STOP_EPSILON {
        return 0;
    }
    libm::ceil(stops - STOP_EPSILON).min(u8::MAX as f64) as u8
}

/// Scale an ISO by a signed number of stops, rounded to the nearest integer
#[inline]
pub fn apply_stops(iso: u32, stops: i32) -> u32 {
    let scaled = iso as f64 * libm::pow(2.0, stops as f64);
    libm::round(scaled).max(1.0) as u32
}
