//! Null-aware numeric aggregation helpers shared by the query layer and the
//! analytics procedures.

/// Pooled mean over the present values only.
///
/// Null contributors are excluded from both the numerator and the
/// denominator; `None` when no value is present at all.
#[must_use]
pub fn pooled_mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0u32;

    for value in values.flatten() {
        sum += value;
        count += 1;
    }

    (count > 0).then(|| sum / f64::from(count))
}

/// Sum over the present values only. Zero when nothing is present.
#[must_use]
pub fn sum_present(values: impl Iterator<Item = Option<f64>>) -> f64 {
    values.flatten().sum()
}

/// Round to a fixed number of decimal places.
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.cast_signed());
    (value * factor).round() / factor
}

///
/// TESTS
///
