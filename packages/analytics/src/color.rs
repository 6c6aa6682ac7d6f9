//! Choropleth colour scale.
//!
//! Average ratios are normalized against the maximum average in view and
//! mapped onto a light-to-dark red ramp. Countries without data are grey.

/// Fill for countries with no defined average ratio.
pub const NO_DATA_FILL: &str = "#d3d3d3";

/// Colour at intensity 0.
const LOW: (u8, u8, u8) = (0xfe, 0xe5, 0xd9);
/// Colour at intensity 1.
const HIGH: (u8, u8, u8) = (0xa5, 0x0f, 0x15);

/// Normalizes `average` against `max` into `[0, 1]`. Returns `None` when
/// there is no data; a defined average with a zero maximum maps to 0.
#[must_use]
pub fn intensity(average: Option<f64>, max: f64) -> Option<f64> {
    let average = average.filter(|v| v.is_finite())?;
    if max > 0.0 && max.is_finite() {
        Some((average / max).clamp(0.0, 1.0))
    } else {
        Some(0.0)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
}

/// The fill colour for a normalized intensity, grey for `None`.
#[must_use]
pub fn choropleth_fill(intensity: Option<f64>) -> String {
    let Some(t) = intensity else {
        return NO_DATA_FILL.to_string();
    };
    let t = t.clamp(0.0, 1.0);
    format!(
        "#{:02x}{:02x}{:02x}",
        lerp(LOW.0, HIGH.0, t),
        lerp(LOW.1, HIGH.1, t),
        lerp(LOW.2, HIGH.2, t)
    )
}
