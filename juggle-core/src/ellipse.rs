//! Closed-form geometry for the hands' tilted elliptical swing paths.

use std::f64::consts::PI;

/// Convert degrees to radians (the session presets are written in degrees).
pub fn rads(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Offset from the ellipse center of the point at `angle` on an ellipse
/// whose major axis is rotated `tilt` counter-clockwise from the x-axis.
/// `angle` is measured counter-clockwise from the major axis.
pub fn ellipse_offset(angle: f64, tilt: f64, major_axis: f64, minor_axis: f64) -> (f64, f64) {
    let (sin_a, cos_a) = angle.sin_cos();
    let (sin_t, cos_t) = tilt.sin_cos();
    (
        major_axis * cos_a * cos_t - minor_axis * sin_a * sin_t,
        major_axis * cos_a * sin_t + minor_axis * sin_a * cos_t,
    )
}
