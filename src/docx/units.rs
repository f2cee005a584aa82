//! WordprocessingML measurement units.

/// Twips per inch.
pub const TWIPS_PER_INCH: f32 = 1440.0;

/// `w:line` value of single spacing with `w:lineRule="auto"`.
pub const AUTO_LINE_UNIT: f32 = 240.0;

/// Inches to twips (twentieths of a point).
pub fn inches_to_twips(inches: f32) -> i64 {
    (inches * TWIPS_PER_INCH).round() as i64
}

/// Twips to inches.
pub fn twips_to_inches(twips: f64) -> f32 {
    (twips / TWIPS_PER_INCH as f64) as f32
}

/// Points to twentieths of a point, the unit of `w:spacing`.
pub fn points_to_twentieths(points: f32) -> i64 {
    (points * 20.0).round() as i64
}

/// Points to half-points, the unit of `w:sz`.
pub fn points_to_half_points(points: u32) -> u32 {
    points.saturating_mul(2)
}

/// Half-points to points.
pub fn half_points_to_points(half_points: f64) -> f32 {
    (half_points / 2.0) as f32
}

/// Line spacing multiplier to a `w:line` value in auto mode.
pub fn line_spacing_to_auto(multiplier: f32) -> i64 {
    (multiplier * AUTO_LINE_UNIT).round() as i64
}
