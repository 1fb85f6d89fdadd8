//! Unit conversion utilities.
//!
//! The editor canvas uses logical units at 96 per inch (960 x 540 for a
//! 16:9 slide). Office packages use English Metric Units (EMU).

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;

/// Logical canvas units per inch.
pub const UNITS_PER_INCH: f64 = 96.0;

/// Canvas width in logical units.
pub const CANVAS_WIDTH: f64 = 960.0;
/// Canvas height in logical units.
pub const CANVAS_HEIGHT: f64 = 540.0;

/// EMUs per degree for `rot` attributes (1/60000 of a degree).
pub const ROTATION_UNITS_PER_DEGREE: f64 = 60_000.0;

#[inline]
pub fn units_to_inches(units: f64) -> f64 {
    units / UNITS_PER_INCH
}

#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64).round() as i64
}

/// Logical units straight to EMU (one unit is 9525 EMU).
#[inline]
pub fn units_to_emu(units: f64) -> i64 {
    inches_to_emu(units_to_inches(units))
}

#[inline]
pub fn pt_to_emu_f64(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64).round() as i64
}

#[inline]
pub fn emu_to_pt_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

/// Degrees to the DrawingML angle unit, normalized into `[0, 360)`.
#[inline]
pub fn degrees_to_rot(degrees: f64) -> i64 {
    (degrees.rem_euclid(360.0) * ROTATION_UNITS_PER_DEGREE).round() as i64
}

/// Font size in points to the hundredths used by `sz` attributes.
#[inline]
pub fn pt_to_centipoints(pt: f64) -> u32 {
    (pt * 100.0).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_to_inches() {
        assert_eq!(units_to_inches(96.0), 1.0);
        assert_eq!(units_to_inches(192.0), 2.0);
        assert_eq!(units_to_inches(480.0), 5.0);
    }

    #[test]
    fn test_units_to_emu() {
        assert_eq!(units_to_emu(96.0), 914_400);
        assert_eq!(units_to_emu(192.0), 1_828_800);
        assert_eq!(units_to_emu(480.0), 4_572_000);
        assert_eq!(units_to_emu(1.0), 9_525);
        assert_eq!(units_to_emu(CANVAS_WIDTH), 9_144_000);
        assert_eq!(units_to_emu(CANVAS_HEIGHT), 5_143_500);
    }

    #[test]
    fn test_points() {
        assert_eq!(pt_to_emu_f64(1.0), 12_700);
        assert_eq!(pt_to_emu_f64(0.5), 6_350);
        assert_eq!(emu_to_pt_f64(25_400), 2.0);
        assert_eq!(pt_to_centipoints(18.0), 1800);
        assert_eq!(pt_to_centipoints(10.5), 1050);
    }

    #[test]
    fn test_rotation() {
        assert_eq!(degrees_to_rot(90.0), 5_400_000);
        assert_eq!(degrees_to_rot(-90.0), 16_200_000);
        assert_eq!(degrees_to_rot(360.0), 0);
    }
}
