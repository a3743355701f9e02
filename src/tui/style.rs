//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

/// Irradiance line color.
pub const IRRADIANCE_COLOR: Color = Color::Cyan;
/// Power line color.
pub const POWER_COLOR: Color = Color::Rgb(255, 165, 0);
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Computes Y-axis bounds from chart data with 10% headroom.
///
/// The lower bound stays at zero unless the data goes negative.
pub fn auto_bounds_y(data: &[(f64, f64)]) -> [f64; 2] {
    let ys = data.iter().map(|&(_, y)| y).filter(|y| y.is_finite());
    let (min, max) = ys.fold((0.0_f64, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    if !max.is_finite() {
        return [0.0, 1.0];
    }
    let range = (max - min).max(1.0);
    [min, max + range * 0.1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data_has_unit_bounds() {
        assert_eq!(auto_bounds_y(&[]), [0.0, 1.0]);
    }

    #[test]
    fn headroom_above_peak() {
        let b = auto_bounds_y(&[(0.0, 0.0), (1.0, 800.0)]);
        assert_eq!(b[0], 0.0);
        assert!((b[1] - 880.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_values_are_skipped() {
        let b = auto_bounds_y(&[(0.0, f64::NAN), (1.0, 10.0)]);
        assert!(b[1].is_finite());
    }
}
