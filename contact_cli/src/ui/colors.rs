//! Brand colors and blending helpers for the terminal renderer
//!
//! All blending happens on [`Rgb`] and is converted to a ratatui color at
//! the last moment, so terminals without truecolor still get the nearest
//! palette entry from crossterm.

use contact_core::effects::burst::PALETTE;
use contact_core::Rgb;
use ratatui::style::Color;

pub const NAVY: Rgb = Rgb(0x00, 0x00, 0x52);
pub const NAVY_DEEP: Rgb = Rgb(0x00, 0x00, 0x3A);
pub const GREEN: Rgb = PALETTE[0];
pub const TEAL: Rgb = PALETTE[1];
pub const BLUE: Rgb = PALETTE[2];
pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);

pub const SLATE_200: Rgb = Rgb(0xE2, 0xE8, 0xF0);
pub const SLATE_400: Rgb = Rgb(0x94, 0xA3, 0xB8);
pub const SLATE_500: Rgb = Rgb(0x64, 0x74, 0x8B);
pub const SLATE_600: Rgb = Rgb(0x47, 0x55, 0x69);
pub const SLATE_900: Rgb = Rgb(0x0F, 0x17, 0x2A);
pub const SUCCESS: Rgb = Rgb(0x16, 0xA3, 0x4A);
pub const FAILURE: Rgb = Rgb(0xDC, 0x26, 0x26);

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn from_color(color: Color) -> Option<Rgb> {
    match color {
        Color::Rgb(r, g, b) => Some(Rgb(r, g, b)),
        Color::White => Some(WHITE),
        Color::Black => Some(Rgb(0, 0, 0)),
        _ => None,
    }
}

/// `fg` laid over `bg` at `opacity`
pub fn blend(fg: Rgb, bg: Rgb, opacity: f64) -> Rgb {
    bg.lerp(fg, opacity)
}

/// Evenly spaced multi-stop gradient sampled at `t` in `[0, 1]`
pub fn gradient(stops: &[Rgb], t: f64) -> Rgb {
    match stops {
        [] => WHITE,
        [only] => *only,
        _ => {
            let t = t.clamp(0.0, 1.0);
            let segments = (stops.len() - 1) as f64;
            let scaled = t * segments;
            let index = (scaled.floor() as usize).min(stops.len() - 2);
            stops[index].lerp(stops[index + 1], scaled - index as f64)
        }
    }
}

/// Position of column `x` across a span of `width` cells, in `[0, 1]`
pub fn span_fraction(x: u16, width: u16) -> f64 {
    if width <= 1 {
        0.0
    } else {
        x as f64 / (width - 1) as f64
    }
}

/// Page backdrop: a navy diagonal with a green glow top-left and a blue
/// glow bottom-right
pub fn page_background(x: u16, y: u16, width: u16, height: u16) -> Rgb {
    let fx = span_fraction(x, width);
    let fy = span_fraction(y, height);

    let base = gradient(&[NAVY, NAVY_DEEP], (fx + fy) / 2.0);

    let glow = |cx: f64, cy: f64| {
        // Terminal cells are about twice as tall as wide
        let d = ((fx - cx).powi(2) + ((fy - cy) * 0.5).powi(2)).sqrt();
        (1.0 - d / 0.6).max(0.0)
    };

    let with_green = blend(GREEN, base, 0.08 * glow(0.1, 0.0));
    blend(BLUE, with_green, 0.12 * glow(0.9, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(gradient(&[GREEN, BLUE], 0.0), GREEN);
        assert_eq!(gradient(&[GREEN, BLUE], 1.0), BLUE);
        assert_eq!(gradient(&[GREEN, TEAL, BLUE], 0.5), TEAL);
        assert_eq!(gradient(&[NAVY], 0.3), NAVY);
    }

    #[test]
    fn test_blend() {
        assert_eq!(blend(WHITE, NAVY, 0.0), NAVY);
        assert_eq!(blend(WHITE, NAVY, 1.0), WHITE);
    }

    #[test]
    fn test_span_fraction() {
        assert_eq!(span_fraction(0, 1), 0.0);
        assert_eq!(span_fraction(9, 10), 1.0);
    }

    #[test]
    fn test_page_background_stays_dark() {
        for (x, y) in [(0, 0), (79, 39), (40, 20)] {
            let Rgb(r, g, b) = page_background(x, y, 80, 40);
            assert!(r < 40 && g < 60 && b <= 0x70, "({x},{y}) -> {r},{g},{b}");
        }
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(to_color(GREEN), Color::Rgb(0x27, 0xFF, 0x00));
        assert_eq!(from_color(Color::Rgb(1, 2, 3)), Some(Rgb(1, 2, 3)));
        assert_eq!(from_color(Color::Reset), None);
    }
}
