//! Draws burst particles onto the terminal grid
//!
//! Particle geometry is in CSS pixels; one cell is taken as 8px wide and
//! 16px tall. Opacity is faked by blending towards whatever background the
//! cell already has.

use contact_core::effects::ParticleFrame;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::ui::colors::{self, blend, from_color, to_color};

pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Glyph for a particle of rendered size `px`
pub fn glyph_for(px: f64) -> &'static str {
    if px < 4.0 {
        "·"
    } else if px < 6.5 {
        "•"
    } else {
        "●"
    }
}

/// Overlay of particle frames centered on `origin`
pub struct BurstLayer<'a> {
    frames: &'a [ParticleFrame],
    origin: (u16, u16),
}

impl<'a> BurstLayer<'a> {
    pub fn new(frames: &'a [ParticleFrame], origin: (u16, u16)) -> Self {
        Self { frames, origin }
    }

    /// Cell a frame lands in, if it is inside `area`
    pub fn cell_for(&self, frame: &ParticleFrame, area: Rect) -> Option<(u16, u16)> {
        let x = self.origin.0 as f64 + (frame.x / CELL_WIDTH_PX).round();
        let y = self.origin.1 as f64 + (frame.y / CELL_HEIGHT_PX).round();
        if x < area.left() as f64
            || y < area.top() as f64
            || x >= area.right() as f64
            || y >= area.bottom() as f64
        {
            return None;
        }
        Some((x as u16, y as u16))
    }
}

impl Widget for BurstLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for frame in self.frames {
            let Some(pos) = self.cell_for(frame, area) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut(pos) {
                let bg = from_color(cell.bg).unwrap_or(colors::NAVY);
                let fg = blend(frame.color, bg, frame.opacity);
                cell.set_symbol(glyph_for(frame.size * frame.scale));
                cell.set_fg(to_color(fg));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_core::effects::PALETTE;

    fn frame(x: f64, y: f64, opacity: f64) -> ParticleFrame {
        ParticleFrame {
            x,
            y,
            size: 8.0,
            rotation_deg: 0.0,
            scale: 1.0,
            opacity,
            color: PALETTE[0],
        }
    }

    #[test]
    fn test_pixels_map_to_cells() {
        let frames = [frame(16.0, -32.0, 1.0)];
        let layer = BurstLayer::new(&frames, (10, 10));
        let area = Rect::new(0, 0, 40, 20);
        assert_eq!(layer.cell_for(&frames[0], area), Some((12, 8)));
        assert_eq!(layer.cell_for(&frame(-200.0, 0.0, 1.0), area), None);
    }

    #[test]
    fn test_render_blends_by_opacity() {
        let frames = [frame(0.0, 0.0, 1.0), frame(8.0, 0.0, 0.0)];
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        BurstLayer::new(&frames, (4, 1)).render(area, &mut buf);

        assert_eq!(buf[(4u16, 1u16)].symbol(), "●");
        assert_eq!(buf[(4u16, 1u16)].fg, to_color(PALETTE[0]));
        // Fully faded particle takes the fallback background color
        assert_eq!(buf[(5u16, 1u16)].fg, to_color(colors::NAVY));
    }

    #[test]
    fn test_glyph_sizes() {
        assert_eq!(glyph_for(3.0), "·");
        assert_eq!(glyph_for(5.0), "•");
        assert_eq!(glyph_for(9.0), "●");
    }
}
