//! CSS-style cubic-bezier timing functions

/// A `cubic-bezier(x1, y1, x2, y2)` timing curve anchored at (0,0) and (1,1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    cx: f64,
    bx: f64,
    ax: f64,
    cy: f64,
    by: f64,
    ay: f64,
}

impl CubicBezier {
    /// `cubic-bezier(.21, 1, .29, 1)`, the particle flight curve
    pub const BURST: CubicBezier = CubicBezier::new(0.21, 1.0, 0.29, 1.0);

    /// CSS `ease-out`
    pub const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self { cx, bx, ax, cy, by, ay }
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Curve parameter whose x equals `x`
    fn solve_t(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        let mut t = x;
        for _ in 0..8 {
            let err = self.sample_x(t) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let d = self.sample_dx(t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        // Newton stalled, fall back to bisection
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while lo < hi {
            let value = self.sample_x(t);
            if (value - x).abs() < EPSILON {
                break;
            }
            if x > value {
                lo = t;
            } else {
                hi = t;
            }
            let next = (hi - lo) * 0.5 + lo;
            if (next - t).abs() < EPSILON {
                break;
            }
            t = next;
        }
        t
    }

    /// Eased progress for linear progress `x` (clamped to `[0, 1]`)
    pub fn ease(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        self.sample_y(self.solve_t(x))
    }
}
