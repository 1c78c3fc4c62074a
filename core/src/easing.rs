//! Timing curves for the shimmer sweep

/// Easing function mapping linear time (0-1) to sweep position (0-1)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// No easing: `t`
    Linear,
    /// Symmetric cubic S-curve
    EaseInOut,
    /// Material "fast out, slow in": cubic Bézier (0.4, 0.0, 0.2, 1.0)
    #[default]
    FastOutSlowIn,
    /// Arbitrary CSS-style cubic Bézier through (0,0), (x1,y1), (x2,y2), (1,1)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the curve. Input is clamped to 0.0-1.0.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// Parse from user input (`linear`, `ease-in-out`, `fast-out-slow-in`)
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "linear" => Some(Self::Linear),
            "ease-in-out" | "ease" => Some(Self::EaseInOut),
            "fast-out-slow-in" | "material" => Some(Self::FastOutSlowIn),
            _ => None,
        }
    }
}

/// One coordinate of a unit cubic Bézier with control values `a`, `b`
#[inline]
fn bezier_coord(a: f32, b: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
}

#[inline]
fn bezier_slope(a: f32, b: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
}

/// Solve x(s) = x for the curve parameter, then return y(s)
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton first, bisection if the slope flattens out
    let mut s = x;
    for _ in 0..8 {
        let err = bezier_coord(x1, x2, s) - x;
        if err.abs() < 1e-6 {
            return bezier_coord(y1, y2, s);
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = x;
    for _ in 0..32 {
        let value = bezier_coord(x1, x2, s);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier_coord(y1, y2, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for easing in [Easing::Linear, Easing::EaseInOut, Easing::FastOutSlowIn] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-3.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in [Easing::Linear, Easing::EaseInOut, Easing::FastOutSlowIn] {
            let mut last = 0.0;
            for i in 0..=200 {
                let v = easing.apply(i as f32 / 200.0);
                assert!(v + 1e-5 >= last, "{easing:?} dipped at step {i}");
                last = v;
            }
        }
    }

    #[test]
    fn fast_out_slow_in_leads_linear_at_midpoint() {
        let mid = Easing::FastOutSlowIn.apply(0.5);
        assert!(mid > 0.5 && mid < 0.9, "midpoint was {mid}");
    }

    #[test]
    fn linear_bezier_is_identity() {
        let curve = Easing::CubicBezier(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((curve.apply(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn parses_names() {
        assert_eq!(Easing::from_input("Linear"), Some(Easing::Linear));
        assert_eq!(
            Easing::from_input("fast_out_slow_in"),
            Some(Easing::FastOutSlowIn)
        );
        assert_eq!(Easing::from_input("bouncy"), None);
    }
}
