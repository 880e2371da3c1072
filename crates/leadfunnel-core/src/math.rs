use glam::Vec2;

/// Hash float to [0,1)
pub fn hash11(p: f32) -> f32 {
    let mut p = (p * 0.1031).fract();
    p *= p + 33.33;
    p *= p + p;
    p.fract()
}

/// Smooth Hermite interpolation between `edge0` and `edge1`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Position of `x` inside `[start, end)` as a fraction in [0,1].
///
/// Returns 0 for an empty range so callers never see NaN.
pub fn unlerp(start: f32, end: f32, x: f32) -> f32 {
    let span = end - start;
    if span.abs() < f32::EPSILON {
        return 0.0;
    }
    ((x - start) / span).clamp(0.0, 1.0)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Gravity-like acceleration curve: `t^exponent`.
pub fn ease_in_pow(t: f32, exponent: f32) -> f32 {
    t.clamp(0.0, 1.0).powf(exponent)
}

/// Decelerating curve: `1 - (1 - t)^exponent`.
pub fn ease_out_pow(t: f32, exponent: f32) -> f32 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powf(exponent)
}

/// Clamp a progress scalar to [0,1], mapping NaN to 0.
pub fn clamp_progress(p: f32) -> f32 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlerp_empty_range() {
        assert_eq!(unlerp(0.5, 0.5, 0.7), 0.0);
    }

    #[test]
    fn test_ease_out_pow_endpoints() {
        assert_eq!(ease_out_pow(0.0, 2.5), 0.0);
        assert_eq!(ease_out_pow(1.0, 2.5), 1.0);
    }

    #[test]
    fn test_clamp_progress_nan() {
        assert_eq!(clamp_progress(f32::NAN), 0.0);
        assert_eq!(clamp_progress(-3.0), 0.0);
        assert_eq!(clamp_progress(7.0), 1.0);
        assert_eq!(clamp_progress(f32::INFINITY), 1.0);
    }
}
