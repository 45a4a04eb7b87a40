//! Easing curves and interpolation helpers

/// Cubic ease-out: fast start, gentle landing
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Hermite smoothstep on [0, 1]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// The curve used by the expansion transition: smoothstep, then ease-out
pub fn expand_ease(t: f32) -> f32 {
    ease_out_cubic(smoothstep(t.clamp(0.0, 1.0)))
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Component-wise lerp of a 2D point
pub fn lerp2(a: (f32, f32), b: (f32, f32), t: f32) -> (f32, f32) {
    (lerp(a.0, b.0, t), lerp(a.1, b.1, t))
}

/// Per-channel colour lerp, truncating like the integer maths it replaces
pub fn lerp_rgb(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let channel = |i: usize| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * t) as u8;
    [channel(0), channel(1), channel(2)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(expand_ease(0.0), 0.0);
        assert_eq!(expand_ease(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_eq!(ease_out_cubic(0.5), 0.875);
    }

    #[test]
    fn test_expand_ease_is_monotonic() {
        let mut previous = expand_ease(0.0);
        for i in 1..=100 {
            let value = expand_ease(i as f32 / 100.0);
            assert!(value >= previous, "ease dipped at step {}", i);
            previous = value;
        }
    }

    #[test]
    fn test_expand_ease_clamps_input() {
        assert_eq!(expand_ease(-0.5), 0.0);
        assert_eq!(expand_ease(1.5), 1.0);
    }

    #[test]
    fn test_lerp_rgb() {
        assert_eq!(lerp_rgb([18, 18, 30], [255, 200, 60], 0.0), [18, 18, 30]);
        assert_eq!(lerp_rgb([18, 18, 30], [255, 200, 60], 1.0), [255, 200, 60]);
        assert_eq!(lerp_rgb([0, 100, 200], [100, 0, 200], 0.5), [50, 50, 200]);
    }
}
