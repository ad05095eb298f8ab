use serde::{Deserialize, Serialize};

/// Interpolation between two values of the same type
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t as f32
    }
}

/// Convenience functions for common animations
pub fn ease_out_cubic(t: f64) -> f64 {
    EasingType::EaseOut.apply(t)
}

pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start.lerp(&end, t)
}

/// Easing curves for placement animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Smooth,
    /// Overshoots slightly before settling, for a "pop" effect
    Pop,
}

impl EasingType {
    /// Apply easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseIn => t * t * t,
            EasingType::EaseOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingType::Smooth => {
                // Smooth step (3t^2 - 2t^3)
                t * t * (3.0 - 2.0 * t)
            }
            EasingType::Pop => {
                if t < 0.8 {
                    let adjusted_t = t / 0.8;
                    1.1 * adjusted_t * adjusted_t * (3.0 - 2.0 * adjusted_t) // Overshoot to 110%
                } else {
                    let adjusted_t = (t - 0.8) / 0.2;
                    1.1 - 0.1 * adjusted_t * adjusted_t // Settle back to 100%
                }
            }
        }
    }
}

impl Default for EasingType {
    fn default() -> Self {
        Self::EaseOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_functions() {
        assert_eq!(EasingType::Linear.apply(0.0), 0.0);
        assert_eq!(EasingType::Linear.apply(1.0), 1.0);
        assert_eq!(EasingType::Linear.apply(0.5), 0.5);

        let ease_out = EasingType::EaseOut.apply(0.5);
        assert!(ease_out > 0.5); // Should be faster than linear
        assert!(ease_out_cubic(0.5) == ease_out);
    }

    #[test]
    fn test_all_easings_hit_endpoints() {
        for easing in [
            EasingType::Linear,
            EasingType::EaseIn,
            EasingType::EaseOut,
            EasingType::EaseInOut,
            EasingType::Smooth,
            EasingType::Pop,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-12, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{:?} at 1", easing);
            // Out-of-range input is clamped
            assert_eq!(easing.apply(2.0), easing.apply(1.0));
        }
    }

    #[test]
    fn test_pop_overshoots() {
        assert!(EasingType::Pop.apply(0.8) > 1.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert_eq!(1.0f32.lerp(&0.0, 0.5), 0.5);
    }
}
