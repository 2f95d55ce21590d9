//! Interpolation curves for menu animations.
//!
//! Each curve maps normalized time `t` in `[0, 1]` to an interpolation factor.
//! [`Easing::Overshoot`] deliberately leaves `[0, 1]` near the end so items
//! spring past their slot before settling.

use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::PI;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// Slow start and end. The toolkit default for unconfigured animations.
    #[default]
    #[strum(to_string = "accelerate-decelerate", serialize = "ease-in-out")]
    AccelerateDecelerate,
    #[strum(to_string = "decelerate", serialize = "ease-out")]
    Decelerate,
    /// Runs past the target and comes back. Strength is the interpolator tension.
    Overshoot,
}

/// An easing curve plus the tension used by [`Easing::Overshoot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolator {
    pub easing: Easing,
    pub tension: f64,
}

impl Interpolator {
    pub const DEFAULT_TENSION: f64 = 2.0;

    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            tension: Self::DEFAULT_TENSION,
        }
    }

    pub fn overshoot(tension: f64) -> Self {
        Self {
            easing: Easing::Overshoot,
            tension,
        }
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self.easing {
            Easing::Linear => t,
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Overshoot => {
                let t = t - 1.0;
                t * t * ((self.tension + 1.0) * t + self.tension) + 1.0
            }
        }
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new(Easing::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_endpoints_are_fixed() {
        for easing in Easing::iter() {
            let interp = Interpolator::new(easing);
            assert!(interp.evaluate(0.0).abs() < EPS, "{easing} at 0");
            assert!((interp.evaluate(1.0) - 1.0).abs() < EPS, "{easing} at 1");
        }
    }

    #[test]
    fn test_overshoot_passes_target() {
        let interp = Interpolator::overshoot(1.5);
        let peak = (1..100)
            .map(|i| interp.evaluate(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_accelerate_decelerate_is_symmetric() {
        let interp = Interpolator::new(Easing::AccelerateDecelerate);
        assert!((interp.evaluate(0.5) - 0.5).abs() < EPS);
        assert!(interp.evaluate(0.25) < 0.25);
    }

    #[test]
    fn test_easing_deserialization() {
        let cases = vec![
            ("\"linear\"", Easing::Linear),
            ("\"LINEAR\"", Easing::Linear),
            ("\"accelerate-decelerate\"", Easing::AccelerateDecelerate),
            ("\"ease-in-out\"", Easing::AccelerateDecelerate),
            ("\"Ease-Out\"", Easing::Decelerate),
            ("\"overshoot\"", Easing::Overshoot),
        ];

        for (json, expected) in cases {
            let deserialized: Easing = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_easing_serializes_canonical_name() {
        let json = serde_json::to_string(&Easing::AccelerateDecelerate).unwrap();
        assert_eq!(json, "\"accelerate-decelerate\"");
    }
}
