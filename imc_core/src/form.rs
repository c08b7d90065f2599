//! Form input model.
//!
//! The form offers bounded numeric entry per unit system. Values outside
//! a field's range are clamped into it. A height that is zero, negative or
//! not a number is left alone so the classifier reports it as invalid
//! instead of silently computing a BMI for the minimum height.

use crate::{Gender, Measurement, UnitSystem};
use serde::Serialize;

/// Inclusive range and default of one numeric form field
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl FieldBounds {
    const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// Clamp into range; non-finite input falls back to the default
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.default
        }
    }

    /// False for NaN as well as out-of-range values
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const METRIC_WEIGHT: FieldBounds = FieldBounds::new(1.0, 500.0, 70.0);
pub const METRIC_HEIGHT: FieldBounds = FieldBounds::new(0.5, 2.5, 1.75);
pub const IMPERIAL_WEIGHT: FieldBounds = FieldBounds::new(2.0, 1100.0, 154.0);
pub const IMPERIAL_HEIGHT: FieldBounds = FieldBounds::new(20.0, 100.0, 69.0);

pub const AGE_MIN: u8 = 5;
pub const AGE_MAX: u8 = 120;
pub const AGE_DEFAULT: u8 = 30;

impl UnitSystem {
    /// Weight field range in this unit system
    pub fn weight_bounds(self) -> FieldBounds {
        match self {
            UnitSystem::Metric => METRIC_WEIGHT,
            UnitSystem::Imperial => IMPERIAL_WEIGHT,
        }
    }

    /// Height field range in this unit system
    pub fn height_bounds(self) -> FieldBounds {
        match self {
            UnitSystem::Metric => METRIC_HEIGHT,
            UnitSystem::Imperial => IMPERIAL_HEIGHT,
        }
    }
}

/// Everything one submission of the form carries
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeasurementForm {
    pub unit_system: UnitSystem,
    /// kg (metric, 1-500) or lb (imperial, 2-1100)
    pub weight: f64,
    /// m (metric, 0.5-2.5) or in (imperial, 20-100)
    pub height: f64,
    /// 5-120
    pub age: u8,
    pub gender: Gender,
}

impl MeasurementForm {
    /// Form pre-filled with the field defaults of a unit system
    pub fn with_defaults(unit_system: UnitSystem) -> Self {
        Self {
            unit_system,
            weight: unit_system.weight_bounds().default,
            height: unit_system.height_bounds().default,
            age: AGE_DEFAULT,
            gender: Gender::default(),
        }
    }

    /// Copy with every numeric field forced into its range
    pub fn clamped(&self) -> Self {
        let weight_bounds = self.unit_system.weight_bounds();
        let height_bounds = self.unit_system.height_bounds();

        let weight = weight_bounds.clamp(self.weight);
        if !weight_bounds.contains(self.weight) {
            tracing::warn!(
                "Weight {} {} out of range, using {}",
                self.weight,
                self.unit_system.weight_unit(),
                weight
            );
        }

        let mut height = self.height;
        if height.is_finite() && height > 0.0 && !height_bounds.contains(height) {
            height = height_bounds.clamp(height);
            tracing::warn!(
                "Height {} {} out of range, using {}",
                self.height,
                self.unit_system.height_unit(),
                height
            );
        }

        let age = self.age.clamp(AGE_MIN, AGE_MAX);
        if age != self.age {
            tracing::warn!("Age {} out of range, using {}", self.age, age);
        }

        Self {
            unit_system: self.unit_system,
            weight,
            height,
            age,
            gender: self.gender,
        }
    }

    pub fn into_measurement(self) -> Measurement {
        Measurement {
            unit_system: self.unit_system,
            weight: self.weight,
            height: self.height,
            age: self.age,
            gender: self.gender,
        }
    }
}

impl Default for MeasurementForm {
    fn default() -> Self {
        Self::with_defaults(UnitSystem::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_unit() {
        let metric = MeasurementForm::with_defaults(UnitSystem::Metric);
        assert_eq!((metric.weight, metric.height, metric.age), (70.0, 1.75, 30));

        let imperial = MeasurementForm::with_defaults(UnitSystem::Imperial);
        assert_eq!((imperial.weight, imperial.height), (154.0, 69.0));
        assert_eq!(imperial.gender, Gender::Unspecified);
    }

    #[test]
    fn test_clamp_into_bounds() {
        let form = MeasurementForm {
            unit_system: UnitSystem::Metric,
            weight: 900.0,
            height: 0.1,
            age: 2,
            gender: Gender::Female,
        };
        let clamped = form.clamped();
        assert_eq!(clamped.weight, 500.0);
        assert_eq!(clamped.height, 0.5);
        assert_eq!(clamped.age, AGE_MIN);
        assert_eq!(clamped.gender, Gender::Female);
    }

    #[test]
    fn test_clamp_uses_unit_bounds() {
        let form = MeasurementForm {
            unit_system: UnitSystem::Imperial,
            weight: 1.0,
            height: 150.0,
            age: 200,
            gender: Gender::Other,
        };
        let clamped = form.clamped();
        assert_eq!(clamped.weight, 2.0);
        assert_eq!(clamped.height, 100.0);
        assert_eq!(clamped.age, AGE_MAX);
    }

    #[test]
    fn test_in_range_values_untouched() {
        let form = MeasurementForm {
            unit_system: UnitSystem::Metric,
            weight: 82.4,
            height: 1.81,
            age: 45,
            gender: Gender::Male,
        };
        assert_eq!(form.clamped(), form);
    }

    #[test]
    fn test_non_finite_weight_falls_back_to_default() {
        let form = MeasurementForm {
            weight: f64::NAN,
            ..MeasurementForm::default()
        };
        assert_eq!(form.clamped().weight, METRIC_WEIGHT.default);
    }

    #[test]
    fn test_invalid_height_left_for_classifier() {
        for height in [0.0, -1.75] {
            let form = MeasurementForm {
                height,
                ..MeasurementForm::default()
            };
            assert_eq!(form.clamped().height, height);
        }
        let form = MeasurementForm {
            height: f64::NAN,
            ..MeasurementForm::default()
        };
        assert!(form.clamped().height.is_nan());
    }

    #[test]
    fn test_contains_matches_clamp() {
        for value in [0.5, 0.49, 1.75, 2.5, 2.51, f64::NAN, f64::INFINITY] {
            let unchanged = METRIC_HEIGHT.clamp(value).to_bits() == value.to_bits();
            assert_eq!(METRIC_HEIGHT.contains(value), unchanged, "value {}", value);
        }
    }

    #[test]
    fn test_bounds_contain_defaults() {
        for unit in UnitSystem::ALL {
            let w = unit.weight_bounds();
            let h = unit.height_bounds();
            assert!(w.contains(w.default));
            assert!(h.contains(h.default));
            assert!(h.min > 0.0);
        }
    }
}
