//! BMI computation and classification.

use crate::types::round_half_even;
use crate::{BmiResult, Category, DomainError};

/// Compute the BMI for a weight in kilograms and a height in meters.
///
/// The reported value is rounded to one decimal, ties to even. The
/// category is picked from the unrounded value, so a BMI of 24.96 reads
/// "25.0" but is still "Peso normal".
pub fn classify(weight_kg: f64, height_m: f64) -> Result<BmiResult, DomainError> {
    if !(height_m.is_finite() && height_m > 0.0) {
        return Err(DomainError::InvalidHeight { height: height_m });
    }

    let bmi = weight_kg / (height_m * height_m);
    let category = Category::from_bmi(bmi);

    tracing::debug!("BMI {:.3} classified as {:?}", bmi, category);

    Ok(BmiResult::new(round_half_even(bmi, 1), category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{normalize, KG_PER_LB, M_PER_IN};
    use crate::UnitSystem;

    #[test]
    fn test_metric_example() {
        let result = classify(70.0, 1.75).unwrap();
        assert_eq!(result.bmi, 22.9);
        assert_eq!(result.category, Category::NormalWeight);
        assert_eq!(result.label, "Peso normal");
        assert_eq!(result.color, "#34d399");
    }

    #[test]
    fn test_imperial_example_rounds_half_even() {
        let canonical = normalize(154.0, 69.0, UnitSystem::Imperial).unwrap();
        let result = classify(canonical.weight_kg(), canonical.height_m()).unwrap();
        assert_eq!(result.bmi, 22.7);
        assert_eq!(result.category, Category::NormalWeight);
    }

    #[test]
    fn test_imperial_matches_direct_metric() {
        for (lb, inches) in [(154.0, 69.0), (90.0, 60.0), (300.0, 72.5), (1100.0, 100.0)] {
            let canonical = normalize(lb, inches, UnitSystem::Imperial).unwrap();
            let via_normalizer = classify(canonical.weight_kg(), canonical.height_m()).unwrap();
            let direct = classify(lb * KG_PER_LB, inches * M_PER_IN).unwrap();
            assert_eq!(via_normalizer, direct);
        }
    }

    #[test]
    fn test_metric_bmi_is_rounded_quotient() {
        for (w, h, bmi) in [
            (50.0, 1.6, 19.5),
            (82.3, 1.81, 25.1),
            (120.0, 1.7, 41.5),
            (45.5, 1.55, 18.9),
            (500.0, 2.5, 80.0),
        ] {
            assert_eq!(classify(w, h).unwrap().bmi, bmi);
        }
    }

    #[test]
    fn test_rounding_uses_exact_quotient() {
        // 18.850000000000001 and 18.949999999999999 as doubles
        assert_eq!(classify(75.4, 2.0).unwrap().bmi, 18.9);
        assert_eq!(classify(75.8, 2.0).unwrap().bmi, 18.9);
        // Exact tie goes to the even digit
        assert_eq!(classify(89.0, 2.0).unwrap().bmi, 22.2);
    }

    #[test]
    fn test_exact_boundaries() {
        assert_eq!(classify(18.5, 1.0).unwrap().category, Category::NormalWeight);
        assert_eq!(classify(25.0, 1.0).unwrap().category, Category::Overweight);
        assert_eq!(classify(100.0, 2.0).unwrap().category, Category::Overweight);
        assert_eq!(classify(120.0, 2.0).unwrap().category, Category::ObesityClass1);
        assert_eq!(classify(140.0, 2.0).unwrap().category, Category::ObesityClass2);
        assert_eq!(classify(40.0, 1.0).unwrap().category, Category::ObesityClass3);
    }

    #[test]
    fn test_category_uses_unrounded_value() {
        // 24.96 displays as 25.0 but stays in the normal band
        let result = classify(24.96, 1.0).unwrap();
        assert_eq!(result.bmi, 25.0);
        assert_eq!(result.category, Category::NormalWeight);
    }

    #[test]
    fn test_invalid_height() {
        assert_eq!(
            classify(70.0, 0.0).unwrap_err(),
            DomainError::InvalidHeight { height: 0.0 }
        );
        assert!(classify(70.0, -1.75).is_err());
        assert!(classify(70.0, f64::INFINITY).is_err());
    }
}
