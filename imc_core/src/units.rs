//! Unit normalization.
//!
//! Converts form input in either unit system into kilograms and meters.

use crate::{CanonicalMeasurement, DomainError, UnitSystem};

/// Kilograms per international avoirdupois pound
pub const KG_PER_LB: f64 = 0.45359237;

/// Meters per international inch
pub const M_PER_IN: f64 = 0.0254;

/// Convert a weight/height pair into canonical units.
///
/// Metric values pass through unchanged. Range limits are the form's
/// concern; the only check here is that the height can be divided by.
pub fn normalize(
    weight: f64,
    height: f64,
    unit_system: UnitSystem,
) -> Result<CanonicalMeasurement, DomainError> {
    let (weight_kg, height_m) = match unit_system {
        UnitSystem::Metric => (weight, height),
        UnitSystem::Imperial => (weight * KG_PER_LB, height * M_PER_IN),
    };

    CanonicalMeasurement::new(weight_kg, height_m).inspect_err(|_| {
        tracing::warn!(
            "Rejected height {} {} (not a positive number)",
            height,
            unit_system.height_unit()
        );
    })
}
