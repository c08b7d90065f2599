//! Core domain types for the BMI simulator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Unit systems and gender options offered by the form
//! - Raw and canonical measurements
//! - BMI categories and computed results
//! - History records kept for one session

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Form Options
// ============================================================================

/// Unit system the weight and height were entered in
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Kilograms and meters
    #[default]
    Metric,
    /// Pounds and inches
    Imperial,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 2] = [UnitSystem::Metric, UnitSystem::Imperial];

    /// Label shown in the unit selector and written to the `unidade` column
    pub fn label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "Métrico (kg / m)",
            UnitSystem::Imperial => "Imperial (lb / in)",
        }
    }

    pub fn weight_unit(self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }

    pub fn height_unit(self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "in",
        }
    }

    /// Inverse of [`UnitSystem::label`]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.label() == label)
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UnitSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(unit) = Self::from_label(s) {
            return Ok(unit);
        }
        match s.trim().to_lowercase().as_str() {
            "metric" | "metrico" | "métrico" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            other => Err(Error::Parse(format!("unknown unit system: {}", other))),
        }
    }
}

/// Gender options offered by the form
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Unspecified,
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Unspecified,
        Gender::Male,
        Gender::Female,
        Gender::Other,
    ];

    /// Label shown in the selector and written to the `genero` column
    pub fn label(self) -> &'static str {
        match self {
            Gender::Unspecified => "Prefiro não dizer",
            Gender::Male => "Masculino",
            Gender::Female => "Feminino",
            Gender::Other => "Outro",
        }
    }

    /// Inverse of [`Gender::label`]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == label)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(gender) = Self::from_label(s) {
            return Ok(gender);
        }
        match s.trim().to_lowercase().as_str() {
            "unspecified" | "nao-informado" | "não-informado" | "-" => Ok(Gender::Unspecified),
            "male" | "masculino" | "m" => Ok(Gender::Male),
            "female" | "feminino" | "f" => Ok(Gender::Female),
            "other" | "outro" | "o" => Ok(Gender::Other),
            other => Err(Error::Parse(format!("unknown gender: {}", other))),
        }
    }
}

// ============================================================================
// Measurements
// ============================================================================

/// Raw user input for one submission, in the units it was entered in
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Measurement {
    pub unit_system: UnitSystem,
    pub weight: f64,
    pub height: f64,
    pub age: u8,
    pub gender: Gender,
}

/// Weight in kilograms and height in meters
///
/// Only constructed through [`crate::units::normalize`] or
/// [`CanonicalMeasurement::new`], both of which reject a non-positive height.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct CanonicalMeasurement {
    weight_kg: f64,
    height_m: f64,
}

impl CanonicalMeasurement {
    /// Build from values already in kilograms and meters
    pub fn new(weight_kg: f64, height_m: f64) -> Result<Self, crate::DomainError> {
        if !(height_m.is_finite() && height_m > 0.0) {
            return Err(crate::DomainError::InvalidHeight { height: height_m });
        }
        Ok(Self {
            weight_kg,
            height_m,
        })
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_m(&self) -> f64 {
        self.height_m
    }

    /// Copy with both values rounded to two decimals, as stored in history.
    /// A height that would round to zero keeps its full value.
    pub fn rounded(&self) -> Self {
        let height_m = round_half_even(self.height_m, 2);
        Self {
            weight_kg: round_half_even(self.weight_kg, 2),
            height_m: if height_m > 0.0 { height_m } else { self.height_m },
        }
    }
}

// ============================================================================
// Categories and Results
// ============================================================================

/// The six ordered BMI health categories
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Underweight,
    NormalWeight,
    Overweight,
    ObesityClass1,
    ObesityClass2,
    ObesityClass3,
}

/// Upper bounds (exclusive) of every category but the last
pub const CATEGORY_THRESHOLDS: [f64; 5] = [18.5, 25.0, 30.0, 35.0, 40.0];

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Underweight,
        Category::NormalWeight,
        Category::Overweight,
        Category::ObesityClass1,
        Category::ObesityClass2,
        Category::ObesityClass3,
    ];

    /// Map a BMI value to its category.
    ///
    /// Thresholds are tested in ascending order with `bmi < threshold`, so
    /// each band is a half-open interval and a value equal to a threshold
    /// belongs to the band above it.
    pub fn from_bmi(bmi: f64) -> Self {
        CATEGORY_THRESHOLDS
            .iter()
            .position(|&threshold| bmi < threshold)
            .map_or(Category::ObesityClass3, |idx| Self::ALL[idx])
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Underweight => "Abaixo do peso",
            Category::NormalWeight => "Peso normal",
            Category::Overweight => "Sobrepeso",
            Category::ObesityClass1 => "Obesidade grau I",
            Category::ObesityClass2 => "Obesidade grau II",
            Category::ObesityClass3 => "Obesidade grau III",
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            Category::Underweight => "Underweight",
            Category::NormalWeight => "Normal weight",
            Category::Overweight => "Overweight",
            Category::ObesityClass1 => "Obesity class I",
            Category::ObesityClass2 => "Obesity class II",
            Category::ObesityClass3 => "Obesity class III",
        }
    }

    /// Badge color as `#rrggbb`
    pub fn color(self) -> &'static str {
        match self {
            Category::Underweight => "#60a5fa",
            Category::NormalWeight => "#34d399",
            Category::Overweight => "#f59e0b",
            Category::ObesityClass1 => "#f97316",
            Category::ObesityClass2 => "#ef4444",
            Category::ObesityClass3 => "#b91c1c",
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Category::Underweight => {
                "Considere aumentar a ingestão calórica e consultar um profissional."
            }
            Category::NormalWeight => "Parabéns, mantenha hábitos saudáveis!",
            Category::Overweight => "Avalie alimentação e atividade física regulares.",
            Category::ObesityClass1 => "Procure acompanhamento médico e nutricional.",
            Category::ObesityClass2 => "Atenção médica recomendada; plano de saúde/controle.",
            Category::ObesityClass3 => "Procure atendimento médico especializado.",
        }
    }

    /// BMI range covered by this category as `(lower inclusive, upper exclusive)`
    pub fn range(self) -> (Option<f64>, Option<f64>) {
        let idx = self as usize;
        let lower = idx.checked_sub(1).map(|i| CATEGORY_THRESHOLDS[i]);
        let upper = CATEGORY_THRESHOLDS.get(idx).copied();
        (lower, upper)
    }

    /// Inverse of [`Category::label`]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of classifying one canonical measurement
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BmiResult {
    /// BMI rounded to one decimal place (half-to-even)
    pub bmi: f64,
    pub category: Category,
    pub label: &'static str,
    pub color: &'static str,
    pub advice: &'static str,
}

impl BmiResult {
    /// Assemble a result for an already rounded BMI and its category
    pub fn new(bmi: f64, category: Category) -> Self {
        Self {
            bmi,
            category,
            label: category.label(),
            color: category.color(),
            advice: category.advice(),
        }
    }
}

// ============================================================================
// History
// ============================================================================

/// Immutable snapshot of one successful submission
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct HistoryRecord {
    measurement: Measurement,
    canonical: CanonicalMeasurement,
    result: BmiResult,
}

impl HistoryRecord {
    /// Canonical values are kept rounded to two decimals
    pub fn new(measurement: Measurement, canonical: CanonicalMeasurement, result: BmiResult) -> Self {
        Self {
            measurement,
            canonical: canonical.rounded(),
            result,
        }
    }

    pub fn measurement(&self) -> &Measurement {
        &self.measurement
    }

    pub fn canonical(&self) -> &CanonicalMeasurement {
        &self.canonical
    }

    pub fn result(&self) -> &BmiResult {
        &self.result
    }

    pub fn bmi(&self) -> f64 {
        self.result.bmi
    }
}

/// Round to `decimals` places, ties to even
///
/// Rounds the exact binary value to the nearest decimal, so 18.85 (stored
/// as 18.850000000000001) becomes 18.9. Only exact ties such as 22.25 go
/// to the even digit.
pub fn round_half_even(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value)
        .parse::<f64>()
        .unwrap_or(value)
}
