//! One user's interactive session.
//!
//! A `Session` owns its history outright; callers create one per user and
//! pass it to whatever handles that user's form submissions.

use crate::history::{HistoryOrder, SessionHistory};
use crate::{
    classify, normalize, BmiResult, Config, DomainError, HistoryRecord, MeasurementForm, Result,
};

/// Outcome of a successful form submission
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    /// The form after range clamping
    pub form: MeasurementForm,
    pub result: BmiResult,
    /// Position of the new record in append order, starting at 1
    pub index: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    history: SessionHistory,
}

impl Session {
    /// Empty session with an unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty session honouring the configured history limit
    pub fn from_config(config: &Config) -> Self {
        Self {
            history: SessionHistory::with_capacity_limit(config.history.max_records),
        }
    }

    /// Clamp, normalize, classify and record one form submission.
    ///
    /// On error nothing is appended.
    pub fn submit(&mut self, form: &MeasurementForm) -> std::result::Result<Submission, DomainError> {
        let form = form.clamped();
        let canonical = normalize(form.weight, form.height, form.unit_system)?;
        let result = classify(canonical.weight_kg(), canonical.height_m())?;

        let record = HistoryRecord::new(form.clone().into_measurement(), canonical, result.clone());
        self.history.append(record);

        tracing::debug!(
            "Submission: IMC {} ({}) from {} {} / {} {}",
            result.bmi,
            result.label,
            form.weight,
            form.unit_system.weight_unit(),
            form.height,
            form.unit_system.height_unit()
        );

        Ok(Submission {
            form,
            result,
            index: self.history.len(),
        })
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn export_csv(&self, order: HistoryOrder) -> Result<Vec<u8>> {
        self.history.export_csv(order)
    }
}
