//! In-memory session history and its CSV export.
//!
//! The history lives only as long as the session that owns it. Records are
//! kept in append order; display code may ask for a BMI-sorted view
//! without touching that order.

use crate::{
    BmiResult, CanonicalMeasurement, Category, Error, HistoryRecord, Measurement, Result,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Default file name of the export artifact
pub const EXPORT_FILE_NAME: &str = "imc_historico.csv";

/// MIME type of the export artifact
pub const EXPORT_MIME: &str = "text/csv";

/// Row order used when listing or exporting records
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HistoryOrder {
    /// Order of submission
    #[default]
    Appended,
    /// Highest BMI first, ties kept in submission order
    BmiDesc,
}

/// A row in the CSV export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    pub idade: u8,
    pub genero: String,
    pub unidade: String,
    pub peso_input: f64,
    pub altura_input: f64,
    pub peso_kg: f64,
    pub altura_m: f64,
    pub imc: f64,
    pub categoria: String,
}

impl From<&HistoryRecord> for CsvRow {
    fn from(record: &HistoryRecord) -> Self {
        let measurement = record.measurement();
        CsvRow {
            idade: measurement.age,
            genero: measurement.gender.label().to_string(),
            unidade: measurement.unit_system.label().to_string(),
            peso_input: measurement.weight,
            altura_input: measurement.height,
            peso_kg: record.canonical().weight_kg(),
            altura_m: record.canonical().height_m(),
            imc: record.bmi(),
            categoria: record.result().label.to_string(),
        }
    }
}

impl TryFrom<CsvRow> for HistoryRecord {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let unit_system = crate::UnitSystem::from_label(&row.unidade)
            .ok_or_else(|| Error::Parse(format!("Invalid unidade: {}", row.unidade)))?;
        let gender = crate::Gender::from_label(&row.genero)
            .ok_or_else(|| Error::Parse(format!("Invalid genero: {}", row.genero)))?;
        let category = Category::from_label(&row.categoria)
            .ok_or_else(|| Error::Parse(format!("Invalid categoria: {}", row.categoria)))?;

        let measurement = Measurement {
            unit_system,
            weight: row.peso_input,
            height: row.altura_input,
            age: row.idade,
            gender,
        };
        let canonical = CanonicalMeasurement::new(row.peso_kg, row.altura_m)?;

        Ok(HistoryRecord::new(
            measurement,
            canonical,
            BmiResult::new(row.imc, category),
        ))
    }
}

/// Ordered, append-only record list for one session
#[derive(Clone, Debug, Default)]
pub struct SessionHistory {
    records: Vec<HistoryRecord>,
    max_records: Option<usize>,
}

impl SessionHistory {
    /// Unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `max_records` entries; the oldest is
    /// evicted when a new one arrives at capacity. Zero means unbounded.
    pub fn with_capacity_limit(max_records: usize) -> Self {
        Self {
            records: Vec::new(),
            max_records: (max_records > 0).then_some(max_records),
        }
    }

    pub fn append(&mut self, record: HistoryRecord) {
        if let Some(max) = self.max_records {
            if self.records.len() >= max {
                let evicted = self.records.remove(0);
                tracing::debug!(
                    "History full ({} records), evicted oldest (IMC {})",
                    max,
                    evicted.bmi()
                );
            }
        }
        self.records.push(record);
        tracing::debug!("Appended record #{} to history", self.records.len());
    }

    pub fn clear(&mut self) {
        let count = self.records.len();
        self.records.clear();
        tracing::debug!("Cleared {} records from history", count);
    }

    /// All records in append order
    pub fn snapshot(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Display copy sorted by BMI, highest first
    pub fn sorted_by_bmi_desc(&self) -> Vec<&HistoryRecord> {
        let mut sorted: Vec<&HistoryRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| b.bmi().total_cmp(&a.bmi()));
        sorted
    }

    /// Records in the requested order
    pub fn ordered(&self, order: HistoryOrder) -> Vec<&HistoryRecord> {
        match order {
            HistoryOrder::Appended => self.records.iter().collect(),
            HistoryOrder::BmiDesc => self.sorted_by_bmi_desc(),
        }
    }

    /// BMI values in append order, for the line chart
    pub fn bmi_series(&self) -> Vec<f64> {
        self.records.iter().map(HistoryRecord::bmi).collect()
    }

    /// Serialize every record as CSV, header row first
    pub fn export_csv(&self, order: HistoryOrder) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(Vec::new());

        // An empty history still exports the header row
        if self.records.is_empty() {
            writer.write_record(CSV_HEADER)?;
        }
        for record in self.ordered(order) {
            writer.serialize(CsvRow::from(record))?;
        }

        writer.flush()?;
        let bytes = writer
            .into_inner()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        tracing::debug!("Exported {} records ({} bytes)", self.records.len(), bytes.len());
        Ok(bytes)
    }

    /// Write the CSV export to `path`, creating parent directories
    pub fn write_csv(&self, path: &Path, order: HistoryOrder) -> Result<usize> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let bytes = self.export_csv(order)?;
        std::fs::write(path, &bytes)?;

        tracing::info!("Wrote {} records to {:?}", self.records.len(), path);
        Ok(self.records.len())
    }
}

/// Column names of the export, in order
pub const CSV_HEADER: [&str; 9] = [
    "idade",
    "genero",
    "unidade",
    "peso_input",
    "altura_input",
    "peso_kg",
    "altura_m",
    "imc",
    "categoria",
];

/// Decode the rows of an export, one result per row
fn rows<R: std::io::Read>(reader: R) -> impl Iterator<Item = Result<HistoryRecord>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader)
        .into_deserialize::<CsvRow>()
        .map(|row| row.map_err(Error::from).and_then(HistoryRecord::try_from))
}

/// Parse an export back into history records, failing on the first bad row
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<HistoryRecord>> {
    rows(bytes).collect()
}

/// Read an exported CSV file, skipping rows that do not parse
pub fn read_csv(path: &Path) -> Result<Vec<HistoryRecord>> {
    let file = File::open(path)?;

    let records: Vec<HistoryRecord> = rows(file)
        .filter_map(|row| {
            row.inspect_err(|e| tracing::warn!("Skipping unreadable CSV row: {}", e))
                .ok()
        })
        .collect();

    tracing::info!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}
