use chrono::NaiveDateTime;

use crate::errors::ServiceError;
use crate::models::catalog::CatalogEntry;
use crate::models::{Classification, ProductLine, Unit, WarehouseLocation};

/// Timestamp layout for ledger rows. Lexicographic order equals
/// chronological order, so the ledger's default descending sort is a
/// plain string sort.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// User-entered fields of one count submission.
#[derive(Debug, Clone)]
pub struct CountInput {
    pub counted_units: i64,
    pub location: WarehouseLocation,
    pub responsible: String,
    pub notes: Option<String>,
}

/// A validated count record ready for insertion. Ids are assigned by the
/// store on append.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub recorded_at: String,
    pub code: String,
    pub product: String,
    pub classification: Classification,
    pub line: ProductLine,
    pub presentation: String,
    pub counted_units: i64,
    pub computed_total: f64,
    pub unit: Unit,
    pub location: WarehouseLocation,
    pub responsible: String,
    pub notes: Option<String>,
}

/// Turns a catalog entry plus user input into a record ready for
/// persistence, snapshotting the catalog values active right now.
///
/// Validation order is fixed and short-circuits: responsible party first,
/// counted quantity second. Nothing is written unless both pass.
pub fn build_record(
    product: &str,
    entry: &CatalogEntry,
    input: &CountInput,
    now: NaiveDateTime,
) -> Result<NewRecord, ServiceError> {
    if input.responsible.trim().is_empty() {
        return Err(ServiceError::ValidationError(
            "responsible party must not be empty".to_string(),
        ));
    }
    if input.counted_units <= 0 {
        return Err(ServiceError::ValidationError(
            "counted units must be greater than zero".to_string(),
        ));
    }

    Ok(NewRecord {
        recorded_at: now.format(TIMESTAMP_FORMAT).to_string(),
        code: entry.code.clone(),
        product: product.to_string(),
        classification: entry.classification.clone(),
        line: entry.line.clone(),
        presentation: entry.presentation.clone(),
        counted_units: input.counted_units,
        computed_total: input.counted_units as f64 * entry.conversion_factor,
        unit: entry.unit.clone(),
        location: input.location.clone(),
        responsible: input.responsible.trim().to_string(),
        notes: input.notes.clone().filter(|notes| !notes.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn sulfate_entry(factor: f64) -> CatalogEntry {
        CatalogEntry {
            code: "SUL-001".to_string(),
            presentation: "Sacos x 25 kg".to_string(),
            conversion_factor: factor,
            unit: Unit::Kg,
            classification: Classification::FinishedProduct,
            line: ProductLine::Sulfates,
        }
    }

    fn input(units: i64, responsible: &str) -> CountInput {
        CountInput {
            counted_units: units,
            location: WarehouseLocation::AlmacenA,
            responsible: responsible.to_string(),
            notes: None,
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(12, 30, 45)
            .unwrap()
    }

    #[test]
    fn total_is_units_times_factor() {
        let record = build_record("Sulfato de Cobre", &sulfate_entry(25.0), &input(3, "mgarcia"), noon())
            .expect("valid submission");
        assert_eq!(record.computed_total, 75.0);
        assert_eq!(record.counted_units, 3);
        assert_eq!(record.unit, Unit::Kg);
    }

    #[test]
    fn snapshots_catalog_fields() {
        let record = build_record("Sulfato de Cobre", &sulfate_entry(25.0), &input(1, "mgarcia"), noon())
            .expect("valid submission");
        assert_eq!(record.code, "SUL-001");
        assert_eq!(record.product, "Sulfato de Cobre");
        assert_eq!(record.presentation, "Sacos x 25 kg");
        assert_eq!(record.classification, Classification::FinishedProduct);
        assert_eq!(record.line, ProductLine::Sulfates);
    }

    #[test]
    fn timestamp_is_sortable_second_resolution() {
        let record = build_record("Sulfato de Cobre", &sulfate_entry(25.0), &input(1, "mgarcia"), noon())
            .expect("valid submission");
        assert_eq!(record.recorded_at, "2024-03-15 12:30:45");
    }

    #[test]
    fn empty_responsible_rejected_first_even_with_bad_units() {
        let err = build_record("Sulfato de Cobre", &sulfate_entry(25.0), &input(0, "  "), noon())
            .expect_err("must reject");
        assert_matches!(err, ServiceError::ValidationError(msg) if msg.contains("responsible"));
    }

    #[test]
    fn non_positive_units_rejected_regardless_of_responsible() {
        for units in [0, -4] {
            let err = build_record(
                "Sulfato de Cobre",
                &sulfate_entry(25.0),
                &input(units, "mgarcia"),
                noon(),
            )
            .expect_err("must reject");
            assert_matches!(err, ServiceError::ValidationError(msg) if msg.contains("counted units"));
        }
    }

    #[test]
    fn blank_notes_are_dropped() {
        let mut submission = input(2, "mgarcia");
        submission.notes = Some("   ".to_string());
        let record = build_record("Sulfato de Cobre", &sulfate_entry(25.0), &submission, noon())
            .expect("valid submission");
        assert_eq!(record.notes, None);
    }
}
