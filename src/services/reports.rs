use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::entities::inventory_record::Model;
use crate::models::Unit;

/// Aggregates over a (possibly filtered) record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountSummary {
    pub records: usize,
    pub total_units: i64,
    pub total_kg: f64,
    pub total_lt: f64,
    pub distinct_products: usize,
}

/// Sums counted units across the input and computed totals partitioned
/// by unit; counts distinct product codes. Empty input yields the
/// all-zero summary, not an error.
pub fn summarize(records: &[Model]) -> CountSummary {
    let mut total_units = 0;
    let mut total_kg = 0.0;
    let mut total_lt = 0.0;
    let mut codes = BTreeSet::new();

    for record in records {
        total_units += record.counted_units;
        match record.unit {
            Unit::Kg => total_kg += record.computed_total,
            Unit::Lt => total_lt += record.computed_total,
        }
        codes.insert(record.code.as_str());
    }

    CountSummary {
        records: records.len(),
        total_units,
        total_kg,
        total_lt,
        distinct_products: codes.len(),
    }
}

/// Totals are rounded to whole units for display only; stored values
/// keep full precision.
pub fn display_total(total: f64) -> String {
    format!("{:.0}", total)
}

const EXPORT_HEADERS: [&str; 13] = [
    "Id",
    "Recorded At",
    "Code",
    "Product",
    "Classification",
    "Line",
    "Presentation",
    "Counted Units",
    "Computed Total",
    "Unit",
    "Location",
    "Responsible",
    "Notes",
];

/// Read-only tabular projection of the record list, offered to the user
/// as a downloadable artifact. Headers are title-cased.
pub fn export_csv(records: &[Model]) -> String {
    let mut out = String::new();
    out.push_str(&EXPORT_HEADERS.join(","));
    out.push('\n');

    for record in records {
        let row = [
            record.id.to_string(),
            record.recorded_at.clone(),
            record.code.clone(),
            record.product.clone(),
            record.classification.to_string(),
            record.line.to_string(),
            record.presentation.clone(),
            record.counted_units.to_string(),
            record.computed_total.to_string(),
            record.unit.to_string(),
            record.location.to_string(),
            record.responsible.clone(),
            record.notes.clone().unwrap_or_default(),
        ];
        let line: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

/// Download name for an export taken on `date`: `inventario_YYYYMMDD.csv`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("inventario_{}.csv", date.format("%Y%m%d"))
}
