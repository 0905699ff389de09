use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{ConsistencyWarning, ServiceError};
use crate::models::{Classification, ProductLine, Unit};

/// One catalog row. The product description is the key of the catalog
/// map and is not repeated inside the entry.
///
/// Entries are replaced whole; there is no partial mutation. Ledger
/// records snapshot these values at count time, so later edits never
/// rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: String,
    pub presentation: String,
    pub conversion_factor: f64,
    pub unit: Unit,
    pub classification: Classification,
    #[serde(default)]
    pub line: ProductLine,
}

/// Admin input for inserting or replacing a catalog entry.
///
/// When `conversion_factor` is omitted it is derived from the
/// presentation text; a supplied factor must be positive.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCatalogEntry {
    #[validate(length(min = 1, message = "product code must not be empty"))]
    pub code: String,

    pub presentation: String,

    pub conversion_factor: Option<f64>,

    pub unit: Unit,

    pub classification: Classification,

    #[serde(default)]
    pub line: ProductLine,
}

impl NewCatalogEntry {
    /// Validates and resolves the conversion factor into a finished
    /// [`CatalogEntry`].
    pub fn into_entry(self) -> Result<CatalogEntry, ServiceError> {
        self.validate()?;
        let conversion_factor = match self.conversion_factor {
            Some(factor) if factor > 0.0 => factor,
            Some(_) => {
                return Err(ServiceError::ValidationError(
                    "conversion factor must be positive".to_string(),
                ))
            }
            None => derive_factor(&self.presentation),
        };
        Ok(CatalogEntry {
            code: self.code,
            presentation: self.presentation,
            conversion_factor,
            unit: self.unit,
            classification: self.classification,
            line: self.line,
        })
    }
}

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("digit-run pattern"));

/// Default conversion factor for a presentation label: the first run of
/// decimal digits in the text, or 1.0 when none is present.
///
/// "Sacos x 25 kg" -> 25.0, "Botella x 1 Lt" -> 1.0, "Otra" -> 1.0.
/// This is a heuristic, not a unit-aware parser; whether the adjacent
/// unit token matches the declared unit is checked separately and only
/// ever surfaced as an advisory.
pub fn derive_factor(presentation: &str) -> f64 {
    DIGIT_RUN
        .find(presentation)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(1.0)
}

/// Advisory check: does the presentation text name a unit other than the
/// declared one? Never blocks the entry.
pub fn unit_consistency_warning(entry: &CatalogEntry) -> Option<ConsistencyWarning> {
    let implied = implied_unit(&entry.presentation)?;
    if implied == entry.unit {
        return None;
    }
    Some(ConsistencyWarning {
        declared: entry.unit.clone(),
        implied,
        presentation: entry.presentation.clone(),
    })
}

fn implied_unit(text: &str) -> Option<Unit> {
    for token in text.split(|c: char| !c.is_alphanumeric()) {
        match token.to_lowercase().as_str() {
            "kg" => return Some(Unit::Kg),
            "lt" | "lts" => return Some(Unit::Lt),
            _ => {}
        }
    }
    None
}
