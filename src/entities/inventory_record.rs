use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::models::count::NewRecord;
use crate::models::{Classification, ProductLine, Unit, WarehouseLocation};

/// Status written on insert. Reserved for a future review workflow;
/// never read or transitioned by this core.
pub const DEFAULT_STATUS: &str = "Pending";

/// One cyclic count event. Catalog attributes are snapshots taken at
/// count time; the row is never updated in place.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
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
    #[sea_orm(column_name = "estado")]
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewRecord> for ActiveModel {
    fn from(record: NewRecord) -> Self {
        Self {
            id: NotSet,
            recorded_at: Set(record.recorded_at),
            code: Set(record.code),
            product: Set(record.product),
            classification: Set(record.classification),
            line: Set(record.line),
            presentation: Set(record.presentation),
            counted_units: Set(record.counted_units),
            computed_total: Set(record.computed_total),
            unit: Set(record.unit),
            location: Set(record.location),
            responsible: Set(record.responsible),
            notes: Set(record.notes),
            status: Set(DEFAULT_STATUS.to_string()),
        }
    }
}
