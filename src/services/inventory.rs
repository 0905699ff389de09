use std::sync::Arc;

use chrono::Local;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use tracing::{info, instrument, warn};

use crate::entities::inventory_record::{self, Entity as InventoryRecords};
use crate::errors::{ConsistencyWarning, ServiceError};
use crate::events::{Event, EventSender};
use crate::models::catalog::unit_consistency_warning;
use crate::models::count::{build_record, CountInput};
use crate::models::{Classification, ProductLine, WarehouseLocation};
use crate::services::catalog::CatalogService;

/// Outcome of a successful count submission. The advisory, when present,
/// is informational only; the record is already persisted.
#[derive(Debug)]
pub struct RecordedCount {
    pub record: inventory_record::Model,
    pub warning: Option<ConsistencyWarning>,
}

/// Two-step deletion commitment. The first step carries `Requested`;
/// only `Confirmed` executes, so a single unconditional call cannot
/// remove a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    Requested,
    Confirmed,
}

/// Set-valued record filter. An empty dimension leaves that dimension
/// unfiltered; provided dimensions are AND-ed.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub locations: Vec<WarehouseLocation>,
    pub classifications: Vec<Classification>,
    pub lines: Vec<ProductLine>,
}

impl RecordFilter {
    pub fn matches(&self, record: &inventory_record::Model) -> bool {
        dimension_matches(&self.locations, &record.location)
            && dimension_matches(&self.classifications, &record.classification)
            && dimension_matches(&self.lines, &record.line)
    }

    /// Applies the filter over a listed snapshot.
    pub fn apply(&self, records: &[inventory_record::Model]) -> Vec<inventory_record::Model> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

fn dimension_matches<T: PartialEq>(selected: &[T], value: &T) -> bool {
    selected.is_empty() || selected.contains(value)
}

/// Append/query/delete service over the count ledger.
#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DatabaseConnection>,
    catalog: CatalogService,
    event_sender: EventSender,
}

impl InventoryService {
    /// Creates a new inventory service instance
    pub fn new(
        db: Arc<DatabaseConnection>,
        catalog: CatalogService,
        event_sender: EventSender,
    ) -> Self {
        Self {
            db,
            catalog,
            event_sender,
        }
    }

    /// Resolves the product, validates the input, and appends one record
    /// with the catalog values snapshotted at this moment. The record id
    /// comes from the store's auto-increment primary key.
    #[instrument(skip(self, input), fields(product = %product))]
    pub async fn record_count(
        &self,
        product: &str,
        input: CountInput,
    ) -> Result<RecordedCount, ServiceError> {
        let entry = self.catalog.resolve(product)?;
        let new_record = build_record(product, &entry, &input, Local::now().naive_local())?;
        let warning = unit_consistency_warning(&entry);
        if let Some(advisory) = &warning {
            warn!(%advisory, "presentation label disagrees with declared unit");
        }

        let record = inventory_record::ActiveModel::from(new_record)
            .insert(self.db.as_ref())
            .await?;

        self.event_sender
            .send(Event::CountRecorded {
                id: record.id,
                code: record.code.clone(),
                counted_units: record.counted_units,
                computed_total: record.computed_total,
            })
            .await
            .map_err(ServiceError::EventError)?;
        info!(id = record.id, total = record.computed_total, "count recorded");

        Ok(RecordedCount { record, warning })
    }

    /// Full scan, newest first. Each call reflects the latest committed
    /// state; ids break timestamp ties.
    pub async fn list_records(&self) -> Result<Vec<inventory_record::Model>, ServiceError> {
        Ok(InventoryRecords::find()
            .order_by_desc(inventory_record::Column::RecordedAt)
            .order_by_desc(inventory_record::Column::Id)
            .all(self.db.as_ref())
            .await?)
    }

    /// Listing narrowed by a filter, applied over a fresh snapshot.
    pub async fn list_filtered(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<inventory_record::Model>, ServiceError> {
        let records = self.list_records().await?;
        Ok(filter.apply(&records))
    }

    /// Deletes one record by id. Requires the caller to pass
    /// [`DeleteConfirmation::Confirmed`]; an absent id is a benign no-op
    /// and returns `false`.
    #[instrument(skip(self))]
    pub async fn delete_record(
        &self,
        id: i64,
        confirmation: DeleteConfirmation,
    ) -> Result<bool, ServiceError> {
        if confirmation != DeleteConfirmation::Confirmed {
            return Err(ServiceError::InvalidOperation(
                "record deletion requires explicit confirmation".to_string(),
            ));
        }

        let result = InventoryRecords::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        let deleted = result.rows_affected > 0;
        if deleted {
            self.event_sender
                .send(Event::CountDeleted { id })
                .await
                .map_err(ServiceError::EventError)?;
            info!(id, "record deleted");
        }
        Ok(deleted)
    }
}
