use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::catalog::{CatalogEntry, NewCatalogEntry};
use crate::models::{Classification, ProductLine, Unit};

/// Catalog map keyed by product description. BTreeMap keeps listings in
/// stable key order.
type CatalogMap = BTreeMap<String, CatalogEntry>;

/// File-backed product catalog.
///
/// The whole map lives in memory; every mutation rewrites the persisted
/// JSON file in full. Last writer wins, which is adequate at this data
/// scale and matches the single-writer usage model.
#[derive(Clone)]
pub struct CatalogService {
    entries: Arc<RwLock<CatalogMap>>,
    path: Arc<PathBuf>,
    event_sender: EventSender,
}

impl CatalogService {
    /// Loads the catalog file. A missing file is not an error: a default
    /// seed catalog is created and persisted.
    pub fn load_or_seed(
        path: impl Into<PathBuf>,
        event_sender: EventSender,
    ) -> Result<Self, ServiceError> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read(&path)?;
            let map: CatalogMap = serde_json::from_slice(&raw)?;
            info!(path = %path.display(), entries = map.len(), "catalog loaded");
            map
        } else {
            let map = seed_catalog();
            persist(&path, &map)?;
            info!(path = %path.display(), entries = map.len(), "seeded default catalog");
            map
        };

        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
            path: Arc::new(path),
            event_sender,
        })
    }

    /// Looks up the catalog entry for a product description.
    pub fn resolve(&self, description: &str) -> Result<CatalogEntry, ServiceError> {
        self.read()
            .get(description)
            .cloned()
            .ok_or_else(|| {
                ServiceError::NotFound(format!("product '{}' is not in the catalog", description))
            })
    }

    /// Snapshot of all entries in key order.
    pub fn entries(&self) -> Vec<(String, CatalogEntry)> {
        self.read()
            .iter()
            .map(|(description, entry)| (description.clone(), entry.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Inserts or silently replaces the entry at `description` and
    /// rewrites the catalog file. Overwrite raises no conflict: admins
    /// use it for corrections.
    #[instrument(skip(self, input), fields(product = %description))]
    pub async fn add_entry(
        &self,
        description: &str,
        input: NewCatalogEntry,
    ) -> Result<CatalogEntry, ServiceError> {
        if description.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "product description must not be empty".to_string(),
            ));
        }
        let entry = input.into_entry()?;

        let snapshot = {
            let mut entries = self.write();
            entries.insert(description.to_string(), entry.clone());
            entries.clone()
        };
        persist(&self.path, &snapshot)?;

        self.event_sender
            .send(Event::CatalogEntryUpserted {
                description: description.to_string(),
            })
            .await
            .map_err(ServiceError::EventError)?;
        info!("catalog entry upserted");
        Ok(entry)
    }

    /// Removes the entry if present and rewrites the catalog file. An
    /// absent key is a benign no-op, mirroring ledger deletion.
    #[instrument(skip(self), fields(product = %description))]
    pub async fn remove_entry(&self, description: &str) -> Result<bool, ServiceError> {
        let snapshot = {
            let mut entries = self.write();
            if entries.remove(description).is_none() {
                return Ok(false);
            }
            entries.clone()
        };
        persist(&self.path, &snapshot)?;

        self.event_sender
            .send(Event::CatalogEntryRemoved {
                description: description.to_string(),
            })
            .await
            .map_err(ServiceError::EventError)?;
        info!("catalog entry removed");
        Ok(true)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CatalogMap> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CatalogMap> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Whole-file rewrite: serialize next to the target, then rename over it
/// so readers never observe a half-written catalog.
fn persist(path: &Path, entries: &CatalogMap) -> Result<(), ServiceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let bytes = serde_json::to_vec_pretty(entries)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, &bytes)?;
    fs::rename(&staging, path)?;
    Ok(())
}

/// Example chemical products used when no catalog file exists yet.
fn seed_catalog() -> CatalogMap {
    let seed = [
        (
            "Sulfato de Cobre",
            "SUL-001",
            "Sacos x 25 kg",
            25.0,
            Unit::Kg,
            Classification::FinishedProduct,
            ProductLine::Sulfates,
        ),
        (
            "Sulfato de Zinc",
            "SUL-002",
            "Sacos x 25 kg",
            25.0,
            Unit::Kg,
            Classification::FinishedProduct,
            ProductLine::Sulfates,
        ),
        (
            "Sulfato de Manganeso",
            "SUL-003",
            "Bigbag x 1000 kg",
            1000.0,
            Unit::Kg,
            Classification::FinishedProduct,
            ProductLine::Sulfates,
        ),
        (
            "Ácido Sulfúrico",
            "ACD-001",
            "Bidones x 20 Lt",
            20.0,
            Unit::Lt,
            Classification::FinishedProduct,
            ProductLine::Acids,
        ),
        (
            "Soda Cáustica Líquida",
            "MER-001",
            "Botella x 1 Lt",
            1.0,
            Unit::Lt,
            Classification::Merchandise,
            ProductLine::Other,
        ),
    ];

    seed.into_iter()
        .map(
            |(description, code, presentation, factor, unit, classification, line)| {
                (
                    description.to_string(),
                    CatalogEntry {
                        code: code.to_string(),
                        presentation: presentation.to_string(),
                        conversion_factor: factor,
                        unit,
                        classification,
                        line,
                    },
                )
            },
        )
        .collect()
}
