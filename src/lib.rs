//! Cyclic inventory core
//!
//! Catalog-driven count capture and reporting for chemical product
//! warehouses: a file-backed product catalog supplies conversion factors,
//! counts are turned into validated ledger records, and the ledger is
//! listed, filtered, summarized, and exported.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod migrator;
pub mod models;
pub mod services;

use std::sync::Arc;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use tokio::sync::mpsc;

use crate::services::catalog::CatalogService;
use crate::services::inventory::InventoryService;

/// Capacity of the domain event channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Shared application state.
///
/// Every interaction handler receives this structure explicitly; there is
/// no process-global session map. Cloning is cheap, all members are
/// handles.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub catalog: CatalogService,
    pub inventory: InventoryService,
}

impl AppState {
    /// Connects the record store, applies create-table-if-absent
    /// migrations, loads (or seeds) the catalog file, and wires the event
    /// consumer.
    pub async fn initialize(cfg: config::AppConfig) -> anyhow::Result<Self> {
        let db = db::establish_connection_from_app_config(&cfg)
            .await
            .context("failed to connect to the record store")?;
        if cfg.auto_migrate {
            db::run_migrations(&db)
                .await
                .context("failed running migrations")?;
        }
        let db = Arc::new(db);

        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let event_sender = events::EventSender::new(event_tx);
        tokio::spawn(events::process_events(event_rx));

        let catalog = CatalogService::load_or_seed(&cfg.catalog_path, event_sender.clone())
            .context("failed to load the product catalog")?;
        let inventory = InventoryService::new(db.clone(), catalog.clone(), event_sender.clone());

        Ok(Self {
            db,
            config: cfg,
            event_sender,
            catalog,
            inventory,
        })
    }
}
