use cyclecount_core::{config::AppConfig, AppState};
use tempfile::TempDir;

/// Helper harness for spinning up application state backed by an
/// in-memory SQLite database and a throwaway catalog directory.
pub struct TestApp {
    pub state: AppState,
    catalog_dir: TempDir,
}

impl TestApp {
    /// Construct a new test application with fresh database and catalog
    /// state. The catalog starts from the default seed.
    pub async fn new() -> Self {
        let catalog_dir = TempDir::new().expect("failed to create catalog temp dir");
        let catalog_path = catalog_dir.path().join("catalogo_productos.json");

        // A single pooled connection keeps the in-memory database alive
        // and shared for the whole test.
        let mut cfg = AppConfig::new("sqlite::memory:", catalog_path.to_string_lossy());
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let state = AppState::initialize(cfg)
            .await
            .expect("failed to initialize test app");

        Self { state, catalog_dir }
    }

    #[allow(dead_code)]
    pub fn catalog_path(&self) -> std::path::PathBuf {
        self.catalog_dir.path().join("catalogo_productos.json")
    }
}
