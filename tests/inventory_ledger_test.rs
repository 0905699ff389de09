mod common;

use common::TestApp;
use cyclecount_core::{
    entities::inventory_record::DEFAULT_STATUS,
    errors::ServiceError,
    models::catalog::NewCatalogEntry,
    models::count::CountInput,
    models::{Classification, ProductLine, Unit, WarehouseLocation},
    services::inventory::{DeleteConfirmation, RecordFilter},
};

fn input(units: i64, location: WarehouseLocation) -> CountInput {
    CountInput {
        counted_units: units,
        location,
        responsible: "mgarcia".to_string(),
        notes: None,
    }
}

#[tokio::test]
async fn end_to_end_count_against_seed_catalog() {
    let app = TestApp::new().await;

    let recorded = app
        .state
        .inventory
        .record_count("Sulfato de Cobre", input(3, WarehouseLocation::AlmacenA))
        .await
        .expect("count against seeded entry");

    let record = &recorded.record;
    assert_eq!(record.computed_total, 75.0);
    assert_eq!(record.unit, Unit::Kg);
    assert_eq!(record.code, "SUL-001");
    assert_eq!(record.product, "Sulfato de Cobre");
    assert_eq!(record.classification, Classification::FinishedProduct);
    assert_eq!(record.line, ProductLine::Sulfates);
    assert_eq!(record.status, DEFAULT_STATUS);
    assert!(record.id >= 1);
    assert!(recorded.warning.is_none());

    let listed = app.state.inventory.list_records().await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], *record);
}

#[tokio::test]
async fn unknown_product_is_rejected_before_any_write() {
    let app = TestApp::new().await;

    let result = app
        .state
        .inventory
        .record_count("Producto Fantasma", input(3, WarehouseLocation::AlmacenA))
        .await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
    assert!(app.state.inventory.list_records().await.expect("list").is_empty());
}

#[tokio::test]
async fn invalid_input_is_rejected_before_any_write() {
    let app = TestApp::new().await;

    let mut no_responsible = input(3, WarehouseLocation::AlmacenA);
    no_responsible.responsible = "  ".to_string();
    let result = app
        .state
        .inventory
        .record_count("Sulfato de Cobre", no_responsible)
        .await;
    assert!(matches!(result, Err(ServiceError::ValidationError(_))));

    let result = app
        .state
        .inventory
        .record_count("Sulfato de Cobre", input(0, WarehouseLocation::AlmacenA))
        .await;
    assert!(matches!(result, Err(ServiceError::ValidationError(_))));

    assert!(app.state.inventory.list_records().await.expect("list").is_empty());
}

#[tokio::test]
async fn listing_is_newest_first() {
    let app = TestApp::new().await;

    for units in 1..=3 {
        app.state
            .inventory
            .record_count("Sulfato de Zinc", input(units, WarehouseLocation::AlmacenD))
            .await
            .expect("record count");
    }

    let listed = app.state.inventory.list_records().await.expect("list");
    assert_eq!(listed.len(), 3);
    // Timestamps may land in the same second; ids break the tie.
    assert!(listed[0].id > listed[1].id && listed[1].id > listed[2].id);
    assert!(listed[0].recorded_at >= listed[1].recorded_at);
}

#[tokio::test]
async fn ids_stay_monotonic_after_deletion() {
    let app = TestApp::new().await;
    let inventory = &app.state.inventory;

    inventory
        .record_count("Sulfato de Cobre", input(1, WarehouseLocation::AlmacenA))
        .await
        .expect("first count");
    let second = inventory
        .record_count("Sulfato de Cobre", input(2, WarehouseLocation::AlmacenA))
        .await
        .expect("second count");

    let deleted = inventory
        .delete_record(second.record.id, DeleteConfirmation::Confirmed)
        .await
        .expect("confirmed delete");
    assert!(deleted);

    let third = inventory
        .record_count("Sulfato de Cobre", input(3, WarehouseLocation::AlmacenA))
        .await
        .expect("third count");
    assert!(
        third.record.id > second.record.id,
        "ids are never reused, even after deletes"
    );
}

#[tokio::test]
async fn delete_without_confirmation_is_refused() {
    let app = TestApp::new().await;

    let recorded = app
        .state
        .inventory
        .record_count("Sulfato de Cobre", input(2, WarehouseLocation::AlmacenA))
        .await
        .expect("record count");

    let result = app
        .state
        .inventory
        .delete_record(recorded.record.id, DeleteConfirmation::Requested)
        .await;
    assert!(matches!(result, Err(ServiceError::InvalidOperation(_))));

    let listed = app.state.inventory.list_records().await.expect("list");
    assert_eq!(listed.len(), 1, "record must survive an unconfirmed delete");
}

#[tokio::test]
async fn delete_of_absent_id_is_a_noop() {
    let app = TestApp::new().await;

    app.state
        .inventory
        .record_count("Sulfato de Cobre", input(2, WarehouseLocation::AlmacenA))
        .await
        .expect("record count");

    let deleted = app
        .state
        .inventory
        .delete_record(9_999, DeleteConfirmation::Confirmed)
        .await
        .expect("absent id must not error");
    assert!(!deleted);
    assert_eq!(app.state.inventory.list_records().await.expect("list").len(), 1);
}

#[tokio::test]
async fn filtering_narrows_a_listed_snapshot() {
    let app = TestApp::new().await;
    let inventory = &app.state.inventory;

    inventory
        .record_count("Sulfato de Cobre", input(1, WarehouseLocation::AlmacenA))
        .await
        .expect("count in A");
    inventory
        .record_count("Soda Cáustica Líquida", input(2, WarehouseLocation::AlmacenD))
        .await
        .expect("count in D");

    let by_location = inventory
        .list_filtered(&RecordFilter {
            locations: vec![WarehouseLocation::AlmacenD],
            ..Default::default()
        })
        .await
        .expect("filtered list");
    assert_eq!(by_location.len(), 1);
    assert_eq!(by_location[0].location, WarehouseLocation::AlmacenD);

    let by_both = inventory
        .list_filtered(&RecordFilter {
            locations: vec![WarehouseLocation::AlmacenD],
            classifications: vec![Classification::FinishedProduct],
            lines: vec![],
        })
        .await
        .expect("filtered list");
    assert!(by_both.is_empty(), "dimensions combine with AND");
}

#[tokio::test]
async fn records_snapshot_the_catalog_at_count_time() {
    let app = TestApp::new().await;

    let before = app
        .state
        .inventory
        .record_count("Sulfato de Cobre", input(3, WarehouseLocation::AlmacenA))
        .await
        .expect("count before the catalog edit");
    assert_eq!(before.record.computed_total, 75.0);

    // Full-replacement correction of the entry: factor 25 -> 30.
    app.state
        .catalog
        .add_entry(
            "Sulfato de Cobre",
            NewCatalogEntry {
                code: "SUL-001".to_string(),
                presentation: "Sacos x 30 kg".to_string(),
                conversion_factor: Some(30.0),
                unit: Unit::Kg,
                classification: Classification::FinishedProduct,
                line: ProductLine::Sulfates,
            },
        )
        .await
        .expect("overwrite entry");

    let after = app
        .state
        .inventory
        .record_count("Sulfato de Cobre", input(3, WarehouseLocation::AlmacenA))
        .await
        .expect("count after the catalog edit");
    assert_eq!(after.record.computed_total, 90.0);

    let listed = app.state.inventory.list_records().await.expect("list");
    let old = listed
        .iter()
        .find(|r| r.id == before.record.id)
        .expect("old record still present");
    assert_eq!(old.computed_total, 75.0, "history is never rewritten");
}

#[tokio::test]
async fn unit_mismatch_is_a_warning_not_a_rejection() {
    let app = TestApp::new().await;

    app.state
        .catalog
        .add_entry(
            "Desengrasante Industrial",
            NewCatalogEntry {
                code: "DES-001".to_string(),
                presentation: "Bidones x 20 Lt".to_string(),
                conversion_factor: None,
                unit: Unit::Kg,
                classification: Classification::Merchandise,
                line: ProductLine::Solvents,
            },
        )
        .await
        .expect("add mismatched entry");

    let recorded = app
        .state
        .inventory
        .record_count(
            "Desengrasante Industrial",
            input(2, WarehouseLocation::AlmacenE),
        )
        .await
        .expect("mismatch must not block the count");

    let warning = recorded.warning.expect("advisory expected");
    assert_eq!(warning.declared, Unit::Kg);
    assert_eq!(warning.implied, Unit::Lt);
    assert_eq!(recorded.record.computed_total, 40.0);
}
