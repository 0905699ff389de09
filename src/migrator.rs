use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            m20240101_000001_create_inventory_records_table::Migration,
        )]
    }
}

// Migration implementations

mod m20240101_000001_create_inventory_records_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_inventory_records_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // One row per count event, aligned with entities::inventory_record
            manager
                .create_table(
                    Table::create()
                        .table(InventoryRecords::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryRecords::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(InventoryRecords::RecordedAt)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryRecords::Code).string().not_null())
                        .col(
                            ColumnDef::new(InventoryRecords::Product)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRecords::Classification)
                                .text()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryRecords::Line).text().not_null())
                        .col(
                            ColumnDef::new(InventoryRecords::Presentation)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRecords::CountedUnits)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRecords::ComputedTotal)
                                .double()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryRecords::Unit).text().not_null())
                        .col(
                            ColumnDef::new(InventoryRecords::Location)
                                .text()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRecords::Responsible)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryRecords::Notes).string().null())
                        .col(
                            ColumnDef::new(InventoryRecords::Estado)
                                .string()
                                .not_null()
                                .default("Pending"),
                        )
                        .to_owned(),
                )
                .await?;

            // Useful indexes for the filter dimensions
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_records_location")
                        .table(InventoryRecords::Table)
                        .col(InventoryRecords::Location)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_records_classification")
                        .table(InventoryRecords::Table)
                        .col(InventoryRecords::Classification)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryRecords::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum InventoryRecords {
        Table,
        Id,
        RecordedAt,
        Code,
        Product,
        Classification,
        Line,
        Presentation,
        CountedUnits,
        ComputedTotal,
        Unit,
        Location,
        Responsible,
        Notes,
        Estado,
    }
}
