use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod count;

/// Measurement unit a conversion factor is expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[sea_orm(string_value = "kg")]
    Kg,

    #[sea_orm(string_value = "lt")]
    Lt,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Kg => write!(f, "kg"),
            Unit::Lt => write!(f, "lt"),
        }
    }
}

/// Commercial classification of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Classification {
    #[sea_orm(string_value = "FinishedProduct")]
    FinishedProduct,

    #[sea_orm(string_value = "Merchandise")]
    Merchandise,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::FinishedProduct => write!(f, "Finished Product"),
            Classification::Merchandise => write!(f, "Merchandise"),
        }
    }
}

/// Product line. Catalog files written before lines existed omit the
/// field; those entries deserialize as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum ProductLine {
    #[sea_orm(string_value = "Sulfates")]
    Sulfates,

    #[sea_orm(string_value = "Chlorides")]
    Chlorides,

    #[sea_orm(string_value = "Acids")]
    Acids,

    #[sea_orm(string_value = "Solvents")]
    Solvents,

    #[sea_orm(string_value = "Other")]
    Other,
}

impl Default for ProductLine {
    fn default() -> Self {
        ProductLine::Other
    }
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductLine::Sulfates => write!(f, "Sulfates"),
            ProductLine::Chlorides => write!(f, "Chlorides"),
            ProductLine::Acids => write!(f, "Acids"),
            ProductLine::Solvents => write!(f, "Solvents"),
            ProductLine::Other => write!(f, "Other"),
        }
    }
}

/// Warehouses where counts take place. Fixed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum WarehouseLocation {
    #[sea_orm(string_value = "Almacén A")]
    AlmacenA,

    #[sea_orm(string_value = "Almacén D")]
    AlmacenD,

    #[sea_orm(string_value = "Almacén E")]
    AlmacenE,

    #[sea_orm(string_value = "Almacén F")]
    AlmacenF,

    #[sea_orm(string_value = "Almacén G")]
    AlmacenG,
}

impl fmt::Display for WarehouseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarehouseLocation::AlmacenA => write!(f, "Almacén A"),
            WarehouseLocation::AlmacenD => write!(f, "Almacén D"),
            WarehouseLocation::AlmacenE => write!(f, "Almacén E"),
            WarehouseLocation::AlmacenF => write!(f, "Almacén F"),
            WarehouseLocation::AlmacenG => write!(f, "Almacén G"),
        }
    }
}
