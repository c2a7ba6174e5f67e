//! SeaORM entities for the pages service database.

pub mod pages;
