//! SeaORM entities for the accounts service database.

pub mod account_tokens;
pub mod accounts;
