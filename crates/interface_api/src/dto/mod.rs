//! Request/Response data transfer objects

pub mod billing;
pub mod customer;
pub mod expense;
pub mod meter;
pub mod report;
pub mod settings;
