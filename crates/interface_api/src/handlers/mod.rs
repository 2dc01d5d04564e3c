//! Request handlers

pub mod billing;
pub mod customers;
pub mod expenses;
pub mod health;
pub mod meters;
pub mod reports;
pub mod settings;
