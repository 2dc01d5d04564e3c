//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence for the billing ledger,
//! implemented on SQLx.
//!
//! # Architecture
//!
//! [`PgLedger`] implements the `LedgerStore` port from `domain_ledger`.
//! Multi-step protocols (billing a reading, taking a payment, correcting a
//! baseline) run inside a single transaction with a row lock on the meter
//! involved, so concurrent submissions serialize and a failed step rolls
//! the whole protocol back.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, run_migrations, PgLedger};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/aquabill")).await?;
//! run_migrations(&pool).await?;
//! let store = PgLedger::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod postgres;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use postgres::PgLedger;
