pub mod catalog;
pub mod feature_store;
pub mod postgres;

pub use catalog::{CatalogReader, PgCatalog};
pub use feature_store::{FeatureStore, PgFeatureStore};
pub use postgres::{create_pool, run_migrations};
