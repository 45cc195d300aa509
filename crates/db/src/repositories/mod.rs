//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Catalog CRUD methods take `&PgPool`; the inventory resolver and the
//! summary insert take `&mut PgConnection` so the import runner can call
//! them on its transaction.

pub mod import_summary_repo;
pub mod inventory_repo;
pub mod product_repo;
pub mod variant_repo;

pub use import_summary_repo::ImportSummaryRepo;
pub use inventory_repo::InventoryRepo;
pub use product_repo::ProductRepo;
pub use variant_repo::VariantRepo;
