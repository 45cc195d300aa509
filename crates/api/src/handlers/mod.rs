pub mod inventory_import;
pub mod products;
