pub mod catalog;
pub mod pricing;

pub use catalog::{Catalog, Court, Sport};
pub use pricing::slot_price_cents;
