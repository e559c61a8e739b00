pub mod categories;
pub mod inventory;
pub mod locations;
pub mod product_attributes;
pub mod products;
pub mod stock_movements;
pub mod suppliers;
