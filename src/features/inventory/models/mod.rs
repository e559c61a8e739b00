pub mod inventory;

pub use inventory::{Inventory, DEFAULT_LOW_STOCK_THRESHOLD};
