pub mod supplier_handler;

pub use supplier_handler::*;
