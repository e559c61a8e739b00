pub mod product_attribute_handler;

pub use product_attribute_handler::*;
