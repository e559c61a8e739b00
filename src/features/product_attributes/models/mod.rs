pub mod product_attribute;

pub use product_attribute::ProductAttribute;
