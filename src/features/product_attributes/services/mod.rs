pub mod product_attribute_service;

pub use product_attribute_service::ProductAttributeService;
