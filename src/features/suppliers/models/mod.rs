pub mod supplier;

pub use supplier::Supplier;
