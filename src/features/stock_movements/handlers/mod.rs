pub mod stock_movement_handler;

pub use stock_movement_handler::*;
