pub mod stock_movement_dto;

pub use stock_movement_dto::{
    CreateStockMovementDto, StockMovementQueryParams, StockMovementResponseDto,
};
