pub mod inventory_dto;

pub use inventory_dto::{
    InventoryQueryParams, InventoryRequestDto, InventoryResponseDto, PatchInventoryDto,
};
