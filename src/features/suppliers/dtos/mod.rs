pub mod supplier_dto;

pub use supplier_dto::{
    PatchSupplierDto, SupplierQueryParams, SupplierRequestDto, SupplierResponseDto,
};
