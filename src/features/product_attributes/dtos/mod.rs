pub mod product_attribute_dto;

pub use product_attribute_dto::{
    PatchProductAttributeDto, ProductAttributeQueryParams, ProductAttributeRequestDto,
    ProductAttributeResponseDto,
};
