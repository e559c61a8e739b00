pub mod category_dto;

pub use category_dto::{
    CategoryQueryParams, CategoryRequestDto, CategoryResponseDto, CategorySummaryDto,
    CategoryTreeDto, PatchCategoryDto,
};
