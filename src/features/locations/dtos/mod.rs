pub mod location_dto;

pub use location_dto::{
    LocationQueryParams, LocationRequestDto, LocationResponseDto, PatchLocationDto,
};
