// Form autofill: keyword matching from control identifiers to profile attributes.

pub mod field_mapper;
pub mod handlers;
