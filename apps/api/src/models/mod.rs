pub mod application;
pub mod detection;
pub mod page;
pub mod profile;
