pub mod error;
pub mod loading;
pub mod quiz;
pub mod setup;
pub mod summary;
