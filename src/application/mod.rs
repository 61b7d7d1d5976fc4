/// Application layer - Use cases, read models and DTOs
///
/// This layer orchestrates the report core and coordinates with
/// infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod read_models;
pub mod use_cases;
