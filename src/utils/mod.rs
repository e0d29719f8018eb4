pub mod formatters;
pub mod mappers;
