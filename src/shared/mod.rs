pub mod collate;
pub mod config;
pub mod error;
