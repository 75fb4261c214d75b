pub mod config;
pub mod context;
pub mod theme;
pub mod types;
