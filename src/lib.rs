pub mod api;
pub mod config;
pub mod domain;
pub mod reading;
pub mod state;
