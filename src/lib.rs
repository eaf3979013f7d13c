pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod models;
pub mod observability;
pub mod providers;
pub mod state;
pub mod stores;
