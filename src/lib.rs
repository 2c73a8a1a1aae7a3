pub mod auth_store;
pub mod competition_store;
pub mod config;
pub mod error;
pub mod fixture_store;
pub mod gateway;
pub mod model;
