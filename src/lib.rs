pub mod authentication;
pub mod configuration;
pub mod domain;
pub mod embed;
pub mod export;
pub mod listing;
pub mod routes;
pub mod startup;
pub mod store;
pub mod subscription;
pub mod telemetry;
pub mod utils;
