mod admin;
mod embed;
mod export_csv;
mod healthcheck;
mod subscribe;

pub use admin::*;
pub use embed::*;
pub use export_csv::*;
pub use healthcheck::*;
pub use subscribe::*;
