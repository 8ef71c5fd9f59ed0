pub mod configuration;
pub mod error;
pub mod health;
pub mod startup;
pub mod telemetry;
pub mod textfile;
