//! Startup wiring for sample reservation seeding.

mod config;
mod startup;

pub use config::SampleDataSettings;
pub use startup::seed_sample_data_on_startup;
