mod build;
mod bus;
mod config;
mod error;

pub use build::{ReceiverPipeline, factory_available};
pub use bus::Outcome;
pub use config::{DEFAULT_PORT, PipelineConfig};
pub use error::PipelineError;
