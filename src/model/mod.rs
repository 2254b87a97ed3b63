pub mod analysis;
pub mod catalog;
pub mod config;
mod lenient;

pub use analysis::*;
pub use catalog::*;
pub use config::{Config, MarketplaceConfig, ModelConfig, UploadConfig};
