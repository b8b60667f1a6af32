mod types;
mod commands;
mod handlers;
mod error;
mod state;
mod keyboard;
pub mod config;
pub mod generator;
pub mod provider;

pub use types::*;
pub use commands::*;
pub use handlers::*;
pub use error::*;
pub use state::*;
pub use keyboard::*;
pub use config::{DataSourceConfig, QuizConfig};
pub use provider::{normalize_population, CountryDataProvider, LoadProgress};
pub use generator::{format_area, format_gdp, format_population};
