pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
#[cfg(feature = "server")]
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LocalStorage, Settings};

pub use app::{SelectionReport, SnapshotExporter};
pub use core::dashboard::{ControlEvent, Dashboard, SliderSpec};
pub use core::store::{CsvSource, RecordStore};
pub use utils::error::{DashError, Result};
