#[cfg(feature = "cli")]
pub mod cli;
pub mod local;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use local::LocalStorage;

use crate::core::dashboard::SliderSpec;
use crate::core::store::RecordStore;
use crate::render::DEFAULT_CHART_SIZE;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_DATA_PATH: &str = "data/spacex_launch_dash.csv";
pub const DEFAULT_BIND: &str = "127.0.0.1:8050";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// Effective settings after layering defaults, the TOML file and CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_path: String,
    pub delimiter: String,
    pub bind: String,
    pub slider_min: Option<f64>,
    pub slider_max: Option<f64>,
    pub slider_step: f64,
    pub output_path: String,
    pub chart_size: (u32, u32),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            delimiter: ",".to_string(),
            bind: DEFAULT_BIND.to_string(),
            slider_min: None,
            slider_max: None,
            slider_step: SliderSpec::DEFAULT_STEP,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            chart_size: DEFAULT_CHART_SIZE,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let mut settings = Self {
            data_path: config.data.path.clone(),
            ..Self::default()
        };
        if let Some(delimiter) = &config.data.delimiter {
            settings.delimiter = delimiter.clone();
        }
        if let Some(bind) = config.server.as_ref().and_then(|s| s.bind.clone()) {
            settings.bind = bind;
        }
        if let Some(slider) = &config.slider {
            settings.slider_min = slider.min;
            settings.slider_max = slider.max;
            if let Some(step) = slider.step {
                settings.slider_step = step;
            }
        }
        if let Some(export) = &config.export {
            if let Some(output_path) = &export.output_path {
                settings.output_path = output_path.clone();
            }
            settings.chart_size = (
                export.chart_width.unwrap_or(settings.chart_size.0),
                export.chart_height.unwrap_or(settings.chart_size.1),
            );
        }
        settings
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        validation::validate_delimiter("data.delimiter", &self.delimiter)
    }

    /// Slider geometry for the loaded data: observed bounds widened to whole
    /// steps, with any configured bound taking precedence. A lone configured
    /// bound pushes the derived one at least a step away from it.
    pub fn slider_for(&self, store: &RecordStore) -> Result<SliderSpec> {
        let step = self.slider_step;
        let observed = SliderSpec::from_observed(store.payload_bounds(), step)?;
        let (min, max) = match (self.slider_min, self.slider_max) {
            (Some(min), Some(max)) => (min, max),
            (Some(min), None) => (min, observed.max().max(min + step)),
            (None, Some(max)) => (observed.min().min((max - step).max(0.0)), max),
            (None, None) => (observed.min(), observed.max()),
        };
        SliderSpec::new(min, max, step)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data.path", &self.data_path)?;
        validation::validate_file_extension("data.path", &self.data_path, &["csv", "tsv", "txt"])?;
        self.delimiter_byte()?;
        validation::validate_socket_addr("server.bind", &self.bind)?;
        validation::validate_positive_number("slider.step", self.slider_step)?;
        if let (Some(min), Some(max)) = (self.slider_min, self.slider_max) {
            validation::validate_ordered_bounds("slider", min, max)?;
        }
        validation::validate_path("export.output_path", &self.output_path)?;
        validation::validate_non_empty_string("export.output_path", &self.output_path)?;
        Ok(())
    }
}
