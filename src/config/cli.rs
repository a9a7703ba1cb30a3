use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "launch-dash")]
#[command(about = "Interactive dashboard over SpaceX launch records")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Launch data file (overrides [data] path)
    #[arg(long)]
    pub data: Option<String>,

    /// Field delimiter of the data file (overrides [data] delimiter)
    #[arg(long)]
    pub delimiter: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the dashboard over HTTP
    Serve {
        /// Listen address (overrides [server] bind)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print the chart data for a selection
    Summary {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write a snapshot bundle (charts, filtered rows, summary) as a ZIP file
    Export {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output directory (overrides [export] output_path)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct SelectionArgs {
    /// Launch site, or ALL
    #[arg(long, default_value = "ALL")]
    pub site: String,

    /// Lower payload bound in kg
    #[arg(long)]
    pub min: Option<f64>,

    /// Upper payload bound in kg
    #[arg(long)]
    pub max: Option<f64>,
}

impl CliConfig {
    /// Layers defaults, the optional config file, then command line flags.
    pub fn resolve_settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                let config = TomlConfig::from_file(path)?;
                config.validate_config()?;
                Settings::from_toml(&config)
            }
            None => Settings::default(),
        };

        if let Some(data) = &self.data {
            settings.data_path = data.clone();
        }
        if let Some(delimiter) = &self.delimiter {
            settings.delimiter = delimiter.clone();
        }
        match &self.command {
            Command::Serve { bind: Some(bind) } => settings.bind = bind.clone(),
            Command::Export {
                output: Some(output),
                ..
            } => settings.output_path = output.clone(),
            _ => {}
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = CliConfig::try_parse_from([
            "launch-dash",
            "--data",
            "launches.csv",
            "serve",
            "--bind",
            "0.0.0.0:9000",
        ])
        .unwrap();

        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.data_path, "launches.csv");
        assert_eq!(settings.bind, "0.0.0.0:9000");
    }

    #[test]
    fn test_parse_summary_selection() {
        let cli = CliConfig::try_parse_from([
            "launch-dash",
            "summary",
            "--site",
            "KSC LC-39A",
            "--min",
            "1000",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Command::Summary { selection, json } => {
                assert_eq!(selection.site, "KSC LC-39A");
                assert_eq!(selection.min, Some(1000.0));
                assert_eq!(selection.max, None);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_export_output_override() {
        let cli = CliConfig::try_parse_from(["launch-dash", "export", "-o", "/tmp/snap"]).unwrap();
        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.output_path, "/tmp/snap");
    }

    #[test]
    fn test_subcommand_required() {
        assert!(CliConfig::try_parse_from(["launch-dash"]).is_err());
    }
}
