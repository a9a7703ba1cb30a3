use crate::utils::error::{DashError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub data: DataConfig,
    pub server: Option<ServerConfig>,
    pub slider: Option<SliderConfig>,
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: String,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderConfig {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: Option<String>,
    pub chart_width: Option<u32>,
    pub chart_height: Option<u32>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LAUNCH_DATA})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("data.path", &self.data.path)?;

        if let Some(delimiter) = &self.data.delimiter {
            validation::validate_delimiter("data.delimiter", delimiter)?;
        }

        if let Some(bind) = self.server.as_ref().and_then(|s| s.bind.as_deref()) {
            validation::validate_socket_addr("server.bind", bind)?;
        }

        if let Some(slider) = &self.slider {
            if let Some(step) = slider.step {
                validation::validate_positive_number("slider.step", step)?;
            }
            if let (Some(min), Some(max)) = (slider.min, slider.max) {
                validation::validate_ordered_bounds("slider", min, max)?;
            }
        }

        if let Some(export) = &self.export {
            if let Some(output_path) = &export.output_path {
                validation::validate_path("export.output_path", output_path)?;
            }
            for (field, size) in [
                ("export.chart_width", export.chart_width),
                ("export.chart_height", export.chart_height),
            ] {
                if let Some(size) = size {
                    validation::validate_positive_number(field, f64::from(size))?;
                }
            }
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[data]
path = "spacex_launch_dash.csv"
delimiter = ","

[server]
bind = "0.0.0.0:8050"

[slider]
min = 0
max = 10000
step = 1000

[export]
output_path = "./snapshots"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data.path, "spacex_launch_dash.csv");
        assert_eq!(config.server.unwrap().bind.as_deref(), Some("0.0.0.0:8050"));
        let slider = config.slider.unwrap();
        assert_eq!(slider.max, Some(10000.0));
        assert_eq!(slider.step, Some(1000.0));
    }

    #[test]
    fn test_minimal_config() {
        let config = TomlConfig::from_toml_str("[data]\npath = \"launches.csv\"\n").unwrap();
        assert!(config.server.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LAUNCH_DASH_TEST_DATA", "/srv/launches.csv");

        let config = TomlConfig::from_toml_str("[data]\npath = \"${LAUNCH_DASH_TEST_DATA}\"\n").unwrap();
        assert_eq!(config.data.path, "/srv/launches.csv");

        std::env::remove_var("LAUNCH_DASH_TEST_DATA");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let config = TomlConfig::from_toml_str("[data]\npath = \"${LAUNCH_DASH_UNSET_VAR}\"\n").unwrap();
        assert_eq!(config.data.path, "${LAUNCH_DASH_UNSET_VAR}");
    }

    #[test]
    fn test_config_validation() {
        let bad_bind = TomlConfig::from_toml_str("[data]\npath = \"a.csv\"\n[server]\nbind = \"nowhere\"\n").unwrap();
        assert!(bad_bind.validate().is_err());

        let bad_slider =
            TomlConfig::from_toml_str("[data]\npath = \"a.csv\"\n[slider]\nmin = 5000\nmax = 100\n").unwrap();
        assert!(bad_slider.validate().is_err());

        let bad_delimiter = TomlConfig::from_toml_str("[data]\npath = \"a.csv\"\ndelimiter = \"::\"\n").unwrap();
        assert!(bad_delimiter.validate().is_err());
    }

    #[test]
    fn test_missing_data_section_is_error() {
        assert!(TomlConfig::from_toml_str("[server]\nbind = \"127.0.0.1:8050\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[data]\npath = \"file-test.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.data.path, "file-test.csv");
    }

    #[test]
    fn test_bundled_sample_config_points_at_sample_data() {
        let config = TomlConfig::from_toml_str(include_str!("../../launch-dash.toml")).unwrap();
        config.validate_config().unwrap();

        assert_eq!(config.data.path, "data/spacex_launch_dash.csv");
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        assert!(manifest_dir.join(&config.data.path).is_file());
    }
}
