use crate::adapters::directory::DirectorySource;
use crate::domain::model::TilingScheme;
use crate::utils::error::{Result, TerrainError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    pub source: SourceConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub credit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Directory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Tile root for `directory` sources.
    pub path: Option<String>,
    #[serde(default)]
    pub tiling_scheme: TilingScheme,
    pub maximum_level: u32,
    pub heightmap_width: u32,
    pub heightmap_height: u32,
    pub level_zero_maximum_geometric_error: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TerrainConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TerrainError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TerrainError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// Builds the terrain source the `[source]` section describes.
    pub fn build_source(&self) -> Result<DirectorySource> {
        self.validate()?;

        let source = &self.source;
        let directory = match source.kind {
            SourceKind::Directory => DirectorySource::new(
                validation::validate_required_field("source.path", &source.path)?,
                source.tiling_scheme,
                source.heightmap_width,
                source.heightmap_height,
                source.maximum_level,
            ),
        };

        Ok(match source.level_zero_maximum_geometric_error {
            Some(error) => directory.with_level_zero_maximum_geometric_error(error),
            None => directory,
        })
    }
}

impl Validate for TerrainConfig {
    fn validate(&self) -> Result<()> {
        match self.source.kind {
            SourceKind::Directory => {
                let path = validation::validate_required_field("source.path", &self.source.path)?;
                validation::validate_path("source.path", path)?;
            }
        }
        validation::validate_range("source.maximum_level", self.source.maximum_level, 0, 30)?;
        validation::validate_positive_number("source.heightmap_width", self.source.heightmap_width, 2)?;
        validation::validate_positive_number(
            "source.heightmap_height",
            self.source.heightmap_height,
            2,
        )?;

        if let Some(error) = self.source.level_zero_maximum_geometric_error {
            validation::validate_finite_positive(
                "source.level_zero_maximum_geometric_error",
                error,
            )?;
        }

        if let Some(level) = self.log_level() {
            if !LOG_LEVELS.contains(&level) {
                return Err(TerrainError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::estimated_level_zero_geometric_error;
    use crate::domain::ports::TerrainSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[provider]
credit = "Elevation © GeoServer"

[source]
kind = "directory"
path = "./tiles"
tiling_scheme = "web_mercator"
maximum_level = 12
heightmap_width = 65
heightmap_height = 65
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TerrainConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.provider.credit, "Elevation © GeoServer");
        assert_eq!(config.source.kind, SourceKind::Directory);
        assert_eq!(config.source.tiling_scheme, TilingScheme::WebMercator);
        assert_eq!(config.source.maximum_level, 12);
        assert!(config.log_level().is_none());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = TerrainConfig::from_toml_str(
            r#"
[source]
kind = "directory"
path = "./tiles"
maximum_level = 3
heightmap_width = 33
heightmap_height = 33
"#,
        )
        .unwrap();

        assert_eq!(config.provider.credit, "");
        assert_eq!(config.source.tiling_scheme, TilingScheme::Geographic);

        let source = config.build_source().unwrap();
        assert_eq!(
            source.level_zero_maximum_geometric_error(),
            estimated_level_zero_geometric_error(TilingScheme::Geographic, 33)
        );
    }

    #[test]
    fn test_explicit_geometric_error() {
        let content = format!("{}level_zero_maximum_geometric_error = 5000.0\n", BASIC);
        let config = TerrainConfig::from_toml_str(&content).unwrap();
        let source = config.build_source().unwrap();
        assert_eq!(source.level_zero_maximum_geometric_error(), 5000.0);
        assert_eq!(source.heightmap_width(), 65);
        assert_eq!(source.maximum_level(), 12);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GEOSERVER_TERRAIN_TEST_ROOT", "/srv/dem");

        let config = TerrainConfig::from_toml_str(
            r#"
[source]
kind = "directory"
path = "${GEOSERVER_TERRAIN_TEST_ROOT}/tiles"
maximum_level = 3
heightmap_width = 33
heightmap_height = 33
"#,
        )
        .unwrap();
        assert_eq!(config.source.path.as_deref(), Some("/srv/dem/tiles"));

        std::env::remove_var("GEOSERVER_TERRAIN_TEST_ROOT");
    }

    #[test]
    fn test_directory_source_requires_path() {
        let content = BASIC.replace("path = \"./tiles\"\n", "");
        let config = TerrainConfig::from_toml_str(&content).unwrap();
        assert!(config.source.path.is_none());

        let err = config.build_source().unwrap_err();
        assert!(matches!(
            err,
            TerrainError::MissingConfigError { ref field } if field == "source.path"
        ));
        assert_eq!(err.severity(), crate::utils::error::ErrorSeverity::High);
    }

    #[test]
    fn test_unknown_source_kind_fails_to_parse() {
        let content = BASIC.replace("kind = \"directory\"", "kind = \"wms\"");
        assert!(matches!(
            TerrainConfig::from_toml_str(&content),
            Err(TerrainError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let too_deep = BASIC.replace("maximum_level = 12", "maximum_level = 31");
        let config = TerrainConfig::from_toml_str(&too_deep).unwrap();
        assert!(config.validate().is_err());
        assert!(config.build_source().is_err());

        let tiny = BASIC.replace("heightmap_width = 65", "heightmap_width = 1");
        assert!(TerrainConfig::from_toml_str(&tiny).unwrap().validate().is_err());

        let bad_error = format!("{}level_zero_maximum_geometric_error = -1.0\n", BASIC);
        assert!(TerrainConfig::from_toml_str(&bad_error)
            .unwrap()
            .validate()
            .is_err());

        let bad_level = format!("{}\n[logging]\nlevel = \"loud\"\n", BASIC);
        assert!(TerrainConfig::from_toml_str(&bad_level)
            .unwrap()
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let content = format!("{}\n[logging]\nlevel = \"debug\"\njson = true\n", BASIC);
        temp_file.write_all(content.as_bytes()).unwrap();

        let config = TerrainConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.json_logs());
    }
}
