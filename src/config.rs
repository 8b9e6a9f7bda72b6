// src/config.rs

//! Render configuration.
//!
//! Values come from three places, highest precedence first: command line
//! flags, an optional TOML config file, built-in defaults. `input_path` has
//! no default and must be given by one of the first two.

use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_GRIDSIZE, MAX_GRIDSIZE};
use crate::error::ConfigError;

/// Which view of the samples to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlotStyle {
    /// Mean metric per hexagon over the X/Y plane
    #[default]
    Hexbin,
    /// One dot per sample colored by its metric
    Scatter,
}

impl PlotStyle {
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::Hexbin => "MetricHexbin",
            Self::Scatter => "MetricScatter",
        }
    }
}

/// Contents of a TOML config file. Every key is optional.
///
/// ```toml
/// input_path = "TrackingRoomLinear-100000.txt"
/// output_path = "linear_errors.png"
/// gridsize = 50
/// style = "hexbin"
/// title = "Linear room, 100k samples"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// File to read samples from.
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub gridsize: Option<usize>,
    pub style: Option<PlotStyle>,
    pub title: Option<String>,
}

impl FileConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values given on the command line. `None` leaves the lower layers in effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub gridsize: Option<usize>,
    pub style: Option<PlotStyle>,
    pub title: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub gridsize: usize,
    pub style: PlotStyle,
    pub title: Option<String>,
}

impl RenderConfig {
    /// Merges the layers: overrides > file > defaults.
    pub fn resolve(file: FileConfig, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let input_path = overrides
            .input_path
            .or(file.input_path)
            .ok_or(ConfigError::MissingInputPath)?;

        let gridsize = overrides
            .gridsize
            .or(file.gridsize)
            .unwrap_or(DEFAULT_GRIDSIZE);
        if gridsize == 0 || gridsize > MAX_GRIDSIZE {
            return Err(ConfigError::InvalidGridSize(gridsize));
        }

        let style = overrides.style.or(file.style).unwrap_or_default();
        let output_path = overrides
            .output_path
            .or(file.output_path)
            .unwrap_or_else(|| default_output_path(&input_path, style));

        Ok(Self {
            input_path,
            output_path,
            gridsize,
            style,
            title: overrides.title.or(file.title),
        })
    }

    /// Input file name without directory or extension, used as the figure title.
    pub fn root_name(&self) -> String {
        file_stem(&self.input_path)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

/// `<input stem>_<style suffix>.png` in the current directory.
pub fn default_output_path(input_path: &Path, style: PlotStyle) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}.png",
        file_stem(input_path),
        style.file_suffix()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let overrides = ConfigOverrides {
            input_path: Some(PathBuf::from("logs/TrackingRoomVector-100000.txt")),
            ..Default::default()
        };
        let config = RenderConfig::resolve(FileConfig::default(), overrides).unwrap();
        assert_eq!(config.gridsize, DEFAULT_GRIDSIZE);
        assert_eq!(config.style, PlotStyle::Hexbin);
        assert_eq!(
            config.output_path,
            PathBuf::from("TrackingRoomVector-100000_MetricHexbin.png")
        );
        assert_eq!(config.root_name(), "TrackingRoomVector-100000");
        assert_eq!(config.title, None);
    }

    #[test]
    fn test_overrides_beat_file() {
        let file = FileConfig {
            input_path: Some(PathBuf::from("from_file.txt")),
            gridsize: Some(30),
            style: Some(PlotStyle::Scatter),
            title: Some("File title".to_string()),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            input_path: Some(PathBuf::from("from_cli.txt")),
            gridsize: Some(80),
            ..Default::default()
        };
        let config = RenderConfig::resolve(file, overrides).unwrap();
        assert_eq!(config.input_path, PathBuf::from("from_cli.txt"));
        assert_eq!(config.gridsize, 80);
        assert_eq!(config.style, PlotStyle::Scatter);
        assert_eq!(config.title.as_deref(), Some("File title"));
        assert_eq!(
            config.output_path,
            PathBuf::from("from_cli_MetricScatter.png")
        );
    }

    #[test]
    fn test_missing_input_path() {
        let err =
            RenderConfig::resolve(FileConfig::default(), ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingInputPath));
    }

    #[test]
    fn test_zero_gridsize_rejected() {
        let overrides = ConfigOverrides {
            input_path: Some(PathBuf::from("samples.txt")),
            gridsize: Some(0),
            ..Default::default()
        };
        let err = RenderConfig::resolve(FileConfig::default(), overrides).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGridSize(0)));
    }

    #[test]
    fn test_gridsize_upper_bound() {
        let with_gridsize = |gridsize| ConfigOverrides {
            input_path: Some(PathBuf::from("samples.txt")),
            gridsize: Some(gridsize),
            ..Default::default()
        };

        let config =
            RenderConfig::resolve(FileConfig::default(), with_gridsize(MAX_GRIDSIZE)).unwrap();
        assert_eq!(config.gridsize, MAX_GRIDSIZE);

        for gridsize in [MAX_GRIDSIZE + 1, 1 << 40, usize::MAX] {
            let err =
                RenderConfig::resolve(FileConfig::default(), with_gridsize(gridsize)).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidGridSize(g) if g == gridsize));
        }
    }

    #[test]
    fn test_gridsize_from_file_is_bounded_too() {
        let file = FileConfig {
            input_path: Some(PathBuf::from("samples.txt")),
            gridsize: Some(100_000),
            ..Default::default()
        };
        let err = RenderConfig::resolve(file, ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGridSize(100_000)));
    }

    #[test]
    fn test_parse_toml() {
        let file: FileConfig = toml::from_str(
            r#"
            input_path = "TrackingRoomLinear-100000.txt"
            gridsize = 40
            style = "scatter"
            "#,
        )
        .unwrap();
        assert_eq!(
            file.input_path,
            Some(PathBuf::from("TrackingRoomLinear-100000.txt"))
        );
        assert_eq!(file.gridsize, Some(40));
        assert_eq!(file.style, Some(PlotStyle::Scatter));
        assert_eq!(file.output_path, None);
    }

    #[test]
    fn test_unknown_toml_key_rejected() {
        let result: Result<FileConfig, _> = toml::from_str("input = \"samples.txt\"");
        assert!(result.is_err());
    }
}

// src/config.rs
