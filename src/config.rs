use crate::mirror::MirrorOptions;
use crate::report::ReportFormat;
use serde::Deserialize;
use std::{env, fs, path::Path, path::PathBuf};
use thiserror::Error;

const CONFIG_NAMESPACE: &str = "gmi2html";
const CONFIG_FILENAME: &str = "gmi2html.toml";

/// Contents of `gmi2html.toml`. Every key is optional.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Gmi2HtmlConfig {
    #[serde(alias = "markupExtension")]
    pub markup_extension: Option<String>,
    #[serde(alias = "outputExtension")]
    pub output_extension: Option<String>,
    #[serde(alias = "reportFormat")]
    pub report_format: Option<ReportFormat>,
}

impl Gmi2HtmlConfig {
    pub fn mirror_options(&self) -> MirrorOptions {
        let mut options = MirrorOptions::default();
        if let Some(ext) = normalize_extension(self.markup_extension.as_deref()) {
            options = options.with_markup_extension(ext);
        }
        if let Some(ext) = normalize_extension(self.output_extension.as_deref()) {
            options = options.with_output_extension(ext);
        }
        options
    }

    pub fn report_format(&self) -> ReportFormat {
        self.report_format.unwrap_or_default()
    }
}

// "html", ".html" and " html " all mean the same extension
fn normalize_extension(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .map(|s| s.trim_start_matches('.'))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub config: Gmi2HtmlConfig,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to determine configuration directory via XDG environment variables")]
    MissingConfigDir,
    #[error("failed to read config file at {path:?}: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config file at {path:?}: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
        path: PathBuf,
    },
}

/// Load the config file. An explicitly given path must exist; the default
/// location is optional and yields `Ok(None)` when absent.
pub fn load_config(explicit: Option<&Path>) -> Result<Option<ConfigLoadResult>, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match resolve_config_path() {
            Ok(path) if path.exists() => path,
            Ok(_) | Err(ConfigError::MissingConfigDir) => return Ok(None),
            Err(err) => return Err(err),
        },
    };

    let config_text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        source,
        path: path.clone(),
    })?;

    let config: Gmi2HtmlConfig =
        toml::from_str(&config_text).map_err(|source| ConfigError::Parse {
            source,
            path: path.clone(),
        })?;

    Ok(Some(ConfigLoadResult { config, path }))
}

pub fn resolve_config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_home_dir()?
        .join(CONFIG_NAMESPACE)
        .join(CONFIG_FILENAME))
}

fn config_home_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(dir));
    }

    #[cfg(windows)]
    if let Some(dir) = env::var_os("APPDATA") {
        return Ok(PathBuf::from(dir));
    }

    if let Some(home) = env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".config"));
    }

    #[cfg(windows)]
    if let Some(profile) = env::var_os("USERPROFILE") {
        return Ok(PathBuf::from(profile).join("AppData").join("Roaming"));
    }

    Err(ConfigError::MissingConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config: Gmi2HtmlConfig = toml::from_str(
            r#"
markup_extension = "gemini"
output_extension = ".htm"
report_format = "json"
"#,
        )
        .unwrap();
        let options = config.mirror_options();
        assert_eq!(options.markup_extension, "gemini");
        assert_eq!(options.output_extension, "htm");
        assert_eq!(config.report_format(), ReportFormat::Json);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config: Gmi2HtmlConfig = toml::from_str("markup_extension = \"  \"").unwrap();
        assert_eq!(config.mirror_options(), MirrorOptions::default());
        assert_eq!(config.report_format(), ReportFormat::Text);
    }

    #[test]
    fn test_camel_case_aliases() {
        let config: Gmi2HtmlConfig = toml::from_str("outputExtension = \"xhtml\"").unwrap();
        assert_eq!(config.mirror_options().output_extension, "xhtml");
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "report_format = \"text\"\n").unwrap();

        let loaded = load_config(Some(path.as_path())).unwrap().unwrap();
        assert_eq!(loaded.path, path);
        assert_eq!(loaded.config.report_format, Some(ReportFormat::Text));
    }

    #[test]
    fn test_load_missing_explicit_path_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "report_format = [").unwrap();
        assert!(matches!(
            load_config(Some(path.as_path())),
            Err(ConfigError::Parse { .. })
        ));
    }
}
