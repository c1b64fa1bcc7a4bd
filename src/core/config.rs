//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.config/termnote/config.toml` (platform config dir).
//! If missing on first run, a commented-out default is generated so users can
//! discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::markdown::DEFAULT_CODE_LANGUAGE;
use crate::core::state::{DEFAULT_TABLE_COLS, DEFAULT_TABLE_ROWS, EditorSettings};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TermnoteConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub vault_dir: Option<String>,
    pub name_char_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EditorConfig {
    pub code_language: Option<String>,
    pub table_rows: Option<usize>,
    pub table_cols: Option<usize>,
    pub tab_width: Option<usize>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_VAULT_DIR: &str = ".termnote";
pub const DEFAULT_NAME_CHAR_LIMIT: usize = 100;
pub const DEFAULT_TAB_WIDTH: usize = 4;
pub const VAULT_ENV_VAR: &str = "TERMNOTE_VAULT";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub vault_dir: PathBuf,
    pub name_char_limit: usize,
    pub tab_width: usize,
    pub editor: EditorSettings,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    NoHomeDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::NoHomeDir => write!(f, "could not determine home directory"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `<config dir>/termnote/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("termnote").join("config.toml"))
}

/// Load config from `path`, or from [`config_path`] when `None`.
///
/// If the default file doesn't exist, generates a commented-out default and
/// returns `TermnoteConfig::default()`. An explicit path that doesn't exist is
/// an error. A malformed file is `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<TermnoteConfig, ConfigError> {
    if let Some(path) = path {
        return read_config(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine config directory, using default config");
            return Ok(TermnoteConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TermnoteConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<TermnoteConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TermnoteConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# termnote configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# vault_dir = "~/.termnote"          # Or set TERMNOTE_VAULT, or pass --vault
# name_char_limit = 100

# [editor]
# code_language = "text"             # Language tag for Alt+C code blocks
# table_rows = 3                     # Alt+T table size, including the header
# table_cols = 3
# tab_width = 4
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_vault` is the `--vault` flag (None = not specified).
pub fn resolve(
    config: &TermnoteConfig,
    cli_vault: Option<&Path>,
) -> Result<ResolvedConfig, ConfigError> {
    let home = dirs::home_dir();
    resolve_with(config, cli_vault, std::env::var(VAULT_ENV_VAR).ok(), home.as_deref())
}

fn resolve_with(
    config: &TermnoteConfig,
    cli_vault: Option<&Path>,
    env_vault: Option<String>,
    home: Option<&Path>,
) -> Result<ResolvedConfig, ConfigError> {
    // Vault: CLI → env → config → ~/.termnote
    let vault_dir = match cli_vault {
        Some(dir) => dir.to_path_buf(),
        None => match env_vault.or_else(|| config.general.vault_dir.clone()) {
            Some(dir) => expand_home(&dir, home)?,
            None => home.ok_or(ConfigError::NoHomeDir)?.join(DEFAULT_VAULT_DIR),
        },
    };

    let code_language = config
        .editor
        .code_language
        .clone()
        .filter(|lang| !lang.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CODE_LANGUAGE.to_string());

    Ok(ResolvedConfig {
        vault_dir,
        name_char_limit: config
            .general
            .name_char_limit
            .unwrap_or(DEFAULT_NAME_CHAR_LIMIT)
            .max(1),
        tab_width: config.editor.tab_width.unwrap_or(DEFAULT_TAB_WIDTH).max(1),
        editor: EditorSettings {
            code_language,
            table_rows: config.editor.table_rows.unwrap_or(DEFAULT_TABLE_ROWS),
            table_cols: config.editor.table_cols.unwrap_or(DEFAULT_TABLE_COLS),
        },
    })
}

/// Expands a leading `~/` (or a bare `~`) to the home directory.
fn expand_home(dir: &str, home: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if dir == "~" {
        return home.map(Path::to_path_buf).ok_or(ConfigError::NoHomeDir);
    }
    match dir.strip_prefix("~/") {
        Some(rest) => Ok(home.ok_or(ConfigError::NoHomeDir)?.join(rest)),
        None => Ok(PathBuf::from(dir)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> Option<&'static Path> {
        Some(Path::new("/home/tester"))
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with(&TermnoteConfig::default(), None, None, home()).unwrap();
        assert_eq!(resolved.vault_dir, PathBuf::from("/home/tester/.termnote"));
        assert_eq!(resolved.name_char_limit, DEFAULT_NAME_CHAR_LIMIT);
        assert_eq!(resolved.tab_width, DEFAULT_TAB_WIDTH);
        assert_eq!(resolved.editor, EditorSettings::default());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TermnoteConfig {
            general: GeneralConfig {
                vault_dir: Some("~/notes".to_string()),
                name_char_limit: Some(40),
            },
            editor: EditorConfig {
                code_language: Some("rust".to_string()),
                table_rows: Some(5),
                table_cols: Some(2),
                tab_width: Some(2),
            },
        };
        let resolved = resolve_with(&config, None, None, home()).unwrap();
        assert_eq!(resolved.vault_dir, PathBuf::from("/home/tester/notes"));
        assert_eq!(resolved.name_char_limit, 40);
        assert_eq!(resolved.tab_width, 2);
        assert_eq!(resolved.editor.code_language, "rust");
        assert_eq!(resolved.editor.table_rows, 5);
        assert_eq!(resolved.editor.table_cols, 2);
    }

    #[test]
    fn test_resolve_env_then_cli_win() {
        let config = TermnoteConfig {
            general: GeneralConfig {
                vault_dir: Some("/from/config".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let resolved =
            resolve_with(&config, None, Some("/from/env".to_string()), home()).unwrap();
        assert_eq!(resolved.vault_dir, PathBuf::from("/from/env"));

        let resolved = resolve_with(
            &config,
            Some(Path::new("/from/cli")),
            Some("/from/env".to_string()),
            home(),
        )
        .unwrap();
        assert_eq!(resolved.vault_dir, PathBuf::from("/from/cli"));
    }

    #[test]
    fn test_missing_home_is_an_error() {
        let err = resolve_with(&TermnoteConfig::default(), None, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::NoHomeDir));

        // An absolute vault needs no home directory
        let resolved =
            resolve_with(&TermnoteConfig::default(), None, Some("/abs".to_string()), None)
                .unwrap();
        assert_eq!(resolved.vault_dir, PathBuf::from("/abs"));
    }

    #[test]
    fn test_blank_code_language_falls_back() {
        let config = TermnoteConfig {
            editor: EditorConfig {
                code_language: Some("  ".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with(&config, None, None, home()).unwrap();
        assert_eq!(resolved.editor.code_language, "text");
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[editor]
table_cols = 4
"#;
        let config: TermnoteConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.editor.table_cols, Some(4));
        assert!(config.editor.table_rows.is_none());
        assert!(config.general.vault_dir.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nvault_dir = ").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_explicit_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_generated_default_parses_to_empty_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        generate_default_config(&path);
        let config = load_config(Some(&path)).unwrap();
        assert!(config.general.vault_dir.is_none());
        assert!(config.editor.tab_width.is_none());
    }
}
