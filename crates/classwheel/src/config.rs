use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use spinwheel::label::LabelSet;
use spinwheel::wheel::{SpinConfig, SpinConfigError};
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct MonitorName(String);

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub labels: LabelSet,
    /// Connector name of the output to show the wheel on, e.g. "DP-1".
    #[serde(default)]
    pub monitor: Option<MonitorName>,
    #[serde(default)]
    pub spin: SpinConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid spin settings: {0}")]
    Spin(#[from] SpinConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "classtool", "classwheel")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("CLASSWHEEL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    parse_config(s)
}

fn parse_config(source: config::Config) -> Result<Config, ConfigError> {
    let config: Config = source.try_deserialize()?;
    config.spin.validate()?;
    Ok(config)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;
use std::path::Path;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if touches_config(&event, &config_path) => {
                log::debug!("Config file changed: {:?}", event.kind);
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

/// Editors often replace the file instead of writing it, so creation and
/// removal count as changes too.
fn touches_config(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinwheel::wheel::IndexPolicy;

    fn from_toml(text: &str) -> Result<Config, ConfigError> {
        let source = config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?;
        parse_config(source)
    }

    #[test]
    fn test_default_config_parses() {
        let config = from_toml(DEFAULT_CONFIG).unwrap();
        assert!(!config.labels.is_empty());
        assert_eq!(config.spin, SpinConfig::default());
    }

    #[test]
    fn test_partial_spin_section_keeps_defaults() {
        let config = from_toml(
            r#"
labels = ["Alice", "Bob", "Alice", "  "]
monitor = "DP-1"

[spin]
index_policy = "Legacy"
"#,
        )
        .unwrap();

        assert_eq!(config.labels.len(), 2);
        assert_eq!(config.monitor.as_deref().map(String::as_str), Some("DP-1"));
        assert_eq!(config.spin.index_policy, IndexPolicy::Legacy);
        assert_eq!(config.spin.min_turns, 8);
    }

    #[test]
    fn test_invalid_turns_rejected() {
        let result = from_toml(
            r#"
[spin]
min_turns = 1
"#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::Spin(SpinConfigError::TooFewTurns(1)))
        ));
    }

    #[test]
    fn test_only_config_file_changes_trigger_reload() {
        use notify::event::{AccessKind, CreateKind, ModifyKind};

        let path = Path::new("/home/alice/.config/classwheel/config.toml");
        let modified =
            notify::Event::new(EventKind::Modify(ModifyKind::Any)).add_path(path.to_path_buf());
        let created =
            notify::Event::new(EventKind::Create(CreateKind::File)).add_path(path.to_path_buf());
        let read =
            notify::Event::new(EventKind::Access(AccessKind::Any)).add_path(path.to_path_buf());
        let sibling = notify::Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(path.with_file_name("notes.txt"));

        assert!(touches_config(&modified, path));
        assert!(touches_config(&created, path));
        assert!(!touches_config(&read, path));
        assert!(!touches_config(&sibling, path));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = from_toml("").unwrap();
        assert!(config.labels.is_empty());
        assert!(config.monitor.is_none());
        assert_eq!(config.spin, SpinConfig::default());
    }
}
