use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::PathBuf};
use thiserror::Error;

use crate::{
    binding::{BindingStore, BindingTable},
    constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, JOY_DEADZONE},
    frame::Extent,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("config I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Host name or IPv4 address of the console. Unset until entered on the network screen.
    pub target_ip: Option<String>,
    pub deadzone: i16,
    pub window_width: u16,
    pub window_height: u16,
    pub bindings: BindingTable,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_ip: None,
            deadzone: JOY_DEADZONE,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            bindings: BindingTable::default(),
        }
    }
}

fn config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("com", "InputRedirectionBinder", "InputRedirectionBinder")
        .map(|d| d.config_dir().join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_toml(&fs::read_to_string(&path)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn from_toml(txt: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(txt)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn window(&self) -> Extent {
        Extent {
            width: self.window_width,
            height: self.window_height,
        }
    }

    /// Peer host, if one was entered.
    pub fn target(&self) -> Option<&str> {
        self.target_ip
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl BindingStore for AppConfig {
    fn persist(&mut self, table: &BindingTable) -> Result<(), ConfigError> {
        self.bindings = table.clone();
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        binding::{Binding, DeviceKind, LogicalButton},
        event::KeyCode,
    };

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.target(), None);
    }

    #[test]
    fn bindings_survive_toml() {
        let mut cfg = AppConfig {
            target_ip: Some("192.168.1.20".into()),
            ..AppConfig::default()
        };
        let bindings = &mut cfg.bindings;
        bindings.set(
            DeviceKind::Keyboard,
            LogicalButton::A,
            Binding::Key(KeyCode(17)),
        );
        bindings.set(DeviceKind::Joypad, LogicalButton::B, Binding::Button(1));
        bindings.set(DeviceKind::Joypad, LogicalButton::DPadUp, Binding::Hat(1));
        bindings.set(
            DeviceKind::Joypad,
            LogicalButton::CircleLeft,
            Binding::Axis {
                axis: 0,
                invert: true,
            },
        );

        let txt = cfg.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&txt).unwrap(), cfg);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = AppConfig::from_toml("target_ip = \"3ds.local\"\ndeadzone = 2000\n").unwrap();
        assert_eq!(cfg.target(), Some("3ds.local"));
        assert_eq!(cfg.deadzone, 2000);
        assert_eq!(
            cfg.window(),
            Extent {
                width: 640,
                height: 480
            }
        );
    }

    #[test]
    fn blank_target_counts_as_unset() {
        let cfg = AppConfig {
            target_ip: Some("  ".into()),
            ..AppConfig::default()
        };
        assert_eq!(cfg.target(), None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(matches!(
            AppConfig::from_toml("deadzone = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
