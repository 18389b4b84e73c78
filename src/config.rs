use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// Keybindings and behavior, read from `$XDG_CONFIG_HOME/iwtui/config.toml`.
/// Every field has a default so a missing or partial file is fine.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_switch_mode")]
    pub switch: char,

    #[serde(default)]
    pub esc_quit: bool,

    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub station: StationConfig,

    #[serde(default)]
    pub ap: ApConfig,
}

#[derive(Debug, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_device_infos")]
    pub infos: char,
    #[serde(default = "default_toggle_power")]
    pub toggle_power: char,
}

#[derive(Debug, Deserialize)]
pub struct StationConfig {
    #[serde(default = "default_start_scanning")]
    pub start_scanning: char,
    #[serde(default)]
    pub known_network: KnownNetworkConfig,
    #[serde(default)]
    pub new_network: NewNetworkConfig,
}

#[derive(Debug, Deserialize)]
pub struct KnownNetworkConfig {
    #[serde(default = "default_show_all")]
    pub show_all: char,
    #[serde(default = "default_remove")]
    pub remove: char,
    #[serde(default = "default_toggle_autoconnect")]
    pub toggle_autoconnect: char,
    #[serde(default = "default_share")]
    pub share: char,
}

#[derive(Debug, Deserialize)]
pub struct NewNetworkConfig {
    #[serde(default = "default_show_all")]
    pub show_all: char,
    #[serde(default = "default_connect_hidden")]
    pub connect_hidden: char,
}

#[derive(Debug, Deserialize)]
pub struct ApConfig {
    #[serde(default = "default_ap_start")]
    pub start: char,
    #[serde(default = "default_ap_stop")]
    pub stop: char,
}

fn default_switch_mode() -> char {
    'r'
}
fn default_tick_rate() -> u64 {
    2000
}
fn default_device_infos() -> char {
    'i'
}
fn default_toggle_power() -> char {
    'o'
}
fn default_start_scanning() -> char {
    's'
}
fn default_show_all() -> char {
    'a'
}
fn default_remove() -> char {
    'd'
}
fn default_toggle_autoconnect() -> char {
    't'
}
fn default_share() -> char {
    'x'
}
fn default_connect_hidden() -> char {
    'h'
}
fn default_ap_start() -> char {
    'n'
}
fn default_ap_stop() -> char {
    'x'
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str("").unwrap()
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            infos: default_device_infos(),
            toggle_power: default_toggle_power(),
        }
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            start_scanning: default_start_scanning(),
            known_network: KnownNetworkConfig::default(),
            new_network: NewNetworkConfig::default(),
        }
    }
}

impl Default for KnownNetworkConfig {
    fn default() -> Self {
        Self {
            show_all: default_show_all(),
            remove: default_remove(),
            toggle_autoconnect: default_toggle_autoconnect(),
            share: default_share(),
        }
    }
}

impl Default for NewNetworkConfig {
    fn default() -> Self {
        Self {
            show_all: default_show_all(),
            connect_hidden: default_connect_hidden(),
        }
    }
}

impl Default for ApConfig {
    fn default() -> Self {
        Self {
            start: default_ap_start(),
            stop: default_ap_stop(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        match Self::path().and_then(|p| fs::read_to_string(p).ok()) {
            Some(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Invalid config file, using defaults: {e}");
                    Config::default()
                }
            },
            None => Config::default(),
        }
    }

    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("iwtui").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.switch, 'r');
        assert!(!config.esc_quit);
        assert_eq!(config.tick_rate_ms, 2000);
        assert_eq!(config.station.start_scanning, 's');
        assert_eq!(config.station.new_network.connect_hidden, 'h');
        assert_eq!(config.station.known_network.remove, 'd');
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            esc_quit = true

            [station.new_network]
            connect_hidden = 'H'
            "#,
        )
        .unwrap();

        assert!(config.esc_quit);
        assert_eq!(config.station.new_network.connect_hidden, 'H');
        assert_eq!(config.station.new_network.show_all, 'a');
        assert_eq!(config.device.toggle_power, 'o');
    }
}
