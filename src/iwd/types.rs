// iwd enums and info structs shared across the UI

use chrono::{DateTime, FixedOffset};
use strum_macros::Display;

/// Device operation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    #[default]
    Station,
    Ap,
}

impl TryFrom<&str> for Mode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "station" => Ok(Mode::Station),
            "ap" => Ok(Mode::Ap),
            _ => Err(anyhow::anyhow!("Invalid mode: {}", value)),
        }
    }
}

/// Station connection state, as reported by the `State` property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StationState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
    Roaming,
}

impl From<&str> for StationState {
    fn from(value: &str) -> Self {
        match value {
            "connected" => StationState::Connected,
            "connecting" => StationState::Connecting,
            "disconnecting" => StationState::Disconnecting,
            "roaming" => StationState::Roaming,
            _ => StationState::Disconnected,
        }
    }
}

/// Network security, from the `Type` property of Network and KnownNetwork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum SecurityType {
    #[default]
    #[strum(serialize = "open")]
    Open,
    #[strum(serialize = "wep")]
    Wep,
    #[strum(serialize = "psk")]
    Psk,
    #[strum(serialize = "8021x")]
    Enterprise,
}

impl From<&str> for SecurityType {
    fn from(value: &str) -> Self {
        match value {
            "psk" => SecurityType::Psk,
            "wep" => SecurityType::Wep,
            "8021x" => SecurityType::Enterprise,
            _ => SecurityType::Open,
        }
    }
}

impl SecurityType {
    pub fn is_enterprise(&self) -> bool {
        matches!(self, SecurityType::Enterprise)
    }
}

/// A visible network resolved from `GetOrderedNetworks`
#[derive(Debug, Clone)]
pub struct NetworkInfo {
    pub path: String,
    pub name: String,
    pub security: SecurityType,
    pub connected: bool,
    pub known_network_path: Option<String>,
}

/// An access point with no broadcast SSID, from `GetHiddenAccessPoints`
#[derive(Debug, Clone)]
pub struct HiddenAccessPoint {
    pub address: String,
    pub signal_strength: i16,
    pub security: SecurityType,
}

/// A provisioned network, from the KnownNetwork objects
#[derive(Debug, Clone)]
pub struct KnownNetworkInfo {
    pub path: String,
    pub name: String,
    pub security: SecurityType,
    pub is_hidden: bool,
    pub is_autoconnect: bool,
    pub last_connected: Option<DateTime<FixedOffset>>,
}

/// Link diagnostics for the active connection
#[derive(Debug, Clone, Default)]
pub struct DiagnosticInfo {
    pub frequency: Option<u32>,
    pub rssi: Option<i16>,
    pub rx_bitrate: Option<u32>,
    pub tx_bitrate: Option<u32>,
    pub security: Option<String>,
}

/// iwd reports signal strength in 1/100 dBm. Map it onto 0-100 with
/// the usual 2*(dBm+100) approximation.
pub fn signal_percent(signal_strength: i16) -> u8 {
    let dbm = i32::from(signal_strength) / 100;
    (2 * (dbm + 100)).clamp(0, 100) as u8
}

/// `LastConnectedTime` is an ISO 8601 string, e.g. "2024-03-01T18:02:51Z"
pub fn parse_last_connected(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_state_from_iwd_strings() {
        assert_eq!(StationState::from("connected"), StationState::Connected);
        assert_eq!(StationState::from("roaming"), StationState::Roaming);
        assert_eq!(
            StationState::from("no such state"),
            StationState::Disconnected
        );
        assert_eq!(StationState::Connecting.to_string(), "connecting");
    }

    #[test]
    fn security_type_round_trip() {
        for raw in ["open", "wep", "psk", "8021x"] {
            assert_eq!(SecurityType::from(raw).to_string(), raw);
        }
        assert_eq!(SecurityType::from("owe"), SecurityType::Open);
        assert!(SecurityType::from("8021x").is_enterprise());
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!(Mode::try_from("Station").unwrap(), Mode::Station);
        assert_eq!(Mode::try_from("AP").unwrap(), Mode::Ap);
        assert!(Mode::try_from("mesh").is_err());
    }

    #[test]
    fn signal_percent_clamps() {
        assert_eq!(signal_percent(-10000), 0);
        assert_eq!(signal_percent(-5000), 100);
        assert_eq!(signal_percent(-7500), 50);
        assert_eq!(signal_percent(0), 100);
    }

    #[test]
    fn last_connected_parses_utc_timestamps() {
        let parsed = parse_last_connected("2024-03-01T18:02:51Z").unwrap();
        assert_eq!(parsed.timestamp(), 1709316171);
        assert!(parse_last_connected("yesterday").is_none());
    }
}
