//! Configuration and caller domain types for starterm.
//!
//! Configuration is an explicit, immutable value: loaded once by the
//! binary and handed to whatever builds pages. Nothing reads it globally.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Everything the binary can be configured with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How pages are laid out and decorated.
    pub display: DisplayConfig,
    /// Maximum content rows per screen.
    pub page_capacity: usize,
    /// Services shown on the dashboard, in display order.
    pub dashboard: Vec<ServiceConfig>,
    /// Host used when a service leaves `host` empty.
    pub dashboard_default_host: String,
    /// Port used when a service leaves `port` empty.
    pub dashboard_default_port: Option<u16>,
    /// Connect/read timeout for a single probe.
    pub probe_timeout_ms: u64,
    /// Entries on the launcher menu.
    pub launcher: Vec<LaunchEntry>,
    /// Ranges for the demo page's random values.
    pub mock: MockConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            page_capacity: 15,
            dashboard: Vec::new(),
            dashboard_default_host: "localhost".to_string(),
            dashboard_default_port: None,
            probe_timeout_ms: 2000,
            launcher: Vec::new(),
            mock: MockConfig::default(),
        }
    }
}

/// Page layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Line width in columns. None = ask the terminal, falling back to 80.
    pub width: Option<u16>,
    /// Width of the label in a "label : value" line.
    pub label_width: usize,
    /// Emit ANSI bold. Off means plain text everywhere.
    pub decorate: bool,
    /// Clear the terminal before each render.
    pub clear_screen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: None,
            label_width: 20,
            decorate: true,
            clear_screen: true,
        }
    }
}

impl DisplayConfig {
    /// Plain, fixed-width settings: no escapes, no clearing. Used for
    /// non-terminal output and in tests.
    pub fn plain(width: u16) -> Self {
        Self {
            width: Some(width),
            label_width: 20,
            decorate: false,
            clear_screen: false,
        }
    }
}

/// How a dashboard service is probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    /// Reachability, measured as a TCP connect round trip.
    Ping,
    /// `GET` request; online when the status is 200 or the configured success code.
    Http,
    /// Plain TCP connect.
    Tcp,
}

/// URL scheme of an HTTP probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// 80 or 443.
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

/// One service on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Label shown on the page.
    pub name: String,
    pub operation: Operation,
    /// Scheme for HTTP probes.
    #[serde(default)]
    pub protocol: Scheme,
    /// Empty = `Config::dashboard_default_host`.
    #[serde(default)]
    pub host: String,
    /// None = `Config::dashboard_default_port`, then the protocol's default.
    #[serde(default)]
    pub port: Option<u16>,
    /// Request path for HTTP probes.
    #[serde(default)]
    pub path: String,
    /// Extra status code (besides 200) that counts as online.
    #[serde(default)]
    pub success: Option<u16>,
}

/// One launcher menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchEntry {
    pub name: String,
    pub uri: String,
}

/// Inclusive ranges for generated values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub ip_min: u8,
    pub ip_max: u8,
    pub mac_min: u8,
    pub mac_max: u8,
    pub port_min: u16,
    pub port_max: u16,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            ip_min: 1,
            ip_max: 254,
            mac_min: 0,
            mac_max: 255,
            port_min: 1,
            port_max: 65535,
        }
    }
}

impl MockConfig {
    /// Octet range, tolerant of min/max given the wrong way round.
    pub fn ip_range(&self) -> RangeInclusive<u8> {
        ordered(self.ip_min, self.ip_max)
    }

    pub fn mac_range(&self) -> RangeInclusive<u8> {
        ordered(self.mac_min, self.mac_max)
    }

    pub fn port_range(&self) -> RangeInclusive<u16> {
        ordered(self.port_min, self.port_max)
    }
}

fn ordered<T: Ord + Copy>(a: T, b: T) -> RangeInclusive<T> {
    if a <= b { a..=b } else { b..=a }
}

// ============================================================================
// CALLER RESULTS
// ============================================================================

/// What the file chooser hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chosen {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Outcome of probing one dashboard service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub name: String,
    pub online: bool,
    /// Round trip, status line or error text.
    pub detail: String,
}

/// Output format for non-interactive reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The interactive page.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page_capacity, 15);
    }

    #[test]
    fn services_parse_with_uppercase_operations() {
        let json = r#"{
            "dashboard": [
                {"name": "web", "operation": "HTTP", "port": 8080, "path": "/health", "success": 204},
                {"name": "db", "operation": "TCP", "host": "db.local", "port": 5432}
            ]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.dashboard.len(), 2);
        assert_eq!(config.dashboard[0].operation, Operation::Http);
        assert_eq!(config.dashboard[0].success, Some(204));
        assert_eq!(config.dashboard[1].host, "db.local");
        assert!(config.dashboard[0].host.is_empty());
        assert_eq!(config.dashboard[0].protocol, Scheme::Http);
    }

    #[test]
    fn protocol_parses_lowercase() {
        let json = r#"{"dashboard": [{"name": "nas", "operation": "HTTP", "protocol": "https"}]}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.dashboard[0].protocol, Scheme::Https);
        assert_eq!(config.dashboard[0].protocol.default_port(), 443);
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let json = r#"{"dashboard": [{"name": "x", "operation": "SMTP"}]}"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn mock_ranges_tolerate_reversed_bounds() {
        let mock = MockConfig {
            ip_min: 200,
            ip_max: 10,
            ..Default::default()
        };
        assert_eq!(mock.ip_range(), 10..=200);
    }

    #[test]
    fn plain_display_has_no_escapes() {
        let display = DisplayConfig::plain(60);
        assert_eq!(display.width, Some(60));
        assert!(!display.decorate);
        assert!(!display.clear_screen);
    }
}
