use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub pinot: PinotConfig,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinotConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub scheme: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub title: String,
    pub subtitle: String,
    pub blurb: String,
    pub type_options: Vec<String>,
    pub palette: Vec<String>,
    pub status_palette: Vec<String>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: "Coffee Shop Dashboard".to_string(),
            subtitle: "Latest Data & Insights".to_string(),
            blurb: "Explore the latest trends in coffee orders and sales.".to_string(),
            type_options: vec![
                "Espresso".to_string(),
                "Cappuccino".to_string(),
                "Latte".to_string(),
                "Americano".to_string(),
            ],
            palette: vec![
                "#8C7853".to_string(),
                "#B77A62".to_string(),
                "#C49C6C".to_string(),
                "#D3C0A7".to_string(),
                "#A89F91".to_string(),
            ],
            status_palette: vec![
                "#8C7853".to_string(),
                "#B8860B".to_string(),
                "#DAA520".to_string(),
            ],
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Read the config file if present, otherwise build from env vars and defaults.
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("Failed to parse {config_path}: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    pinot: PinotConfig {
                        host: get_env("PINOT_HOST")
                            .unwrap_or_else(|| "13.229.112.104".to_string()),
                        port: get_env_parse("PINOT_PORT", 8099u16),
                        path: get_env("PINOT_PATH").unwrap_or_else(|| "/query/sql".to_string()),
                        scheme: get_env("PINOT_SCHEME").unwrap_or_else(|| "http".to_string()),
                        timeout_ms: get_env_parse("PINOT_TIMEOUT_MS", 500u64),
                    },
                    dashboard: DashboardSettings::default(),
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // Env var overrides apply even when the file exists.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("PINOT_HOST") {
            config.pinot.host = v;
        }
        if let Ok(v) = env::var("PINOT_PORT")
            && let Ok(p) = v.parse()
        {
            config.pinot.port = p;
        }
        if let Ok(v) = env::var("PINOT_PATH") {
            config.pinot.path = v;
        }
        if let Ok(v) = env::var("PINOT_SCHEME") {
            config.pinot.scheme = v;
        }
        if let Ok(v) = env::var("PINOT_TIMEOUT_MS")
            && let Ok(t) = v.parse()
        {
            config.pinot.timeout_ms = t;
        }
        if let Ok(v) = env::var("DASHBOARD_TITLE") {
            config.dashboard.title = v;
        }
        if let Ok(v) = env::var("DASHBOARD_SUBTITLE") {
            config.dashboard.subtitle = v;
        }
        if let Ok(v) = env::var("DASHBOARD_TYPE_OPTIONS") {
            config.dashboard.type_options =
                v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("DASHBOARD_PALETTE") {
            config.dashboard.palette = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("DASHBOARD_STATUS_PALETTE") {
            config.dashboard.status_palette =
                v.split(',').map(|s| s.trim().to_string()).collect();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dashboard_settings() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.type_options.len(), 4);
        assert_eq!(settings.palette.len(), 5);
        assert_eq!(settings.status_palette.len(), 3);
        assert!(settings.type_options.contains(&"Latte".to_string()));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [pinot]
            host = "pinot.local"
            port = 8099
            path = "/query/sql"
            scheme = "http"
            timeout_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.pinot.host, "pinot.local");
        // Dashboard section falls back to defaults when omitted.
        assert_eq!(config.dashboard.palette.len(), 5);
    }
}
