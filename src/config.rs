use clap::Parser;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::session::RoomId;

/// Config file picked up from the working directory when none is given.
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Prefix for environment overrides, e.g. `GYROLASER_SERVER__PORT=8000`.
const ENV_PREFIX: &str = "GYROLASER";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory holding the desktop and mobile clients
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON")]
    pub log_json: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub assets: AssetsConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. Empty, or containing `*`, means any origin.
    pub cors_origins: Vec<String>,
    /// Base URL phones use to reach this server, e.g. `http://192.168.1.20:3000`.
    /// Falls back to `http://{host}:{port}`, with `localhost` for a wildcard bind.
    #[serde(default)]
    pub public_url: Option<String>,
}

impl ServerConfig {
    /// Link a phone follows to join `room_id` as a controller.
    pub fn mobile_join_url(&self, room_id: &RoomId) -> String {
        let base = self.public_url.as_ref().map_or_else(
            || {
                let host = match self.host.as_str() {
                    "0.0.0.0" | "::" => "localhost",
                    other => other,
                };
                format!("http://{host}:{}", self.port)
            },
            |url| url.trim_end_matches('/').to_string(),
        );
        format!("{base}/mobile?room={room_id}")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line output.
    Compact,
    /// One JSON object per event.
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Root containing `client-desktop/` and `client-mobile/`, or a
    /// `frontend/` directory with both.
    pub root: String,
}

impl AssetsConfig {
    /// Directory served under `/desktop`.
    pub fn desktop_dir(&self) -> PathBuf {
        self.client_dir("client-desktop")
    }

    /// Directory served under `/mobile`.
    pub fn mobile_dir(&self) -> PathBuf {
        self.client_dir("client-mobile")
    }

    fn client_dir(&self, name: &str) -> PathBuf {
        let root = Path::new(&self.root);
        let bundled = root.join("frontend").join(name);
        if bundled.is_dir() {
            bundled
        } else {
            root.join(name)
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Build the configuration.
    ///
    /// Priority: CLI flag > CLI env var > `GYROLASER_*` env > config file > defaults.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", Vec::<String>::new())?
            .set_default("assets.root", ".")?
            .set_default("log.format", "compact")?;

        match &cli.config {
            Some(path) => {
                builder = builder.add_source(File::new(path, FileFormat::Yaml).required(true));
            }
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                builder = builder.add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml));
            }
            None => {}
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .try_parsing(true),
        );

        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(dir) = cli.static_dir {
            builder = builder.set_override("assets.root", dir)?;
        }
        if let Some(json) = cli.log_json {
            let format = if json { "json" } else { "compact" };
            builder = builder.set_override("log.format", format)?;
        }

        builder.build()?.try_deserialize()
    }

    /// `host:port` string to bind the listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
