// SPDX-License-Identifier: AGPL-3.0-or-later

use std::convert::TryFrom;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use anyhow::{anyhow, bail, ensure, Result};
use bookstore::Configuration;
use clap::{crate_version, Parser};
use colored::Colorize;
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::utils::absolute_path;

const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_LOG_LEVEL: &str = "off";

const DEFAULT_MAX_DATABASE_CONNECTIONS: u32 = 32;

const DEFAULT_MIN_DATABASE_CONNECTIONS: u32 = 0;

const DEFAULT_DATABASE_ACQUIRE_TIMEOUT: u64 = 30;

const DEFAULT_DATABASE_MAX_LIFETIME: u64 = 30 * 60;

const DEFAULT_DATABASE_IDLE_TIMEOUT: u64 = 10 * 60;

const DEFAULT_HTTP_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

const DEFAULT_HTTP_PORT: u16 = 2020;

const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

const DEFAULT_SHUTDOWN_TIMEOUT: u64 = 20;

type ConfigFilePath = Option<PathBuf>;

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_database_url() -> String {
    bookstore::default_database_url()
}

fn default_database_max_connections() -> u32 {
    DEFAULT_MAX_DATABASE_CONNECTIONS
}

fn default_database_min_connections() -> u32 {
    DEFAULT_MIN_DATABASE_CONNECTIONS
}

fn default_database_acquire_timeout() -> u64 {
    DEFAULT_DATABASE_ACQUIRE_TIMEOUT
}

fn default_database_max_lifetime() -> u64 {
    DEFAULT_DATABASE_MAX_LIFETIME
}

fn default_database_idle_timeout() -> u64 {
    DEFAULT_DATABASE_IDLE_TIMEOUT
}

fn default_http_host() -> IpAddr {
    DEFAULT_HTTP_HOST
}

fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_shutdown_timeout() -> u64 {
    DEFAULT_SHUTDOWN_TIMEOUT
}

/// Get configuration from 1. .toml file, 2. environment variables and 3. command line arguments
/// (in that order, meaning that later configuration sources take precedence over the earlier
/// ones).
///
/// Returns a partly unchecked configuration object which results from all of these sources. It
/// still needs to be converted for the bookstore as it might still contain invalid values.
pub fn load_config() -> Result<(ConfigFilePath, ConfigFile)> {
    load_config_from(Cli::parse())
}

fn load_config_from(cli: Cli) -> Result<(ConfigFilePath, ConfigFile)> {
    // Determine if a config file path was provided or if we should look for it in common locations
    let config_file_path: ConfigFilePath = match &cli.config {
        Some(path) => {
            if !path.exists() {
                bail!("Config file '{}' does not exist", path.display());
            }

            Some(path.clone())
        }
        None => try_determine_config_file_path(),
    };

    let mut figment = Figment::from(Serialized::defaults(ConfigFile::default()));
    if let Some(path) = &config_file_path {
        figment = figment.merge(Toml::file(path));
    }

    let config = figment
        .merge(Env::raw())
        .merge(Serialized::defaults(cli))
        .extract()?;

    Ok((config_file_path, config))
}

/// Configuration derived from command line arguments.
///
/// All arguments are optional and don't get serialized to Figment when they're None. This is to
/// assure that default values do not overwrite all previous settings, especially when they haven't
/// been set.
#[derive(Parser, Serialize, Debug)]
#[command(
    name = "bookstore",
    about = "Catalog service for authors and countries",
    long_about = None,
    version
)]
struct Cli {
    /// Path to an optional "config.toml" file for further configuration.
    ///
    /// When not set the program will try to find a `config.toml` file in the same folder the
    /// program is executed in and otherwise in the regarding operation systems XDG config
    /// directory ("$HOME/.config/bookstore/config.toml" on Linux).
    #[arg(short = 'c', long, value_name = "PATH")]
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<PathBuf>,

    /// URL / connection string to PostgreSQL or SQLite database. Defaults to an in-memory SQLite
    /// database.
    ///
    /// WARNING: By default the catalog is lost after shutdown. Set a database connection url for
    /// production settings to not loose data.
    #[arg(short = 'd', long, value_name = "CONNECTION_STRING")]
    #[serde(skip_serializing_if = "Option::is_none")]
    database_url: Option<String>,

    /// Maximum number of open database connections. Defaults to 32.
    #[arg(long, value_name = "NUMBER")]
    #[serde(skip_serializing_if = "Option::is_none")]
    database_max_connections: Option<u32>,

    /// Address the HTTP server binds to. Defaults to 0.0.0.0.
    #[arg(short = 'H', long, value_name = "IP")]
    #[serde(skip_serializing_if = "Option::is_none")]
    http_host: Option<IpAddr>,

    /// HTTP port serving the REST API. Defaults to 2020.
    #[arg(short = 'p', long, value_name = "PORT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    http_port: Option<u16>,

    /// Seconds a request may take before it gets aborted. Defaults to 30.
    #[arg(short = 't', long, value_name = "SECONDS")]
    #[serde(skip_serializing_if = "Option::is_none")]
    request_timeout: Option<u64>,

    /// Set log verbosity. Use this for learning more about how the service behaves or for
    /// debugging.
    ///
    /// Possible log levels are: ERROR, WARN, INFO, DEBUG, TRACE. They are scoped to "bookstore" by
    /// default.
    ///
    /// If you want to adjust the scope for deeper inspection use a filter value, for example
    /// "=TRACE" for logging _everything_ or "bookstore=INFO,sqlx=DEBUG" etc.
    #[arg(short = 'l', long, value_name = "LEVEL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    log_level: Option<String>,
}

/// Service configuration which can be de/serialized from a config file.
///
/// See `config.toml` in this crate for an example config file and detailed documentation of
/// possible configuration values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Log verbosity, scoped to "bookstore" unless a full filter is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// URL / connection string to PostgreSQL or SQLite database.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Maximum number of open database connections.
    #[serde(default = "default_database_max_connections")]
    pub database_max_connections: u32,

    /// Minimum number of idle database connections.
    #[serde(default = "default_database_min_connections")]
    pub database_min_connections: u32,

    /// Seconds to wait for a free database connection.
    #[serde(default = "default_database_acquire_timeout")]
    pub database_acquire_timeout: u64,

    /// Seconds after which a database connection gets replaced.
    #[serde(default = "default_database_max_lifetime")]
    pub database_max_lifetime: u64,

    /// Seconds an unused database connection stays open.
    #[serde(default = "default_database_idle_timeout")]
    pub database_idle_timeout: u64,

    /// Address the HTTP server binds to.
    #[serde(default = "default_http_host")]
    pub http_host: IpAddr,

    /// HTTP port serving the REST API.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Seconds a request may take before it gets aborted.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Seconds in-flight requests get to finish during shutdown.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            database_url: default_database_url(),
            database_max_connections: default_database_max_connections(),
            database_min_connections: default_database_min_connections(),
            database_acquire_timeout: default_database_acquire_timeout(),
            database_max_lifetime: default_database_max_lifetime(),
            database_idle_timeout: default_database_idle_timeout(),
            http_host: default_http_host(),
            http_port: default_http_port(),
            request_timeout: default_request_timeout(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl TryFrom<ConfigFile> for Configuration {
    type Error = anyhow::Error;

    fn try_from(value: ConfigFile) -> Result<Self, Self::Error> {
        ensure!(
            value.database_max_connections > 0,
            "'database_max_connections' needs to be at least 1"
        );
        ensure!(
            value.database_min_connections <= value.database_max_connections,
            "'database_min_connections' can not be larger than 'database_max_connections'"
        );

        for (name, seconds) in [
            ("database_acquire_timeout", value.database_acquire_timeout),
            ("request_timeout", value.request_timeout),
            ("shutdown_timeout", value.shutdown_timeout),
        ] {
            if seconds == 0 {
                return Err(anyhow!("'{name}' needs to be at least one second"));
            }
        }

        Ok(Configuration {
            database_url: value.database_url,
            database_max_connections: value.database_max_connections,
            database_min_connections: value.database_min_connections,
            database_acquire_timeout: value.database_acquire_timeout,
            database_max_lifetime: value.database_max_lifetime,
            database_idle_timeout: value.database_idle_timeout,
            http_host: value.http_host,
            http_port: value.http_port,
            request_timeout: value.request_timeout,
            shutdown_timeout: value.shutdown_timeout,
        })
    }
}

fn try_determine_config_file_path() -> Option<PathBuf> {
    // Find config file in current folder
    let current_dir = std::env::current_dir()
        .ok()
        .map(|dir| dir.join(CONFIG_FILE_NAME));

    // Find config file in XDG config folder
    let xdg_config_dir = ProjectDirs::from("", "", "bookstore")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME));

    vec![current_dir, xdg_config_dir]
        .into_iter()
        .flatten()
        .find(|path| path.exists())
}

pub fn print_config(config_file_path: ConfigFilePath, config: &Configuration) -> String {
    println!("{} v{}\n", "bookstore".underline(), crate_version!());

    match config_file_path {
        Some(path) => {
            println!(
                "Loading config file from {}",
                absolute_path(path).display().to_string().blue()
            );
        }
        None => {
            println!("No config file provided");
        }
    }

    println!();
    println!("{}\n", "Configuration".underline());

    let database_url = if config.database_url == "sqlite::memory:"
        || config.database_url.contains("mode=memory")
    {
        "memory (data is not persisted)".into()
    } else if config.database_url.contains("sqlite:") {
        format!("SQLite: {}", config.database_url)
    } else {
        "PostgreSQL".into()
    };

    let pool = format!(
        "{} to {} connections",
        config.database_min_connections, config.database_max_connections
    );

    let http_address = format!("{}:{}", config.http_host, config.http_port);

    format!(
        r"Database URL: {}
Database pool: {}
HTTP address: {}
Request timeout: {}s

Bookstore is ready!
",
        database_url.blue(),
        pool.blue(),
        http_address.blue(),
        config.request_timeout.to_string().blue(),
    )
}
