// SPDX-License-Identifier: AGPL-3.0-or-later

#![allow(clippy::uninlined_format_args)]
mod config;
mod utils;

use std::convert::TryInto;

use anyhow::{Context, Result};
use bookstore::{Configuration, Server};
use log::warn;

use crate::config::{load_config, print_config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from command line arguments, environment variables and .toml file
    let (config_file_path, config_file) = load_config().context("Could not load configuration")?;

    // Set log verbosity based on config. By default scope it always to the "bookstore" module.
    let mut builder = env_logger::Builder::new();
    let builder = match config_file.log_level.contains('=') {
        true => builder.parse_filters(&config_file.log_level),
        false => builder.parse_filters(&format!("bookstore={}", &config_file.log_level)),
    };
    builder.init();

    // Convert configuration into the bookstore format and check it for invalid values
    let config: Configuration = config_file
        .try_into()
        .context("Could not load configuration")?;

    // Start bookstore in async runtime
    let server = Server::start(config.clone())
        .await
        .context("Could not start bookstore")?;

    // Show configuration info to the user
    println!("{}", print_config(config_file_path, &config));

    // Run this until [CTRL] + [C] got pressed or something went wrong
    tokio::select! {
        _ = tokio::signal::ctrl_c() => (),
        _ = server.on_exit() => warn!("HTTP service stopped unexpectedly"),
    }

    // Wait until all requests are finished and exit
    server.shutdown().await;

    Ok(())
}
