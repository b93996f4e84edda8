use anyhow::{Context, Result};
use clap::Parser;
use std::{
    env,
    path::{Path, PathBuf},
};

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub database_url: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Content and media API for the site")]
pub struct Args {
    /// Host to bind to (overrides CONTENT_API_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides CONTENT_API_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Static root served at /static; uploads land beneath it (overrides CONTENT_API_STATIC_DIR)
    #[arg(long)]
    pub static_dir: Option<String>,

    /// Database URL (overrides CONTENT_API_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("CONTENT_API_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("CONTENT_API_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing CONTENT_API_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading CONTENT_API_PORT"),
        };
        let env_static = env::var("CONTENT_API_STATIC_DIR").unwrap_or_else(|_| "./static".into());
        let env_db = env::var("CONTENT_API_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/content.db".into());

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            static_dir: args.static_dir.unwrap_or(env_static),
            database_url: args.database_url.unwrap_or(env_db),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directory where uploaded files are written, beneath the static root.
    pub fn upload_dir(&self) -> PathBuf {
        Path::new(&self.static_dir).join("uploads")
    }
}
