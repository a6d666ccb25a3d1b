//! Runtime configuration: bind address, mount variant, artifact location.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Deployment variant: where the routes mount and where artifacts live by
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mount {
    /// Routes at `/`, `/health`, `/predict`; artifacts in the working
    /// directory.
    Root,
    /// Routes under `/api`; artifacts one directory up, matching the hosted
    /// layout where the server runs from a subdirectory of the project.
    Api,
}

impl Mount {
    /// Artifact directory used when `--artifact-dir` is not given.
    pub fn default_artifact_dir(self) -> PathBuf {
        match self {
            Mount::Root => PathBuf::from("."),
            Mount::Api => PathBuf::from(".."),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "profitcast", version, about = "Startup profit prediction service")]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "PROFITCAST_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PROFITCAST_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Route mount variant.
    #[arg(long, value_enum, default_value = "root")]
    pub mount: Mount,

    /// Directory holding `encoder.json` and `startup_model.json`.
    /// Defaults per mount variant.
    #[arg(long, env = "PROFITCAST_ARTIFACT_DIR")]
    pub artifact_dir: Option<PathBuf>,
}

impl Config {
    /// Resolved artifact directory: the explicit flag wins, otherwise the
    /// mount variant's default.
    pub fn artifact_dir(&self) -> PathBuf {
        self.artifact_dir
            .clone()
            .unwrap_or_else(|| self.mount.default_artifact_dir())
    }
}
