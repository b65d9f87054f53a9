//! Command-line surface. Backend settings come from flags or the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use triage_core::ClassifierConfig;
use triage_core::config::{DEFAULT_LOCAL_MODEL, DEFAULT_REMOTE_BASE_URL, DEFAULT_REMOTE_MODEL};

/// Transcript classifier with local-first model fallback.
#[derive(Debug, Parser)]
#[command(name = "triage", about = "Transcript classification service", version)]
pub struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service.
    Serve {
        /// Address to listen on.
        #[arg(long, env = "TRIAGE_BIND", default_value = "0.0.0.0:8081")]
        bind: SocketAddr,

        #[command(flatten)]
        backends: BackendArgs,
    },

    /// Classify one transcript and print the outcome as JSON.
    Classify {
        /// Transcript file. Reads stdin when omitted.
        path: Option<PathBuf>,

        /// Use only the local backend.
        #[arg(long)]
        force_local: bool,

        /// Use only the remote backend. Wins over --force-local.
        #[arg(long)]
        force_api: bool,

        #[command(flatten)]
        backends: BackendArgs,
    },
}

#[derive(Debug, Clone, Args)]
pub struct BackendArgs {
    /// OpenAI-compatible base URL of the local inference server.
    #[arg(long, env = "LOCAL_VLLM_BASE")]
    pub local_base: Option<String>,

    #[arg(long, env = "LOCAL_MODEL", default_value = DEFAULT_LOCAL_MODEL)]
    pub local_model: String,

    /// Credential for the remote messages API.
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = DEFAULT_REMOTE_BASE_URL)]
    pub remote_base: String,

    #[arg(long, env = "REMOTE_MODEL", default_value = DEFAULT_REMOTE_MODEL)]
    pub remote_model: String,

    /// Try the local backend first on un-forced requests.
    #[arg(
        long,
        env = "USE_LOCAL_FIRST",
        default_value = "true",
        action = ArgAction::Set,
        value_parser = parse_flag
    )]
    pub local_first: bool,

    /// Per-call backend timeout in seconds.
    #[arg(long, env = "BACKEND_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,
}

/// Only a case-insensitive `true` enables the flag.
fn parse_flag(raw: &str) -> Result<bool, String> {
    Ok(raw.trim().eq_ignore_ascii_case("true"))
}

impl BackendArgs {
    pub fn to_config(&self) -> ClassifierConfig {
        let mut builder = ClassifierConfig::builder()
            .local_model(&self.local_model)
            .remote_base_url(&self.remote_base)
            .remote_model(&self.remote_model)
            .local_first(self.local_first)
            .request_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(base) = &self.local_base {
            builder = builder.local_base_url(base);
        }
        if let Some(key) = &self.api_key {
            builder = builder.remote_api_key(key);
        }
        builder.build()
    }
}
