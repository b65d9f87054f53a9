//! `triage` -- run the classifier service or classify a single transcript.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncRead, AsyncReadExt};
use triage_ai::FallbackController;
use triage_api::{AppState, ClassifyResponse};
use triage_core::ClassificationRequest;

mod cli;

use cli::{BackendArgs, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
    tracing::debug!("triage v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Serve { bind, backends } => serve(bind, &backends).await,
        Command::Classify {
            path,
            force_local,
            force_api,
            backends,
        } => classify(path.as_deref(), force_local, force_api, &backends).await,
    }
}

fn controller(backends: &BackendArgs) -> anyhow::Result<FallbackController> {
    let config = backends.to_config();
    tracing::info!(
        local = config.local_configured(),
        remote = config.remote_configured(),
        local_first = config.local_first,
        timeout_secs = config.request_timeout.as_secs(),
        "backend configuration"
    );
    FallbackController::from_config(&config).context("failed to build backend clients")
}

async fn serve(bind: std::net::SocketAddr, backends: &BackendArgs) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(controller(backends)?));
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    triage_api::serve(listener, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    })
    .await
    .context("server error")
}

async fn classify(
    path: Option<&Path>,
    force_local: bool,
    force_api: bool,
    backends: &BackendArgs,
) -> anyhow::Result<()> {
    let text = read_transcript(path, tokio::io::stdin()).await?;

    let mut request = ClassificationRequest::new(text);
    request.source = Some("cli".into());
    request.filepath = path.map(|p| p.display().to_string());
    request.force_local = force_local;
    request.force_api = force_api;

    let outcome = controller(backends)?.classify(&request).await?;
    let response = ClassifyResponse::from(outcome);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Read the transcript from `path`, or from `stdin` when no path is given.
async fn read_transcript<R>(path: Option<&Path>, mut stdin: R) -> anyhow::Result<String>
where
    R: AsyncRead + Unpin,
{
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .await
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn transcript_from_stdin_when_no_path() {
        let stdin: &[u8] = b"speaker one: hello\nspeaker two: hi\n";
        let text = read_transcript(None, stdin).await.unwrap();
        assert_eq!(text, "speaker one: hello\nspeaker two: hi\n");
    }

    #[tokio::test]
    async fn transcript_from_file_ignores_stdin() {
        let path = std::env::temp_dir().join(format!("triage-cli-{}.txt", std::process::id()));
        tokio::fs::write(&path, "file contents").await.unwrap();

        let stdin: &[u8] = b"stdin contents";
        let text = read_transcript(Some(path.as_path()), stdin).await;
        tokio::fs::remove_file(&path).await.unwrap();
        assert_eq!(text.unwrap(), "file contents");
    }

    #[tokio::test]
    async fn missing_file_names_path_in_error() {
        let path = Path::new("/nonexistent/triage/transcript.txt");
        let err = read_transcript(Some(path), tokio::io::empty()).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/triage/transcript.txt"));
    }
}
