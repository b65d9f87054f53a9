//! Server lifecycle: bind, serve, drain on shutdown.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::router::{AppState, router};

/// Serve the API on `listener` until `shutdown` resolves.
///
/// In-flight requests are drained before returning.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    let backends = state.controller.backends();
    tracing::info!(
        %addr,
        models = ?backends.models(),
        "classifier API listening"
    );

    let app = router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!("classifier API received shutdown signal");
        })
        .await?;

    tracing::info!("classifier API stopped");
    Ok(())
}
