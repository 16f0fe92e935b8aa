//! Portal server lifecycle — binds the listener, mounts the router, and
//! runs axum in a background task with a graceful-shutdown channel.

use std::net::SocketAddr;

use tokio::sync::oneshot;

use crate::api::router::portal_router;
use crate::api::types::ApiContext;

/// Handle to a running portal server.
pub struct PortalServer {
    /// The address the listener actually bound (resolves port 0).
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl PortalServer {
    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Portal server shutdown signal sent");
        }
    }
}

/// Start the portal server on the given address.
///
/// Binds the listener, builds `portal_router`, and spawns the axum
/// server in a background tokio task. Returns a handle with the bound
/// address and a shutdown channel.
pub async fn start_portal_server(
    ctx: ApiContext,
    addr: SocketAddr,
) -> Result<PortalServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind portal server: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let app = portal_router(ctx);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Portal server received shutdown signal");
        };

        tracing::info!(%addr, "Portal server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Portal server error: {e}");
        }

        tracing::info!("Portal server stopped");
    });

    Ok(PortalServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    async fn start_test_server() -> (PortalServer, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = ApiContext::new(open_memory_database().unwrap(), tmp.path().to_path_buf());
        let server = start_portal_server(ctx, "127.0.0.1:0".parse().unwrap())
            .await
            .expect("server should start");
        (server, tmp)
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let (mut server, _tmp) = start_test_server().await;
        assert!(server.addr.port() > 0);

        let url = format!("http://{}/health", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["message"], "Cortex API is running");

        server.shutdown();
        // Give server time to stop
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn server_serves_api_routes() {
        let (mut server, _tmp) = start_test_server().await;

        // Unknown route returns 404
        let url = format!("http://{}/nonexistent", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        // Patient login round-trips over a real socket
        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://{}/api/patients/login", server.addr))
            .json(&serde_json::json!({
                "aadhaarNumber": "123456789012",
                "patientName": "Asha Rao"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["patient"]["aadhaarNumber"], "123456789012");

        server.shutdown();
    }

    #[tokio::test]
    async fn uploaded_files_are_served_statically() {
        let (mut server, tmp) = start_test_server().await;

        std::fs::write(tmp.path().join("sample.pdf"), b"%PDF-1.4\n%%EOF").unwrap();

        let url = format!("http://{}/uploads/sample.pdf", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(resp.bytes().await.unwrap().as_ref(), b"%PDF-1.4\n%%EOF");

        server.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (mut server, _tmp) = start_test_server().await;

        server.shutdown();
        server.shutdown(); // Second call should be safe
    }
}
