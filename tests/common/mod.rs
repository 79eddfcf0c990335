#![allow(dead_code)]

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use scribe_console::domain::ApiConfig;

/// Serve `app` on an ephemeral port. Returns its base URL and a shutdown
/// trigger.
pub async fn start_mock_backend(app: Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..Default::default()
    }
}
