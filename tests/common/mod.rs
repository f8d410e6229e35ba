//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use item_service::config::ServiceConfig;
use item_service::http::HttpServer;
use item_service::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// A running server. The server stops when this is dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn items_url(&self) -> String {
        format!("http://{}/api/items", self.addr)
    }
}

/// Config with an empty collection and no static directory.
#[allow(dead_code)]
pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.store.seed_samples = false;
    config.static_files.enabled = false;
    config.timeouts.shutdown_grace_secs = 1;
    config
}

/// Start a server on an ephemeral port.
pub async fn start_server(config: ServiceConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // The listener is already bound; give the accept loop a moment.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer { addr, shutdown }
}

#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
