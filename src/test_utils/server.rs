use axum::Router;
use tokio::net::TcpListener;

/// Serve `router` on a random local port and return its base URL.
pub(crate) async fn spawn_test_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test server");
    let address = listener.local_addr().expect("Could not get local address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    format!("http://{address}")
}

/// A URL on a local port that nothing listens on.
pub(crate) async fn unused_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind an unused local port");
    let address = listener.local_addr().expect("Could not get local address");
    drop(listener);

    format!("http://{address}/")
}
