//! The axum server in front of the gateway, exercised over TCP.

use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use render_gateway::http::HttpServer;
use render_gateway::Gateway;
use render_gateway::lifecycle::Shutdown;

mod common;

use common::{config, harness, Harness, REDIRECT_PATH, REDIRECT_TARGET};

async fn serve(gateway: Gateway) -> (SocketAddr, Shutdown, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let server = HttpServer::new(Arc::new(gateway));
    let task = tokio::spawn(async move {
        server.run(listener, server_shutdown).await.unwrap();
    });

    (addr, shutdown, task)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_serves_pipeline_over_http() {
    let Harness {
        gateway,
        renderer,
        content_api,
        clients_built,
    } = harness(config());
    let (addr, shutdown, task) = serve(gateway).await;
    let client = client();

    let res = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["x-content-type-options"], "nosniff");
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "rendered");

    let res = client.get(format!("http://{addr}{REDIRECT_PATH}")).send().await.unwrap();
    assert_eq!(res.status(), 301);
    assert_eq!(res.headers()["location"], REDIRECT_TARGET);

    let res = client
        .post(format!("http://{addr}/api/test?x=1"))
        .header("x-request-id", "req-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["x-request-id"], "req-42");
    assert_eq!(res.text().await.unwrap(), "handled");

    assert_eq!(renderer.calls().len(), 2);
    assert_eq!(content_api.documents().len(), 2);
    assert_eq!(clients_built.load(Ordering::SeqCst), 1);

    shutdown.trigger();
    task.await.unwrap();
}

#[tokio::test]
async fn test_content_api_failure_is_bad_gateway() {
    let Harness {
        gateway, content_api, ..
    } = harness(config());
    content_api.fail.store(true, Ordering::SeqCst);
    let (addr, shutdown, task) = serve(gateway).await;

    let res = client().get(format!("http://{addr}/news/")).send().await.unwrap();
    assert_eq!(res.status(), 502);

    shutdown.trigger();
    task.await.unwrap();
}
