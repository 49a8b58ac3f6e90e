//! End-to-end tests of the native transport against a local axum server.
//!
//! The server runs on a random port on its own thread and runtime, apart from
//! the runtime the transport spawns its requests on.

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::RawQuery,
    http::{Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use reqpub::{HttpMethod, RequestDescriptor, RequestError, TransportConfig};
use serde_json::{json, Value};

fn app() -> Router {
    Router::new()
        .route("/greeting", get(|| async { "hello from the server" }))
        .route(
            "/unauthorized",
            get(|| async { (StatusCode::UNAUTHORIZED, "denied") }),
        )
        .route("/echo", any(echo))
        .route("/large", get(|| async { vec![b'x'; LARGE_BODY_LEN] }))
}

const LARGE_BODY_LEN: usize = 11 * 1024 * 1024;

async fn echo(method: Method, RawQuery(query): RawQuery, body: Bytes) -> Json<Value> {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    Json(json!({
        "method": method.as_str(),
        "query": query,
        "body": body,
    }))
}

fn init_logging() {
    // Every test calls this; only the first one installs the logger.
    let _ = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .with_threads(true)
        .init();
}

fn start_server() -> SocketAddr {
    init_logging();
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, app()).await
        })
        .unwrap();
    });

    addr
}

fn descriptor() -> RequestDescriptor {
    RequestDescriptor::native(TransportConfig { timeout_secs: 5 }).unwrap()
}

fn params(value: Value) -> serde_json::Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn get_resolves_with_body() {
    let addr = start_server();
    let body = descriptor()
        .set_url(format!("http://{addr}/greeting"))
        .publisher()
        .unwrap()
        .response()
        .await
        .unwrap();
    assert_eq!(body, b"hello from the server");
}

#[tokio::test]
async fn get_sends_parameters_as_query() {
    let addr = start_server();
    let body = descriptor()
        .set_url(format!("http://{addr}/echo"))
        .set_parameter(params(json!({ "days": 3, "city": "合肥" })))
        .publisher()
        .unwrap()
        .response()
        .await
        .unwrap();

    let echoed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(echoed["method"], "GET");
    assert_eq!(echoed["query"], "city=%E5%90%88%E8%82%A5&days=3");
    assert_eq!(echoed["body"], Value::Null);
}

#[tokio::test]
async fn post_sends_parameters_as_json_body() {
    let addr = start_server();
    let body = descriptor()
        .set_url(format!("http://{addr}/echo"))
        .set_http_method(HttpMethod::Post)
        .set_parameter(params(json!({ "title": "Walk dog", "completed": false })))
        .publisher()
        .unwrap()
        .response()
        .await
        .unwrap();

    let echoed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["query"], Value::Null);
    assert_eq!(
        echoed["body"],
        json!({ "title": "Walk dog", "completed": false })
    );
}

#[tokio::test]
async fn delete_sends_parameters_as_json_body() {
    let addr = start_server();
    let body = descriptor()
        .set_url(format!("http://{addr}/echo"))
        .set_http_method(HttpMethod::Delete)
        .set_parameter(params(json!({ "id": 7 })))
        .publisher()
        .unwrap()
        .response()
        .await
        .unwrap();

    let echoed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(echoed["method"], "DELETE");
    assert_eq!(echoed["body"], json!({ "id": 7 }));
}

#[tokio::test]
async fn large_bodies_are_passed_through_whole() {
    let addr = start_server();
    let body = descriptor()
        .set_url(format!("http://{addr}/large"))
        .publisher()
        .unwrap()
        .response()
        .await
        .unwrap();
    assert_eq!(body.len(), LARGE_BODY_LEN);
    assert!(body.iter().all(|&byte| byte == b'x'));
}

#[tokio::test]
async fn status_401_fails_with_unauthorized() {
    let addr = start_server();
    let result = descriptor()
        .set_url(format!("http://{addr}/unauthorized"))
        .publisher()
        .unwrap()
        .response()
        .await;
    assert_eq!(result, Err(RequestError::Unauthorized));
}

#[tokio::test]
async fn unreachable_host_fails_with_no_internet_connection() {
    init_logging();
    // Bind then release a port so nothing is listening on it.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let result = descriptor()
        .set_url(format!("http://{addr}/greeting"))
        .publisher()
        .unwrap()
        .response()
        .await;
    assert_eq!(result, Err(RequestError::NoInternetConnection));
}
