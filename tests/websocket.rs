#![cfg(feature = "websocket")]

use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::Message;

use origin_client::{ConnectOptions, Error, Session};

#[derive(Debug)]
struct Handshake {
    uri: String,
    origin: Option<String>,
    cookie: Option<String>,
    token: Option<String>,
}

/// Accept one connection, report its handshake, send "hello" and close
async fn spawn_server() -> (String, oneshot::Receiver<Handshake>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let callback = move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
            let header = |name: &str| {
                req.headers()
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(String::from)
            };
            let _ = tx.send(Handshake {
                uri: req.uri().to_string(),
                origin: header("origin"),
                cookie: header("cookie"),
                token: header("x-token"),
            });
            Ok(resp)
        };

        let mut ws = accept_hdr_async(stream, callback).await.unwrap();
        ws.send(Message::Text("hello".into())).await.unwrap();
        ws.close(None).await.unwrap();
    });

    (format!("http://{}", addr), rx)
}

#[tokio::test]
async fn test_connect_sends_session_state() {
    let (origin, handshake) = spawn_server().await;

    let session = Session::new(&origin).unwrap();
    session.set_path("/live").unwrap();
    session.set_cookies(["sid=abc; Path=/"]);

    let options = ConnectOptions::new()
        .header("X-Token", "t1")
        .param("room", "1");
    let mut socket = session.connect("events", options).await.unwrap();

    let message = socket.next().await.unwrap().unwrap();
    assert_eq!(message, Message::Text("hello".into()));

    let handshake = handshake.await.unwrap();
    assert_eq!(handshake.uri, "/live/events?room=1");
    assert_eq!(handshake.origin.as_deref(), Some(origin.as_str()));
    assert_eq!(handshake.cookie.as_deref(), Some("sid=abc"));
    assert_eq!(handshake.token.as_deref(), Some("t1"));
}

#[tokio::test]
async fn test_connect_per_call_headers_win() {
    let (origin, handshake) = spawn_server().await;

    let session = Session::new(&origin).unwrap();
    let options = ConnectOptions::new().header("Origin", "http://app.example");
    let _socket = session.connect("/", options).await.unwrap();

    let handshake = handshake.await.unwrap();
    assert_eq!(handshake.origin.as_deref(), Some("http://app.example"));
    assert!(handshake.cookie.is_none());
}

#[tokio::test]
async fn test_connect_absolute_ws_target() {
    let (origin, handshake) = spawn_server().await;
    let target = origin.replacen("http://", "ws://", 1) + "/raw";

    let session = Session::new("https://unrelated.example").unwrap();
    let _socket = session.connect(&target, ConnectOptions::new()).await.unwrap();

    let handshake = handshake.await.unwrap();
    assert_eq!(handshake.uri, "/raw");
    assert_eq!(handshake.origin.as_deref(), Some("https://unrelated.example"));
}

#[tokio::test]
async fn test_connect_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = Session::new(format!("http://{}", addr)).unwrap();
    let err = session
        .connect("socket", ConnectOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::WebSocket { .. }));
    assert!(err.is_network());
}
