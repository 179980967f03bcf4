mod common;

use std::net::SocketAddr;
use std::time::Duration;

use common::{INDEX_HTML, init_tracing, spa_tree};
use spa_cache::{MimeTypes, Router, Server};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

fn free_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

async fn connect(addr: SocketAddr) -> TcpStream {
    for _ in 0..100 {
        if let Ok(stream) = TcpStream::connect(addr).await {
            return stream;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server never came up on {addr}");
}

async fn raw_get(addr: SocketAddr, path: &str, extra_headers: &str) -> String {
    let mut stream = connect(addr).await;
    let req = format!(
        "GET {path} HTTP/1.1\r\nhost: {addr}\r\nconnection: close\r\n{extra_headers}\r\n"
    );
    stream.write_all(req.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8_lossy(&buf).into_owned()
}

#[tokio::test]
async fn serves_from_memory_over_http() {
    init_tracing();

    let root = spa_tree();
    let router = Router::build(root.path(), &MimeTypes::default()).unwrap();
    // assets live in memory now
    drop(root);

    let addr = free_addr();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(
        Server::bind(addr).serve_with_shutdown(router, async {
            let _ = stop_rx.await;
        }),
    );

    let res = raw_get(addr, "/users/42", "").await;
    assert!(res.starts_with("HTTP/1.1 200 OK\r\n"), "{res}");
    assert!(res.to_ascii_lowercase().contains("content-type: text/html\r\n"), "{res}");
    assert!(res.ends_with(INDEX_HTML), "{res}");

    let res = raw_get(addr, "/style.css", "accept-encoding: gzip\r\n").await;
    let lower = res.to_ascii_lowercase();
    assert!(res.starts_with("HTTP/1.1 200 OK\r\n"), "{res}");
    assert!(lower.contains("content-encoding: gzip\r\n"), "{res}");
    assert!(lower.contains("content-type: text/css\r\n"), "{res}");

    let res = raw_get(addr, "/style.css", "").await;
    assert!(!res.to_ascii_lowercase().contains("content-encoding"), "{res}");
    assert!(res.ends_with(".btn { color: #333; padding: 4px 8px; border-radius: 2px; }\n"));

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
