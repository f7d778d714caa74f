use contextual_logger::logger::Manager;
use contextual_logger::{LoggerProxy, Verifier};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::Level;

async fn send_config(addr: SocketAddr, payload: &[u8]) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_u32(payload.len() as u32).await.unwrap();
    stream.write_all(payload).await.unwrap();
    stream.shutdown().await.unwrap();
    // the listener closes the connection once the payload is handled
    let mut rest = Vec::new();
    stream.read_to_end(&mut rest).await.unwrap();
}

#[tokio::test]
async fn applies_json_payload() {
    let manager = Manager::detached();
    let proxy = LoggerProxy::new(Arc::clone(&manager));
    let listener = proxy.listen(0, None).await.unwrap();

    send_config(
        listener.local_addr(),
        br#"{"filter": "trace", "loggers": {"net.http": {"level": "debug"}}}"#,
    )
    .await;

    assert_eq!(manager.current_filter().as_deref(), Some("trace"));
    assert_eq!(manager.get_logger("net.http").level(), Some(Level::DEBUG));

    proxy.stop_listening();
    listener.join().await;
}

#[tokio::test]
async fn applies_toml_payload() {
    let manager = Manager::detached();
    let listener = manager.listen(0, None).await.unwrap();

    send_config(
        listener.local_addr(),
        b"filter = \"warn\"\n\n[root]\nlevel = \"error\"\n",
    )
    .await;

    assert_eq!(manager.current_filter().as_deref(), Some("warn"));
    assert_eq!(manager.registry().root().level(), Some(Level::ERROR));

    manager.stop_listening();
    listener.join().await;
}

#[tokio::test]
async fn verifier_can_discard_a_payload() {
    let manager = Manager::detached();
    let verify: Verifier = Arc::new(|payload: Vec<u8>| {
        payload.starts_with(b"{\"signed\"").then_some(payload)
    });
    let listener = manager.listen(0, Some(verify)).await.unwrap();

    send_config(listener.local_addr(), br#"{"filter": "trace"}"#).await;
    assert_eq!(manager.current_filter(), None);

    send_config(listener.local_addr(), br#"{"signed": true, "filter": "debug"}"#).await;
    assert_eq!(manager.current_filter().as_deref(), Some("debug"));

    manager.stop_listening();
    listener.join().await;
}

#[tokio::test]
async fn bad_payload_does_not_stop_the_listener() {
    let manager = Manager::detached();
    let listener = manager.listen(0, None).await.unwrap();

    send_config(listener.local_addr(), b"filter = [unterminated").await;
    assert_eq!(manager.current_filter(), None);

    send_config(listener.local_addr(), br#"{"filter": "info"}"#).await;
    assert_eq!(manager.current_filter().as_deref(), Some("info"));

    manager.stop_listening();
    listener.join().await;
}

#[tokio::test]
async fn stop_listening_ends_the_listener_task() {
    let manager = Manager::detached();
    let listener = manager.listen(0, None).await.unwrap();
    let addr = listener.local_addr();

    manager.stop_listening();
    assert!(listener.is_stopped());
    listener.join().await;

    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn idle_client_does_not_block_updates_or_shutdown() {
    let manager = Manager::detached();
    let listener = manager.listen(0, None).await.unwrap();

    let _idle = TcpStream::connect(listener.local_addr()).await.unwrap();
    tokio::time::timeout(
        Duration::from_secs(2),
        send_config(listener.local_addr(), br#"{"filter": "debug"}"#),
    )
    .await
    .expect("payload behind an idle client was not applied in time");
    assert_eq!(manager.current_filter().as_deref(), Some("debug"));

    manager.stop_listening();
    tokio::time::timeout(Duration::from_secs(2), listener.join())
        .await
        .expect("listener did not stop while a client was idle");
}
