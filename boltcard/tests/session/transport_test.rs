#[path = "../common/mod.rs"]
mod common;

use boltcard::transport::{MockTransport, Transport};
use boltcard::Error;

#[tokio::test]
async fn mock_replays_in_order_then_times_out() {
    let mut mock = MockTransport::new();
    mock.push_response(vec![0x91, 0x00]);
    mock.push_transport_error("field off");

    assert_eq!(mock.transceive(&[0x01]).await.unwrap(), vec![0x91, 0x00]);
    match mock.transceive(&[0x02]).await {
        Err(Error::Transport(reason)) => assert_eq!(reason, "field off"),
        other => panic!("expected Transport, got {:?}", other),
    }
    match mock.transceive(&[0x03]).await {
        Err(Error::Timeout) => {}
        other => panic!("expected Timeout, got {:?}", other),
    }
    assert_eq!(mock.sent, vec![vec![0x01], vec![0x02], vec![0x03]]);
}

#[tokio::test]
async fn boxed_transport_is_usable() {
    let mut mock = MockTransport::new();
    mock.push_response(vec![0x90, 0x00]);
    let mut boxed: Box<dyn Transport> = Box::new(mock);
    assert_eq!(boxed.transceive(&[0x00]).await.unwrap(), vec![0x90, 0x00]);
}
