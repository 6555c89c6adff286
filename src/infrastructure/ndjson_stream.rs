// Newline-delimited JSON streaming utilities
use axum::body::Body;
use axum::http::{Response, StatusCode, header};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::StreamExt;
use serde::Serialize;
use tokio::sync::mpsc;

/// Serialize one message as a JSON line
pub fn encode_line<T: Serialize>(msg: &T) -> Result<Bytes, std::io::Error> {
    let mut chunk = BytesMut::new();
    serde_json::to_writer((&mut chunk).writer(), msg)?;
    chunk.put_u8(b'\n');
    Ok(chunk.freeze())
}

/// Stream every message from the receiver as its own chunk until the
/// sender side finishes
pub fn stream_from_receiver<T>(mut rx: mpsc::Receiver<T>) -> Response<Body>
where
    T: Serialize + Send + 'static,
{
    let stream = async_stream::stream! {
        while let Some(msg) = rx.recv().await {
            yield msg;
        }
    };
    let body = Body::from_stream(stream.map(|msg| encode_line(&msg)));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
        .unwrap_or_else(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}
