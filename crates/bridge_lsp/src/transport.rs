//! Framed JSON-RPC transport: `Content-Length`-prefixed messages over an
//! async byte stream, in the style of HTTP/1.1 headers.

use bridge_core::{Error, Result};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

/// Reads one `Content-Length`-framed JSON-RPC message at a time from `R`.
pub struct MessageReader<R> {
  inner: BufReader<R>,
}

impl<R: tokio::io::AsyncRead + Unpin> MessageReader<R> {
  pub fn new(inner: R) -> Self {
    Self {
      inner: BufReader::new(inner),
    }
  }

  /// Read the next framed message. Only the `Content-Length` header is
  /// required; any other header is read and discarded. EOF before a
  /// complete message is a terminal `Error::Transport`.
  pub async fn read_message(&mut self) -> Result<Value> {
    let mut content_length: Option<usize> = None;
    loop {
      let mut line = String::new();
      let n = self.inner.read_line(&mut line).await?;
      if n == 0 {
        return Err(Error::Transport("EOF while reading headers".into()));
      }
      let trimmed = line.trim_end_matches(['\r', '\n']);
      if trimmed.is_empty() {
        break;
      }
      if let Some(value) = trimmed.strip_prefix("Content-Length:") {
        content_length = Some(
          value
            .trim()
            .parse()
            .map_err(|_| Error::Transport(format!("bad Content-Length: {value}")))?,
        );
      }
      // Other headers (e.g. Content-Type) are tolerated and ignored.
    }

    let length = content_length
      .ok_or_else(|| Error::Transport("message had no Content-Length header".into()))?;

    let mut body = vec![0u8; length];
    self
      .inner
      .read_exact(&mut body)
      .await
      .map_err(|e| Error::Transport(format!("EOF mid-message: {e}")))?;

    serde_json::from_slice(&body).map_err(Error::Json)
  }
}

/// Writes `Content-Length`-framed JSON-RPC messages to `W`. Holds no
/// internal lock; callers that share a writer across tasks must serialize
/// access themselves (e.g. behind a `tokio::sync::Mutex`), since concurrent
/// writers would interleave bytes on the wire.
pub struct MessageWriter<W> {
  inner: BufWriter<W>,
}

impl<W: AsyncWrite + Unpin> MessageWriter<W> {
  pub fn new(inner: W) -> Self {
    Self {
      inner: BufWriter::new(inner),
    }
  }

  pub async fn write_message(&mut self, message: &Value) -> Result<()> {
    let body = serde_json::to_vec(message)?;
    let header = format!("Content-Length: {}\r\n\r\n", body.len());
    self.inner.write_all(header.as_bytes()).await?;
    self.inner.write_all(&body).await?;
    self.inner.flush().await?;
    Ok(())
  }

  /// End the underlying stream (closes stdin for a child process writer).
  pub async fn shutdown(&mut self) -> Result<()> {
    self.inner.shutdown().await?;
    Ok(())
  }
}

/// Build a JSON-RPC request object.
pub fn request(id: i64, method: &str, params: Value) -> Value {
  json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params })
}

/// Build a JSON-RPC notification object (no `id`).
pub fn notification(method: &str, params: Value) -> Value {
  json!({ "jsonrpc": "2.0", "method": method, "params": params })
}

/// Build a success response to a server-initiated request.
pub fn response(id: Value, result: Value) -> Value {
  json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

/// Build an error response to a server-initiated request.
pub fn error_response(id: Value, code: i64, message: &str) -> Value {
  json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
}

#[cfg(test)]
mod tests {
  use super::*;
  use tokio::io::duplex;

  #[tokio::test]
  async fn round_trip_single_message() {
    let (a, b) = duplex(4096);
    let mut writer = MessageWriter::new(a);
    let msg = request(1, "initialize", json!({"foo": "bar"}));
    writer.write_message(&msg).await.unwrap();

    let mut reader = MessageReader::new(b);
    let got = reader.read_message().await.unwrap();
    assert_eq!(got, msg);
  }

  #[tokio::test]
  async fn reads_two_messages_split_across_chunks() {
    let (mut server, client) = duplex(8192);
    let m1 = request(1, "a", json!(null));
    let m2 = notification("b", json!({"x": 1}));

    let body1 = serde_json::to_vec(&m1).unwrap();
    let body2 = serde_json::to_vec(&m2).unwrap();
    let mut wire = Vec::new();
    wire.extend_from_slice(format!("Content-Length: {}\r\n\r\n", body1.len()).as_bytes());
    wire.extend_from_slice(&body1);
    let header2 = format!("Content-Length: {}\r\n\r\n", body2.len());
    wire.extend_from_slice(header2.as_bytes());
    wire.extend_from_slice(&body2);

    // Split the second message's body at byte 7 of its body to simulate a
    // chunk boundary landing mid-payload.
    let split_at = wire.len() - body2.len() + 7;
    let (first_chunk, second_chunk) = wire.split_at(split_at);
    let first_chunk = first_chunk.to_vec();
    let second_chunk = second_chunk.to_vec();

    tokio::spawn(async move {
      server.write_all(&first_chunk).await.unwrap();
      tokio::task::yield_now().await;
      server.write_all(&second_chunk).await.unwrap();
    });

    let mut reader = MessageReader::new(client);
    let got1 = reader.read_message().await.unwrap();
    let got2 = reader.read_message().await.unwrap();
    assert_eq!(got1, m1);
    assert_eq!(got2, m2);
  }

  #[tokio::test]
  async fn eof_mid_message_is_an_error() {
    let (mut server, client) = duplex(4096);
    tokio::spawn(async move {
      server
        .write_all(b"Content-Length: 50\r\n\r\n{\"incomplete\":")
        .await
        .unwrap();
      // server drops here, closing the write side before 50 bytes arrive.
    });

    let mut reader = MessageReader::new(client);
    let err = reader.read_message().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
  }

  #[test]
  fn builds_error_response_shape() {
    let v = error_response(json!(3), -32601, "method not found");
    assert_eq!(v["error"]["code"], -32601);
    assert_eq!(v["id"], 3);
  }
}
