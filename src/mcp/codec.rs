//! Line codec for the stdio wire protocol.
//!
//! Frame format: one UTF-8 JSON document per line, terminated by `\n`.
//! A trailing `\r` is tolerated. Blank lines are skipped.

use std::string::FromUtf8Error;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// One framed line read off the wire.
#[derive(Debug, PartialEq, Eq)]
pub enum Frame {
    Line(String),
    /// A complete line that is not UTF-8. Framing is intact, so the reader
    /// can answer it and keep going.
    InvalidUtf8(FromUtf8Error),
}

/// Read one message line from the stream.
///
/// Returns `None` on clean EOF. `max_message_bytes` caps the accepted line
/// length (excluding the terminator); an oversized line is the only fatal
/// framing error.
pub async fn read_message<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    max_message_bytes: usize,
) -> std::io::Result<Option<Frame>> {
    loop {
        let mut buf = Vec::new();
        // +2 leaves room for "\r\n" on a maximum-length line
        let limit = (max_message_bytes as u64).saturating_add(2);
        let read = (&mut *reader).take(limit).read_until(b'\n', &mut buf).await?;
        if read == 0 {
            return Ok(None);
        }

        let terminated = buf.last() == Some(&b'\n');
        if terminated {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        if buf.len() > max_message_bytes {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Message too large: more than {} bytes", max_message_bytes),
            ));
        }

        let line = match String::from_utf8(buf) {
            Ok(line) => line,
            Err(e) => return Ok(Some(Frame::InvalidUtf8(e))),
        };

        if line.trim().is_empty() {
            if terminated {
                continue;
            }
            return Ok(None);
        }
        return Ok(Some(Frame::Line(line)));
    }
}

/// Write one message line to the stream and flush it.
pub async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    message: &str,
) -> std::io::Result<()> {
    writer.write_all(message.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
