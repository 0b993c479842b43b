//! Bounded accumulation of a child's output stream.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

const CHUNK_SIZE: usize = 8 * 1024;

/// Bytes read from one stream.
#[derive(Debug, Default)]
pub(super) struct Captured {
    pub bytes: Vec<u8>,
    /// More than the limit was written; the excess was read and dropped.
    pub truncated: bool,
}

impl Captured {
    pub fn lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Read `stream` to end of file, keeping at most `limit` bytes.
///
/// The stream is always drained completely so a chatty worker never blocks
/// on a full pipe.
pub(super) async fn drain<R>(stream: Option<R>, limit: usize) -> io::Result<Captured>
where
    R: AsyncRead + Unpin,
{
    let mut captured = Captured::default();
    let Some(mut stream) = stream else {
        return Ok(captured);
    };

    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        let room = limit.saturating_sub(captured.bytes.len());
        captured.bytes.extend_from_slice(&chunk[..n.min(room)]);
        if n > room {
            captured.truncated = true;
        }
    }
    Ok(captured)
}
