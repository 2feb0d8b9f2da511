//! A bounded in-memory pipe between two threads.

use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, SyncSender};

/// Largest chunk handed across the pipe by a single write.
const MAX_CHUNK: usize = 64 * 1024;

/// Create a pipe holding at most `capacity` chunks in flight (at least one).
///
/// Dropping or [closing](PipeWriter::close) the writer ends the stream; the reader then sees
/// end-of-file. [`PipeWriter::close_with_error`] makes the reader fail instead. Writes fail with
/// `BrokenPipe` once the reader is gone.
pub fn pipe(capacity: usize) -> (PipeWriter, PipeReader) {
    let (tx, rx) = mpsc::sync_channel(capacity.max(1));
    (
        PipeWriter { tx: Some(tx) },
        PipeReader {
            rx,
            chunk: Vec::new(),
            pos: 0,
            failed: None,
        },
    )
}

/// Producer end of a [`pipe`].
#[derive(Debug)]
pub struct PipeWriter {
    tx: Option<SyncSender<io::Result<Vec<u8>>>>,
}

impl PipeWriter {
    /// Close the pipe normally.
    pub fn close(mut self) {
        self.tx.take();
    }

    /// Close the pipe so the reader's next read fails with `err`.
    pub fn close_with_error(mut self, err: io::Error) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Err(err));
        }
    }
}

impl Write for PipeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "pipe writer closed"))?;
        let n = buf.len().min(MAX_CHUNK);
        tx.send(Ok(buf[..n].to_vec()))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "pipe reader dropped"))?;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Consumer end of a [`pipe`].
#[derive(Debug)]
pub struct PipeReader {
    rx: Receiver<io::Result<Vec<u8>>>,
    chunk: Vec<u8>,
    pos: usize,
    // Kind of the error the writer closed with; repeated on every later read.
    failed: Option<io::ErrorKind>,
}

impl Read for PipeReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(kind) = self.failed {
            return Err(io::Error::new(kind, "pipe closed with error"));
        }
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pos >= self.chunk.len() {
            match self.rx.recv() {
                Ok(Ok(chunk)) => {
                    self.chunk = chunk;
                    self.pos = 0;
                }
                Ok(Err(err)) => {
                    self.failed = Some(err.kind());
                    return Err(err);
                }
                // Writer closed or dropped.
                Err(_) => return Ok(0),
            }
        }
        let n = buf.len().min(self.chunk.len() - self.pos);
        buf[..n].copy_from_slice(&self.chunk[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
