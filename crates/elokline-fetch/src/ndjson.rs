//! Incremental newline-delimited JSON decoding.

use bytes::{Bytes, BytesMut};
use futures::stream::{self, Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::pin::Pin;

use crate::FetchError;

/// One complete line cut out of the byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number within the stream, blank lines included.
    pub number: usize,
    /// Line content without the terminating newline.
    pub bytes: Bytes,
}

/// Splits an arbitrarily chunked byte stream into lines.
///
/// Keeps a single buffer holding the trailing fragment that has not been
/// terminated by `\n` yet; every complete line is handed out as soon as its
/// newline arrives. Whitespace-only lines are dropped (but still counted).
#[derive(Debug, Default)]
pub struct LineDecoder {
    partial: BytesMut,
    /// Bytes of `partial` already known to contain no newline.
    scanned: usize,
    lines: usize,
}

impl LineDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns the non-blank lines it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Line> {
        self.partial.extend_from_slice(chunk);

        let mut complete = Vec::new();
        while let Some(offset) = self.partial[self.scanned..]
            .iter()
            .position(|b| *b == b'\n')
        {
            let end = self.scanned + offset;
            let mut line = self.partial.split_to(end + 1);
            line.truncate(end);
            self.scanned = 0;
            self.lines += 1;

            if !line.trim_ascii().is_empty() {
                complete.push(Line {
                    number: self.lines,
                    bytes: line.freeze(),
                });
            }
        }
        self.scanned = self.partial.len();

        complete
    }

    /// Flushes the unterminated trailing fragment once the source is closed.
    ///
    /// Returns `None` if nothing but whitespace is left.
    pub fn finish(&mut self) -> Option<Line> {
        let rest = self.partial.split().freeze();
        self.scanned = 0;
        if rest.trim_ascii().is_empty() {
            return None;
        }
        self.lines += 1;
        Some(Line {
            number: self.lines,
            bytes: rest,
        })
    }

    /// Returns the number of buffered bytes not yet terminated by a newline.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.partial.len()
    }
}

/// Decodes one line as a JSON value.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] if the line is not valid JSON for `T`.
pub fn decode_line<T: DeserializeOwned>(line: &Line) -> Result<T, FetchError> {
    serde_json::from_slice(&line.bytes).map_err(|source| FetchError::Decode {
        line: line.number,
        source,
    })
}

struct DecodeState<S> {
    chunks: Pin<Box<S>>,
    decoder: LineDecoder,
    ready: VecDeque<Line>,
    done: bool,
}

/// Turns a stream of byte chunks into a stream of decoded JSON values, one per
/// line.
///
/// Values are yielded as soon as their line is complete. The first transport
/// or decode error is yielded and ends the stream.
pub fn ndjson_stream<T, S, E>(chunks: S) -> impl Stream<Item = Result<T, FetchError>>
where
    T: DeserializeOwned,
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<FetchError>,
{
    let state = DecodeState {
        chunks: Box::pin(chunks),
        decoder: LineDecoder::new(),
        ready: VecDeque::new(),
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(line) = state.ready.pop_front() {
                let item = decode_line::<T>(&line);
                if item.is_err() {
                    state.ready.clear();
                    state.done = true;
                }
                return Some((item, state));
            }
            if state.done {
                return None;
            }

            match state.chunks.next().await {
                Some(Ok(chunk)) => state.ready.extend(state.decoder.push(&chunk)),
                Some(Err(e)) => {
                    state.done = true;
                    return Some((Err(e.into()), state));
                }
                None => {
                    state.done = true;
                    if state.decoder.pending() > 0 {
                        tracing::debug!(
                            bytes = state.decoder.pending(),
                            "stream closed without trailing newline"
                        );
                    }
                    state.ready.extend(state.decoder.finish());
                }
            }
        }
    })
}
