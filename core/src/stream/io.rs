//! stream/io.rs
//! Source and sink normalization plus cycle-sized reads.

use std::io::{self, BufRead, BufReader, Cursor, Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::types::PipelineError;

/// Canonical input abstraction
pub enum InputSource {
    Reader(Box<dyn Read + Send>),
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Canonical output abstraction
pub enum OutputSink {
    Writer(Box<dyn Write + Send>),
    /// Created or truncated before the first cycle.
    File(PathBuf),
    /// Captured and returned with the outcome.
    Memory,
}

/// In-memory capture shared between the writer stage and the caller.
pub type CapturedOutput = Arc<Mutex<Vec<u8>>>;

/// Normalize input source into a boxed reader.
pub fn open_input(src: InputSource) -> Result<Box<dyn Read + Send>, PipelineError> {
    let reader: Box<dyn Read + Send> = match src {
        InputSource::Reader(r) => r,
        InputSource::File(path) => match std::fs::File::open(&path) {
            Ok(f) => Box::new(f),
            Err(source) => return Err(PipelineError::SourceUnreadable { path, source }),
        },
        InputSource::Memory(bytes) => Box::new(Cursor::new(bytes)),
    };
    Ok(reader)
}

/// Normalize output sink into a boxed writer, plus the capture for `Memory`.
pub fn open_output(
    sink: OutputSink,
) -> Result<(Box<dyn Write + Send>, Option<CapturedOutput>), PipelineError> {
    match sink {
        OutputSink::Writer(w) => Ok((w, None)),
        OutputSink::File(path) => match std::fs::File::create(&path) {
            Ok(f) => Ok((Box::new(f), None)),
            Err(source) => Err(PipelineError::SinkUnwritable { path, source }),
        },
        OutputSink::Memory => {
            let buf = Arc::new(Mutex::new(Vec::new()));
            let writer = SharedBufferWriter { buf: buf.clone() };
            Ok((Box::new(writer), Some(buf)))
        }
    }
}

/// Copy out whatever the writer stage pushed into a `Memory` sink.
pub fn take_captured(buf: &CapturedOutput) -> Result<Vec<u8>, PipelineError> {
    let mut guard = buf
        .lock()
        .map_err(|_| io::Error::new(io::ErrorKind::Other, "captured output lock poisoned"))?;
    Ok(std::mem::take(&mut *guard))
}

pub struct SharedBufferWriter {
    buf: CapturedOutput,
}

impl Write for SharedBufferWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buf
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "captured output lock poisoned"))?;
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Result of filling one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleFill {
    pub filled: usize,
    /// No byte remains after this cycle.
    pub exhausted: bool,
}

/// Read failure that still reports how many slots were filled.
#[derive(Debug)]
pub struct PartialRead {
    pub filled: usize,
    pub source: io::Error,
}

/// Source wrapper that fills whole cycles and detects the end eagerly.
///
/// After a full cycle it peeks for one more byte, so a source whose length is
/// an exact multiple of N ends on that cycle instead of producing an extra,
/// all-padding cycle.
pub struct CycleSource<R: Read> {
    inner: BufReader<R>,
}

impl<R: Read> CycleSource<R> {
    pub fn new(reader: R) -> Self {
        Self { inner: BufReader::new(reader) }
    }

    pub fn fill(&mut self, slots: &mut [u8]) -> Result<CycleFill, PartialRead> {
        let mut off = 0;

        while off < slots.len() {
            match self.inner.read(&mut slots[off..]) {
                Ok(0) => return Ok(CycleFill { filled: off, exhausted: true }),
                Ok(n) => off += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(PartialRead { filled: off, source }),
            }
        }

        loop {
            match self.inner.fill_buf() {
                Ok(rest) => return Ok(CycleFill { filled: off, exhausted: rest.is_empty() }),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(PartialRead { filled: off, source }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple_ends_on_last_full_cycle() {
        let mut src = CycleSource::new(Cursor::new(b"abcdefgh".to_vec()));
        let mut slots = [0u8; 4];
        assert_eq!(src.fill(&mut slots).unwrap(), CycleFill { filled: 4, exhausted: false });
        assert_eq!(src.fill(&mut slots).unwrap(), CycleFill { filled: 4, exhausted: true });
    }

    #[test]
    fn short_tail_is_exhausted() {
        let mut src = CycleSource::new(Cursor::new(b"abc".to_vec()));
        let mut slots = [0u8; 8];
        assert_eq!(src.fill(&mut slots).unwrap(), CycleFill { filled: 3, exhausted: true });
        assert_eq!(&slots[..3], b"abc");
    }

    #[test]
    fn empty_source_is_exhausted_immediately() {
        let mut src = CycleSource::new(io::empty());
        let mut slots = [0u8; 2];
        assert_eq!(src.fill(&mut slots).unwrap(), CycleFill { filled: 0, exhausted: true });
    }
}
