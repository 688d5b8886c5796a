#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read, Write};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use rotor_core::{
        stream::{
            io::{open_output, take_captured},
            pipeline::run_pipeline,
            transform_stream, InputSource, OutputSink, PipelineConfig,
        },
        telemetry::Stage,
        transform::RotatingTransform,
        types::PipelineError,
    };

    /// Yields `data` up to `fail_at` bytes, then errors on every call.
    struct FailingReader {
        data: Cursor<Vec<u8>>,
        fail_at: u64,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let left = self.fail_at.saturating_sub(self.data.position()) as usize;
            if left == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
            }
            let n = buf.len().min(left);
            self.data.read(&mut buf[..n])
        }
    }

    /// Accepts `limit` bytes in total, then fails.
    struct FailingWriter {
        written: usize,
        limit: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.limit - self.written;
            if room == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "sink full"));
            }
            let n = buf.len().min(room);
            self.written += n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Passes reads through and records how many bytes left the source.
    struct CountingReader<R> {
        inner: R,
        consumed: Arc<AtomicUsize>,
    }

    impl<R: Read> Read for CountingReader<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.inner.read(buf)?;
            self.consumed.fetch_add(n, Ordering::SeqCst);
            Ok(n)
        }
    }

    struct PanickingWriter;

    impl Write for PanickingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            panic!("writer blew up");
        }

        fn flush(&mut self) -> io::Result<()> {
            panic!("writer blew up");
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rotor-{}-{name}", std::process::id()))
    }

    #[test]
    fn read_error_closes_stream_and_surfaces() {
        let data = b"abcdefghijklmnop".to_vec();
        let reader = FailingReader { data: Cursor::new(data.clone()), fail_at: 10 };
        let (writer, captured) = open_output(OutputSink::Memory).unwrap();

        let err = run_pipeline(reader, writer, &PipelineConfig::new(4)).unwrap_err();
        match err {
            PipelineError::Read { cycle, filled, .. } => {
                assert_eq!(cycle, 3);
                assert_eq!(filled, 2);
            }
            other => panic!("expected read error, got {other:?}"),
        }

        // Everything read before the failure still went through, zero padded.
        let out = take_captured(&captured.unwrap()).unwrap();
        let mut expected = RotatingTransform::forward().apply_vec(&data[..10]);
        expected.resize(12, 0);
        assert_eq!(out, expected);
    }

    #[test]
    fn read_error_on_first_byte() {
        let reader = FailingReader { data: Cursor::new(Vec::new()), fail_at: 0 };
        let err = run_pipeline(reader, io::sink(), &PipelineConfig::new(8)).unwrap_err();
        assert!(matches!(err, PipelineError::Read { cycle: 1, filled: 0, .. }));
    }

    #[test]
    fn write_error_mid_stream_drains_all_stages() {
        let capacity = 16 * 1024;
        let data = vec![b'm'; capacity * 10];
        let consumed = Arc::new(AtomicUsize::new(0));
        let reader = CountingReader { inner: Cursor::new(data), consumed: consumed.clone() };
        let writer = FailingWriter { written: 0, limit: capacity + 100 };

        let err = run_pipeline(reader, writer, &PipelineConfig::new(capacity)).unwrap_err();
        match err {
            PipelineError::Write { cycle, .. } => assert_eq!(cycle, 2),
            other => panic!("expected write error, got {other:?}"),
        }

        // Two cycles plus at most one cycle of read-ahead; the closing
        // cycle after the abort must not pull from the source.
        let consumed = consumed.load(Ordering::SeqCst);
        assert!(consumed >= 2 * capacity, "consumed {consumed}");
        assert!(consumed < 3 * capacity, "consumed {consumed}");
    }

    #[test]
    fn flush_failure_is_a_write_error() {
        // Small cycles sit in the write buffer until the final flush.
        let writer = FailingWriter { written: 0, limit: 0 };
        let err = run_pipeline(Cursor::new(b"abc".to_vec()), writer, &PipelineConfig::new(4)).unwrap_err();
        assert!(matches!(err, PipelineError::Write { cycle: 1, .. }));
    }

    #[test]
    fn writer_panic_is_reported_not_hung() {
        let err = run_pipeline(Cursor::new(vec![b'z'; 64]), PanickingWriter, &PipelineConfig::new(8))
            .unwrap_err();
        assert!(matches!(err, PipelineError::StagePanicked { stage: Stage::Write }));
    }

    #[test]
    fn missing_source_fails_before_sink_is_created() {
        let src = temp_path("does-not-exist.txt");
        let dst = temp_path("never-created.txt");
        let _ = std::fs::remove_file(&dst);

        let err = transform_stream(
            InputSource::File(src.clone()),
            OutputSink::File(dst.clone()),
            PipelineConfig::new(4),
        )
        .unwrap_err();

        match err {
            PipelineError::SourceUnreadable { path, .. } => assert_eq!(path, src),
            other => panic!("expected unreadable source, got {other:?}"),
        }
        assert!(!dst.exists());
    }

    #[test]
    fn unwritable_sink_is_reported() {
        let src = temp_path("sink-test-input.txt");
        std::fs::write(&src, b"hello").unwrap();
        let dst = temp_path("no-such-dir").join("out.txt");

        let err = transform_stream(
            InputSource::File(src.clone()),
            OutputSink::File(dst.clone()),
            PipelineConfig::new(4),
        )
        .unwrap_err();

        assert!(matches!(err, PipelineError::SinkUnwritable { ref path, .. } if *path == dst));
        let _ = std::fs::remove_file(&src);
    }

    #[test]
    fn file_roundtrip_truncates_existing_sink() {
        let src = temp_path("file-input.txt");
        let dst = temp_path("file-output.txt");
        std::fs::write(&src, b"AbC9").unwrap();
        std::fs::write(&dst, b"stale contents that are much longer").unwrap();

        let outcome = transform_stream(
            InputSource::File(src.clone()),
            OutputSink::File(dst.clone()),
            PipelineConfig::new(4),
        )
        .unwrap();

        assert_eq!(outcome.cycles, 1);
        assert_eq!(std::fs::read(&dst).unwrap(), b"BaC9");
        let _ = std::fs::remove_file(&src);
        let _ = std::fs::remove_file(&dst);
    }
}
