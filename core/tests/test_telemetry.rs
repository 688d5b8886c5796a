#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rotor_core::{
        stream::{transform_stream, InputSource, OutputSink, PaddingMode, PipelineConfig},
        telemetry::{Stage, StageTimes, TelemetryCounters, TelemetrySnapshot, TelemetryTimer},
    };

    #[test]
    fn run_snapshot_is_consistent() {
        let data: Vec<u8> = b"Pack my box with five dozen liquor jugs. ".repeat(50);
        let outcome = transform_stream(
            InputSource::Memory(data.clone()),
            OutputSink::Memory,
            PipelineConfig::new(64),
        )
        .expect("pipeline run");

        let snap = &outcome.snapshot;
        assert!(snap.sanity_check(), "snapshot failed sanity check: {snap:?}");
        assert_eq!(snap.cycles, outcome.cycles);
        assert_eq!(snap.capacity, 64);
        assert_eq!(snap.bytes_read, data.len() as u64);
        assert_eq!(snap.bytes_written, snap.cycles * 64);
        assert_eq!(snap.letters_input, outcome.input_histogram.total());
        assert_eq!(snap.letters_output, outcome.output_histogram.total());
        assert!(snap.stage_times.has_all(&Stage::ALL));
    }

    #[test]
    fn trimmed_run_writes_what_was_read() {
        let outcome = transform_stream(
            InputSource::Memory(vec![b'k'; 100]),
            OutputSink::Memory,
            PipelineConfig::new(32).with_padding(PaddingMode::Trim),
        )
        .expect("pipeline run");

        assert_eq!(outcome.snapshot.bytes_written, 100);
        assert_eq!(outcome.snapshot.bytes_padding, 28);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let outcome = transform_stream(
            InputSource::Memory(b"json".to_vec()),
            OutputSink::Memory,
            PipelineConfig::new(2),
        )
        .expect("pipeline run");

        let json = outcome.snapshot.to_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["cycles"], 2);
        assert_eq!(v["letters_input"], 4);
        assert!(v["stage_times"].is_object());
    }

    #[test]
    fn counters_merge_and_padding() {
        let mut a = TelemetryCounters::default();
        a.add_read(3, 8);
        a.add_input_letters(2);

        let mut b = TelemetryCounters::default();
        b.add_write(8);
        b.add_output_letters(2);

        a += b;
        assert_eq!(a.cycles, 1);
        assert_eq!(a.bytes_read, 3);
        assert_eq!(a.bytes_padding, 5);
        assert_eq!(a.bytes_written, 8);
        assert_eq!(a.letters_input, a.letters_output);
    }

    #[test]
    fn stage_times_accumulate() {
        let mut times = StageTimes::default();
        times.add(Stage::Read, Duration::from_millis(2));
        times.add(Stage::Read, Duration::from_millis(3));
        times.add(Stage::Write, Duration::from_millis(1));

        assert_eq!(times.get(Stage::Read), Duration::from_millis(5));
        assert_eq!(times.get(Stage::Transform), Duration::ZERO);
        assert_eq!(times.total(), Duration::from_millis(6));
        assert!(!times.has_all(&Stage::ALL));
        assert!((times.get_ms(Stage::Write) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sanity_check_rejects_unbalanced_letters() {
        let mut counters = TelemetryCounters::default();
        counters.add_read(4, 4);
        counters.add_input_letters(3);
        counters.add_output_letters(2);

        let mut timer = TelemetryTimer::new();
        timer.finish();
        let snap = TelemetrySnapshot::from(&counters, &timer, 4);
        assert!(!snap.sanity_check());
    }

    #[test]
    fn stage_labels() {
        assert_eq!(Stage::Read.tag(), "[READER]");
        assert_eq!(Stage::CountOutput.tag(), "[COUNTER:output]");
        assert_eq!(Stage::CountInput.to_string(), "count-input");
    }
}
