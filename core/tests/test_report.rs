#[cfg(test)]
mod tests {
    use rotor_core::constants::REPORT_RULE;
    use rotor_core::histogram::{render_json, render_text, HistogramReport, LetterHistogram, ReportSide};

    fn scenario() -> (LetterHistogram, LetterHistogram) {
        let mut input = LetterHistogram::new();
        input.tally(b"AbC9");
        let mut output = LetterHistogram::new();
        output.tally(b"BaC9");
        (input, output)
    }

    #[test]
    fn block_layout_matches_classic_report() {
        let (input, _) = scenario();
        let text = HistogramReport::new(ReportSide::Input, &input).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 29);
        assert_eq!(lines[0], "-".repeat(42));
        assert_eq!(lines[0], REPORT_RULE);
        assert_eq!(lines[1], "Input file contains:");
        assert_eq!(lines[2], "A: 1 \t\t a: 0");
        assert_eq!(lines[3], "B: 0 \t\t b: 1");
        assert_eq!(lines[4], "C: 1 \t\t c: 0");
        assert_eq!(lines[27], "Z: 0 \t\t z: 0");
        assert_eq!(lines[28], REPORT_RULE);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn text_report_has_input_then_output() {
        let (input, output) = scenario();
        let text = render_text(&input, &output);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 58);
        assert_eq!(lines[1], "Input file contains:");
        assert_eq!(lines[30], "Output file contains:");
        assert_eq!(lines[31], "A: 0 \t\t a: 1");
        assert_eq!(lines[32], "B: 1 \t\t b: 0");
        assert_eq!(lines[33], "C: 1 \t\t c: 0");
    }

    #[test]
    fn json_report_carries_totals() {
        let (input, output) = scenario();
        let json = render_json(&input, &output).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(v["input_total"], 3);
        assert_eq!(v["output_total"], 3);
        assert_eq!(v["input"]["b"], 1);
        assert_eq!(v["output"]["a"], 1);
        assert_eq!(v["output"]["b"], 0);
    }
}
