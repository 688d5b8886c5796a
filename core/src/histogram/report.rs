//! histogram/report.rs
//! Human-readable and JSON rendering of the two finished histograms.

use std::fmt;

use serde::Serialize;

use crate::constants::REPORT_RULE;
use crate::histogram::counts::LetterHistogram;

/// Which side of the transform a histogram was taken on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSide {
    Input,
    Output,
}

impl ReportSide {
    fn heading(self) -> &'static str {
        match self {
            ReportSide::Input => "Input file contains:",
            ReportSide::Output => "Output file contains:",
        }
    }
}

/// One framed block: rule, heading, 26 paired rows, rule.
pub struct HistogramReport<'a> {
    pub side: ReportSide,
    pub histogram: &'a LetterHistogram,
}

impl<'a> HistogramReport<'a> {
    pub fn new(side: ReportSide, histogram: &'a LetterHistogram) -> Self {
        Self { side, histogram }
    }
}

impl fmt::Display for HistogramReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{REPORT_RULE}")?;
        writeln!(f, "{}", self.side.heading())?;
        for (upper, n_upper, lower, n_lower) in self.histogram.paired_rows() {
            writeln!(f, "{upper}: {n_upper} \t\t {lower}: {n_lower}")?;
        }
        writeln!(f, "{REPORT_RULE}")
    }
}

/// Both histograms, input block first.
pub fn render_text(input: &LetterHistogram, output: &LetterHistogram) -> String {
    format!(
        "{}{}",
        HistogramReport::new(ReportSide::Input, input),
        HistogramReport::new(ReportSide::Output, output),
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    input: &'a LetterHistogram,
    output: &'a LetterHistogram,
    input_total: u64,
    output_total: u64,
}

/// Both histograms as a pretty-printed JSON object.
pub fn render_json(
    input: &LetterHistogram,
    output: &LetterHistogram,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        input,
        output,
        input_total: input.total(),
        output_total: output.total(),
    })
}
