//! JSON output formats: bar objects or chart rows, as an array or NDJSON.

use elokline_aggregate::DailyBar;
use serde::Serialize;
use std::io::Write;

use crate::chart::{ChartRow, chart_row};
use crate::{FormatError, Formatter};

/// How JSON values are laid out in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// One JSON array, optionally pretty-printed.
    #[default]
    Array,
    /// One value per line (NDJSON/JSONL).
    Ndjson,
}

/// What each JSON value holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonRows {
    /// A `DailyBar` object with camelCase keys.
    #[default]
    Bars,
    /// A positional [`ChartRow`].
    Chart,
}

/// JSON formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    style: JsonStyle,
    rows: JsonRows,
    pretty: bool,
}

impl JsonFormatter {
    /// A compact JSON array of bar objects.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            rows: JsonRows::Bars,
            pretty: false,
        }
    }

    /// One bar object per line.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self::new().with_style(JsonStyle::Ndjson)
    }

    /// A compact JSON array of chart rows.
    #[must_use]
    pub const fn chart() -> Self {
        Self::new().with_rows(JsonRows::Chart)
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets what each value holds.
    #[must_use]
    pub const fn with_rows(mut self, rows: JsonRows) -> Self {
        self.rows = rows;
        self
    }

    fn write_values<T: Serialize, W: Write>(
        &self,
        values: &[T],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array if self.pretty => serde_json::to_writer_pretty(&mut writer, values)?,
            JsonStyle::Array => serde_json::to_writer(&mut writer, values)?,
            JsonStyle::Ndjson => {
                for value in values {
                    serde_json::to_writer(&mut writer, value)?;
                    writeln!(writer)?;
                }
                return Ok(());
            }
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[DailyBar], writer: W) -> Result<(), FormatError> {
        match self.rows {
            JsonRows::Bars => self.write_values(bars, writer),
            JsonRows::Chart => {
                let rows: Vec<ChartRow> = bars.iter().map(chart_row).collect();
                self.write_values(&rows, writer)
            }
        }
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_bars;

    fn render(formatter: JsonFormatter) -> String {
        let mut output = Vec::new();
        formatter.write_bars(&test_bars(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_array_parses_back_to_bars() {
        let result = render(JsonFormatter::new());

        assert!(result.contains("\"time\":1704067200"));
        assert!(result.contains("\"winLoseDrawCount\":{\"winCount\":1"));
        let parsed: Vec<DailyBar> = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed, test_bars());
    }

    #[test]
    fn test_ndjson_omits_counts_on_filled_days() {
        let formatter = JsonFormatter::ndjson();
        let result = render(formatter);

        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"gameCount\":2"));
        assert!(!lines[1].contains("gameCount"));
        assert_eq!(formatter.extension(), "ndjson");
    }

    #[test]
    fn test_pretty_array_is_indented() {
        let result = render(JsonFormatter::new().with_pretty(true));
        assert!(result.starts_with("[\n  {"));
    }

    #[test]
    fn test_chart_rows_as_ndjson() {
        let result = render(JsonFormatter::chart().with_style(JsonStyle::Ndjson));

        let rows: Vec<ChartRow> = result
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(rows[1][0], 1_704_153_600_000.0);
        assert_eq!(rows[1][5], 0.0);
    }
}
