//! Candlestick chart row projection.

use elokline_aggregate::DailyBar;
use std::io::Write;

use crate::{FormatError, Formatter, JsonFormatter};

/// One chart data point:
/// `[time_ms, open, close, low, high, games, wins, losses, draws]`.
///
/// This is the column order candlestick series expect (open, close, low,
/// high). Counts are zero on days without games.
pub type ChartRow = [f64; 9];

/// Projects a bar onto a chart row.
#[must_use]
pub fn chart_row(bar: &DailyBar) -> ChartRow {
    let results = bar.win_lose_draw_count.unwrap_or_default();
    [
        bar.time_millis() as f64,
        bar.open,
        bar.close,
        bar.low,
        bar.high,
        f64::from(bar.game_count.unwrap_or(0)),
        f64::from(results.win_count),
        f64::from(results.lose_count),
        f64::from(results.draw_count),
    ]
}

/// Writes bars as a JSON array of [`ChartRow`]s.
#[derive(Debug, Clone, Copy)]
pub struct ChartFormatter(JsonFormatter);

impl Default for ChartFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartFormatter {
    /// Creates a new chart formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self(JsonFormatter::chart())
    }
}

impl Formatter for ChartFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[DailyBar], writer: W) -> Result<(), FormatError> {
        self.0.write_bars(bars, writer)
    }

    fn extension(&self) -> &str {
        self.0.extension()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_bars;
    use std::io::Cursor;

    #[test]
    fn test_chart_row_order() {
        let bars = test_bars();
        let row = chart_row(&bars[0]);

        assert_eq!(
            row,
            [1_704_067_200_000.0, 1500.0, 1505.0, 1500.0, 1510.0, 2.0, 1.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_synthetic_day_has_zero_counts() {
        let bars = test_bars();
        let row = chart_row(&bars[1]);
        assert_eq!(&row[5..], &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_default_writes_chart_rows() {
        let mut output = Vec::new();
        ChartFormatter::default()
            .write_bars(&test_bars(), &mut output)
            .unwrap();
        assert!(output.starts_with(b"[[1704067200000.0,"));
    }

    #[test]
    fn test_chart_formatter_output() {
        let mut output = Cursor::new(Vec::new());
        ChartFormatter::new()
            .write_bars(&test_bars(), &mut output)
            .unwrap();

        let rows: Vec<Vec<f64>> = serde_json::from_slice(&output.into_inner()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], 1_704_153_600_000.0);
    }
}
