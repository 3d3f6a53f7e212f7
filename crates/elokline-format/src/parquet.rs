//! Apache Parquet output format.

use arrow::array::{Float64Array, TimestampSecondArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use elokline_aggregate::DailyBar;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for daily bars.
    ///
    /// Count columns are nullable: they are null on days without games.
    fn bar_schema() -> Schema {
        Schema::new(vec![
            Field::new(
                "time",
                DataType::Timestamp(TimeUnit::Second, Some("UTC".into())),
                false,
            ),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("game_count", DataType::UInt32, true),
            Field::new("wins", DataType::UInt32, true),
            Field::new("losses", DataType::UInt32, true),
            Field::new("draws", DataType::UInt32, true),
        ])
    }

    /// Converts daily bars to an Arrow RecordBatch.
    fn bars_to_batch(bars: &[DailyBar]) -> Result<RecordBatch, FormatError> {
        let times: Vec<_> = bars.iter().map(|b| b.time).collect();
        let opens: Vec<_> = bars.iter().map(|b| b.open).collect();
        let highs: Vec<_> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<_> = bars.iter().map(|b| b.low).collect();
        let closes: Vec<_> = bars.iter().map(|b| b.close).collect();
        let games: Vec<_> = bars.iter().map(|b| b.game_count).collect();
        let wins: Vec<_> = bars
            .iter()
            .map(|b| b.win_lose_draw_count.map(|r| r.win_count))
            .collect();
        let losses: Vec<_> = bars
            .iter()
            .map(|b| b.win_lose_draw_count.map(|r| r.lose_count))
            .collect();
        let draws: Vec<_> = bars
            .iter()
            .map(|b| b.win_lose_draw_count.map(|r| r.draw_count))
            .collect();

        RecordBatch::try_new(
            Arc::new(Self::bar_schema()),
            vec![
                Arc::new(TimestampSecondArray::from(times).with_timezone("UTC")),
                Arc::new(Float64Array::from(opens)),
                Arc::new(Float64Array::from(highs)),
                Arc::new(Float64Array::from(lows)),
                Arc::new(Float64Array::from(closes)),
                Arc::new(UInt32Array::from(games)),
                Arc::new(UInt32Array::from(wins)),
                Arc::new(UInt32Array::from(losses)),
                Arc::new(UInt32Array::from(draws)),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

impl Formatter for ParquetFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[DailyBar], writer: W) -> Result<(), FormatError> {
        let schema = Arc::new(Self::bar_schema());
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, schema, Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        for chunk in bars.chunks(self.row_group_size) {
            let batch = Self::bars_to_batch(chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}
