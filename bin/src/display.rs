//! Display utilities and output formatting for the elokline CLI.

#[cfg(not(feature = "parquet"))]
use anyhow::bail;
use anyhow::Result;
use clap::ValueEnum;
use elokline_lib::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Output format for daily bars.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
    /// Candlestick chart rows
    Chart,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
            Self::Chart => "chart.json",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Write daily bars to a file in the specified format.
pub(crate) fn write_bars(bars: &[DailyBar], output: &Path, format: Format) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);

    match format {
        Format::Csv => CsvFormatter::new().write_bars(bars, writer)?,
        Format::Json => JsonFormatter::new().write_bars(bars, writer)?,
        Format::Ndjson => JsonFormatter::ndjson().write_bars(bars, writer)?,
        Format::Chart => ChartFormatter::new().write_bars(bars, writer)?,
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                ParquetFormatter::new().write_bars(bars, writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                bail!("Parquet support not compiled in");
            }
        }
    }

    Ok(())
}

/// Print a one-screen summary of a bar series.
pub(crate) fn print_summary(username: &str, speed: Speed, bars: &[DailyBar]) {
    let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
        return;
    };

    let played: Vec<_> = bars.iter().filter(|b| !b.is_synthetic()).collect();
    let games: u32 = played.iter().filter_map(|b| b.game_count).sum();
    let (wins, losses, draws) = played
        .iter()
        .filter_map(|b| b.win_lose_draw_count)
        .fold((0, 0, 0), |(w, l, d), r| {
            (w + r.win_count, l + r.lose_count, d + r.draw_count)
        });
    let peak = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let trough = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);

    let day = |bar: &DailyBar| {
        bar.day()
            .map_or_else(|| bar.time.to_string(), |d| d.to_string())
    };

    println!("{username} ({speed})");
    println!("{}", "-".repeat(40));
    println!("{:<14} {} -> {}", "Days:", day(first), day(last));
    println!("{:<14} {} ({} with games)", "Bars:", bars.len(), played.len());
    println!("{:<14} {games} (+{wins} -{losses} ={draws})", "Games:");
    println!("{:<14} {:.0} -> {:.0} ({:+.0})", "Rating:", first.open, last.close, last.close - first.open);
    println!("{:<14} {trough:.0} .. {peak:.0}", "Range:");
}
