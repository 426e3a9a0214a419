//! Price-series data layer — CSV loading and synthetic series generation.
//!
//! The feed follows a load-then-query discipline: constructing a feed
//! names the source, `load` populates and validates it, and querying an
//! unpopulated feed is a state error. The engine consumes the validated,
//! date-ascending series and does not re-check it.

use crate::domain::PriceBar;
use crate::error::SimError;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One CSV row. Extra columns (open, high, low, volume, ...) are
/// accepted and ignored — only date and close matter to the core.
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    close: f64,
}

/// A price feed with an optional CSV source.
///
/// Querying before `load` fails with [`SimError::NotLoaded`]; loading a
/// feed constructed without a source fails with [`SimError::Config`].
#[derive(Debug, Default)]
pub struct PriceFeed {
    source: Option<PathBuf>,
    bars: Option<Vec<PriceBar>>,
}

impl PriceFeed {
    /// A feed backed by a CSV file with `date` and `close` columns.
    pub fn from_csv(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(path.into()),
            bars: None,
        }
    }

    /// A feed with no source configured. Loading it is a configuration
    /// error; useful as a placeholder in builders and tests.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// A feed pre-populated from an in-memory series (tests, synthetic data).
    pub fn from_bars(bars: Vec<PriceBar>) -> Result<Self, SimError> {
        let bars = validate_series(bars)?;
        Ok(Self {
            source: None,
            bars: Some(bars),
        })
    }

    /// Read, parse, sort, and validate the configured CSV source.
    pub fn load(&mut self) -> Result<(), SimError> {
        let path = self
            .source
            .as_ref()
            .ok_or_else(|| SimError::Config("no data source specified".into()))?;
        let bars = read_csv(path)?;
        self.bars = Some(validate_series(bars)?);
        Ok(())
    }

    /// The validated, date-ascending price series.
    pub fn bars(&self) -> Result<&[PriceBar], SimError> {
        self.bars
            .as_deref()
            .ok_or_else(|| SimError::NotLoaded("price data requested before load".into()))
    }
}

fn read_csv(path: &Path) -> Result<Vec<PriceBar>, SimError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| SimError::Data(format!("cannot open {}: {e}", path.display())))?;
    let mut bars = Vec::new();
    for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row.map_err(|e| SimError::Data(format!("row {}: {e}", line + 2)))?;
        bars.push(PriceBar::new(row.date, row.close));
    }
    Ok(bars)
}

/// Sort ascending and enforce the series invariants: unique dates,
/// positive finite closes.
fn validate_series(mut bars: Vec<PriceBar>) -> Result<Vec<PriceBar>, SimError> {
    bars.sort_by_key(|b| b.date);
    for window in bars.windows(2) {
        if window[0].date == window[1].date {
            return Err(SimError::Data(format!(
                "duplicate date in price series: {}",
                window[0].date
            )));
        }
    }
    if let Some(bad) = bars.iter().find(|b| !b.is_sane()) {
        return Err(SimError::Data(format!(
            "non-positive close {} on {}",
            bad.close, bad.date
        )));
    }
    Ok(bars)
}

/// Seeded multiplicative random walk over consecutive calendar days.
///
/// Deterministic for a given seed, so tests and demos are reproducible.
pub fn synthetic_walk(
    n: usize,
    start_date: NaiveDate,
    start_price: f64,
    daily_drift: f64,
    daily_vol: f64,
    seed: u64,
) -> Vec<PriceBar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = start_price;
    (0..n)
        .map(|i| {
            let shock: f64 = rng.gen_range(-1.0..1.0);
            price *= 1.0 + daily_drift + daily_vol * shock;
            price = price.max(0.01);
            PriceBar::new(start_date + chrono::Duration::days(i as i64), price)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn write_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("tradesim_{}_{}.csv", std::process::id(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn unconfigured_feed_fails_with_config_error() {
        let mut feed = PriceFeed::unconfigured();
        assert!(matches!(feed.load(), Err(SimError::Config(_))));
    }

    #[test]
    fn query_before_load_fails_with_not_loaded() {
        let feed = PriceFeed::from_csv("somewhere.csv");
        assert!(matches!(feed.bars(), Err(SimError::NotLoaded(_))));
    }

    #[test]
    fn loads_and_sorts_csv() {
        let path = write_csv("sorts", "date,close\n2024-01-03,102.0\n2024-01-02,101.0\n");
        let mut feed = PriceFeed::from_csv(&path);
        feed.load().unwrap();
        let bars = feed.bars().unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, date(2));
        assert_eq!(bars[1].date, date(3));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn ignores_extra_columns() {
        let path = write_csv(
            "extra_cols",
            "date,open,high,low,close,volume\n2024-01-02,99,103,98,101.5,1000\n",
        );
        let mut feed = PriceFeed::from_csv(&path);
        feed.load().unwrap();
        assert_eq!(feed.bars().unwrap()[0].close, 101.5);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_duplicate_dates() {
        let path = write_csv("dup_dates", "date,close\n2024-01-02,101.0\n2024-01-02,102.0\n");
        let mut feed = PriceFeed::from_csv(&path);
        assert!(matches!(feed.load(), Err(SimError::Data(_))));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_non_positive_close() {
        let bars = vec![PriceBar::new(date(2), -5.0)];
        assert!(matches!(PriceFeed::from_bars(bars), Err(SimError::Data(_))));
    }

    #[test]
    fn rejects_unparseable_rows() {
        let path = write_csv("bad_row", "date,close\nnot-a-date,101.0\n");
        let mut feed = PriceFeed::from_csv(&path);
        assert!(matches!(feed.load(), Err(SimError::Data(_))));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn synthetic_walk_is_deterministic_per_seed() {
        let a = synthetic_walk(50, date(2), 100.0, 0.0005, 0.01, 42);
        let b = synthetic_walk(50, date(2), 100.0, 0.0005, 0.01, 42);
        let c = synthetic_walk(50, date(2), 100.0, 0.0005, 0.01, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 50);
        assert!(a.iter().all(|bar| bar.is_sane()));
    }
}
