//! TradeSim CLI — run backtests and sweep strategy parameters.
//!
//! Commands:
//! - `run` — execute one backtest from a CSV price file, with the
//!   strategy and frictions given by flags or a TOML config file
//! - `sweep` — backtest an MA-crossover parameter grid in parallel

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tradesim_core::{
    sweep_ma_grid, BuyAndHold, Engine, EngineConfig, MaCrossover, PriceFeed, RunResult,
    SignalStrategy,
};

#[derive(Parser)]
#[command(name = "tradesim", about = "TradeSim CLI — signal-driven backtest simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a single backtest over a CSV price series.
    Run {
        /// CSV file with `date` and `close` columns (extra columns ignored).
        #[arg(long)]
        csv: PathBuf,

        /// Optional TOML config file; flags override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Strategy: `ma:FAST,SLOW` or `buyhold`.
        #[arg(long, default_value = "ma:10,50")]
        strategy: String,

        /// Initial capital.
        #[arg(long)]
        capital: Option<f64>,

        /// Fixed absolute slippage per fill.
        #[arg(long)]
        slippage: Option<f64>,

        /// Proportional commission rate on notional.
        #[arg(long)]
        commission: Option<f64>,

        /// Shares traded per signal transition.
        #[arg(long)]
        shares: Option<u32>,

        /// Annual risk-free rate for the Sharpe ratio.
        #[arg(long)]
        rf: Option<f64>,

        /// Emit the full result as JSON instead of a summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Backtest an MA-crossover parameter grid in parallel.
    Sweep {
        /// CSV file with `date` and `close` columns.
        #[arg(long)]
        csv: PathBuf,

        /// Fast SMA periods, comma-separated (e.g. 5,10,20).
        #[arg(long, default_value = "5,10,20")]
        fast: String,

        /// Slow SMA periods, comma-separated (e.g. 50,100,200).
        #[arg(long, default_value = "50,100,200")]
        slow: String,

        /// Initial capital.
        #[arg(long)]
        capital: Option<f64>,

        /// Emit rows as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// TOML run configuration; every field optional, flags win.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    strategy: Option<String>,
    initial_capital: Option<f64>,
    slippage: Option<f64>,
    commission_rate: Option<f64>,
    trade_shares: Option<u32>,
    risk_free_rate: Option<f64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            csv,
            config,
            strategy,
            capital,
            slippage,
            commission,
            shares,
            rf,
            json,
        } => {
            let file = load_file_config(config.as_deref())?;
            let engine_config = EngineConfig {
                initial_capital: capital
                    .or(file.initial_capital)
                    .unwrap_or(100_000.0),
                slippage: slippage.or(file.slippage).unwrap_or(0.0),
                commission_rate: commission.or(file.commission_rate).unwrap_or(0.0),
                trade_shares: shares.or(file.trade_shares).unwrap_or(100),
                risk_free_rate: rf.or(file.risk_free_rate).unwrap_or(0.0),
            };
            let strategy_spec = if strategy == "ma:10,50" {
                file.strategy.unwrap_or(strategy)
            } else {
                strategy
            };
            run_command(&csv, &strategy_spec, engine_config, json)
        }
        Commands::Sweep {
            csv,
            fast,
            slow,
            capital,
            json,
        } => {
            let engine_config = EngineConfig {
                initial_capital: capital.unwrap_or(100_000.0),
                ..EngineConfig::default()
            };
            sweep_command(&csv, &fast, &slow, engine_config, json)
        }
    }
}

fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("cannot parse config {}", path.display()))
}

fn parse_strategy(spec: &str) -> Result<Box<dyn SignalStrategy>> {
    if spec == "buyhold" {
        return Ok(Box::new(BuyAndHold));
    }
    if let Some(params) = spec.strip_prefix("ma:") {
        let (fast, slow) = params
            .split_once(',')
            .context("MA strategy needs two periods, e.g. ma:10,50")?;
        let fast: usize = fast.trim().parse().context("invalid fast period")?;
        let slow: usize = slow.trim().parse().context("invalid slow period")?;
        if fast == 0 || slow <= fast {
            bail!("MA periods must satisfy 0 < fast < slow (got {fast},{slow})");
        }
        return Ok(Box::new(MaCrossover::new(fast, slow)));
    }
    bail!("unknown strategy '{spec}' (expected ma:FAST,SLOW or buyhold)")
}

fn parse_periods(spec: &str) -> Result<Vec<usize>> {
    spec.split(',')
        .map(|s| {
            s.trim()
                .parse::<usize>()
                .with_context(|| format!("invalid period '{s}'"))
        })
        .collect()
}

fn load_bars(csv: &Path) -> Result<Vec<tradesim_core::PriceBar>> {
    let mut feed = PriceFeed::from_csv(csv);
    feed.load()?;
    Ok(feed.bars()?.to_vec())
}

fn run_command(csv: &Path, strategy_spec: &str, config: EngineConfig, json: bool) -> Result<()> {
    let bars = load_bars(csv)?;
    let strategy = parse_strategy(strategy_spec)?;
    let signals = strategy.generate(&bars);

    let initial_capital = config.initial_capital;
    let engine = Engine::new(config)?;
    let result = engine.run(&bars, &signals)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(strategy.name(), &bars, initial_capital, &result);
    }
    Ok(())
}

fn print_summary(
    strategy_name: &str,
    bars: &[tradesim_core::PriceBar],
    initial_capital: f64,
    result: &RunResult,
) {
    println!("Strategy:          {strategy_name}");
    println!("Bars processed:    {}", bars.len());
    if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
        println!("Period:            {} to {}", first.date, last.date);
    }
    println!("Trades executed:   {}", result.trades.len());
    println!("Initial capital:   {initial_capital:.2}");
    println!("Final value:       {:.2}", result.final_value(initial_capital));
    println!(
        "Annualized return: {:.4}",
        result.report.annualized_return
    );
    println!("Max drawdown:      {:.4}", result.report.max_drawdown);
    println!("Sharpe ratio:      {:.4}", result.report.sharpe_ratio);
}

fn sweep_command(
    csv: &Path,
    fast: &str,
    slow: &str,
    config: EngineConfig,
    json: bool,
) -> Result<()> {
    let bars = load_bars(csv)?;
    let fast_periods = parse_periods(fast)?;
    let slow_periods = parse_periods(slow)?;

    let rows = sweep_ma_grid(&bars, &fast_periods, &slow_periods, &config)?;
    if rows.is_empty() {
        bail!("no valid (fast, slow) pairs in the grid");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!(
            "{:>5} {:>5} {:>7} {:>14} {:>10} {:>10} {:>10}",
            "fast", "slow", "trades", "final", "ann.ret", "max.dd", "sharpe"
        );
        for row in &rows {
            println!(
                "{:>5} {:>5} {:>7} {:>14.2} {:>10.4} {:>10.4} {:>10.4}",
                row.fast,
                row.slow,
                row.trade_count,
                row.final_value,
                row.report.annualized_return,
                row.report.max_drawdown,
                row.report.sharpe_ratio
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ma_strategy() {
        let strategy = parse_strategy("ma:5,20").unwrap();
        assert_eq!(strategy.name(), "ma_crossover");
    }

    #[test]
    fn parses_buyhold() {
        let strategy = parse_strategy("buyhold").unwrap();
        assert_eq!(strategy.name(), "buy_and_hold");
    }

    #[test]
    fn rejects_unordered_ma_periods() {
        assert!(parse_strategy("ma:50,10").is_err());
        assert!(parse_strategy("ma:0,10").is_err());
    }

    #[test]
    fn rejects_unknown_strategy() {
        assert!(parse_strategy("magic").is_err());
    }

    #[test]
    fn parses_period_lists() {
        assert_eq!(parse_periods("5, 10,20").unwrap(), vec![5, 10, 20]);
        assert!(parse_periods("5,x").is_err());
    }
}
