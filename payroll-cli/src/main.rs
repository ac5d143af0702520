use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use payroll_core::{JurisdictionConfig, MonthlyPayrollInput, MonthlyPayrollResult, WithholdingEngine};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Shanghai take-home pay calculator.
///
/// Computes a month-by-month withholding schedule for a fixed gross salary
/// under the cumulative withholding method, chaining each month's
/// cumulative tax payable into the next month's previously-withheld
/// anchor, and prints the breakdown.
#[derive(Debug, Parser)]
struct Cli {
    /// Monthly gross salary in CNY.
    #[arg(long, default_value = "30000")]
    gross: Decimal,

    /// Number of months to compute, starting at month 1.
    #[arg(long, default_value_t = 12)]
    months: u32,

    /// Employee housing-fund rate (e.g. 0.05 to 0.07). Uses the
    /// configured default when omitted.
    #[arg(long)]
    hf_rate: Option<Decimal>,

    /// Monthly total of special additional deductions in CNY.
    #[arg(long, default_value = "0")]
    special_deductions: Decimal,

    /// Reported social-insurance base, when it differs from gross salary.
    #[arg(long)]
    si_base: Option<Decimal>,

    /// Reported housing-fund base, when it differs from gross salary.
    #[arg(long)]
    hf_base: Option<Decimal>,

    /// Cumulative tax already withheld before the first computed month.
    #[arg(long, default_value = "0")]
    prev_withheld_tax: Decimal,

    /// Emit the full result records as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = JurisdictionConfig::shanghai_2024();
    config
        .validate()
        .context("built-in jurisdiction configuration is inconsistent")?;
    debug!(
        valid_from = %config.valid_from,
        valid_until = %config.valid_until,
        "using Shanghai contribution bases"
    );

    let engine = WithholdingEngine::new(&config);

    let mut prev_withheld = cli.prev_withheld_tax;
    let mut results = Vec::with_capacity(cli.months as usize);
    for month in 1..=cli.months {
        let mut input = MonthlyPayrollInput::new(cli.gross, month);
        input.special_deductions_monthly = cli.special_deductions;
        input.si_base = cli.si_base;
        input.hf_rate = cli.hf_rate;
        input.hf_base = cli.hf_base;
        input.prev_withheld_tax = prev_withheld;

        let result = engine.calculate(&input)?;
        prev_withheld = result.cumulative_tax_payable;
        results.push(result);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_schedule(&results);
    }

    Ok(())
}

fn print_schedule(results: &[MonthlyPayrollResult]) {
    println!(
        "{:>5}  {:>12}  {:>12}  {:>12}  {:>12}  {:>12}",
        "month", "gross", "social ins", "housing", "tax", "take-home"
    );
    for r in results {
        println!(
            "{:>5}  {:>12}  {:>12}  {:>12}  {:>12}  {:>12}",
            r.month_index,
            r.gross_salary,
            r.social_insurance.total,
            r.housing_fund.amount,
            r.tax_this_month,
            r.take_home
        );
    }
}
