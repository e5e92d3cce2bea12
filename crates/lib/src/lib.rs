mod advice;
mod analyzer;
mod day;
mod entry;
mod error;
mod journal;
mod parser;
mod summary;
mod week;
mod writer;

use fixed_macro::types::I48F16 as cur;

type FRAC = fixed::types::extra::U16;

/// Signed fixed point currency type.
// 16 fractional bits give `Δ = 0.00002` which is plenty for cents, and sums of
// fixed point values are exact so the withdrawal and reinvestment buckets
// always add up to the weekly total. The remaining 48 bits cover
// ±140_737_488_355_327 which leaves a lot of room above MAX_ABS_AMOUNT.
pub type Currency = fixed::FixedI64<FRAC>;

/// Largest amount (and capital) accepted from the user, in either direction.
pub const MAX_ABS_AMOUNT: Currency = cur!(1000000000);
pub const DEFAULT_INITIAL_CAPITAL: Currency = cur!(100);

pub use advice::{daily_advice, weekly_summary_message, DailyAdvice};
pub use analyzer::{assess_risk, rate, Analysis, Analyzer, Rating, RiskLevel};
pub use day::*;
pub use entry::*;
pub use error::Error;
pub use journal::Journal;
pub use parser::{parse_journal, parse_sheet, read_journal, read_sheet, Header, ParserError};
pub use summary::*;
pub use week::{week_start_for, TradingWeek};
pub use writer::{write_journal, write_report};

/// Reads a week sheet on top of `week` and writes its report.
pub fn execute<R: std::io::Read, W: std::io::Write>(
    reader: R,
    writer: W,
    week: TradingWeek,
    withdraw_percent: u8,
) -> Result<(), error::Error> {
    let week = read_sheet(reader, week)?;
    let summary = week.summary();
    let capital = CapitalState::new(week.initial_capital(), summary.total)?;
    let plan = WithdrawalPlan::split(summary.total, withdraw_percent)?;

    Ok(write_report(&summary, &capital, &plan, writer)?)
}
