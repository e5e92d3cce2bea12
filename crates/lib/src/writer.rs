use crate::{
    analyzer::{assess_risk, rate},
    CapitalState, Journal, WeekSummary, WithdrawalPlan,
};
use csv::WriterBuilder;
use std::io::{Cursor, Write};

fn write_metric<W: Write>(
    writer: &mut csv::Writer<W>,
    metric: &str,
    value: std::fmt::Arguments<'_>,
) -> Result<(), std::io::Error> {
    let mut value_buf = [0u8; 32];
    let mut cursor = Cursor::new(&mut value_buf[..]);
    cursor.write_fmt(value)?;
    let len = cursor.position() as usize;
    writer.write_record([metric.as_bytes(), &value_buf[..len]])?;
    Ok(())
}

/// Writes `metric,value` rows for a summarised week.
pub fn write_report<W: Write>(
    summary: &WeekSummary,
    capital: &CapitalState,
    plan: &WithdrawalPlan,
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(["metric", "value"])?;

    let w = &mut writer;
    write_metric(w, "total", format_args!("{:.2}", summary.total))?;
    write_metric(w, "total_withdrawal", format_args!("{:.2}", summary.total_withdrawal))?;
    write_metric(w, "total_reinvestment", format_args!("{:.2}", summary.total_reinvestment))?;
    write_metric(w, "daily_average", format_args!("{:.2}", summary.daily_average))?;
    write_metric(
        w,
        "performance_percentage",
        format_args!("{:.2}", summary.performance_percentage),
    )?;

    let mut count_buf = itoa::Buffer::new();
    w.write_record(["positive_days", count_buf.format(summary.positive_days)])?;
    w.write_record(["negative_days", count_buf.format(summary.negative_days)])?;

    let (_, rating) = rate(summary.total, summary.performance_percentage);
    write_metric(w, "rating", format_args!("{rating}"))?;
    let risk = assess_risk(summary.performance_percentage);
    write_metric(w, "risk", format_args!("{risk}"))?;

    write_metric(w, "initial_capital", format_args!("{:.2}", capital.initial_capital))?;
    write_metric(w, "current_balance", format_args!("{:.2}", capital.current_balance))?;
    write_metric(
        w,
        "profit_loss_percentage",
        format_args!("{:.2}", capital.profit_loss_percentage),
    )?;
    write_metric(w, "suggested_withdrawal", format_args!("{:.2}", plan.withdraw))?;
    write_metric(w, "suggested_reinvestment", format_args!("{:.2}", plan.reinvest))?;

    writer.flush()
}

/// Writes every week of the journal, one row per trading day.
pub fn write_journal<W: Write>(journal: &Journal, writer: W) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record([
        "week_start",
        "initial_capital",
        "day",
        "amount",
        "destination",
    ])?;

    for week in journal.iter() {
        let start = week.start().format("%Y-%m-%d").to_string();
        // shortest exact form, so a reload yields the same value
        let capital = week.initial_capital().to_string();
        for (day, record) in week.iter() {
            writer.write_record([
                start.as_str(),
                capital.as_str(),
                day.to_string().as_str(),
                record.amount.to_string().as_str(),
                record.destination.to_string().as_str(),
            ])?;
        }
    }

    writer.flush()
}
