mod config;

use chrono::{Datelike, NaiveDate};
use clap::Parser;
use config::{parse_capital, Cli, Command, Config};
use eyre::{eyre, Result, WrapErr};
use rand::{rngs::StdRng, SeedableRng};
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use weekly_trade_lib::{
    daily_advice, execute, parse_amount, read_journal, read_sheet, weekly_summary_message,
    write_journal, Analyzer, Entry, EntryExecutor, Journal, JournalEntry, TradingWeek,
    DEFAULT_INITIAL_CAPITAL,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli);
    debug!(?config, "resolved configuration");

    match cli.command {
        Command::Report { sheet, capital } => {
            let capital = parse_capital(capital.as_deref(), DEFAULT_INITIAL_CAPITAL)?;
            let week = TradingWeek::new(config.today).set_capital(capital)?;
            let reader = BufReader::new(
                File::open(&sheet).wrap_err_with(|| format!("Failed to open {sheet:?}"))?,
            );
            execute(reader, io::stdout().lock(), week, config.withdraw_percent)?;
        }
        Command::Summary { week, seed } => {
            let journal = load_journal(&config.journal)?;
            let week = find_week(&journal, week)?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            print_summary(week, &mut rng)?;
        }
        Command::Advice { week, weekday } => {
            let journal = load_journal(&config.journal)?;
            let week = find_week(&journal, week)?;
            let capital = week.capital();
            let advice = daily_advice(
                weekday.unwrap_or_else(|| config.today.weekday()),
                capital.total(),
                capital.profit_loss_percentage,
                &capital,
            );
            println!("{}\n\n{}", advice.title, advice.message);
        }
        Command::Message { week } => {
            let journal = load_journal(&config.journal)?;
            let week = find_week(&journal, week)?;
            println!(
                "{}",
                weekly_summary_message(&week.capital(), config.withdraw_percent)?
            );
        }
        Command::List => {
            let journal = load_journal(&config.journal)?;
            let mut out = io::stdout().lock();
            for start in journal.weeks() {
                if let Some(week) = journal.get(start) {
                    let total = format!("{:.2}", week.summary().total);
                    writeln!(out, "{start}  {total:>12}")?;
                }
            }
        }
        Command::Import {
            sheet,
            week,
            capital,
        } => {
            let mut journal = load_journal(&config.journal)?;
            let start = config.target_week(week);
            let template = import_template(&journal, start, capital.as_deref())?;
            let reader = BufReader::new(
                File::open(&sheet).wrap_err_with(|| format!("Failed to open {sheet:?}"))?,
            );
            let week = read_sheet(reader, template)
                .wrap_err_with(|| format!("Failed to read sheet {sheet:?}"))?;
            if journal.upsert(week).is_some() {
                info!(%start, "replaced stored week");
            }
            save_journal(&journal, &config.journal)?;
        }
        Command::Set { day, amount, week } => {
            let entry = Entry::new_amount(day, parse_amount(&amount)?);
            apply(&config, week, entry)?;
        }
        Command::Destination {
            day,
            destination,
            week,
        } => apply(&config, week, Entry::new_destination(day, destination))?,
        Command::Capital { amount, week } => {
            apply(&config, week, Entry::new_capital(parse_amount(&amount)?))?
        }
    }

    Ok(())
}

fn load_journal(path: &Path) -> Result<Journal> {
    if !path.exists() {
        debug!(?path, "no journal yet");
        return Ok(Journal::default());
    }
    let reader =
        BufReader::new(File::open(path).wrap_err_with(|| format!("Failed to open {path:?}"))?);
    read_journal(reader).wrap_err_with(|| format!("Failed to read journal {path:?}"))
}

fn save_journal(journal: &Journal, path: &Path) -> Result<()> {
    let writer =
        BufWriter::new(File::create(path).wrap_err_with(|| format!("Failed to create {path:?}"))?);
    write_journal(journal, writer)?;
    info!(?path, weeks = journal.len(), "saved journal");
    Ok(())
}

/// Empty week to read a sheet into. An already stored week keeps its
/// capital unless a new one is given.
fn import_template(
    journal: &Journal,
    start: NaiveDate,
    capital: Option<&str>,
) -> Result<TradingWeek> {
    let stored = journal
        .get(start)
        .map_or(DEFAULT_INITIAL_CAPITAL, TradingWeek::initial_capital);
    Ok(TradingWeek::new(start).set_capital(parse_capital(capital, stored)?)?)
}

fn find_week(journal: &Journal, week: Option<NaiveDate>) -> Result<&TradingWeek> {
    match week {
        Some(date) => journal
            .get(date)
            .ok_or_else(|| eyre!("No week recorded for {}", date)),
        None => journal
            .latest()
            .ok_or_else(|| eyre!("The journal is empty")),
    }
}

/// Applies one edit and writes the journal back. A rejected edit never
/// touches the file.
fn apply(config: &Config, week: Option<NaiveDate>, entry: Entry) -> Result<()> {
    let mut journal = load_journal(&config.journal)?;
    journal.execute(JournalEntry {
        week: config.target_week(week),
        entry,
    })?;
    save_journal(&journal, &config.journal)
}

fn print_summary(week: &TradingWeek, rng: &mut StdRng) -> Result<()> {
    let summary = week.summary();
    let capital = week.capital();
    let analysis = Analyzer::default().analyze(&summary, week, rng);
    let mut out = io::stdout().lock();

    writeln!(out, "Week of {}", week.start())?;
    for (day, record) in week.iter() {
        let amount = format!("{:.2}", record.amount);
        writeln!(
            out,
            "  {:<10} {amount:>12}  {}",
            day.to_string(),
            record.destination
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Initial capital:  ${:.2}", capital.initial_capital)?;
    writeln!(out, "Current balance:  ${:.2}", capital.current_balance)?;
    writeln!(
        out,
        "Profit/Loss:      ${:.2} ({:.2}%)",
        summary.total, capital.profit_loss_percentage
    )?;
    writeln!(out, "Withdrawal:       ${:.2}", summary.total_withdrawal)?;
    writeln!(out, "Reinvestment:     ${:.2}", summary.total_reinvestment)?;
    writeln!(out, "Daily average:    ${:.2}", summary.daily_average)?;
    writeln!(out, "Performance:      {:.2}%", summary.performance_percentage)?;
    writeln!(
        out,
        "Days:             +{} / -{}",
        summary.positive_days, summary.negative_days
    )?;
    writeln!(out)?;
    writeln!(out, "{}", analysis.headline)?;
    writeln!(out, "\nINSIGHTS:")?;
    for insight in &analysis.insights {
        writeln!(out, "• {insight}")?;
    }
    writeln!(out, "\nRECOMMENDATIONS:")?;
    for recommendation in &analysis.recommendations {
        writeln!(out, "• {recommendation}")?;
    }
    writeln!(out, "\nRISK ASSESSMENT:\n{}", analysis.risk.advisory())?;
    writeln!(out, "\nRATING: {}", analysis.rating)?;

    Ok(())
}
