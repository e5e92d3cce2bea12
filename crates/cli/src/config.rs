use chrono::{Local, NaiveDate, Weekday};
use clap::{Parser, Subcommand};
use eyre::Result;
use std::path::PathBuf;
use weekly_trade_lib::{Currency, Destination, TradingDay, DEFAULT_WITHDRAWAL_PERCENT};

#[derive(Parser)]
#[command(author, version, about = "Track a five day trading week")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    /// Journal file holding every recorded week
    #[arg(
        long,
        global = true,
        env = "WEEKLY_TRADE_JOURNAL",
        default_value = "trading_journal.csv"
    )]
    pub journal: PathBuf,
    /// Share of a winning week that is suggested for withdrawal
    #[arg(
        long,
        global = true,
        env = "WEEKLY_TRADE_WITHDRAW_PERCENT",
        default_value_t = DEFAULT_WITHDRAWAL_PERCENT,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub withdraw_percent: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the CSV report of a week sheet
    Report {
        sheet: PathBuf,
        #[arg(long)]
        capital: Option<String>,
    },
    /// Summary and analysis of a stored week
    Summary {
        #[arg(long)]
        week: Option<NaiveDate>,
        /// Seed for the sampled commentary
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Advice of the day for a stored week
    Advice {
        #[arg(long)]
        week: Option<NaiveDate>,
        /// mon, tue, ... defaults to today
        #[arg(long)]
        weekday: Option<Weekday>,
    },
    /// End of week recap with the withdrawal split
    Message {
        #[arg(long)]
        week: Option<NaiveDate>,
    },
    /// List stored weeks, newest first
    List,
    /// Store a week sheet in the journal
    Import {
        sheet: PathBuf,
        #[arg(long)]
        week: Option<NaiveDate>,
        #[arg(long)]
        capital: Option<String>,
    },
    /// Set the result of one day
    Set {
        day: TradingDay,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(long)]
        week: Option<NaiveDate>,
    },
    /// Route one day to withdrawal or reinvestment
    Destination {
        day: TradingDay,
        destination: Destination,
        #[arg(long)]
        week: Option<NaiveDate>,
    },
    /// Set the initial capital of a week
    Capital {
        amount: String,
        #[arg(long)]
        week: Option<NaiveDate>,
    },
}

/// Resolved configuration after CLI parsing.
#[derive(Debug, Clone)]
pub struct Config {
    pub journal: PathBuf,
    pub withdraw_percent: u8,
    pub today: NaiveDate,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Config {
            journal: cli.journal.clone(),
            withdraw_percent: cli.withdraw_percent,
            today: Local::now().date_naive(),
        }
    }

    /// Week addressed by an edit, the current one unless given.
    pub fn target_week(&self, week: Option<NaiveDate>) -> NaiveDate {
        week.unwrap_or(self.today)
    }
}

/// Capital given on the command line, or `fallback` when omitted. Positivity
/// is checked when the capital is applied to a week.
pub fn parse_capital(capital: Option<&str>, fallback: Currency) -> Result<Currency> {
    Ok(capital
        .map(weekly_trade_lib::parse_amount)
        .transpose()?
        .unwrap_or(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weekly_trade_lib::{EntryError, TradingWeek, DEFAULT_INITIAL_CAPITAL};

    #[test]
    fn parses_edit_command() {
        let cli = Cli::try_parse_from([
            "weekly-trade",
            "--journal",
            "/tmp/j.csv",
            "set",
            "wednesday",
            "-12,5",
            "--week",
            "2024-05-15",
        ])
        .unwrap();
        assert_eq!(cli.journal, PathBuf::from("/tmp/j.csv"));
        match cli.command {
            Command::Set { day, amount, week } => {
                assert_eq!(day, TradingDay::Wednesday);
                assert_eq!(amount, "-12,5");
                assert_eq!(week, NaiveDate::from_ymd_opt(2024, 5, 15));
            }
            _ => panic!("expected set"),
        }
    }

    #[test]
    fn rejects_share_above_hundred() {
        assert!(Cli::try_parse_from(["weekly-trade", "--withdraw-percent", "150", "list"]).is_err());
    }

    #[test]
    fn capital_defaults_and_validates() {
        assert_eq!(
            parse_capital(None, DEFAULT_INITIAL_CAPITAL).unwrap(),
            DEFAULT_INITIAL_CAPITAL
        );
        assert_eq!(
            parse_capital(Some("250,5"), DEFAULT_INITIAL_CAPITAL).unwrap(),
            Currency::from_num(250.5)
        );
        assert!(parse_capital(Some("abc"), DEFAULT_INITIAL_CAPITAL).is_err());

        let zero = parse_capital(Some("0"), DEFAULT_INITIAL_CAPITAL).unwrap();
        let week = TradingWeek::new(NaiveDate::from_ymd_opt(2024, 5, 13).unwrap());
        assert!(matches!(
            week.set_capital(zero),
            Err(EntryError::NonPositiveCapital(_))
        ));
    }
}
