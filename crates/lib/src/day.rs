use crate::Currency;
use strum_macros::{Display, EnumIter, EnumString, EnumVariantNames};

pub const TRADING_DAYS: usize = 5;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
    EnumVariantNames,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TradingDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl TradingDay {
    pub const ALL: [TradingDay; TRADING_DAYS] = [
        TradingDay::Monday,
        TradingDay::Tuesday,
        TradingDay::Wednesday,
        TradingDay::Thursday,
        TradingDay::Friday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Weekends have no trading day.
    pub fn from_weekday(weekday: chrono::Weekday) -> Option<Self> {
        Self::ALL
            .get(weekday.num_days_from_monday() as usize)
            .copied()
    }

    /// Midweek results are rolled back into the account, the rest is taken out.
    pub fn planned_destination(self) -> Destination {
        match self {
            TradingDay::Wednesday => Destination::Reinvestment,
            _ => Destination::Withdrawal,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, EnumVariantNames,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Destination {
    Withdrawal,
    Reinvestment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRecord {
    pub amount: Currency,
    pub destination: Destination,
}

impl DayRecord {
    pub fn new(amount: Currency, destination: Destination) -> Self {
        Self {
            amount,
            destination,
        }
    }

    pub fn planned(day: TradingDay) -> Self {
        Self::new(Currency::ZERO, day.planned_destination())
    }
}
