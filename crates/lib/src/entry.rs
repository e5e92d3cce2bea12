use crate::{Currency, Destination, TradingDay, MAX_ABS_AMOUNT};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("`{0}` is not a valid amount")]
    InvalidAmount(String),
    #[error("Amount {0} is outside the accepted range")]
    OutOfRange(Currency),
    #[error("Initial capital must be greater than zero, got {0}")]
    NonPositiveCapital(Currency),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    SetAmount(SetAmount),
    SetDestination(SetDestination),
    SetCapital(SetCapital),
}

impl Entry {
    pub fn new_amount(day: TradingDay, amount: Currency) -> Self {
        Self::SetAmount(SetAmount { day, amount })
    }
    pub fn new_destination(day: TradingDay, destination: Destination) -> Self {
        Self::SetDestination(SetDestination { day, destination })
    }
    pub fn new_capital(amount: Currency) -> Self {
        Self::SetCapital(SetCapital { amount })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetAmount {
    pub day: TradingDay,
    pub amount: Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetDestination {
    pub day: TradingDay,
    pub destination: Destination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCapital {
    pub amount: Currency,
}

/// An entry addressed to the week starting on `week`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalEntry {
    pub week: NaiveDate,
    pub entry: Entry,
}

/// Applies an edit by value. On error the caller still owns the previous
/// state, so a rejected edit never leaves a half-applied value behind.
pub trait EntryExecutor<E>: Sized {
    type EntryError;

    fn execute(self, entry: E) -> Result<Self, Self::EntryError>;
}

/// Parses user typed amounts. Both `12.5` and `12,5` are accepted.
pub fn parse_amount(text: &str) -> Result<Currency, EntryError> {
    let normalized = text.trim().replace(',', ".");
    let amount = normalized
        .parse::<Currency>()
        .map_err(|_| EntryError::InvalidAmount(text.to_string()))?;
    check_range(amount)
}

pub(crate) fn check_range(amount: Currency) -> Result<Currency, EntryError> {
    if amount > MAX_ABS_AMOUNT || amount < -MAX_ABS_AMOUNT {
        return Err(EntryError::OutOfRange(amount));
    }
    Ok(amount)
}
