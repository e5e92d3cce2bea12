use crate::{
    entry::{check_range, Entry, EntryError, EntryExecutor},
    summary::{summarize, CapitalState, WeekSummary},
    Currency, DayRecord, Destination, TradingDay, DEFAULT_INITIAL_CAPITAL, TRADING_DAYS,
};
use chrono::{Datelike, Days, NaiveDate};

/// Monday of the week that contains `date`.
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    date.checked_sub_days(Days::new(offset.into()))
        .unwrap_or(date)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingWeek {
    start: NaiveDate,
    initial_capital: Currency,
    days: [DayRecord; TRADING_DAYS],
}

impl TradingWeek {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            start: week_start_for(date),
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            days: TradingDay::ALL.map(DayRecord::planned),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn initial_capital(&self) -> Currency {
        self.initial_capital
    }

    pub fn day(&self, day: TradingDay) -> &DayRecord {
        &self.days[day.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (TradingDay, &DayRecord)> {
        TradingDay::ALL.into_iter().zip(self.days.iter())
    }

    pub fn summary(&self) -> WeekSummary {
        summarize(self)
    }

    pub fn capital(&self) -> CapitalState {
        CapitalState::from_validated(self.initial_capital, self.summary().total)
    }

    /// Sum of the days routed to `destination`.
    pub fn total_for(&self, destination: Destination) -> Currency {
        self.days
            .iter()
            .filter(|record| record.destination == destination)
            .map(|record| record.amount)
            .sum()
    }

    pub fn set_amount(mut self, day: TradingDay, amount: Currency) -> Result<Self, EntryError> {
        self.days[day.index()].amount = check_range(amount)?;
        Ok(self)
    }

    pub fn set_destination(mut self, day: TradingDay, destination: Destination) -> Self {
        self.days[day.index()].destination = destination;
        self
    }

    pub fn set_capital(mut self, amount: Currency) -> Result<Self, EntryError> {
        if amount <= Currency::ZERO {
            return Err(EntryError::NonPositiveCapital(amount));
        }
        self.initial_capital = check_range(amount)?;
        Ok(self)
    }
}

impl EntryExecutor<Entry> for TradingWeek {
    type EntryError = EntryError;

    fn execute(self, entry: Entry) -> Result<Self, Self::EntryError> {
        match entry {
            Entry::SetAmount(e) => self.set_amount(e.day, e.amount),
            Entry::SetDestination(e) => Ok(self.set_destination(e.day, e.destination)),
            Entry::SetCapital(e) => self.set_capital(e.amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixed_macro::types::I48F16 as cur;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn start_is_normalized_to_monday() {
        // 2024-05-16 is a Thursday
        assert_eq!(week_start_for(date(2024, 5, 16)), date(2024, 5, 13));
        assert_eq!(week_start_for(date(2024, 5, 13)), date(2024, 5, 13));
        assert_eq!(week_start_for(date(2024, 5, 19)), date(2024, 5, 13));
        assert_eq!(TradingWeek::new(date(2024, 5, 17)).start(), date(2024, 5, 13));
    }

    #[test]
    fn new_week_follows_the_default_plan() {
        let week = TradingWeek::new(date(2024, 5, 13));
        assert_eq!(week.initial_capital(), DEFAULT_INITIAL_CAPITAL);
        for (day, record) in week.iter() {
            assert_eq!(record.amount, cur!(0));
            assert_eq!(record.destination, day.planned_destination());
        }
    }

    #[test]
    fn can_set_amount() {
        let week = TradingWeek::new(date(2024, 5, 13))
            .execute(Entry::new_amount(TradingDay::Tuesday, cur!(42.5)))
            .unwrap();
        assert_eq!(week.day(TradingDay::Tuesday).amount, cur!(42.5));
        assert_eq!(week.day(TradingDay::Monday).amount, cur!(0));
    }

    #[test]
    fn can_redirect_a_day() {
        let week = TradingWeek::new(date(2024, 5, 13))
            .execute(Entry::new_amount(TradingDay::Friday, cur!(10)))
            .unwrap()
            .execute(Entry::new_destination(
                TradingDay::Friday,
                Destination::Reinvestment,
            ))
            .unwrap();
        assert_eq!(week.total_for(Destination::Reinvestment), cur!(10));
        assert_eq!(week.total_for(Destination::Withdrawal), cur!(0));
    }

    #[test]
    fn rejects_non_positive_capital() {
        let week = TradingWeek::new(date(2024, 5, 13));
        assert_eq!(
            week.clone().execute(Entry::new_capital(cur!(0))),
            Err(EntryError::NonPositiveCapital(cur!(0)))
        );
        assert_eq!(
            week.clone().execute(Entry::new_capital(cur!(-5))),
            Err(EntryError::NonPositiveCapital(cur!(-5)))
        );
        assert_eq!(
            week.execute(Entry::new_capital(cur!(250)))
                .unwrap()
                .initial_capital(),
            cur!(250)
        );
    }

    #[test]
    fn rejects_out_of_range_amount() {
        let week = TradingWeek::new(date(2024, 5, 13));
        assert!(matches!(
            week.execute(Entry::new_amount(
                TradingDay::Monday,
                cur!(2000000000)
            )),
            Err(EntryError::OutOfRange(_))
        ));
    }
}
