use crate::{
    entry::{EntryError, EntryExecutor, JournalEntry},
    week::week_start_for,
    TradingWeek,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Every recorded week, keyed by the Monday it starts on.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Journal {
    weeks: BTreeMap<NaiveDate, TradingWeek>,
}

impl Journal {
    /// Inserts `week`, replacing any week with the same start date.
    pub fn upsert(&mut self, week: TradingWeek) -> Option<TradingWeek> {
        self.weeks.insert(week.start(), week)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&TradingWeek> {
        self.weeks.get(&week_start_for(date))
    }

    pub fn latest(&self) -> Option<&TradingWeek> {
        self.weeks.values().next_back()
    }

    /// Start dates, newest first.
    pub fn weeks(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks.keys().rev().copied()
    }

    /// Weeks in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &TradingWeek> {
        self.weeks.values()
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

impl EntryExecutor<JournalEntry> for &mut Journal {
    type EntryError = EntryError;

    fn execute(self, entry: JournalEntry) -> Result<Self, Self::EntryError> {
        let start = week_start_for(entry.week);
        let week = self
            .weeks
            .get(&start)
            .cloned()
            .unwrap_or_else(|| TradingWeek::new(start));
        let week = week.execute(entry.entry).map_err(|e| {
            debug!(%start, error = %e, "rejected entry");
            e
        })?;
        self.weeks.insert(start, week);

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Destination, Entry, TradingDay};
    use fixed_macro::types::I48F16 as cur;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_entry_creates_the_week() {
        let mut journal = Journal::default();
        journal
            .execute(JournalEntry {
                week: date(2024, 5, 15),
                entry: Entry::new_amount(TradingDay::Monday, cur!(12)),
            })
            .unwrap();

        assert_eq!(journal.len(), 1);
        let week = journal.get(date(2024, 5, 13)).unwrap();
        assert_eq!(week.day(TradingDay::Monday).amount, cur!(12));
        // any day of the same week finds it
        assert_eq!(journal.get(date(2024, 5, 17)), Some(week));
    }

    #[test]
    fn can_chain_entries() {
        let mut journal = Journal::default();
        let week = date(2024, 5, 13);
        journal
            .execute(JournalEntry {
                week,
                entry: Entry::new_amount(TradingDay::Monday, cur!(10)),
            })
            .unwrap()
            .execute(JournalEntry {
                week,
                entry: Entry::new_destination(TradingDay::Monday, Destination::Reinvestment),
            })
            .unwrap()
            .execute(JournalEntry {
                week,
                entry: Entry::new_capital(cur!(500)),
            })
            .unwrap();

        let stored = journal.latest().unwrap();
        assert_eq!(stored.initial_capital(), cur!(500));
        assert_eq!(stored.summary().total_reinvestment, cur!(10));
    }

    #[test]
    fn rejected_entry_leaves_journal_untouched() {
        let mut journal = Journal::default();
        let week = date(2024, 5, 13);
        journal
            .execute(JournalEntry {
                week,
                entry: Entry::new_amount(TradingDay::Tuesday, cur!(7)),
            })
            .unwrap();
        let before = journal.clone();

        assert_eq!(
            journal.execute(JournalEntry {
                week,
                entry: Entry::new_capital(cur!(-1)),
            }),
            Err(EntryError::NonPositiveCapital(cur!(-1)))
        );
        assert_eq!(journal, before);
    }

    #[test]
    fn rejected_entry_does_not_create_week() {
        let mut journal = Journal::default();
        assert!(journal
            .execute(JournalEntry {
                week: date(2024, 5, 13),
                entry: Entry::new_capital(cur!(0)),
            })
            .is_err());
        assert!(journal.is_empty());
    }

    #[test]
    fn lists_newest_first() {
        let mut journal = Journal::default();
        journal.upsert(TradingWeek::new(date(2024, 5, 20)));
        journal.upsert(TradingWeek::new(date(2024, 5, 6)));
        journal.upsert(TradingWeek::new(date(2024, 5, 13)));

        assert_eq!(
            journal.weeks().collect::<Vec<_>>(),
            vec![date(2024, 5, 20), date(2024, 5, 13), date(2024, 5, 6)]
        );
        assert_eq!(journal.latest().unwrap().start(), date(2024, 5, 20));
    }

    #[test]
    fn upsert_replaces_same_week() {
        let mut journal = Journal::default();
        assert!(journal.upsert(TradingWeek::new(date(2024, 5, 13))).is_none());
        let replaced = TradingWeek::new(date(2024, 5, 14))
            .set_capital(cur!(42))
            .unwrap();
        assert!(journal.upsert(replaced).is_some());
        assert_eq!(journal.len(), 1);
        assert_eq!(journal.latest().unwrap().initial_capital(), cur!(42));
    }
}
