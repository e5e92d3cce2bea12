use crate::{
    entry::{parse_amount, Entry, EntryError, EntryExecutor},
    Currency, Destination, Journal, TradingDay, TradingWeek,
};
use chrono::NaiveDate;
use csv::StringRecord;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    WeekStart,
    InitialCapital,
    Day,
    Amount,
    Destination,
}

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Column `{0:?}` missing")]
    MissingHeader(Header),
    #[error("Invalid value in day field on line {line}: `{value}`")]
    InvalidDayField { line: u64, value: String },
    #[error("Invalid value in destination field on line {line}: `{value}`")]
    InvalidDestinationField { line: u64, value: String },
    #[error("Invalid value in week_start field on line {line}: `{value}`")]
    InvalidDateField { line: u64, value: String },
    #[error("Invalid entry on line {line}: {source}")]
    InvalidEntry { line: u64, source: EntryError },
    #[error(transparent)]
    CSVError(#[from] csv::Error),
}

const MISSING_WEEK_START_HEADER: ParserError = ParserError::MissingHeader(Header::WeekStart);
const MISSING_CAPITAL_HEADER: ParserError = ParserError::MissingHeader(Header::InitialCapital);
const MISSING_DAY_HEADER: ParserError = ParserError::MissingHeader(Header::Day);
const MISSING_AMOUNT_HEADER: ParserError = ParserError::MissingHeader(Header::Amount);

#[derive(Clone, Copy)]
struct FieldToIndexMap {
    day: u8,
    amount: u8,
    destination: Option<u8>,
}

#[derive(Clone, Copy)]
struct JournalFieldMap {
    week_start: u8,
    initial_capital: u8,
    day: FieldToIndexMap,
}

fn csv_reader<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Reads a week sheet from any reader, see [`parse_sheet`].
pub fn read_sheet<R: std::io::Read>(reader: R, week: TradingWeek) -> Result<TradingWeek, ParserError> {
    parse_sheet(csv_reader(reader), week)
}

/// Reads a journal from any reader, see [`parse_journal`].
pub fn read_journal<R: std::io::Read>(reader: R) -> Result<Journal, ParserError> {
    parse_journal(csv_reader(reader))
}

fn header_index<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<HashMap<String, u8>, ParserError> {
    Ok(reader
        .headers()?
        .into_iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .zip(0u8..u8::MAX)
        .collect())
}

fn day_fields(header_to_index: &mut HashMap<String, u8>) -> Result<FieldToIndexMap, ParserError> {
    Ok(FieldToIndexMap {
        day: header_to_index.remove("day").ok_or(MISSING_DAY_HEADER)?,
        amount: header_to_index
            .remove("amount")
            .ok_or(MISSING_AMOUNT_HEADER)?,
        destination: header_to_index.remove("destination"),
    })
}

/// Reads one week from a `day,amount[,destination]` sheet. Days that are not
/// listed keep a zero amount, a missing destination keeps the default plan.
pub fn parse_sheet<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    mut week: TradingWeek,
) -> Result<TradingWeek, ParserError> {
    let mut header_to_index = header_index(&mut reader)?;
    let field_map = day_fields(&mut header_to_index)?;

    for record in reader.into_records() {
        let record = record?;
        for entry in parse_day(&record, field_map)? {
            week = apply(week, entry, &record)?;
        }
    }
    Ok(week)
}

/// Reads a journal written by [`crate::write_journal`].
pub fn parse_journal<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Journal, ParserError> {
    let mut header_to_index = header_index(&mut reader)?;
    let field_map = JournalFieldMap {
        week_start: header_to_index
            .remove("week_start")
            .ok_or(MISSING_WEEK_START_HEADER)?,
        initial_capital: header_to_index
            .remove("initial_capital")
            .ok_or(MISSING_CAPITAL_HEADER)?,
        day: day_fields(&mut header_to_index)?,
    };

    let mut weeks: HashMap<NaiveDate, TradingWeek> = HashMap::new();
    for record in reader.into_records() {
        let record = record?;
        let start = field(&record, field_map.week_start, MISSING_WEEK_START_HEADER)?;
        let start = start
            .trim()
            .parse::<NaiveDate>()
            .map_err(|_| ParserError::InvalidDateField {
                line: line(&record),
                value: start.to_string(),
            })?;
        let capital = parse_amount(field(
            &record,
            field_map.initial_capital,
            MISSING_CAPITAL_HEADER,
        )?)
        .map_err(|source| invalid_entry(&record, source))?;

        let week = weeks
            .remove(&crate::week_start_for(start))
            .unwrap_or_else(|| TradingWeek::new(start));
        let mut week = apply(week, Entry::new_capital(capital), &record)?;
        for entry in parse_day(&record, field_map.day)? {
            week = apply(week, entry, &record)?;
        }
        weeks.insert(week.start(), week);
    }

    debug!(weeks = weeks.len(), "parsed journal");
    Ok(weeks.into_values().fold(Journal::default(), |mut journal, week| {
        journal.upsert(week);
        journal
    }))
}

fn field(record: &StringRecord, index: u8, missing: ParserError) -> Result<&str, ParserError> {
    record.get(index.into()).ok_or(missing)
}

fn line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

fn invalid_entry(record: &StringRecord, source: EntryError) -> ParserError {
    ParserError::InvalidEntry {
        line: line(record),
        source,
    }
}

fn apply(week: TradingWeek, entry: Entry, record: &StringRecord) -> Result<TradingWeek, ParserError> {
    week.execute(entry)
        .map_err(|source| invalid_entry(record, source))
}

#[inline]
fn parse_day(record: &StringRecord, field_map: FieldToIndexMap) -> Result<Vec<Entry>, ParserError> {
    let day = field(record, field_map.day, MISSING_DAY_HEADER)?;
    let day = day
        .trim()
        .parse::<TradingDay>()
        .map_err(|_| ParserError::InvalidDayField {
            line: line(record),
            value: day.to_string(),
        })?;
    let amount: Currency = parse_amount(field(record, field_map.amount, MISSING_AMOUNT_HEADER)?)
        .map_err(|source| invalid_entry(record, source))?;

    let mut entries = vec![Entry::new_amount(day, amount)];
    if let Some(destination) = field_map
        .destination
        .and_then(|index| record.get(index.into()))
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        let destination = destination
            .parse::<Destination>()
            .map_err(|_| ParserError::InvalidDestinationField {
                line: line(record),
                value: destination.to_string(),
            })?;
        entries.push(Entry::new_destination(day, destination));
    }
    Ok(entries)
}
