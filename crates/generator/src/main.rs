use chrono::{Days, Local};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use strum::VariantNames;
use weekly_trade_lib::{
    week_start_for, write_journal, Currency, Destination, Entry, EntryExecutor, Journal,
    JournalEntry, TradingDay,
};

fn main() {
    // withdrawal, reinvestment
    const WEIGHTS: [usize; Destination::VARIANTS.len()] = [4, 1];
    let dist = WeightedIndex::new(WEIGHTS).unwrap();
    let weeks: u64 = std::env::args()
        .nth(1)
        .map(|n| n.parse().expect("week count must be a number"))
        .unwrap_or(52);
    let mut rng = thread_rng();

    let last = week_start_for(Local::now().date_naive());
    let first = last.checked_sub_days(Days::new(7 * weeks)).unwrap();

    let mut journal = Journal::default();
    for i in 0..weeks {
        let week = first.checked_add_days(Days::new(7 * (i + 1))).unwrap();
        let capital = Currency::from_num(rng.gen_range(50i32..5000));
        journal
            .execute(JournalEntry {
                week,
                entry: Entry::new_capital(capital),
            })
            .unwrap();

        for day in TradingDay::ALL {
            let destination = Destination::VARIANTS[dist.sample(&mut rng)]
                .parse::<Destination>()
                .unwrap();
            let amount = Currency::from_num(rng.gen_range(-100.0f32..150.0));
            journal
                .execute(JournalEntry {
                    week,
                    entry: Entry::new_amount(day, amount),
                })
                .unwrap()
                .execute(JournalEntry {
                    week,
                    entry: Entry::new_destination(day, destination),
                })
                .unwrap();
        }
    }

    write_journal(&journal, std::io::stdout()).unwrap();
}
