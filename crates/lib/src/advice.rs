use crate::{CapitalError, CapitalState, Currency, WithdrawalPlan};
use chrono::Weekday;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAdvice {
    pub title: String,
    pub message: String,
}

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Picks the advice for `weekday`. `percentage` is shown next to the weekly
/// result and is usually the capital relative profit/loss.
pub fn daily_advice(
    weekday: Weekday,
    total: Currency,
    percentage: f64,
    capital: &CapitalState,
) -> DailyAdvice {
    let positive = total > Currency::ZERO;
    let base = format!(
        "Capital: ${:.2} | Balance: ${:.2} | Result: ${:.2} ({:.2}%)",
        capital.initial_capital, capital.current_balance, total, percentage
    );

    let body = match weekday {
        Weekday::Mon => format!(
            "Start the week focused. Set realistic goals and plan your key trades.\n\
             • Review your initial capital and risks.\n\
             • Avoid overtrading: quality over quantity.\n\
             • {}",
            if positive {
                "Good start, stay disciplined."
            } else {
                "If the start is weak, be selective and reduce size."
            }
        ),
        Weekday::Tue => format!(
            "Build on momentum: look for confirmation, don't chase late entries.\n\
             • Place stops at real structure, not at round numbers.\n\
             • {}",
            if positive {
                "Protect your gains and don't give them back."
            } else {
                "Keep losses small and wait for A+ setups."
            }
        ),
        Weekday::Wed => "Midweek: assess your progress and correct any drift.\n\
             • If things are going well, avoid overconfidence.\n\
             • If things are going badly, simplify and lower exposure."
            .to_string(),
        Weekday::Thu => "Get ready for the weekly close. Be selective and don't force trades.\n\
             • Favour setups with clear confluence.\n\
             • Don't chase last minute recoveries."
            .to_string(),
        Weekday::Fri => "Close the week with a cool head.\n\
             • Avoid risking consolidated gains.\n\
             • Write down the key lessons for Saturday."
            .to_string(),
        Weekday::Sat => {
            let plan = WithdrawalPlan::with_default_share(total);
            format!(
                "Weekly average and withdrawal day.\n\
                 • Weekly result: ${:.2}.\n\
                 • Recommended withdrawal: ${:.2} (30% of the gains).\n\
                 • Recommended reinvestment: ${:.2}.\n\
                 • {}",
                total,
                plan.withdraw,
                plan.reinvest,
                if positive {
                    "Winning week! Congratulations 👏"
                } else {
                    "Week in the red: focus on reviewing and adjusting 📘"
                }
            )
        }
        Weekday::Sun => "Rest and prepare next week's strategy.\n\
             • Review your journal and key levels.\n\
             • Plan scenarios and your limits."
            .to_string(),
    };

    DailyAdvice {
        title: format!("Advice of the day - {}", day_name(weekday)),
        message: format!("{base}\n\n{body}"),
    }
}

/// End of week recap with the suggested withdrawal/reinvestment split.
pub fn weekly_summary_message(
    capital: &CapitalState,
    withdraw_percent: u8,
) -> Result<String, CapitalError> {
    let total = capital.total();
    let plan = WithdrawalPlan::split(total, withdraw_percent)?;
    let headline = if total >= Currency::ZERO {
        "Winning week! 🎉"
    } else {
        "Challenging week 💡"
    };

    Ok(format!(
        "{headline}\n\n\
         Initial capital: ${:.2}\n\
         Current balance: ${:.2}\n\
         Weekly result: ${:.2} ({:.2}%)\n\n\
         Recommended withdrawal ({withdraw_percent}%): ${:.2}\n\
         Suggested reinvestment: ${:.2}\n\
         \nTip: write down your best and worst trades to learn fast.",
        capital.initial_capital,
        capital.current_balance,
        total,
        capital.profit_loss_percentage,
        plan.withdraw,
        plan.reinvest,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixed_macro::types::I48F16 as cur;

    fn capital(total: Currency) -> CapitalState {
        CapitalState::new(cur!(1000), total).unwrap()
    }

    #[test]
    fn saturday_splits_the_gains() {
        let advice = daily_advice(Weekday::Sat, cur!(200), 20.0, &capital(cur!(200)));
        assert_eq!(advice.title, "Advice of the day - Saturday");
        assert!(advice
            .message
            .starts_with("Capital: $1000.00 | Balance: $1200.00 | Result: $200.00 (20.00%)\n\n"));
        assert!(advice.message.contains("Recommended withdrawal: $60.00"));
        assert!(advice.message.contains("Recommended reinvestment: $140.00"));
        assert!(advice.message.contains("Winning week!"));
    }

    #[test]
    fn saturday_in_the_red_withdraws_nothing() {
        let advice = daily_advice(Weekday::Sat, cur!(-50), -5.0, &capital(cur!(-50)));
        assert!(advice.message.contains("Recommended withdrawal: $0.00"));
        assert!(advice.message.contains("Recommended reinvestment: $0.00"));
        assert!(advice.message.contains("Week in the red"));
    }

    #[test]
    fn monday_clause_depends_on_sign() {
        let good = daily_advice(Weekday::Mon, cur!(5), 0.5, &capital(cur!(5)));
        assert!(good.message.ends_with("• Good start, stay disciplined."));
        let flat = daily_advice(Weekday::Mon, cur!(0), 0.0, &capital(cur!(0)));
        assert!(flat
            .message
            .ends_with("• If the start is weak, be selective and reduce size."));
    }

    #[test]
    fn tuesday_clause_depends_on_sign() {
        let bad = daily_advice(Weekday::Tue, cur!(-5), -0.5, &capital(cur!(-5)));
        assert!(bad.message.ends_with("• Keep losses small and wait for A+ setups."));
    }

    #[test]
    fn every_day_has_a_titled_message() {
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            let advice = daily_advice(weekday, cur!(1), 0.1, &capital(cur!(1)));
            assert!(advice.title.ends_with(day_name(weekday)));
            assert!(advice.message.contains("\n\n"));
        }
    }

    #[test]
    fn summary_message_for_winning_week() {
        let capital = capital(cur!(200));
        let message = weekly_summary_message(&capital, 30).unwrap();
        assert!(message.starts_with("Winning week!"));
        assert!(message.contains("Current balance: $1200.00"));
        assert!(message.contains("Weekly result: $200.00 (20.00%)"));
        assert!(message.contains("Recommended withdrawal (30%): $60.00"));
        assert!(message.contains("Suggested reinvestment: $140.00"));
    }

    #[test]
    fn summary_message_for_losing_week() {
        let capital = capital(cur!(-100));
        let message = weekly_summary_message(&capital, 30).unwrap();
        assert!(message.starts_with("Challenging week"));
        assert!(message.contains("Weekly result: $-100.00 (-10.00%)"));
        assert!(message.contains("Recommended withdrawal (30%): $0.00"));
    }

    #[test]
    fn summary_message_honours_custom_share() {
        let message = weekly_summary_message(&capital(cur!(200)), 50).unwrap();
        assert!(message.contains("Recommended withdrawal (50%): $100.00"));
        assert!(message.contains("Suggested reinvestment: $100.00"));
        assert_eq!(
            weekly_summary_message(&capital(cur!(200)), 120),
            Err(CapitalError::InvalidPercent(120))
        );
    }
}
