use crate::{Currency, Destination, TradingWeek, MAX_ABS_AMOUNT, TRADING_DAYS};
use thiserror::Error;

/// Share of a winning week that is taken out, in percent.
pub const DEFAULT_WITHDRAWAL_PERCENT: u8 = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapitalError {
    #[error("Initial capital must be greater than zero, got {0}")]
    NonPositive(Currency),
    #[error("Initial capital {0} is outside the accepted range")]
    OutOfRange(Currency),
    #[error("Withdrawal share must be between 0 and 100 percent, got {0}")]
    InvalidPercent(u8),
}

/// Derived figures for one week. Cheap enough to recompute on every read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekSummary {
    pub total: Currency,
    pub total_withdrawal: Currency,
    pub total_reinvestment: Currency,
    pub daily_average: Currency,
    /// Net gains over total absolute movement, in [-100, 100].
    pub performance_percentage: f64,
    pub positive_days: usize,
    pub negative_days: usize,
}

pub fn summarize(week: &TradingWeek) -> WeekSummary {
    let mut total = Currency::ZERO;
    let mut positive = Currency::ZERO;
    let mut negative = Currency::ZERO;
    let mut positive_days = 0;
    let mut negative_days = 0;

    for (_, record) in week.iter() {
        total += record.amount;
        if record.amount > Currency::ZERO {
            positive += record.amount;
            positive_days += 1;
        } else if record.amount < Currency::ZERO {
            negative -= record.amount;
            negative_days += 1;
        }
    }

    let movement = positive + negative;
    let performance_percentage = if movement == Currency::ZERO {
        0.0
    } else {
        // multiply first so round boundaries like 10% stay exact
        (positive - negative).to_num::<f64>() * 100.0 / movement.to_num::<f64>()
    };

    WeekSummary {
        total,
        total_withdrawal: week.total_for(Destination::Withdrawal),
        total_reinvestment: week.total_for(Destination::Reinvestment),
        daily_average: total / TRADING_DAYS as i64,
        performance_percentage,
        positive_days,
        negative_days,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapitalState {
    pub initial_capital: Currency,
    pub current_balance: Currency,
    /// Weekly total relative to the initial capital.
    pub profit_loss_percentage: f64,
}

impl CapitalState {
    pub fn new(initial_capital: Currency, total: Currency) -> Result<Self, CapitalError> {
        if initial_capital <= Currency::ZERO {
            return Err(CapitalError::NonPositive(initial_capital));
        }
        if initial_capital > MAX_ABS_AMOUNT {
            return Err(CapitalError::OutOfRange(initial_capital));
        }
        Ok(Self::from_validated(initial_capital, total))
    }

    pub(crate) fn from_validated(initial_capital: Currency, total: Currency) -> Self {
        Self {
            initial_capital,
            current_balance: initial_capital + total,
            profit_loss_percentage: total.to_num::<f64>() * 100.0
                / initial_capital.to_num::<f64>(),
        }
    }

    pub fn total(&self) -> Currency {
        self.current_balance - self.initial_capital
    }
}

/// How the gains of a week are split between the two buckets. Losing weeks
/// split nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalPlan {
    pub withdraw: Currency,
    pub reinvest: Currency,
}

impl WithdrawalPlan {
    pub fn split(total: Currency, percent: u8) -> Result<Self, CapitalError> {
        if percent > 100 {
            return Err(CapitalError::InvalidPercent(percent));
        }
        Ok(Self::split_gains(total, percent))
    }

    pub fn with_default_share(total: Currency) -> Self {
        Self::split_gains(total, DEFAULT_WITHDRAWAL_PERCENT)
    }

    fn split_gains(total: Currency, percent: u8) -> Self {
        let gains = total.max(Currency::ZERO);
        // gains are bounded by five times MAX_ABS_AMOUNT so this can't overflow
        let withdraw = gains * i64::from(percent) / 100;
        Self {
            withdraw,
            reinvest: gains - withdraw,
        }
    }
}
