//! Rule based commentary on a finished week.
//!
//! Ratings and risk levels come from fixed thresholds. The free text insights
//! and recommendations are sampled from fixed pools, so the caller supplies the
//! random source.

use crate::{Currency, Destination, TradingWeek, WeekSummary};
use rand::{seq::SliceRandom, Rng};
use strum_macros::{Display, EnumString};

const EXCELLENT_THRESHOLD: f64 = 20.0;
const GOOD_THRESHOLD: f64 = 10.0;
const SIGNIFICANT_LOSS_THRESHOLD: f64 = -20.0;
const HIGH_RISK_THRESHOLD: f64 = 30.0;
const MODERATE_RISK_THRESHOLD: f64 = 20.0;

const SAMPLED_INSIGHTS: usize = 2;
const SAMPLED_RECOMMENDATIONS: usize = 2;

const INSIGHTS: [&str; 10] = [
    "Your performance shows a consistent positive trend.",
    "Consider growing your trading capital gradually.",
    "Losing days look well contained.",
    "Your reinvestment strategy is working efficiently.",
    "You could consider diversifying your trades.",
    "The pattern of gains suggests good risk management.",
    "Your reinvestment days show promising results.",
    "Consider setting more ambitious weekly goals.",
    "Consistency is the key to long term growth.",
    "Days with high gains point to good market timing.",
];

const RECOMMENDATIONS: [&str; 10] = [
    "Keep your current strategy, it is working well.",
    "Consider increasing your position size gradually.",
    "Make sure you keep a trading journal.",
    "Review and adjust your strategy every week.",
    "Don't get overconfident after winning weeks.",
    "Consider taking breaks between trading sessions.",
    "Stay disciplined with your entry and exit rules.",
    "Learn from your losing days to improve.",
    "Consider setting tighter stop losses.",
    "Never invest more than you can afford to lose.",
];

const LOSS_RECOMMENDATIONS: [&str; 2] = [
    "Consider reducing the size of your trades for a while.",
    "Review and adjust your strategy before continuing.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Rating {
    #[strum(serialize = "A+")]
    APlus,
    #[strum(serialize = "A")]
    A,
    #[strum(serialize = "B+")]
    BPlus,
    #[strum(serialize = "C")]
    C,
    #[strum(serialize = "C-")]
    CMinus,
    #[strum(serialize = "D")]
    D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    High,
    Moderate,
    Controlled,
}

impl RiskLevel {
    pub fn advisory(self) -> &'static str {
        match self {
            RiskLevel::High => "High risk detected, consider adjusting your risk management.",
            RiskLevel::Moderate => "Moderate risk, keep a close eye on your trades.",
            RiskLevel::Controlled => "Controlled risk, good risk management.",
        }
    }
}

/// Maps the sign of the weekly total and the performance percentage to a
/// headline and a letter grade.
pub fn rate(total: Currency, performance_percentage: f64) -> (&'static str, Rating) {
    if total > Currency::ZERO {
        if performance_percentage > EXCELLENT_THRESHOLD {
            ("Excellent week! Performance above 20%.", Rating::APlus)
        } else if performance_percentage > GOOD_THRESHOLD {
            ("Good week with solid positive performance.", Rating::A)
        } else {
            ("Positive week with consistent gains.", Rating::BPlus)
        }
    } else if total == Currency::ZERO {
        (
            "Neutral week with no significant gains or losses.",
            Rating::C,
        )
    } else if performance_percentage < SIGNIFICANT_LOSS_THRESHOLD {
        ("Tough week with significant losses.", Rating::D)
    } else {
        ("Week with moderate losses.", Rating::CMinus)
    }
}

pub fn assess_risk(performance_percentage: f64) -> RiskLevel {
    let magnitude = performance_percentage.abs();
    if magnitude > HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if magnitude > MODERATE_RISK_THRESHOLD {
        RiskLevel::Moderate
    } else {
        RiskLevel::Controlled
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub headline: &'static str,
    pub rating: Rating,
    pub risk: RiskLevel,
    pub insights: Vec<&'static str>,
    pub recommendations: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Analyzer {
    insights: &'static [&'static str],
    recommendations: &'static [&'static str],
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            insights: &INSIGHTS,
            recommendations: &RECOMMENDATIONS,
        }
    }
}

impl Analyzer {
    pub fn analyze<R: Rng + ?Sized>(
        &self,
        summary: &WeekSummary,
        week: &TradingWeek,
        rng: &mut R,
    ) -> Analysis {
        let (headline, rating) = rate(summary.total, summary.performance_percentage);
        let mut insights = Vec::with_capacity(2 + SAMPLED_INSIGHTS);

        if summary.positive_days >= 4 {
            insights.push("Great consistency with 4 or more positive days.");
        } else if summary.positive_days >= 3 {
            insights.push("Good consistency with most days positive.");
        } else if summary.negative_days >= 3 {
            insights.push("Several negative days, review your strategy.");
        }

        let reinvested = week.total_for(Destination::Reinvestment);
        if reinvested > Currency::ZERO {
            insights.push("Your reinvestment days are producing positive results.");
        } else if reinvested < Currency::ZERO {
            insights.push("Consider reviewing your reinvestment strategy.");
        }

        insights.extend(
            self.insights
                .choose_multiple(rng, SAMPLED_INSIGHTS)
                .copied(),
        );

        let recommendations = if summary.total < Currency::ZERO {
            LOSS_RECOMMENDATIONS.to_vec()
        } else {
            self.recommendations
                .choose_multiple(rng, SAMPLED_RECOMMENDATIONS)
                .copied()
                .collect()
        };

        Analysis {
            headline,
            rating,
            risk: assess_risk(summary.performance_percentage),
            insights,
            recommendations,
        }
    }
}
