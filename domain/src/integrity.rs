use std::fmt;

use chrono::NaiveDate;
use in_memory_adapter::DuplicateKey;
use validator::ValidationErrors;

use crate::{
    allocation::Allocation,
    holding::{Holding, Symbol, percentage_of},
    performance::Performance,
    summary::Summary,
};

/// Relative tolerance for recomputed figures.
pub const TOLERANCE: f64 = 1e-6;
/// Absolute tolerance on the sum of allocation percentages.
pub const PERCENTAGE_SUM_TOLERANCE: f64 = 0.5;
pub const MAX_DIVERSIFICATION_SCORE: f64 = 10.0;

/// A portfolio dataset that cannot be served consistently.
#[derive(Debug)]
pub enum IntegrityError {
    EmptyPortfolio,
    InvalidHolding {
        symbol: Symbol,
        errors: ValidationErrors,
    },
    DuplicateSymbol {
        symbol: Symbol,
    },
    InconsistentHolding {
        symbol: Symbol,
        field: &'static str,
        expected: f64,
        actual: f64,
    },
    AllocationMismatch {
        dimension: &'static str,
        reason: String,
    },
    SummaryMismatch {
        field: &'static str,
        expected: f64,
        actual: f64,
    },
    PerformerMismatch {
        performer: &'static str,
        reported: Symbol,
        actual: Symbol,
    },
    ScoreOutOfRange {
        score: f64,
    },
    EmptyTimeline,
    TimelineOutOfOrder {
        previous: NaiveDate,
        next: NaiveDate,
    },
    InvalidSeriesValue {
        series: &'static str,
        date: NaiveDate,
        value: f64,
    },
    InvalidReturn {
        series: &'static str,
    },
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityError::EmptyPortfolio => write!(f, "Portfolio has no holdings"),
            IntegrityError::InvalidHolding { symbol, errors } => {
                write!(f, "Invalid holding {symbol:?}: {errors}")
            }
            IntegrityError::DuplicateSymbol { symbol } => {
                write!(f, "Symbol {symbol} appears more than once")
            }
            IntegrityError::InconsistentHolding {
                symbol,
                field,
                expected,
                actual,
            } => write!(
                f,
                "Holding {symbol}: {field} is {actual}, expected {expected}"
            ),
            IntegrityError::AllocationMismatch { dimension, reason } => {
                write!(f, "Allocation {dimension}: {reason}")
            }
            IntegrityError::SummaryMismatch {
                field,
                expected,
                actual,
            } => write!(f, "Summary {field} is {actual}, expected {expected}"),
            IntegrityError::PerformerMismatch {
                performer,
                reported,
                actual,
            } => write!(f, "{performer} performer is {reported}, expected {actual}"),
            IntegrityError::ScoreOutOfRange { score } => write!(
                f,
                "Diversification score {score} outside 0..={MAX_DIVERSIFICATION_SCORE}"
            ),
            IntegrityError::EmptyTimeline => write!(f, "Performance timeline is empty"),
            IntegrityError::TimelineOutOfOrder { previous, next } => {
                write!(f, "Timeline date {next} does not follow {previous}")
            }
            IntegrityError::InvalidSeriesValue {
                series,
                date,
                value,
            } => write!(f, "Timeline {series} value {value} on {date} is not positive"),
            IntegrityError::InvalidReturn { series } => {
                write!(f, "Returns for {series} are not finite")
            }
        }
    }
}

impl std::error::Error for IntegrityError {}

impl From<DuplicateKey<Symbol>> for IntegrityError {
    fn from(DuplicateKey(symbol): DuplicateKey<Symbol>) -> Self {
        IntegrityError::DuplicateSymbol { symbol }
    }
}

fn approx_eq(expected: f64, actual: f64) -> bool {
    let scale = expected.abs().max(actual.abs()).max(1.0);
    (expected - actual).abs() <= TOLERANCE * scale
}

pub fn check_holding(holding: &Holding) -> Result<(), IntegrityError> {
    let value = holding.quantity as f64 * holding.current_price;
    let gain_loss = value - holding.cost_basis();
    let gain_loss_percent = percentage_of(gain_loss, holding.cost_basis());

    for (field, expected, actual) in [
        ("value", value, holding.value),
        ("gainLoss", gain_loss, holding.gain_loss),
        ("gainLossPercent", gain_loss_percent, holding.gain_loss_percent),
    ] {
        if !approx_eq(expected, actual) {
            return Err(IntegrityError::InconsistentHolding {
                symbol: holding.symbol.clone(),
                field,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

pub fn check_allocation(allocation: &Allocation, total_value: f64) -> Result<(), IntegrityError> {
    for (dimension, table) in allocation.dimensions() {
        let value_sum: f64 = table.values().map(|slice| slice.value).sum();
        if !approx_eq(total_value, value_sum) {
            return Err(IntegrityError::AllocationMismatch {
                dimension,
                reason: format!("group values sum to {value_sum}, portfolio is worth {total_value}"),
            });
        }

        for (group, slice) in table {
            let expected = percentage_of(slice.value, total_value);
            if !approx_eq(expected, slice.percentage) {
                return Err(IntegrityError::AllocationMismatch {
                    dimension,
                    reason: format!(
                        "{group} is {}%, expected {expected}%",
                        slice.percentage
                    ),
                });
            }
        }

        let percentage_sum: f64 = table.values().map(|slice| slice.percentage).sum();
        if (percentage_sum - 100.0).abs() > PERCENTAGE_SUM_TOLERANCE {
            return Err(IntegrityError::AllocationMismatch {
                dimension,
                reason: format!("percentages sum to {percentage_sum}"),
            });
        }
    }
    Ok(())
}

pub fn check_summary(summary: &Summary, holdings: &[Holding]) -> Result<(), IntegrityError> {
    let total_value: f64 = holdings.iter().map(|h| h.value).sum();
    let total_invested: f64 = holdings.iter().map(Holding::cost_basis).sum();
    let total_gain_loss = total_value - total_invested;

    for (field, expected, actual) in [
        ("totalValue", total_value, summary.total_value),
        ("totalInvested", total_invested, summary.total_invested),
        ("totalGainLoss", total_gain_loss, summary.total_gain_loss),
        (
            "totalGainLossPercent",
            percentage_of(total_gain_loss, total_invested),
            summary.total_gain_loss_percent,
        ),
    ] {
        if !approx_eq(expected, actual) {
            return Err(IntegrityError::SummaryMismatch {
                field,
                expected,
                actual,
            });
        }
    }

    for holding in holdings {
        if holding.gain_loss_percent > summary.top_performer.gain_percent {
            return Err(IntegrityError::PerformerMismatch {
                performer: "Top",
                reported: summary.top_performer.symbol.clone(),
                actual: holding.symbol.clone(),
            });
        }
        if holding.gain_loss_percent < summary.worst_performer.gain_percent {
            return Err(IntegrityError::PerformerMismatch {
                performer: "Worst",
                reported: summary.worst_performer.symbol.clone(),
                actual: holding.symbol.clone(),
            });
        }
    }

    let score = summary.diversification_score;
    if !(0.0..=MAX_DIVERSIFICATION_SCORE).contains(&score) {
        return Err(IntegrityError::ScoreOutOfRange { score });
    }
    Ok(())
}

pub fn check_performance(performance: &Performance) -> Result<(), IntegrityError> {
    if performance.timeline.is_empty() {
        return Err(IntegrityError::EmptyTimeline);
    }

    for point in &performance.timeline {
        for (series, value) in point.series() {
            if !value.is_finite() || value <= 0.0 {
                return Err(IntegrityError::InvalidSeriesValue {
                    series,
                    date: point.date,
                    value,
                });
            }
        }
    }

    for pair in performance.timeline.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(IntegrityError::TimelineOutOfOrder {
                previous: pair[0].date,
                next: pair[1].date,
            });
        }
    }

    for (series, returns) in performance.returns.series() {
        if !returns.is_finite() {
            return Err(IntegrityError::InvalidReturn { series });
        }
    }
    Ok(())
}
