use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::holding::{Holding, Symbol, percentage_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

/// Identifies the holding with an extreme gain percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Performer {
    #[schema(value_type = String)]
    pub symbol: Symbol,
    pub name: String,
    pub gain_percent: f64,
}

impl From<&Holding> for Performer {
    fn from(holding: &Holding) -> Self {
        Self {
            symbol: holding.symbol.clone(),
            name: holding.name.clone(),
            gain_percent: holding.gain_loss_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_value: f64,
    pub total_invested: f64,
    pub total_gain_loss: f64,
    pub total_gain_loss_percent: f64,
    pub top_performer: Performer,
    pub worst_performer: Performer,
    /// Between 0 and 10.
    pub diversification_score: f64,
    pub risk_level: RiskLevel,
}

impl Summary {
    /// Aggregates `holdings`. Returns `None` when there is nothing to aggregate.
    ///
    /// On equal gain percentages the earlier holding wins both extremes.
    #[must_use]
    pub fn from_holdings(
        holdings: &[Holding],
        diversification_score: f64,
        risk_level: RiskLevel,
    ) -> Option<Self> {
        let (first, rest) = holdings.split_first()?;

        let mut top = first;
        let mut worst = first;
        for holding in rest {
            if holding.gain_loss_percent > top.gain_loss_percent {
                top = holding;
            }
            if holding.gain_loss_percent < worst.gain_loss_percent {
                worst = holding;
            }
        }

        let total_value: f64 = holdings.iter().map(|h| h.value).sum();
        let total_invested: f64 = holdings.iter().map(Holding::cost_basis).sum();
        let total_gain_loss = total_value - total_invested;

        Some(Self {
            total_value,
            total_invested,
            total_gain_loss,
            total_gain_loss_percent: percentage_of(total_gain_loss, total_invested),
            top_performer: top.into(),
            worst_performer: worst.into(),
            diversification_score,
            risk_level,
        })
    }
}
