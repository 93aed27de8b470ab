use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::holding::{Holding, percentage_of};

/// Share of the portfolio held in one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AllocationSlice {
    pub value: f64,
    /// Share of total portfolio value, unrounded.
    pub percentage: f64,
}

pub type AllocationTable = BTreeMap<String, AllocationSlice>;

/// Portfolio value broken down by sector and by market-cap class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub by_sector: BTreeMap<String, AllocationSlice>,
    pub by_market_cap: BTreeMap<String, AllocationSlice>,
}

impl Allocation {
    #[must_use]
    pub fn from_holdings(holdings: &[Holding]) -> Self {
        let total: f64 = holdings.iter().map(|h| h.value).sum();
        Self {
            by_sector: group_by(holdings, total, |h| h.sector.clone()),
            by_market_cap: group_by(holdings, total, |h| h.market_cap.label().to_string()),
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> [(&'static str, &AllocationTable); 2] {
        [
            ("bySector", &self.by_sector),
            ("byMarketCap", &self.by_market_cap),
        ]
    }
}

fn group_by<F>(holdings: &[Holding], total: f64, key: F) -> AllocationTable
where
    F: Fn(&Holding) -> String,
{
    let mut values: BTreeMap<String, f64> = BTreeMap::new();
    for holding in holdings {
        *values.entry(key(holding)).or_default() += holding.value;
    }

    values
        .into_iter()
        .map(|(group, value)| {
            let slice = AllocationSlice {
                value,
                percentage: percentage_of(value, total),
            };
            (group, slice)
        })
        .collect()
}
