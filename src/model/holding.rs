use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Krw,
    Usd,
}

/// A brokerage position as delivered by the portfolio import.
/// Read-only to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    #[serde(default)]
    pub id: String,
    pub ticker: String,
    pub name: String,
    pub quantity: f64,
    pub currency: Currency,
    /// Current value in KRW
    pub valuation: f64,
    pub profit_value: f64,
    /// Percent
    pub profit_rate: f64,
}

impl Holding {
    /// Per-unit price implied by the valuation, or 0 for an empty position.
    pub fn implied_price(&self) -> f64 {
        if self.quantity > 0.0 {
            self.valuation / self.quantity
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holdings {
    #[serde(default)]
    pub domestic: Vec<Holding>,
    #[serde(default)]
    pub overseas: Vec<Holding>,
}

impl Holdings {
    /// Domestic positions first, then overseas.
    pub fn iter(&self) -> impl Iterator<Item = &Holding> {
        self.domestic.iter().chain(self.overseas.iter())
    }

    pub fn len(&self) -> usize {
        self.domestic.len() + self.overseas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
