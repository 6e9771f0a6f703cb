//! Derived investment metrics
//!
//! Metrics are never stored; they are recomputed from the listing on demand.
//! Every division is guarded, so the result is always finite. A guarded
//! metric reads as `0.0`, which callers cannot tell apart from a genuine
//! zero yield.

use portfolio_model::{Metric, Property};
use serde::{Deserialize, Serialize};

/// Investment metrics derived from a [`Property`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    /// Annual rent over purchase price, percent
    pub gross_yield: f64,
    /// Annual rent minus expenses over purchase price, percent
    pub net_yield: f64,
    /// Purchase price per square metre
    pub price_per_sqm: f64,
    /// Purchase price over annual rent
    pub price_to_rent_ratio: f64,
}

impl DerivedMetrics {
    /// Read one metric
    #[inline]
    #[must_use]
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::GrossYield => self.gross_yield,
            Metric::NetYield => self.net_yield,
            Metric::PricePerSqm => self.price_per_sqm,
            Metric::PriceToRentRatio => self.price_to_rent_ratio,
        }
    }
}

/// Strictly positive, finite value or nothing
#[inline]
fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Compute all metrics for a property
#[must_use]
pub fn compute(property: &Property) -> DerivedMetrics {
    let price = positive(property.purchase_price);
    let rent = positive(property.monthly_rent);
    let area = positive(property.effective_area());

    let mut metrics = DerivedMetrics::default();

    if let (Some(price), Some(rent)) = (price, rent) {
        let expenses = property
            .monthly_expenses
            .filter(|e| e.is_finite())
            .unwrap_or(0.0);
        let annual_rent = rent * 12.0;
        let annual_net = (rent - expenses) * 12.0;

        metrics.gross_yield = annual_rent * 100.0 / price;
        metrics.net_yield = annual_net * 100.0 / price;
        metrics.price_to_rent_ratio = price / annual_rent;
    }

    if let (Some(price), Some(area)) = (price, area) {
        metrics.price_per_sqm = price / area;
    }

    metrics
}

/// Compute a single metric
#[inline]
#[must_use]
pub fn compute_one(property: &Property, metric: Metric) -> f64 {
    compute(property).get(metric)
}
