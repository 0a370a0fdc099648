use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::{ChapterId, CourseId};

/// A course listed in the diagnostic-exam catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub course_name: String,
    #[serde(default)]
    pub image_link: Option<Url>,
}

/// One purchasable access duration for a chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    /// Access duration in days.
    pub duration: u32,
    /// Price in USD.
    pub price: f64,
}

/// A chapter the grading API recommends buying after an exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    id: ChapterId,
    chapter_name: String,
    #[serde(default)]
    price: Vec<PriceTier>,
}

impl Chapter {
    #[must_use]
    pub fn new(id: ChapterId, name: impl Into<String>, tiers: Vec<PriceTier>) -> Self {
        Self {
            id,
            chapter_name: name.into(),
            price: tiers,
        }
    }

    #[must_use]
    pub fn id(&self) -> ChapterId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.chapter_name
    }

    #[must_use]
    pub fn tiers(&self) -> &[PriceTier] {
        &self.price
    }

    /// The cheapest tier, used as the default duration selection.
    #[must_use]
    pub fn min_tier(&self) -> Option<&PriceTier> {
        self.price
            .iter()
            .min_by(|a, b| a.price.total_cmp(&b.price))
    }

    /// Lowest advertised price across tiers.
    #[must_use]
    pub fn min_price(&self) -> Option<f64> {
        self.min_tier().map(|t| t.price)
    }

    /// Price of the tier with the given duration.
    #[must_use]
    pub fn price_for(&self, duration: u32) -> Option<f64> {
        self.price
            .iter()
            .find(|t| t.duration == duration)
            .map(|t| t.price)
    }
}

/// A payment method offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: u64,
    pub payment: String,
}

impl PaymentMethod {
    /// The built-in wallet method that is always offered alongside the
    /// API-provided ones.
    #[must_use]
    pub fn wallet() -> Self {
        Self {
            id: 0,
            payment: "Wallet".to_string(),
        }
    }
}

/// Exchange rate applied to the USD total at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub currency: String,
    /// Units of the currency per USD.
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter() -> Chapter {
        Chapter::new(
            ChapterId::new(1),
            "Algebra",
            vec![
                PriceTier {
                    duration: 90,
                    price: 25.0,
                },
                PriceTier {
                    duration: 30,
                    price: 10.0,
                },
            ],
        )
    }

    #[test]
    fn min_tier_is_cheapest() {
        let ch = chapter();
        assert_eq!(ch.min_tier().unwrap().duration, 30);
        assert_eq!(ch.min_price(), Some(10.0));
    }

    #[test]
    fn price_for_duration() {
        let ch = chapter();
        assert_eq!(ch.price_for(90), Some(25.0));
        assert_eq!(ch.price_for(7), None);
    }

    #[test]
    fn chapter_without_tiers_has_no_price() {
        let ch = Chapter::new(ChapterId::new(2), "Empty", Vec::new());
        assert!(ch.min_tier().is_none());
        assert!(ch.min_price().is_none());
    }

    #[test]
    fn wallet_method_is_static() {
        assert_eq!(PaymentMethod::wallet().payment, "Wallet");
    }
}
