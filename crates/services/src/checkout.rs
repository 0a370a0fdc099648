use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use exam_core::model::{Chapter, ChapterId, CurrencyRate, PaymentMethod};

use crate::error::CheckoutError;

/// One chapter line of a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub chapter_id: ChapterId,
    /// Selected access duration in days.
    pub duration: u32,
}

/// The order handed to the purchase API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub payment_method_id: u64,
    pub chapters: Vec<OrderLine>,
    pub total_usd: f64,
}

/// Cart over the chapters the grading API recommended after an exam.
///
/// Selection defaults each chapter to its cheapest duration tier; totals
/// are computed in USD and converted at checkout by whatever rate the
/// caller supplies.
#[derive(Debug, Clone)]
pub struct ChapterCart {
    chapters: Vec<Chapter>,
    selected: Vec<ChapterId>,
    durations: HashMap<ChapterId, u32>,
    payment_method: Option<PaymentMethod>,
}

impl ChapterCart {
    #[must_use]
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self {
            chapters,
            selected: Vec::new(),
            durations: HashMap::new(),
            payment_method: None,
        }
    }

    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    #[must_use]
    pub fn selected(&self) -> &[ChapterId] {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, chapter_id: ChapterId) -> bool {
        self.selected.contains(&chapter_id)
    }

    fn chapter(&self, chapter_id: ChapterId) -> Result<&Chapter, CheckoutError> {
        self.chapters
            .iter()
            .find(|c| c.id() == chapter_id)
            .ok_or(CheckoutError::UnknownChapter(chapter_id))
    }

    /// Toggle a chapter in or out of the cart. Selecting initializes its
    /// duration to the cheapest tier.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UnknownChapter` for an id outside the
    /// recommendation list.
    pub fn toggle(&mut self, chapter_id: ChapterId) -> Result<(), CheckoutError> {
        let chapter = self.chapter(chapter_id)?;
        let default_duration = chapter.min_tier().map(|t| t.duration);

        if let Some(pos) = self.selected.iter().position(|id| *id == chapter_id) {
            self.selected.remove(pos);
            self.durations.remove(&chapter_id);
        } else {
            self.selected.push(chapter_id);
            if let Some(duration) = default_duration {
                self.durations.insert(chapter_id, duration);
            }
        }
        Ok(())
    }

    /// Put every recommended chapter in the cart.
    pub fn select_all(&mut self) {
        self.selected = self.chapters.iter().map(Chapter::id).collect();
        self.durations = self
            .chapters
            .iter()
            .filter_map(|c| c.min_tier().map(|t| (c.id(), t.duration)))
            .collect();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.durations.clear();
    }

    /// Switch a selected chapter to a different duration tier.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UnknownChapter` when the chapter is not in
    /// the cart and `CheckoutError::UnknownDuration` when the chapter has
    /// no tier with that duration.
    pub fn set_duration(
        &mut self,
        chapter_id: ChapterId,
        duration: u32,
    ) -> Result<(), CheckoutError> {
        if !self.is_selected(chapter_id) {
            return Err(CheckoutError::UnknownChapter(chapter_id));
        }
        let chapter = self.chapter(chapter_id)?;
        if chapter.price_for(duration).is_none() {
            return Err(CheckoutError::UnknownDuration(chapter_id, duration));
        }
        self.durations.insert(chapter_id, duration);
        Ok(())
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
    }

    #[must_use]
    pub fn payment_method(&self) -> Option<&PaymentMethod> {
        self.payment_method.as_ref()
    }

    /// Sum of the selected tiers' prices, in USD.
    #[must_use]
    pub fn total_usd(&self) -> f64 {
        self.selected
            .iter()
            .filter_map(|id| {
                let chapter = self.chapters.iter().find(|c| c.id() == *id)?;
                let duration = self.durations.get(id)?;
                chapter.price_for(*duration)
            })
            .sum()
    }

    /// The USD total converted by an exchange rate, rounded to cents.
    #[must_use]
    pub fn total_in(&self, rate: &CurrencyRate) -> f64 {
        let converted = self.total_usd() * rate.amount;
        (converted * 100.0).round() / 100.0
    }

    /// Validate the cart and produce the purchase order.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` with nothing selected and
    /// `CheckoutError::NoPaymentMethod` without a payment method.
    pub fn checkout(&self) -> Result<PurchaseOrder, CheckoutError> {
        if self.selected.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let Some(method) = &self.payment_method else {
            return Err(CheckoutError::NoPaymentMethod);
        };

        let chapters = self
            .selected
            .iter()
            .filter_map(|id| {
                self.durations.get(id).map(|duration| OrderLine {
                    chapter_id: *id,
                    duration: *duration,
                })
            })
            .collect();

        Ok(PurchaseOrder {
            payment_method_id: method.id,
            chapters,
            total_usd: self.total_usd(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::PriceTier;

    fn tier(duration: u32, price: f64) -> PriceTier {
        PriceTier { duration, price }
    }

    fn cart() -> ChapterCart {
        ChapterCart::new(vec![
            Chapter::new(
                ChapterId::new(1),
                "Algebra",
                vec![tier(30, 10.0), tier(90, 25.0)],
            ),
            Chapter::new(
                ChapterId::new(2),
                "Geometry",
                vec![tier(30, 12.0), tier(90, 30.0)],
            ),
        ])
    }

    #[test]
    fn toggle_selects_with_cheapest_duration() {
        let mut cart = cart();
        cart.toggle(ChapterId::new(1)).unwrap();
        assert!(cart.is_selected(ChapterId::new(1)));
        assert_eq!(cart.total_usd(), 10.0);

        cart.toggle(ChapterId::new(1)).unwrap();
        assert!(!cart.is_selected(ChapterId::new(1)));
        assert_eq!(cart.total_usd(), 0.0);
    }

    #[test]
    fn unknown_chapter_is_rejected() {
        let mut cart = cart();
        assert_eq!(
            cart.toggle(ChapterId::new(99)),
            Err(CheckoutError::UnknownChapter(ChapterId::new(99)))
        );
    }

    #[test]
    fn select_all_covers_every_chapter() {
        let mut cart = cart();
        cart.select_all();
        assert_eq!(cart.selected().len(), 2);
        assert_eq!(cart.total_usd(), 22.0);

        cart.clear();
        assert!(cart.selected().is_empty());
    }

    #[test]
    fn duration_switch_changes_total() {
        let mut cart = cart();
        cart.toggle(ChapterId::new(1)).unwrap();
        cart.set_duration(ChapterId::new(1), 90).unwrap();
        assert_eq!(cart.total_usd(), 25.0);

        assert_eq!(
            cart.set_duration(ChapterId::new(1), 7),
            Err(CheckoutError::UnknownDuration(ChapterId::new(1), 7))
        );
        assert_eq!(
            cart.set_duration(ChapterId::new(2), 30),
            Err(CheckoutError::UnknownChapter(ChapterId::new(2)))
        );
    }

    #[test]
    fn currency_conversion_rounds_to_cents() {
        let mut cart = cart();
        cart.toggle(ChapterId::new(1)).unwrap();
        let egp = CurrencyRate {
            currency: "EGP".to_string(),
            amount: 48.155,
        };
        assert_eq!(cart.total_in(&egp), 481.55);
    }

    #[test]
    fn checkout_requires_selection_and_payment() {
        let mut cart = cart();
        assert_eq!(cart.checkout(), Err(CheckoutError::EmptyCart));

        cart.toggle(ChapterId::new(2)).unwrap();
        assert_eq!(cart.checkout(), Err(CheckoutError::NoPaymentMethod));

        cart.set_payment_method(PaymentMethod::wallet());
        let order = cart.checkout().unwrap();
        assert_eq!(order.payment_method_id, 0);
        assert_eq!(
            order.chapters,
            vec![OrderLine {
                chapter_id: ChapterId::new(2),
                duration: 30
            }]
        );
        assert_eq!(order.total_usd, 12.0);
    }
}
