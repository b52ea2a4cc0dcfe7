//! Shopping cart.

use campus_ui::format::{NumberLocale, format_currency};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Errors from cart operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Coupon percentage must be between 0 and 100, got {0}")]
    InvalidCoupon(Decimal),

    #[error("Product {0} is not in the cart")]
    NotInCart(u64),
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: u64,
    pub title: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A percentage discount code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub percent: Decimal,
}

/// Cart contents and an optional coupon.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use campus::cart::Cart;
/// use campus::catalog::sample_products;
///
/// let products = sample_products();
/// let mut cart = Cart::new();
/// cart.add(&products[0], 2);
/// cart.apply_coupon("WELCOME10", Decimal::from(10)).unwrap();
/// assert!(cart.total() < cart.subtotal());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
    coupon: Option<Coupon>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    /// The discounted price applies when the product has a discount.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                product_id: product.id,
                title: product.title.clone(),
                unit_price: product.effective_price(),
                quantity,
            }),
        }
    }

    /// Remove a line. Returns whether it was there.
    pub fn remove(&mut self, product_id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn update_quantity(&mut self, product_id: u64, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return if self.remove(product_id) {
                Ok(())
            } else {
                Err(CartError::NotInCart(product_id))
            };
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Apply a percentage coupon, replacing any previous one.
    pub fn apply_coupon(&mut self, code: impl Into<String>, percent: Decimal) -> Result<(), CartError> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(CartError::InvalidCoupon(percent));
        }
        self.coupon = Some(Coupon {
            code: code.into(),
            percent,
        });
        Ok(())
    }

    pub fn remove_coupon(&mut self) {
        self.coupon = None;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.coupon = None;
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Coupon discount, rounded to cents.
    pub fn discount(&self) -> Decimal {
        match &self.coupon {
            Some(coupon) => (self.subtotal() * coupon.percent / Decimal::ONE_HUNDRED).round_dp(2),
            None => Decimal::ZERO,
        }
    }

    /// Amount due, never below zero.
    pub fn total(&self) -> Decimal {
        (self.subtotal() - self.discount()).max(Decimal::ZERO)
    }

    /// Total formatted for display.
    pub fn formatted_total(&self, symbol: &str, locale: &NumberLocale) -> String {
        format_currency(self.total().to_f64().unwrap_or_default(), symbol, locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_products;

    #[test]
    fn adding_twice_merges_lines() {
        let products = sample_products();
        let mut cart = Cart::new();
        cart.add(&products[0], 1);
        cart.add(&products[0], 2);
        cart.add(&products[1], 0);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn quantity_zero_removes() {
        let products = sample_products();
        let mut cart = Cart::new();
        cart.add(&products[0], 1);
        cart.update_quantity(products[0].id, 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.update_quantity(99, 2), Err(CartError::NotInCart(99)));
    }

    #[test]
    fn coupon_bounds() {
        let mut cart = Cart::new();
        assert!(cart.apply_coupon("BAD", Decimal::from(120)).is_err());
        assert!(cart.apply_coupon("FREE", Decimal::ONE_HUNDRED).is_ok());
    }

    #[test]
    fn full_discount_totals_zero() {
        let products = sample_products();
        let mut cart = Cart::new();
        cart.add(&products[0], 3);
        cart.apply_coupon("FREE", Decimal::ONE_HUNDRED).unwrap();
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.formatted_total("$", &NumberLocale::EN_US), "$0.00");
    }
}
