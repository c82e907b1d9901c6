//! Crossing detection logic
//!
//! Determines when an incoming order can match a resting price on the
//! opposite side of the book.

use matchbook_types::numeric::Price;
use matchbook_types::order::Side;

/// Check if an incoming order crosses a resting order's price
///
/// - An incoming buy crosses when the best ask is at or below its limit.
/// - An incoming sell crosses when the best bid is at or above its limit.
pub fn incoming_crosses(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::Buy => resting_price <= incoming_price,
        Side::Sell => resting_price >= incoming_price,
    }
}
