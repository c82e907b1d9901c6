//! Order book and matching loop
//!
//! The `Book` serializes all order arrivals into a single decision
//! stream: insert the incoming order into its side's queue, peek the
//! opposite side for a crossable best price, and settle against exactly
//! one resting order per arrival (single peek-and-pop, never a sweep
//! across levels).
//!
//! Orders live in the book's order store; the queues hold `(price,
//! arrival, order_id)` references. An incoming order stays in its own
//! queue even when the match that follows fills it completely, so a later
//! pop can surface an already-closed order — that pop skips settlement
//! and discards the entry.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use matchbook_types::ids::OrderId;
use matchbook_types::order::{Order, Side};
use matchbook_types::transaction::Transaction;

use crate::book::{AskQueue, BidQueue};
use crate::completion::CompletionHandle;
use crate::events::{RejectReason, SubmitOutcome};
use crate::ledger::PositionLedger;
use crate::matching::{crossing, settlement};

/// Order book for one asset universe
///
/// Owns the bid and ask queues, the order store, and the transaction log.
/// Exactly one logical thread of control may mutate a `Book`.
#[derive(Debug, Default)]
pub struct Book {
    bids: BidQueue,
    asks: AskQueue,
    /// Every order ever accepted, by id; settlement mutates orders here
    orders: HashMap<OrderId, Order>,
    /// Finalized transactions in creation order
    transactions: Vec<Transaction>,
}

impl Book {
    /// Create a new empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one inbound order synchronously
    ///
    /// Dispatches by side, checks the opposite queue for a crossable best
    /// price, and attempts settlement against at most one resting order.
    pub fn process(&mut self, order: Order, ledger: &mut dyn PositionLedger) -> SubmitOutcome {
        if order.pending_shares == 0 {
            warn!(order_id = %order.order_id, "rejecting order with no shares");
            return SubmitOutcome::Rejected(RejectReason::NoShares);
        }

        let order_id = order.order_id;
        let side = order.side;
        let price = order.limit_price;

        self.orders.insert(order_id, order);

        let crossable = match side {
            Side::Buy => {
                self.bids.insert(order_id, price);
                self.asks.peek_best_price()
            }
            Side::Sell => {
                self.asks.insert(order_id, price);
                self.bids.peek_best_price()
            }
        };

        match crossable {
            Some(best) if crossing::incoming_crosses(side, price, best) => {
                self.match_incoming(order_id, side, ledger)
            }
            _ => {
                debug!(order_id = %order_id, ?side, %price, "order rested");
                SubmitOutcome::Rested
            }
        }
    }

    /// Settle the incoming (taker) order against the best resting order
    /// on the opposite side
    fn match_incoming(
        &mut self,
        taker_id: OrderId,
        taker_side: Side,
        ledger: &mut dyn PositionLedger,
    ) -> SubmitOutcome {
        let popped = match taker_side {
            Side::Buy => self.asks.pop_best(),
            Side::Sell => self.bids.pop_best(),
        };
        let Some(maker_id) = popped else {
            return SubmitOutcome::Rested;
        };

        let Some(mut maker) = self.orders.remove(&maker_id) else {
            debug!(order_id = %maker_id, "dropping queue entry with no stored order");
            return SubmitOutcome::Rested;
        };

        if maker.pending_shares == 0 {
            // An order filled while resting in its own queue; its stale
            // entry surfaces here and is discarded without a retry.
            debug!(order_id = %maker_id, "discarding closed resting order");
            self.orders.insert(maker_id, maker);
            return SubmitOutcome::Rested;
        }

        let Some(mut taker) = self.orders.remove(&taker_id) else {
            debug!(order_id = %taker_id, "incoming order missing from store");
            self.requeue(&maker);
            self.orders.insert(maker_id, maker);
            return SubmitOutcome::Rested;
        };

        // Quantity and price follow the taker; settlement narrows the
        // quantity to the matched minimum.
        let mut transaction = match taker_side {
            Side::Buy => Transaction::new(
                maker.order_id,
                taker.order_id,
                taker.original_shares,
                taker.limit_price,
            ),
            Side::Sell => Transaction::new(
                taker.order_id,
                maker.order_id,
                taker.original_shares,
                taker.limit_price,
            ),
        };

        let settled = match taker_side {
            Side::Buy => settlement::settle(&mut maker, &mut taker, &mut transaction, ledger),
            Side::Sell => settlement::settle(&mut taker, &mut maker, &mut transaction, ledger),
        };

        if let Err(error) = settled {
            warn!(
                maker_id = %maker.order_id,
                taker_id = %taker.order_id,
                %error,
                "settlement refused; requeuing resting order"
            );
            self.requeue(&maker);
            self.orders.insert(maker.order_id, maker);
            self.orders.insert(taker.order_id, taker);
            return SubmitOutcome::MatchFailed(error);
        }

        if maker.pending_shares > 0 {
            self.requeue(&maker);
        }

        let outcome = SubmitOutcome::Matched {
            transaction: transaction.clone(),
            maker: maker.clone(),
            taker: taker.clone(),
        };

        self.orders.insert(maker.order_id, maker);
        self.orders.insert(taker.order_id, taker);
        self.transactions.push(transaction);

        outcome
    }

    /// Put a resting order's reference back into its side's queue
    fn requeue(&mut self, order: &Order) {
        match order.side {
            Side::Buy => self.bids.insert(order.order_id, order.limit_price),
            Side::Sell => self.asks.insert(order.order_id, order.limit_price),
        }
    }

    /// Drive the matching loop over the order streams
    ///
    /// Consumes inbound orders until the channel closes. After every
    /// successful match, one completion unit is signalled and both
    /// participants are emitted (maker first) on the bounded outbound
    /// channel — a full buffer blocks the loop and backpressure reaches
    /// the feeder. Dropping the outbound sender on exit closes the stream
    /// for downstream consumers.
    ///
    /// Returns the final book and ledger state once the inbound stream
    /// closes or the outbound receiver goes away.
    pub async fn run<L: PositionLedger + Send>(
        mut self,
        mut orders_in: mpsc::Receiver<Order>,
        orders_out: mpsc::Sender<Order>,
        completion: CompletionHandle,
        mut ledger: L,
    ) -> (Self, L) {
        while let Some(order) = orders_in.recv().await {
            match self.process(order, &mut ledger) {
                SubmitOutcome::Matched {
                    transaction,
                    maker,
                    taker,
                } => {
                    debug!(
                        transaction_id = %transaction.transaction_id,
                        shares = transaction.shares,
                        "match executed"
                    );
                    completion.signal_one();

                    if orders_out.send(maker).await.is_err()
                        || orders_out.send(taker).await.is_err()
                    {
                        warn!("outbound stream closed; stopping matching loop");
                        break;
                    }
                }
                SubmitOutcome::Rested => {}
                SubmitOutcome::Rejected(reason) => {
                    warn!(?reason, "order rejected");
                }
                SubmitOutcome::MatchFailed(error) => {
                    warn!(%error, "match attempt failed");
                }
            }
        }

        debug!(
            orders = self.orders.len(),
            transactions = self.transactions.len(),
            "matching loop terminated"
        );

        (self, ledger)
    }

    /// Look up an order by id
    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Finalized transactions in creation order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of resting bid references
    pub fn bid_depth(&self) -> usize {
        self.bids.len()
    }

    /// Number of resting ask references
    pub fn ask_depth(&self) -> usize {
        self.asks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchbook_types::ids::{AssetId, InvestorId};
    use matchbook_types::numeric::Price;
    use matchbook_types::order::OrderStatus;
    use rust_decimal::Decimal;

    use crate::ledger::InMemoryPositions;

    fn order(side: Side, price: u64, shares: u64) -> Order {
        Order::new(
            InvestorId::new(),
            AssetId::new("PETR4"),
            side,
            Price::from_u64(price),
            shares,
        )
    }

    #[test]
    fn test_unmatched_order_rests() {
        // Scenario: incoming BUY @ 5 with no resting ask priced <= 5.
        let mut book = Book::new();
        let mut ledger = InMemoryPositions::new();

        let sell = order(Side::Sell, 6, 100);
        assert_eq!(book.process(sell, &mut ledger), SubmitOutcome::Rested);

        let buy = order(Side::Buy, 5, 100);
        assert_eq!(book.process(buy, &mut ledger), SubmitOutcome::Rested);

        assert!(book.transactions().is_empty());
        assert_eq!(book.bid_depth(), 1);
        assert_eq!(book.ask_depth(), 1);
    }

    #[test]
    fn test_partial_fill_reinserts_maker() {
        // Scenario: SELL 100 @ 10 rests; BUY 60 @ 10 crosses it.
        let mut book = Book::new();
        let mut ledger = InMemoryPositions::new();

        let sell = order(Side::Sell, 10, 100);
        let sell_id = sell.order_id;
        assert_eq!(book.process(sell, &mut ledger), SubmitOutcome::Rested);

        let buy = order(Side::Buy, 10, 60);
        let buy_id = buy.order_id;
        let outcome = book.process(buy, &mut ledger);

        let SubmitOutcome::Matched {
            transaction,
            maker,
            taker,
        } = outcome
        else {
            panic!("expected a match");
        };

        assert_eq!(transaction.shares, 60);
        assert_eq!(transaction.execution_price, Price::from_u64(10));
        assert_eq!(transaction.total, Decimal::from(600));
        assert_eq!(transaction.selling_order_id, sell_id);
        assert_eq!(transaction.buying_order_id, buy_id);

        assert_eq!(maker.order_id, sell_id);
        assert_eq!(maker.pending_shares, 40);
        assert_eq!(maker.status, OrderStatus::Open);

        assert_eq!(taker.order_id, buy_id);
        assert_eq!(taker.pending_shares, 0);
        assert_eq!(taker.status, OrderStatus::Closed);

        // Maker is back in the ask queue with its remainder.
        assert_eq!(book.ask_depth(), 1);
        assert_eq!(book.transactions().len(), 1);
    }

    #[test]
    fn test_ask_side_price_priority() {
        // Scenario: resting asks at 9 and 8; incoming BUY @ 10 must match
        // the 8, not the 9.
        let mut book = Book::new();
        let mut ledger = InMemoryPositions::new();

        book.process(order(Side::Sell, 9, 50), &mut ledger);
        let cheap = order(Side::Sell, 8, 50);
        let cheap_id = cheap.order_id;
        book.process(cheap, &mut ledger);

        let outcome = book.process(order(Side::Buy, 10, 50), &mut ledger);
        let SubmitOutcome::Matched { transaction, .. } = outcome else {
            panic!("expected a match");
        };

        assert_eq!(transaction.selling_order_id, cheap_id);
    }

    #[test]
    fn test_bid_side_price_priority() {
        // Highest resting bid matches first.
        let mut book = Book::new();
        let mut ledger = InMemoryPositions::new();

        book.process(order(Side::Buy, 9, 50), &mut ledger);
        let best = order(Side::Buy, 11, 50);
        let best_id = best.order_id;
        book.process(best, &mut ledger);

        let outcome = book.process(order(Side::Sell, 9, 50), &mut ledger);
        let SubmitOutcome::Matched { transaction, .. } = outcome else {
            panic!("expected a match");
        };

        assert_eq!(transaction.buying_order_id, best_id);
    }

    #[test]
    fn test_incoming_sell_total_uses_buyer_price() {
        let mut book = Book::new();
        let mut ledger = InMemoryPositions::new();

        book.process(order(Side::Buy, 10, 50), &mut ledger);
        let outcome = book.process(order(Side::Sell, 9, 50), &mut ledger);

        let SubmitOutcome::Matched { transaction, .. } = outcome else {
            panic!("expected a match");
        };

        // Taker's price stamps the execution, buyer's price sets the total.
        assert_eq!(transaction.execution_price, Price::from_u64(9));
        assert_eq!(transaction.total, Decimal::from(500));
    }

    #[test]
    fn test_zero_share_order_rejected() {
        let mut book = Book::new();
        let mut ledger = InMemoryPositions::new();

        let outcome = book.process(order(Side::Buy, 10, 0), &mut ledger);
        assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::NoShares));
        assert_eq!(book.bid_depth(), 0);
    }

    #[test]
    fn test_asset_mismatch_requeues_maker() {
        let mut book = Book::new();
        let mut ledger = InMemoryPositions::new();

        let sell = order(Side::Sell, 10, 100);
        let sell_id = sell.order_id;
        book.process(sell, &mut ledger);

        let buy = Order::new(
            InvestorId::new(),
            AssetId::new("VALE3"),
            Side::Buy,
            Price::from_u64(10),
            60,
        );
        let outcome = book.process(buy, &mut ledger);

        assert!(matches!(outcome, SubmitOutcome::MatchFailed(_)));
        // Resting order requeued unchanged, nothing settled.
        assert_eq!(book.ask_depth(), 1);
        assert_eq!(book.order(&sell_id).unwrap().pending_shares, 100);
        assert!(book.transactions().is_empty());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_closed_order_in_queue_is_skipped() {
        // A fully filled taker stays in its own queue; a later crossing
        // pop must skip it without settling or retrying.
        let mut book = Book::new();
        let mut ledger = InMemoryPositions::new();

        book.process(order(Side::Sell, 10, 60), &mut ledger);
        let buy = order(Side::Buy, 10, 60);
        let buy_id = buy.order_id;
        let outcome = book.process(buy, &mut ledger);
        assert!(matches!(outcome, SubmitOutcome::Matched { .. }));

        // The closed buy order is still the only bid queue entry.
        assert_eq!(book.bid_depth(), 1);

        let outcome = book.process(order(Side::Sell, 10, 40), &mut ledger);
        assert_eq!(outcome, SubmitOutcome::Rested);
        assert_eq!(book.transactions().len(), 1);
        assert_eq!(book.order(&buy_id).unwrap().status, OrderStatus::Closed);
    }

    #[test]
    fn test_orders_record_their_transactions() {
        let mut book = Book::new();
        let mut ledger = InMemoryPositions::new();

        let sell = order(Side::Sell, 10, 100);
        let sell_id = sell.order_id;
        book.process(sell, &mut ledger);
        book.process(order(Side::Buy, 10, 60), &mut ledger);
        book.process(order(Side::Buy, 10, 40), &mut ledger);

        let resting = book.order(&sell_id).unwrap();
        assert_eq!(resting.transactions.len(), 2);
        assert_eq!(resting.status, OrderStatus::Closed);
        assert_eq!(book.transactions().len(), 2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// An incoming crossable buy always matches the lowest-priced
            /// resting ask.
            #[test]
            fn buy_matches_lowest_ask(
                ask_prices in proptest::collection::vec(1u64..100, 1..20),
            ) {
                let mut book = Book::new();
                let mut ledger = InMemoryPositions::new();

                let mut lowest = u64::MAX;
                for price in &ask_prices {
                    book.process(order(Side::Sell, *price, 10), &mut ledger);
                    lowest = lowest.min(*price);
                }

                let outcome = book.process(order(Side::Buy, 100, 10), &mut ledger);
                match outcome {
                    SubmitOutcome::Matched { maker, .. } => {
                        prop_assert_eq!(maker.limit_price, Price::from_u64(lowest));
                    }
                    other => prop_assert!(false, "expected a match, got {:?}", other),
                }
            }
        }
    }
}
