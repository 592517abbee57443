//! Depth and execution provider traits.
//!
//! Trait-based abstraction over the venue so that:
//! - the engine can be unit-tested against mock implementations
//! - transport details stay out of the settlement logic

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::error::{VenueError, VenueResult};
use swap_core::{DepthSnapshot, ExecutionReport, Side};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Provides depth-of-book snapshots, best price first on each side.
pub trait DepthProvider: Send + Sync {
    /// Fetch up to `limit` levels per side for `symbol`.
    fn depth(&self, symbol: &str, limit: u32) -> BoxFuture<'_, VenueResult<DepthSnapshot>>;
}

/// Places market orders at the venue.
///
/// Not idempotent: a failed or ambiguous call must never be retried
/// with a fresh order by this layer.
pub trait ExecutionProvider: Send + Sync {
    /// Place a market order for `quantity` of the base asset.
    fn place_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
    ) -> BoxFuture<'_, VenueResult<ExecutionReport>>;
}

/// Arc wrappers for trait objects.
pub type DynDepthProvider = Arc<dyn DepthProvider>;
pub type DynExecutionProvider = Arc<dyn ExecutionProvider>;

/// A market order recorded by [`MockVenue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedOrder {
    pub symbol: String,
    pub side: Side,
    pub quantity: Decimal,
}

/// In-memory venue for tests and simulation.
///
/// Serves configured depth snapshots per symbol and records every
/// placed order. Execution results are served from a configurable
/// queue; when the queue is empty the order fills at the best level
/// of the configured book times quantity.
#[derive(Default)]
pub struct MockVenue {
    books: Mutex<HashMap<String, DepthSnapshot>>,
    orders: Mutex<Vec<RecordedOrder>>,
    next_executions: Mutex<Vec<VenueResult<ExecutionReport>>>,
    order_seq: Mutex<u64>,
}

impl MockVenue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the depth snapshot served for `symbol`.
    pub fn set_depth(&self, symbol: impl Into<String>, snapshot: DepthSnapshot) {
        self.books.lock().insert(symbol.into(), snapshot);
    }

    /// Queue the result of the next `place_market_order` call.
    pub fn push_execution(&self, result: VenueResult<ExecutionReport>) {
        self.next_executions.lock().push(result);
    }

    /// Orders recorded so far.
    pub fn recorded_orders(&self) -> Vec<RecordedOrder> {
        self.orders.lock().clone()
    }

    fn default_fill(&self, symbol: &str, side: Side, quantity: Decimal) -> VenueResult<Decimal> {
        let books = self.books.lock();
        let book = books
            .get(symbol)
            .ok_or_else(|| VenueError::Rejected(format!("unknown symbol {symbol}")))?;
        let best = book
            .ladder_for(side)
            .first()
            .ok_or_else(|| VenueError::Rejected(format!("no liquidity for {symbol}")))?;
        Ok(best.price * quantity)
    }
}

impl DepthProvider for MockVenue {
    fn depth(&self, symbol: &str, _limit: u32) -> BoxFuture<'_, VenueResult<DepthSnapshot>> {
        let symbol = symbol.to_string();
        Box::pin(async move {
            self.books
                .lock()
                .get(&symbol)
                .cloned()
                .ok_or_else(|| VenueError::Rejected(format!("unknown symbol {symbol}")))
        })
    }
}

impl ExecutionProvider for MockVenue {
    fn place_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
    ) -> BoxFuture<'_, VenueResult<ExecutionReport>> {
        let symbol = symbol.to_string();
        Box::pin(async move {
            self.orders.lock().push(RecordedOrder {
                symbol: symbol.clone(),
                side,
                quantity,
            });

            if let Some(result) = {
                let mut queue = self.next_executions.lock();
                if queue.is_empty() {
                    None
                } else {
                    Some(queue.remove(0))
                }
            } {
                return result;
            }

            let executed_subtotal = self.default_fill(&symbol, side, quantity)?;
            let order_ref = {
                let mut seq = self.order_seq.lock();
                *seq += 1;
                format!("mock-{seq}", seq = *seq)
            };
            Ok(ExecutionReport {
                order_ref,
                executed_subtotal,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use swap_core::BookLevel;

    fn snapshot() -> DepthSnapshot {
        DepthSnapshot {
            asks: vec![BookLevel::new(dec!(101), dec!(5))],
            bids: vec![BookLevel::new(dec!(99), dec!(5))],
        }
    }

    #[tokio::test]
    async fn test_mock_serves_configured_depth() {
        let venue = MockVenue::new();
        venue.set_depth("BTCUSDT", snapshot());

        let depth = venue.depth("BTCUSDT", 1000).await.unwrap();
        assert_eq!(depth, snapshot());
        assert!(venue.depth("ETHUSDT", 1000).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_records_orders_and_fills_at_best() {
        let venue = MockVenue::new();
        venue.set_depth("BTCUSDT", snapshot());

        let report = venue
            .place_market_order("BTCUSDT", Side::Buy, dec!(2))
            .await
            .unwrap();
        assert_eq!(report.executed_subtotal, dec!(202));

        let orders = venue.recorded_orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].side, Side::Buy);
        assert_eq!(orders[0].quantity, dec!(2));
    }

    #[tokio::test]
    async fn test_mock_queued_execution_takes_priority() {
        let venue = MockVenue::new();
        venue.set_depth("BTCUSDT", snapshot());
        venue.push_execution(Err(VenueError::AmbiguousOutcome("timeout".to_string())));

        let err = venue
            .place_market_order("BTCUSDT", Side::Buy, dec!(1))
            .await
            .unwrap_err();
        assert!(matches!(err, VenueError::AmbiguousOutcome(_)));

        // Queue drained; next call falls back to the book.
        let report = venue
            .place_market_order("BTCUSDT", Side::Buy, dec!(1))
            .await
            .unwrap();
        assert_eq!(report.executed_subtotal, dec!(101));
    }
}
