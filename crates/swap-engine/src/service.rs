//! The swap service: quote issuance and settlement.
//!
//! # Settlement check order (strict)
//!
//! 1. owner-scoped estimate fetch   → EstimateNotFound
//! 2. consumed pre-check            → AlreadySettled
//! 3. expiry (`now > expires_at`)   → EstimateExpired
//! 4. advisory funds check          → InsufficientFunds
//! 5. venue market order            → ExecutionFailed (nothing recorded)
//! 6. re-price on executed subtotal
//! 7. atomic store commit (uniqueness + conditional debit + credit)
//!
//! Steps 2 and 4 only fail fast before the irreversible venue call;
//! the store commit in step 7 re-validates both under its lock and is
//! the actual guarantee.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use swap_core::{
    EstimateId, PriceEstimate, Settlement, SettlementId, Side, TradingPair, UserId,
};
use swap_pricing::{price_with_fees, walk_book};
use swap_registry::PairRegistry;
use swap_store::{BalanceChange, SettlementJournal, StoreError, SwapStore};
use swap_venue::{DynDepthProvider, DynExecutionProvider};

use crate::error::{SwapError, SwapResult};

/// Tunables for the swap service.
#[derive(Debug, Clone)]
pub struct SwapServiceConfig {
    /// How long an estimate stays settleable.
    pub validity_window: Duration,
    /// Depth levels requested per snapshot.
    pub depth_limit: u32,
}

impl Default for SwapServiceConfig {
    fn default() -> Self {
        Self {
            validity_window: Duration::from_secs(30),
            depth_limit: 1000,
        }
    }
}

/// Outcome of a successful quote.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct QuoteReceipt {
    pub estimate_id: EstimateId,
    /// User-facing price for the requested volume.
    pub price: Decimal,
    pub expires: chrono::DateTime<Utc>,
}

/// Outcome of a successful settlement.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SettlementReceipt {
    pub settlement_id: SettlementId,
    /// Final settled amount, computed from the executed subtotal.
    pub total: Decimal,
}

/// Orchestrates quoting and settlement over injected collaborators.
pub struct SwapService {
    registry: Arc<PairRegistry>,
    depth: DynDepthProvider,
    execution: DynExecutionProvider,
    store: Arc<SwapStore>,
    journal: Option<Mutex<SettlementJournal>>,
    config: SwapServiceConfig,
}

impl SwapService {
    pub fn new(
        registry: Arc<PairRegistry>,
        depth: DynDepthProvider,
        execution: DynExecutionProvider,
        store: Arc<SwapStore>,
        config: SwapServiceConfig,
    ) -> Self {
        Self {
            registry,
            depth,
            execution,
            store,
            journal: None,
            config,
        }
    }

    /// Attach a settlement journal.
    #[must_use]
    pub fn with_journal(mut self, journal: SettlementJournal) -> Self {
        self.journal = Some(Mutex::new(journal));
        self
    }

    /// Issue a time-bounded price estimate for `volume` of `symbol`.
    ///
    /// Walks a live depth snapshot (asks for Buy, bids for Sell),
    /// applies the pair's fee/spread policy and persists the estimate
    /// with `expires = now + validity_window`.
    pub async fn quote(
        &self,
        symbol: &str,
        side: Side,
        volume: Decimal,
        user: &UserId,
    ) -> SwapResult<QuoteReceipt> {
        let pair = self
            .registry
            .pair(symbol)
            .ok_or_else(|| SwapError::PairNotFound(symbol.to_string()))?;

        let snapshot = self
            .depth
            .depth(pair.venue_symbol(), self.config.depth_limit)
            .await
            .map_err(SwapError::DepthUnavailable)?;

        let subtotal = walk_book(snapshot.ladder_for(side), volume).ok_or_else(|| {
            SwapError::InsufficientLiquidity {
                symbol: symbol.to_string(),
                volume,
            }
        })?;

        if subtotal < pair.notional {
            return Err(SwapError::NotionalTooLow {
                subtotal,
                notional: pair.notional,
            });
        }

        let priced = price_with_fees(subtotal, pair.fee_percentage, pair.spread_percentage, side);

        let now = Utc::now();
        let estimate = PriceEstimate {
            id: EstimateId::generate(),
            user_id: user.clone(),
            symbol: pair.symbol.clone(),
            side,
            volume,
            subtotal,
            spread: priced.spread,
            fee: priced.fee,
            price: priced.total,
            created_at: now,
            expires_at: now + chrono::Duration::from_std(self.config.validity_window)
                .map_err(|e| SwapError::Internal(format!("validity window: {e}")))?,
        };

        info!(
            estimate_id = %estimate.id,
            symbol,
            %side,
            %volume,
            %subtotal,
            price = %priced.total,
            "Issued price estimate"
        );
        let receipt = QuoteReceipt {
            estimate_id: estimate.id,
            price: estimate.price,
            expires: estimate.expires_at,
        };
        self.store.insert_estimate(estimate);
        Ok(receipt)
    }

    /// Settle an estimate: execute at the venue and apply the ledger
    /// mutation, exactly once per estimate.
    pub async fn settle(
        &self,
        estimate_id: EstimateId,
        user: &UserId,
    ) -> SwapResult<SettlementReceipt> {
        let estimate = self
            .store
            .estimate_for_user(estimate_id, user)
            .ok_or(SwapError::EstimateNotFound(estimate_id))?;

        if self.store.is_settled(estimate_id) {
            return Err(SwapError::AlreadySettled(estimate_id));
        }
        if estimate.is_expired(Utc::now()) {
            debug!(%estimate_id, expires_at = %estimate.expires_at, "Estimate expired");
            return Err(SwapError::EstimateExpired(estimate_id));
        }

        // A stored estimate always references registered reference
        // data; a miss here is a broken record, not user error.
        let pair = self.registry.pair(&estimate.symbol).ok_or_else(|| {
            SwapError::Internal(format!(
                "estimate {estimate_id} references unknown pair {symbol}",
                symbol = estimate.symbol
            ))
        })?;

        self.check_funds(&estimate, pair, user)?;

        let report = self
            .execution
            .place_market_order(pair.venue_symbol(), estimate.side, estimate.volume)
            .await
            .map_err(SwapError::ExecutionFailed)?;

        // Always re-price on what actually executed; the venue fill may
        // have slipped from the quoted snapshot.
        let priced = price_with_fees(
            report.executed_subtotal,
            pair.fee_percentage,
            pair.spread_percentage,
            estimate.side,
        );

        let settlement = Settlement {
            id: SettlementId::generate(),
            estimate_id,
            user_id: user.clone(),
            order_ref: report.order_ref,
            executed_subtotal: report.executed_subtotal,
            fee: priced.fee,
            spread: priced.spread,
            total: priced.total,
            created_at: Utc::now(),
        };

        let (debit, credit) = match estimate.side {
            Side::Buy => (
                BalanceChange::new(pair.quote.clone(), priced.total),
                BalanceChange::new(pair.base.clone(), estimate.volume),
            ),
            Side::Sell => (
                BalanceChange::new(pair.base.clone(), estimate.volume),
                BalanceChange::new(pair.quote.clone(), priced.total),
            ),
        };

        let receipt = SettlementReceipt {
            settlement_id: settlement.id,
            total: settlement.total,
        };
        self.store
            .commit_settlement(settlement.clone(), debit, credit)
            .map_err(|e| match e {
                StoreError::AlreadySettled(id) => SwapError::AlreadySettled(id),
                StoreError::InsufficientFunds(_) => SwapError::InsufficientFunds,
                other => SwapError::Internal(other.to_string()),
            })?;

        if let Some(journal) = &self.journal {
            if let Err(e) = journal.lock().append(&settlement) {
                // The commit is already durable in-store; the journal
                // line is lost. No reconciliation path exists for this.
                warn!(settlement_id = %settlement.id, error = %e, "Journal append failed");
            }
        }

        info!(
            settlement_id = %settlement.id,
            %estimate_id,
            order_ref = %settlement.order_ref,
            total = %settlement.total,
            "Swap settled"
        );
        Ok(receipt)
    }

    /// Advisory funds check before the irreversible venue call.
    ///
    /// A buyer must cover the quoted price in quote asset, a seller the
    /// requested volume in base asset. Passing here does not reserve
    /// anything; the commit re-checks under its lock.
    fn check_funds(
        &self,
        estimate: &PriceEstimate,
        pair: &TradingPair,
        user: &UserId,
    ) -> SwapResult<()> {
        let (asset, required) = match estimate.side {
            Side::Buy => (&pair.quote, estimate.price),
            Side::Sell => (&pair.base, estimate.volume),
        };
        let available = self.store.balance(user, asset);
        if available < required {
            debug!(%asset, %available, %required, "Advisory funds check failed");
            return Err(SwapError::InsufficientFunds);
        }
        Ok(())
    }

    /// Read access to the underlying store (balances, settlements).
    pub fn store(&self) -> &Arc<SwapStore> {
        &self.store
    }
}
