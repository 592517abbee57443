//! In-memory store with an atomic settlement commit.

use std::collections::HashMap;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use swap_core::{AssetId, EstimateId, PriceEstimate, Settlement, SettlementId, UserId};

/// One balance mutation inside a settlement commit, scoped to the
/// settling user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceChange {
    pub asset: AssetId,
    pub amount: Decimal,
}

impl BalanceChange {
    pub fn new(asset: AssetId, amount: Decimal) -> Self {
        Self { asset, amount }
    }
}

#[derive(Default)]
struct StoreInner {
    estimates: HashMap<EstimateId, PriceEstimate>,
    settlements: HashMap<SettlementId, Settlement>,
    /// Uniqueness index: estimate -> the settlement that consumed it.
    settled_estimates: HashMap<EstimateId, SettlementId>,
    balances: HashMap<(UserId, AssetId), Decimal>,
}

/// Estimate, settlement and balance storage.
///
/// All state sits behind one lock. That is deliberate: the settlement
/// commit must observe and mutate the settlement index and two balance
/// rows as a single unit, and per-key locking would reintroduce the
/// check-then-act race between the balance check and the debit.
#[derive(Default)]
pub struct SwapStore {
    inner: Mutex<StoreInner>,
}

impl SwapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a freshly issued estimate.
    pub fn insert_estimate(&self, estimate: PriceEstimate) {
        debug!(estimate_id = %estimate.id, user = %estimate.user_id, "Storing estimate");
        self.inner.lock().estimates.insert(estimate.id, estimate);
    }

    /// Fetch an estimate scoped to its owner.
    ///
    /// Returns `None` for unknown ids and for estimates owned by a
    /// different user; callers cannot distinguish the two.
    pub fn estimate_for_user(&self, id: EstimateId, user: &UserId) -> Option<PriceEstimate> {
        let inner = self.inner.lock();
        inner
            .estimates
            .get(&id)
            .filter(|e| &e.user_id == user)
            .cloned()
    }

    /// Whether a settlement already references this estimate.
    ///
    /// Advisory: the authoritative check runs again inside
    /// [`commit_settlement`](Self::commit_settlement).
    pub fn is_settled(&self, estimate_id: EstimateId) -> bool {
        self.inner.lock().settled_estimates.contains_key(&estimate_id)
    }

    /// Fetch a settlement by id.
    pub fn settlement(&self, id: SettlementId) -> Option<Settlement> {
        self.inner.lock().settlements.get(&id).cloned()
    }

    /// Fetch the settlement consuming an estimate, if any.
    pub fn settlement_for_estimate(&self, estimate_id: EstimateId) -> Option<Settlement> {
        let inner = self.inner.lock();
        let settlement_id = inner.settled_estimates.get(&estimate_id)?;
        inner.settlements.get(settlement_id).cloned()
    }

    /// Current balance, zero when the row does not exist.
    pub fn balance(&self, user: &UserId, asset: &AssetId) -> Decimal {
        self.inner
            .lock()
            .balances
            .get(&(user.clone(), asset.clone()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Credit a balance outside of settlement (seeding, deposits).
    pub fn credit(&self, user: &UserId, asset: &AssetId, amount: Decimal) -> StoreResult<()> {
        if amount < Decimal::ZERO {
            return Err(StoreError::InvalidMutation(format!(
                "credit of {amount} {asset}"
            )));
        }
        let mut inner = self.inner.lock();
        *inner
            .balances
            .entry((user.clone(), asset.clone()))
            .or_insert(Decimal::ZERO) += amount;
        Ok(())
    }

    /// Commit a settlement: record it and move balances, atomically.
    ///
    /// One critical section covers, in order:
    /// 1. estimate uniqueness — fails `AlreadySettled` if any settlement
    ///    already references `settlement.estimate_id`
    /// 2. conditional debit — fails `InsufficientFunds` unless the
    ///    user's `debit.asset` balance covers `debit.amount`
    /// 3. the debit, the credit, and the settlement insert
    ///
    /// Nothing is mutated unless every check passes, so a failed commit
    /// leaves the store exactly as it was. Two concurrent commits for
    /// the same estimate serialize on the lock; exactly one succeeds.
    pub fn commit_settlement(
        &self,
        settlement: Settlement,
        debit: BalanceChange,
        credit: BalanceChange,
    ) -> StoreResult<()> {
        if debit.amount < Decimal::ZERO || credit.amount < Decimal::ZERO {
            return Err(StoreError::InvalidMutation(
                "negative settlement amounts".to_string(),
            ));
        }
        if debit.asset == credit.asset {
            return Err(StoreError::InvalidMutation(format!(
                "debit and credit on the same asset {asset}",
                asset = debit.asset
            )));
        }

        let user = settlement.user_id.clone();
        let mut inner = self.inner.lock();

        if inner.settled_estimates.contains_key(&settlement.estimate_id) {
            return Err(StoreError::AlreadySettled(settlement.estimate_id));
        }

        let debit_key = (user.clone(), debit.asset.clone());
        let available = inner
            .balances
            .get(&debit_key)
            .copied()
            .unwrap_or(Decimal::ZERO);
        if available < debit.amount {
            return Err(StoreError::InsufficientFunds(debit.asset));
        }

        // Checks done; apply everything.
        *inner.balances.entry(debit_key).or_insert(Decimal::ZERO) -= debit.amount;
        *inner
            .balances
            .entry((user.clone(), credit.asset.clone()))
            .or_insert(Decimal::ZERO) += credit.amount;
        inner
            .settled_estimates
            .insert(settlement.estimate_id, settlement.id);

        info!(
            settlement_id = %settlement.id,
            estimate_id = %settlement.estimate_id,
            user = %user,
            total = %settlement.total,
            "Settlement committed"
        );
        inner.settlements.insert(settlement.id, settlement);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn settlement(estimate_id: EstimateId, user: &UserId) -> Settlement {
        Settlement {
            id: SettlementId::generate(),
            estimate_id,
            user_id: user.clone(),
            order_ref: "1".to_string(),
            executed_subtotal: dec!(200),
            fee: dec!(0.2),
            spread: dec!(2),
            total: dec!(202.2),
            created_at: Utc::now(),
        }
    }

    fn usdt() -> AssetId {
        AssetId::new("USDT")
    }

    fn btc() -> AssetId {
        AssetId::new("BTC")
    }

    #[test]
    fn test_commit_moves_both_balances() {
        let store = SwapStore::new();
        let user = UserId::from("u1");
        store.credit(&user, &usdt(), dec!(1000)).unwrap();

        let estimate_id = EstimateId::generate();
        store
            .commit_settlement(
                settlement(estimate_id, &user),
                BalanceChange::new(usdt(), dec!(202.2)),
                BalanceChange::new(btc(), dec!(2)),
            )
            .unwrap();

        assert_eq!(store.balance(&user, &usdt()), dec!(797.8));
        assert_eq!(store.balance(&user, &btc()), dec!(2));
        assert!(store.is_settled(estimate_id));
        assert!(store.settlement_for_estimate(estimate_id).is_some());
    }

    #[test]
    fn test_commit_refuses_second_settlement_for_estimate() {
        let store = SwapStore::new();
        let user = UserId::from("u1");
        store.credit(&user, &usdt(), dec!(1000)).unwrap();

        let estimate_id = EstimateId::generate();
        let debit = BalanceChange::new(usdt(), dec!(100));
        let credit = BalanceChange::new(btc(), dec!(1));

        store
            .commit_settlement(settlement(estimate_id, &user), debit.clone(), credit.clone())
            .unwrap();
        let err = store
            .commit_settlement(settlement(estimate_id, &user), debit, credit)
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadySettled(id) if id == estimate_id));

        // First commit's effects are intact.
        assert_eq!(store.balance(&user, &usdt()), dec!(900));
        assert_eq!(store.balance(&user, &btc()), dec!(1));
    }

    #[test]
    fn test_insufficient_funds_leaves_store_unchanged() {
        let store = SwapStore::new();
        let user = UserId::from("u1");
        store.credit(&user, &usdt(), dec!(100)).unwrap();

        let estimate_id = EstimateId::generate();
        let err = store
            .commit_settlement(
                settlement(estimate_id, &user),
                BalanceChange::new(usdt(), dec!(202.2)),
                BalanceChange::new(btc(), dec!(2)),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::InsufficientFunds(a) if a == usdt()));

        assert_eq!(store.balance(&user, &usdt()), dec!(100));
        assert_eq!(store.balance(&user, &btc()), dec!(0));
        assert!(!store.is_settled(estimate_id));
    }

    #[test]
    fn test_missing_balance_row_is_zero() {
        let store = SwapStore::new();
        let user = UserId::from("nobody");
        assert_eq!(store.balance(&user, &usdt()), dec!(0));
    }

    #[test]
    fn test_concurrent_commits_one_winner() {
        let store = Arc::new(SwapStore::new());
        let user = UserId::from("u1");
        store.credit(&user, &usdt(), dec!(10000)).unwrap();
        let estimate_id = EstimateId::generate();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let user = user.clone();
                std::thread::spawn(move || {
                    store.commit_settlement(
                        settlement(estimate_id, &user),
                        BalanceChange::new(usdt(), dec!(100)),
                        BalanceChange::new(btc(), dec!(1)),
                    )
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        // Exactly one debit applied.
        assert_eq!(store.balance(&user, &usdt()), dec!(9900));
        assert_eq!(store.balance(&user, &btc()), dec!(1));
    }

    #[test]
    fn test_concurrent_debits_never_go_negative() {
        // Two settlements for different estimates racing on one funded
        // balance: the conditional debit admits only what fits.
        let store = Arc::new(SwapStore::new());
        let user = UserId::from("u1");
        store.credit(&user, &usdt(), dec!(150)).unwrap();

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let store = store.clone();
                let user = user.clone();
                std::thread::spawn(move || {
                    store.commit_settlement(
                        settlement(EstimateId::generate(), &user),
                        BalanceChange::new(usdt(), dec!(100)),
                        BalanceChange::new(btc(), dec!(1)),
                    )
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert_eq!(store.balance(&user, &usdt()), dec!(50));
    }

    #[test]
    fn test_invalid_mutations_rejected() {
        let store = SwapStore::new();
        let user = UserId::from("u1");
        assert!(matches!(
            store.credit(&user, &usdt(), dec!(-1)),
            Err(StoreError::InvalidMutation(_))
        ));
        let err = store
            .commit_settlement(
                settlement(EstimateId::generate(), &user),
                BalanceChange::new(usdt(), dec!(1)),
                BalanceChange::new(usdt(), dec!(1)),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidMutation(_)));
    }

    #[test]
    fn test_estimate_owner_scoping() {
        use swap_core::{PriceEstimate, Side};

        let store = SwapStore::new();
        let owner = UserId::from("owner");
        let estimate = PriceEstimate {
            id: EstimateId::generate(),
            user_id: owner.clone(),
            symbol: "BTCUSDT".to_string(),
            side: Side::Buy,
            volume: dec!(1),
            subtotal: dec!(100),
            spread: dec!(1),
            fee: dec!(0.1),
            price: dec!(101.1),
            created_at: Utc::now(),
            expires_at: Utc::now(),
        };
        let id = estimate.id;
        store.insert_estimate(estimate);

        assert!(store.estimate_for_user(id, &owner).is_some());
        assert!(store.estimate_for_user(id, &UserId::from("other")).is_none());
        assert!(store
            .estimate_for_user(EstimateId::generate(), &owner)
            .is_none());
    }
}
