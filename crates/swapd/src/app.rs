//! Application wiring and simulation loop.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, warn};

use swap_core::{AssetId, BookLevel, DepthSnapshot, UserId};
use swap_engine::{SwapService, SwapServiceConfig};
use swap_registry::PairRegistry;
use swap_store::{SettlementJournal, SwapStore};
use swap_venue::{DynDepthProvider, DynExecutionProvider, MockVenue, VenueRestClient, VenueRestConfig};

use crate::config::{AppConfig, VenueMode};
use crate::error::AppResult;

/// Wired application: registry, store, venue and service.
pub struct Application {
    config: AppConfig,
    service: SwapService,
    store: Arc<SwapStore>,
    user: UserId,
}

impl Application {
    /// Build collaborators from configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let registry = Arc::new(PairRegistry::new(config.trading_pairs())?);
        let store = Arc::new(SwapStore::new());

        let (depth, execution): (DynDepthProvider, DynExecutionProvider) = match config.venue.mode {
            VenueMode::Mock => {
                let venue = Arc::new(MockVenue::new());
                seed_books(&venue, &registry);
                (venue.clone(), venue)
            }
            VenueMode::Rest => {
                let mut rest_config = VenueRestConfig::new(config.venue.base_url.clone());
                rest_config.api_key = config.api_key();
                let client = Arc::new(VenueRestClient::new(rest_config)?);
                (client.clone(), client)
            }
        };

        let user = UserId::new(config.simulation.user.clone());
        seed_balances(&store, &registry, &user, config.simulation.seed_balance)?;

        let mut service = SwapService::new(
            registry,
            depth,
            execution,
            store.clone(),
            SwapServiceConfig {
                validity_window: Duration::from_secs(config.engine.validity_window_secs),
                depth_limit: config.engine.depth_limit,
            },
        );
        if let Some(journal) = &config.journal {
            service = service.with_journal(SettlementJournal::new(&journal.dir)?);
        }

        Ok(Self {
            config,
            service,
            store,
            user,
        })
    }

    /// Run the scripted trades: quote each, then settle (mock mode).
    pub async fn run(&self) -> AppResult<()> {
        let settable = self.config.venue.mode == VenueMode::Mock;
        if !settable {
            info!("REST mode: quoting only, settlement skipped");
        }

        for trade in &self.config.simulation.trades {
            let quote = match self
                .service
                .quote(&trade.symbol, trade.side, trade.volume, &self.user)
                .await
            {
                Ok(quote) => quote,
                Err(e) => {
                    warn!(symbol = %trade.symbol, error = %e, "Quote failed");
                    continue;
                }
            };
            info!(
                symbol = %trade.symbol,
                side = %trade.side,
                volume = %trade.volume,
                price = %quote.price,
                expires = %quote.expires,
                "Quoted"
            );

            if !settable {
                continue;
            }

            match self.service.settle(quote.estimate_id, &self.user).await {
                Ok(receipt) => info!(
                    settlement_id = %receipt.settlement_id,
                    total = %receipt.total,
                    "Settled"
                ),
                Err(e) => warn!(estimate_id = %quote.estimate_id, error = %e, "Settle failed"),
            }
        }

        self.log_balances();
        Ok(())
    }

    fn log_balances(&self) {
        let assets: std::collections::BTreeSet<AssetId> = self
            .config
            .trading_pairs()
            .into_iter()
            .flat_map(|p| [p.base, p.quote])
            .collect();
        for asset in assets {
            info!(user = %self.user, %asset, balance = %self.store.balance(&self.user, &asset), "Balance");
        }
    }
}

/// Credit the simulation user with a starting balance per asset.
fn seed_balances(
    store: &SwapStore,
    registry: &PairRegistry,
    user: &UserId,
    amount: Decimal,
) -> AppResult<()> {
    let mut seeded = std::collections::BTreeSet::new();
    for pair in registry.iter() {
        for asset in [&pair.base, &pair.quote] {
            if seeded.insert(asset.clone()) {
                store.credit(user, asset, amount)?;
            }
        }
    }
    Ok(())
}

/// Deterministic synthetic book per registered pair for mock mode.
fn seed_books(venue: &MockVenue, registry: &PairRegistry) {
    let mid = dec!(100);
    let snapshot = DepthSnapshot {
        asks: vec![
            BookLevel::new(mid + dec!(0.5), dec!(5)),
            BookLevel::new(mid + dec!(1), dec!(10)),
            BookLevel::new(mid + dec!(2), dec!(25)),
        ],
        bids: vec![
            BookLevel::new(mid - dec!(0.5), dec!(5)),
            BookLevel::new(mid - dec!(1), dec!(10)),
            BookLevel::new(mid - dec!(2), dec!(25)),
        ],
    };
    for pair in registry.iter() {
        venue.set_depth(pair.venue_symbol(), snapshot.clone());
    }
}
