//! Orchestrator loop
//!
//! One logical control loop: fetch prices, update history, score, decide,
//! apply, persist, emit. A tick always runs to completion before the next
//! one starts, so rotation state and the paper position are never mutated
//! re-entrantly. Manual commands are drained between ticks on a channel.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::asset::Asset;
use crate::broker::PaperBroker;
use crate::config::Config;
use crate::cost::CostModel;
use crate::engine::{Decision, DecisionEngine, EngineParams, RotationState};
use crate::feed::PriceFeed;
use crate::history::PriceHistory;
use crate::score::{build_leaderboard, Scorer};
use crate::sink::DecisionSink;
use crate::store::{DecisionRecord, Snapshot, Store};
use crate::telemetry::{increment_counter, set_gauge, CounterMetric, GaugeMetric};

/// Out-of-band operator commands, serialized with the tick loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sell everything into USDT at the next opportunity
    ParkToUsdt,
    /// Exclude an asset from leadership
    Blacklist(Asset),
}

/// The rotation orchestrator
///
/// Owns the authoritative `RotationState`, the price history, and the
/// paper broker. Everything else is injected.
pub struct Rotator<F: PriceFeed, S: Store> {
    universe: Vec<Asset>,
    feed: F,
    store: S,
    sink: Box<dyn DecisionSink>,
    history: PriceHistory,
    scorer: Scorer,
    engine: DecisionEngine,
    cost: CostModel,
    state: RotationState,
    broker: PaperBroker,
    tick_interval: std::time::Duration,
    data_stale: Duration,
    last_prices: HashMap<Asset, Decimal>,
    last_fetch_ok: Option<DateTime<Utc>>,
}

impl<F: PriceFeed, S: Store> Rotator<F, S> {
    /// Build the orchestrator, restoring prior state from the store if any
    pub fn new(
        config: &Config,
        feed: F,
        store: S,
        sink: Box<dyn DecisionSink>,
    ) -> anyhow::Result<Self> {
        let cost = CostModel::new(&config.costs);

        let (mut state, broker) = match store.load_state()? {
            Some(snapshot) => {
                tracing::info!(
                    held = snapshot.position.label(),
                    switches_today = snapshot.state.switches_today,
                    "Resuming from persisted state"
                );
                let broker = PaperBroker::resume(snapshot.position, cost.clone());
                (snapshot.state, broker)
            }
            None => {
                tracing::info!(
                    balance = %config.broker.starting_balance,
                    "No prior state, starting parked in USDT"
                );
                (
                    RotationState::parked(),
                    PaperBroker::new(config.broker.starting_balance, cost.clone()),
                )
            }
        };
        // The broker position is the source of truth for what is held
        state.held = broker.position().asset.clone();

        Ok(Self {
            universe: config.universe.assets(),
            feed,
            store,
            sink,
            history: PriceHistory::new(Duration::seconds(
                config.scoring.max_lookback_secs() as i64
            )),
            scorer: Scorer::new(&config.scoring),
            engine: DecisionEngine::new(EngineParams::from(&config.engine), cost.clone()),
            cost,
            state,
            broker,
            tick_interval: std::time::Duration::from_secs(config.feed.tick_interval_secs),
            data_stale: Duration::seconds(config.feed.data_stale_secs as i64),
            last_prices: HashMap::new(),
            last_fetch_ok: None,
        })
    }

    /// Run until shutdown
    ///
    /// Ticks and commands are serialized through one `select!`; a pending
    /// command waits for the in-flight tick to finish and vice versa.
    /// Shutdown only ever lands between ticks.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut shutdown: watch::Receiver<bool>,
    ) -> anyhow::Result<()> {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            universe = self.universe.len(),
            interval_secs = self.tick_interval.as_secs(),
            "Rotation loop started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick(Utc::now()).await?;
                }
                Some(command) = commands.recv() => {
                    self.handle_command(command)?;
                }
                _ = shutdown.changed() => {
                    tracing::info!("Shutdown requested, stopping between ticks");
                    break;
                }
            }
        }

        self.persist_snapshot()?;
        Ok(())
    }

    /// One full cycle: fetch, append, score, decide, apply, persist, emit
    async fn tick(&mut self, now: DateTime<Utc>) -> anyhow::Result<()> {
        // A manual park may have changed the position since last tick;
        // the broker is the truth the engine evaluates against.
        self.state.held = self.broker.position().asset.clone();

        let mut fetch_failed = false;
        match self.feed.fetch_last_prices(&self.universe).await {
            Ok(snapshot) => {
                for (asset, price) in &snapshot.prices {
                    if let Err(e) = self.history.append(asset, snapshot.fetched_at, *price) {
                        tracing::warn!(error = %e, "Sample rejected");
                        increment_counter(CounterMetric::StaleSamples);
                    }
                }
                self.last_prices = snapshot.prices;
                self.last_fetch_ok = Some(snapshot.fetched_at);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Price fetch failed, holding");
                increment_counter(CounterMetric::FeedErrors);
                fetch_failed = true;
            }
        }

        // Both legs of a switch must be priceable this tick: an unpriced
        // asset cannot lead, and an unpriced held position degrades the tick
        // so timers and the daily counter never charge for an untradable
        // switch.
        let held_unpriced = self
            .state
            .held
            .as_ref()
            .is_some_and(|asset| !self.last_prices.contains_key(asset));
        let stale = fetch_failed
            || held_unpriced
            || self
                .last_fetch_ok
                .map_or(true, |t| now - t > self.data_stale);

        let mut scores = self.scorer.score_all(&self.universe, &self.history, now);
        for score in scores.values_mut() {
            if !self.last_prices.contains_key(&score.asset) {
                score.eligible = false;
            }
        }
        let evaluation = self.engine.evaluate(&scores, &mut self.state, now, stale);

        if matches!(evaluation.decision, Decision::Switch { .. }) {
            self.broker.apply(&evaluation.decision, &self.last_prices);
            increment_counter(CounterMetric::Switches);
        }

        let equity = self.broker.equity(&self.last_prices);
        let held = self.broker.position().label().to_string();
        let record = DecisionRecord::from_evaluation(&evaluation, now, &held, equity);

        self.store.append_decision(&record)?;
        // The equity curve only ever contains marked-to-market points
        if let Some(equity) = equity {
            self.store.append_equity(now, &held, equity)?;
        }
        if matches!(evaluation.decision, Decision::Switch { .. }) {
            self.persist_snapshot()?;
        }

        set_gauge(GaugeMetric::SwitchesToday, self.state.switches_today as f64);
        set_gauge(GaugeMetric::ConfirmCount, evaluation.confirm_count as f64);

        let leaderboard = build_leaderboard(&scores, self.state.held.as_ref(), &self.cost);
        self.sink.publish(&record, &leaderboard);

        Ok(())
    }

    fn handle_command(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::ParkToUsdt => {
                self.broker.park_to_usdt(&self.last_prices);
                self.persist_snapshot()?;
            }
            Command::Blacklist(asset) => {
                tracing::info!(asset = %asset, "Asset blacklisted");
                self.state.blacklist.insert(asset);
            }
        }
        Ok(())
    }

    fn persist_snapshot(&mut self) -> anyhow::Result<()> {
        self.store.save_state(&Snapshot {
            state: self.state.clone(),
            position: self.broker.position().clone(),
        })
    }
}
