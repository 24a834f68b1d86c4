//! Component integration tests: history -> scorer -> engine -> broker

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use momentum_rotator::asset::Asset;
use momentum_rotator::broker::{PaperBroker, Position};
use momentum_rotator::config::{EngineConfig, ScoringConfig};
use momentum_rotator::cost::CostModel;
use momentum_rotator::engine::{Decision, DecisionEngine, EngineParams, HoldReason, RotationState};
use momentum_rotator::history::PriceHistory;
use momentum_rotator::score::Scorer;

fn base_time() -> DateTime<Utc> {
    "2024-06-01T00:00:00Z".parse().unwrap()
}

fn engine() -> DecisionEngine {
    DecisionEngine::new(
        EngineParams::from(&EngineConfig::default()),
        CostModel::default(),
    )
}

/// Seed 4h+ of flat samples for each asset, every 5 minutes
fn warm_history(assets: &[&str], until: DateTime<Utc>) -> PriceHistory {
    let mut hist = PriceHistory::new(Duration::seconds(
        ScoringConfig::default().max_lookback_secs() as i64,
    ));
    for base in assets {
        let asset = Asset::new(*base);
        let mut ts = until - Duration::hours(4) - Duration::minutes(10);
        while ts <= until {
            hist.append(&asset, ts, dec!(100)).unwrap();
            ts += Duration::minutes(5);
        }
    }
    hist
}

fn prices(entries: &[(&str, Decimal)]) -> HashMap<Asset, Decimal> {
    entries
        .iter()
        .map(|(base, price)| (Asset::new(*base), *price))
        .collect()
}

#[test]
fn test_confirmed_rotation_with_round_trip_cost() {
    let warm_end = base_time() + Duration::hours(5);
    let mut hist = warm_history(&["AAA", "BBB"], warm_end);
    let scorer = Scorer::new(&ScoringConfig::default());
    let engine = engine();

    // Start holding AAA: 100 units at price 100
    let mut broker = PaperBroker::resume(
        Position {
            asset: Some(Asset::new("AAA")),
            quantity: dec!(100),
            cash_usdt: Decimal::ZERO,
        },
        CostModel::default(),
    );
    let mut state = RotationState {
        held: Some(Asset::new("AAA")),
        ..RotationState::parked()
    };

    let universe = vec![Asset::new("AAA"), Asset::new("BBB")];
    let snapshot = prices(&[("AAA", dec!(100)), ("BBB", dec!(100.8))]);
    let equity_before = broker.equity(&snapshot).unwrap();
    assert_eq!(equity_before, dec!(10000));

    // BBB breaks out 0.8%; three consecutive leading ticks required
    let mut now = warm_end + Duration::minutes(5);
    for tick in 1..=3u32 {
        hist.append(&Asset::new("AAA"), now, dec!(100)).unwrap();
        hist.append(&Asset::new("BBB"), now, dec!(100.8)).unwrap();

        let scores = scorer.score_all(&universe, &hist, now);
        let eval = engine.evaluate(&scores, &mut state, now, false);

        if tick < 3 {
            assert_eq!(eval.decision, Decision::Hold(HoldReason::Confirming));
        } else {
            let Decision::Switch {
                ref from,
                ref to,
                edge_bps,
                net_edge_bps,
            } = eval.decision
            else {
                panic!("expected switch on third tick, got {:?}", eval.decision);
            };
            assert_eq!(from, &Some(Asset::new("AAA")));
            assert_eq!(to, &Asset::new("BBB"));
            assert_eq!(edge_bps, dec!(80));
            assert_eq!(net_edge_bps, dec!(51));

            broker.apply(&eval.decision, &snapshot);
        }
        now += Duration::seconds(10);
    }

    assert_eq!(broker.position().asset, Some(Asset::new("BBB")));
    assert_eq!(state.held, Some(Asset::new("BBB")));
    assert_eq!(state.switches_today, 1);

    // Two legs of cost, no price movement between them
    let equity_after = broker.equity(&snapshot).unwrap();
    let expected = equity_before * (dec!(1) - dec!(0.0029));
    let diff = (equity_after - expected).abs() / equity_before;
    assert!(diff < dec!(0.00001), "cost accounting off by {diff}");
}

#[test]
fn test_partial_history_asset_cannot_win() {
    let warm_end = base_time() + Duration::hours(5);
    let mut hist = warm_history(&["AAA"], warm_end);

    // BBB only has 30 minutes of history, rocketing upwards
    let bbb = Asset::new("BBB");
    let mut ts = warm_end - Duration::minutes(30);
    let mut price = dec!(100);
    while ts <= warm_end {
        hist.append(&bbb, ts, price).unwrap();
        price += dec!(1);
        ts += Duration::minutes(5);
    }

    let scorer = Scorer::new(&ScoringConfig::default());
    let universe = vec![Asset::new("AAA"), bbb.clone()];
    let scores = scorer.score_all(&universe, &hist, warm_end);
    assert!(!scores[&bbb].eligible);

    let mut state = RotationState::parked();
    let eval = engine().evaluate(&scores, &mut state, warm_end, false);
    assert_ne!(eval.leader, Some(bbb));
}

#[test]
fn test_manual_park_then_fresh_confirmation() {
    let warm_end = base_time() + Duration::hours(5);
    let mut hist = warm_history(&["AAA", "BBB"], warm_end);
    let scorer = Scorer::new(&ScoringConfig::default());
    let engine = engine();

    let mut broker = PaperBroker::resume(
        Position {
            asset: Some(Asset::new("BBB")),
            quantity: dec!(100),
            cash_usdt: Decimal::ZERO,
        },
        CostModel::default(),
    );
    let mut state = RotationState {
        held: Some(Asset::new("BBB")),
        ..RotationState::parked()
    };

    let snapshot = prices(&[("AAA", dec!(100)), ("BBB", dec!(100))]);
    let equity_before = broker.equity(&snapshot).unwrap();

    broker.park_to_usdt(&snapshot);
    assert!(broker.position().is_parked());
    // Single leg of cost on the way out
    let expected = equity_before * (dec!(1) - dec!(0.00145));
    assert_eq!(broker.position().cash_usdt, expected);

    // Next tick reconciles held from the broker, then any eligible leader
    // starts confirming from one
    state.held = broker.position().asset.clone();
    let now = warm_end + Duration::minutes(5);
    hist.append(&Asset::new("AAA"), now, dec!(101)).unwrap();
    hist.append(&Asset::new("BBB"), now, dec!(100)).unwrap();

    let universe = vec![Asset::new("AAA"), Asset::new("BBB")];
    let scores = scorer.score_all(&universe, &hist, now);
    let eval = engine.evaluate(&scores, &mut state, now, false);

    assert_eq!(eval.decision, Decision::Hold(HoldReason::Confirming));
    assert_eq!(eval.leader, Some(Asset::new("AAA")));
    assert_eq!(state.confirm_count, 1);
}
