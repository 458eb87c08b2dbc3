//! Property tests for screening invariants.
//!
//! Uses proptest to verify:
//! 1. Price-level geometry — stop below price below target, symmetric buy band
//! 2. Ranking laws — idempotent, permutation-insensitive, bounded truncation
//! 3. Scoring bounds — baseline policy scores stay within their rule budgets
//! 4. Totality — builder and pipeline never panic on dirty inputs

use proptest::prelude::*;
use screenlab_core::domain::{Horizon, IndicatorSnapshot, Recommendation, RiskParams};
use screenlab_core::engine::{generate, rank, ScoringPolicy, SnapshotBuilder};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..5000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_symbol() -> impl Strategy<Value = String> {
    "[A-Z]{1,5}"
}

fn arb_horizon() -> impl Strategy<Value = Horizon> {
    prop_oneof![
        Just(Horizon::Short),
        Just(Horizon::Medium),
        Just(Horizon::Long),
    ]
}

fn arb_field() -> impl Strategy<Value = Option<f64>> {
    proptest::option::of(-1000.0..1000.0_f64)
}

fn arb_snapshot() -> impl Strategy<Value = IndicatorSnapshot> {
    (
        (arb_field(), arb_field(), arb_field(), arb_field(), arb_field()),
        (arb_field(), arb_field(), arb_field(), arb_field(), arb_field()),
        (arb_field(), arb_field(), arb_field()),
    )
        .prop_map(|(a, b, c)| IndicatorSnapshot {
            close: a.0,
            sma_50: a.1,
            sma_200: a.2,
            ema_12: a.3,
            ema_26: a.4,
            rsi: b.0,
            macd: b.1,
            macd_signal: b.2,
            macd_hist: b.3,
            upper_bb: b.4,
            lower_bb: c.0,
            volatility_pct: c.1,
            beta: c.2,
        })
}

/// Close series with NaN and zero rows mixed in, as a broken feed would produce.
fn arb_dirty_closes() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(
        prop_oneof![
            8 => 1.0..500.0_f64,
            1 => Just(f64::NAN),
            1 => Just(0.0),
        ],
        0..300,
    )
}

fn rec(symbol: &str, score: i32) -> Recommendation {
    Recommendation {
        symbol: symbol.to_string(),
        horizon: Horizon::Short,
        current_price: 100.0,
        lower_buy: 99.5,
        upper_buy: 100.5,
        stop_loss: 97.0,
        target_price: 105.0,
        score,
        snapshot: IndicatorSnapshot::default(),
    }
}

fn arb_scored_rows() -> impl Strategy<Value = Vec<(String, i32)>> {
    proptest::collection::vec((arb_symbol(), -5..10), 0..40)
}

/// A row set together with one of its permutations.
fn arb_rows_and_permutation() -> impl Strategy<Value = (Vec<(String, i32)>, Vec<(String, i32)>)> {
    arb_scored_rows().prop_flat_map(|rows| {
        let shuffled = Just(rows.clone()).prop_shuffle();
        (Just(rows), shuffled)
    })
}

// ── 1. Price-Level Geometry ──────────────────────────────────────────

proptest! {
    /// For every positive price and horizon, stop < price < target.
    #[test]
    fn stop_below_price_below_target(
        price in arb_price(),
        horizon in arb_horizon(),
        score in -5..10,
    ) {
        let snapshot = IndicatorSnapshot {
            close: Some(price),
            ..IndicatorSnapshot::default()
        };
        let rec = generate("ACME", &snapshot, score, horizon, &RiskParams::default())
            .expect("positive price must produce a recommendation");

        prop_assert!(rec.stop_loss < rec.current_price);
        prop_assert!(rec.current_price < rec.target_price);
    }

    /// The buy band is symmetric around the current price.
    #[test]
    fn buy_band_is_symmetric(price in arb_price(), horizon in arb_horizon()) {
        let snapshot = IndicatorSnapshot {
            close: Some(price),
            ..IndicatorSnapshot::default()
        };
        let rec = generate("ACME", &snapshot, 0, horizon, &RiskParams::default()).unwrap();

        let below = rec.current_price - rec.lower_buy;
        let above = rec.upper_buy - rec.current_price;
        prop_assert!((below - above).abs() <= 1e-9 * price);
        prop_assert!(rec.lower_buy < rec.upper_buy);
    }
}

// ── 2. Ranking Laws ──────────────────────────────────────────────────

proptest! {
    /// Ranking an already-ranked list changes nothing.
    #[test]
    fn rank_is_idempotent(rows in arb_scored_rows(), limit in 0..30usize) {
        let recs: Vec<Recommendation> =
            rows.iter().map(|(s, sc)| rec(s, *sc)).collect();

        let once = rank(recs, limit);
        let twice = rank(once.clone(), limit);
        prop_assert_eq!(once, twice);
    }

    /// Permuting the input does not change the output.
    #[test]
    fn rank_is_permutation_insensitive(
        (rows, permuted) in arb_rows_and_permutation(),
        limit in 0..30usize,
    ) {
        let a: Vec<Recommendation> = rows.iter().map(|(s, sc)| rec(s, *sc)).collect();
        let b: Vec<Recommendation> = permuted.iter().map(|(s, sc)| rec(s, *sc)).collect();

        prop_assert_eq!(rank(a, limit), rank(b, limit));
    }

    /// Output length is exactly min(limit, input length), and the ordering
    /// is score-descending with symbol-ascending ties.
    #[test]
    fn rank_truncates_and_orders(rows in arb_scored_rows(), limit in 0..30usize) {
        let recs: Vec<Recommendation> =
            rows.iter().map(|(s, sc)| rec(s, *sc)).collect();
        let input_len = recs.len();

        let ranked = rank(recs, limit);
        prop_assert_eq!(ranked.len(), input_len.min(limit));

        for pair in ranked.windows(2) {
            let ordered = pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].symbol <= pair[1].symbol);
            prop_assert!(ordered, "misordered pair: {:?} then {:?}",
                (&pair[0].symbol, pair[0].score), (&pair[1].symbol, pair[1].score));
        }
    }
}

// ── 3. Scoring Bounds ────────────────────────────────────────────────

proptest! {
    /// Scores from the baseline policy never exceed the sum of rule
    /// weights for the horizon (short 5, medium 5, long 6).
    #[test]
    fn baseline_scores_stay_within_rule_budget(snapshot in arb_snapshot()) {
        let policy = ScoringPolicy::default();
        for (horizon, budget) in [
            (Horizon::Short, 5),
            (Horizon::Medium, 5),
            (Horizon::Long, 6),
        ] {
            let score = policy.score(&snapshot, horizon);
            prop_assert!(
                score.abs() <= budget,
                "score {score} beyond budget {budget} on {horizon:?}"
            );
        }
    }

    /// Scoring is a pure function of (snapshot, horizon).
    #[test]
    fn scoring_is_deterministic(snapshot in arb_snapshot(), horizon in arb_horizon()) {
        let policy = ScoringPolicy::default();
        prop_assert_eq!(
            policy.score(&snapshot, horizon),
            policy.score(&snapshot, horizon)
        );
    }
}

// ── 4. Totality on Dirty Inputs ──────────────────────────────────────

proptest! {
    /// The builder accepts any close series without panicking, and every
    /// field it fills is finite.
    #[test]
    fn builder_is_total_on_dirty_series(
        closes in arb_dirty_closes(),
        beta in arb_field(),
    ) {
        let snapshot = SnapshotBuilder::default().build(&closes, beta);

        let fields = [
            snapshot.close,
            snapshot.sma_50,
            snapshot.sma_200,
            snapshot.ema_12,
            snapshot.ema_26,
            snapshot.rsi,
            snapshot.macd,
            snapshot.macd_signal,
            snapshot.macd_hist,
            snapshot.upper_bb,
            snapshot.lower_bb,
            snapshot.volatility_pct,
            snapshot.beta,
        ];
        for field in fields {
            if let Some(v) = field {
                prop_assert!(v.is_finite());
            }
        }
    }

    /// Score-then-generate emits only finite, positively priced
    /// recommendations, whatever the snapshot contents.
    #[test]
    fn pipeline_emits_only_priced_recommendations(
        snapshot in arb_snapshot(),
        horizon in arb_horizon(),
    ) {
        let policy = ScoringPolicy::default();
        let risk = RiskParams::default();

        let score = policy.score(&snapshot, horizon);
        if let Some(rec) = generate("ACME", &snapshot, score, horizon, &risk) {
            prop_assert!(rec.current_price.is_finite() && rec.current_price > 0.0);
            prop_assert!(rec.stop_loss < rec.current_price);
            prop_assert!(rec.target_price > rec.current_price);
        }
    }
}
