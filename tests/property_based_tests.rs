use parking_lot::Mutex;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use worker_fanin::{boxed, run, BoxProducer, ProducerFailure};

fn outcome_plan_strategy() -> impl Strategy<Value = Vec<(bool, u8)>> {
    prop::collection::vec((any::<bool>(), 0u8..4), 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: every submitted producer is consumed exactly once
    #[test]
    fn every_outcome_is_consumed_exactly_once(plan in outcome_plan_strategy()) {
        let consumed = Arc::new(Mutex::new(Vec::new()));
        let failed = Arc::new(Mutex::new(Vec::new()));

        let producers: Vec<BoxProducer<usize, usize>> = plan
            .iter()
            .copied()
            .enumerate()
            .map(|(i, (succeeds, delay))| {
                boxed(move || async move {
                    tokio::time::sleep(Duration::from_millis(u64::from(delay))).await;
                    if succeeds { Ok(i) } else { Err(i) }
                })
            })
            .collect();

        let sink = Arc::clone(&consumed);
        let errors = Arc::clone(&failed);
        let stats = tokio_test::block_on(run(
            producers,
            move |value| sink.lock().push(value),
            move |failure: ProducerFailure<usize>| {
                if let Some(i) = failure.into_error() {
                    errors.lock().push(i);
                }
            },
        ));

        let expected_ok: BTreeSet<usize> =
            plan.iter().enumerate().filter(|(_, p)| p.0).map(|(i, _)| i).collect();
        let expected_err: BTreeSet<usize> =
            plan.iter().enumerate().filter(|(_, p)| !p.0).map(|(i, _)| i).collect();

        prop_assert_eq!(stats.success + stats.failure, plan.len());
        prop_assert_eq!(stats.success, expected_ok.len());
        prop_assert_eq!(stats.failure, expected_err.len());

        let consumed = consumed.lock().clone();
        let failed = failed.lock().clone();
        prop_assert_eq!(consumed.len(), expected_ok.len());
        prop_assert_eq!(failed.len(), expected_err.len());
        prop_assert_eq!(consumed.into_iter().collect::<BTreeSet<_>>(), expected_ok);
        prop_assert_eq!(failed.into_iter().collect::<BTreeSet<_>>(), expected_err);
    }

    /// Property: duration arrays are always sized to the producer count
    #[test]
    fn duration_arrays_match_producer_count(n in 0usize..32) {
        let producers: Vec<BoxProducer<usize, String>> =
            (0..n).map(|i| boxed(move || async move { Ok(i) })).collect();

        let stats = tokio_test::block_on(run(producers, |_| {}, |_: ProducerFailure<String>| {}));

        prop_assert_eq!(stats.produce_times.len(), n);
        prop_assert_eq!(stats.consume_times.len(), n);
        prop_assert_eq!(stats.block_times.len(), n);
        prop_assert_eq!(stats.success, n);
        prop_assert!(stats.total_consume <= stats.total_time);
    }
}
