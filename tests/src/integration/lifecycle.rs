//! # Session Lifecycle Properties
//!
//! Load/save bookkeeping observed from outside the dispatcher: persister
//! call counts and mediator metrics.

use std::time::Duration;

use proptest::prelude::*;
use vault_mediator::MediatorConfig;
use vault_types::{ContainerHandle, InventoryAction, MessageKey, Outcome, PlayerId};

use crate::fixtures::*;

const VAULT: ContainerHandle = ContainerHandle(2_000);

#[tokio::test(start_paused = true)]
async fn test_load_runs_once_after_delay() {
    let mut host = HostSim::start(MediatorConfig::default());
    let player = PlayerId::random();
    host.seed_vault(player, VAULT, 1);

    host.connect(player).await;
    tokio::time::sleep(LOAD_DELAY - Duration::from_millis(100)).await;
    assert_eq!(host.persister.load_count(), 0);

    host.wait_until(|m| m.loads_completed == 1).await;
    tokio::time::sleep(LOAD_DELAY * 2).await;
    assert_eq!(host.persister.load_count(), 1);

    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_connect_schedules_nothing_new() {
    let mut host = HostSim::start(MediatorConfig::default());
    let player = PlayerId::random();

    host.connect(player).await;
    let outcome = host.connect(player).await;
    // Protocol violation: failed closed, no second load
    assert_eq!(outcome, Outcome::suppress());

    host.wait_until(|m| m.loads_completed == 1).await;
    tokio::time::sleep(LOAD_DELAY * 2).await;

    let metrics = host.metrics();
    assert_eq!(metrics.loads_scheduled, 1);
    assert_eq!(metrics.consistency_violations, 1);
    assert_eq!(host.persister.load_count(), 1);

    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_loaded_disconnect_saves_exactly_once() {
    let mut host = HostSim::start(MediatorConfig::default());
    let player = PlayerId::random();
    host.seed_vault(player, VAULT, 1);
    host.permissions.grant(player, "vault.1.take");
    host.connect_and_load(player).await;

    host.disconnect(player).await;
    host.wait_until(|m| m.saves_completed == 1).await;

    // The container no longer belongs to a registered vault
    let outcome = host
        .send(vault_click(
            player,
            VAULT,
            InventoryAction::PickupAll,
            Some(item("stone")),
            None,
        ))
        .await;
    assert_eq!(outcome, Outcome::proceed());

    let summary = host.shutdown().await;
    assert_eq!(summary.saves_on_shutdown, 0);
    assert_eq!(host.persister.save_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_reconnect_gets_fresh_delay() {
    let mut host = HostSim::start(MediatorConfig::default());
    let player = PlayerId::random();

    host.connect(player).await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    host.disconnect(player).await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    host.connect(player).await;

    // The first connect's due time passes without a load
    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(host.persister.load_count(), 0);

    host.wait_until(|m| m.loads_completed == 1).await;
    assert_eq!(host.persister.load_count(), 1);
    assert_eq!(host.metrics().loads_scheduled, 2);

    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_failed_load_never_grants_access() {
    let config = MediatorConfig::default().with_selector_replacement(true);
    let mut host = HostSim::start(config);
    let player = PlayerId::random();
    host.seed_vault(player, VAULT, 1);
    host.persister.fail_loads(true);

    host.connect(player).await;
    host.wait_until(|m| m.loads_failed == 1).await;

    let outcome = host.send(ender_chest_click(player)).await;
    assert_eq!(outcome.notice.map(|n| n.key), Some(MessageKey::PlayerNotLoaded));

    // Nothing was loaded, so nothing is saved
    host.disconnect(player).await;
    let summary = host.shutdown().await;
    assert!(summary.drained);
    assert_eq!(host.persister.save_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_reload_changes_delay_for_new_connects() {
    let mut host = HostSim::start(MediatorConfig::default());
    let player = PlayerId::random();

    // Reload goes through the runtime's control channel
    let start = tokio::time::Instant::now();
    host.reload(MediatorConfig::default().with_load_delay_ticks(20));
    host.connect(player).await;
    host.wait_until(|m| m.loads_completed == 1).await;

    assert!(start.elapsed() < LOAD_DELAY);
    host.shutdown().await;
}

#[derive(Debug, Clone)]
enum Step {
    Connect,
    Disconnect,
    Wait(u64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Connect),
        Just(Step::Disconnect),
        (0u64..8_000).prop_map(Step::Wait),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Whatever the connect/disconnect timing: loads never exceed accepted
    /// connects, saves never exceed completed loads, and a final disconnect
    /// leaves nothing behind.
    #[test]
    fn prop_session_bookkeeping(steps in proptest::collection::vec(step(), 1..24)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();

        rt.block_on(async move {
            let mut host = HostSim::start(MediatorConfig::default());
            let player = PlayerId::random();
            host.seed_vault(player, VAULT, 1);
            let mut connected = false;
            let mut accepted_connects = 0u64;

            for step in steps {
                match step {
                    Step::Connect => {
                        let outcome = host.connect(player).await;
                        // Connecting twice is rejected
                        assert_eq!(outcome.is_allowed(), !connected);
                        if !connected {
                            accepted_connects += 1;
                        }
                        connected = true;
                    }
                    Step::Disconnect => {
                        host.disconnect(player).await;
                        connected = false;
                    }
                    Step::Wait(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
                }

                let m = host.metrics();
                assert_eq!(m.loads_scheduled, accepted_connects);
                assert!(m.loads_started <= m.loads_scheduled);
                assert!(m.saves_started <= m.loads_completed);
            }

            host.disconnect(player).await;
            let summary = host.shutdown().await;
            assert!(summary.drained);
            assert_eq!(summary.saves_on_shutdown, 0);
            assert_eq!(host.persister.load_count(), host.metrics().loads_started);
        });
    }
}
