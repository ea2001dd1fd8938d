//! # Acceptance Scenarios
//!
//! End-to-end through the bus:
//!
//! - A: blacklisted item placed into a vault
//! - B: take from a tier-2 vault without `vault.2.take`
//! - C: disconnect before the load delay elapses
//! - D: selector requested before the vaults finish loading

use std::time::Duration;

use vault_mediator::MediatorConfig;
use vault_types::{ContainerHandle, InventoryAction, MessageKey, Outcome, PlayerId};

use crate::fixtures::*;

const VAULT: ContainerHandle = ContainerHandle(1_000);

#[tokio::test(start_paused = true)]
async fn scenario_a_blacklisted_item_into_vault() {
    let config = MediatorConfig::default().with_blacklist(vec![item_type("tnt")]);
    let mut host = HostSim::start(config);
    let player = PlayerId::random();
    host.seed_vault(player, VAULT, 1);
    // Tier permission alone would allow the add
    host.permissions.grant(player, "vault.1.add");
    host.connect_and_load(player).await;

    let outcome = host
        .send(vault_click(
            player,
            VAULT,
            InventoryAction::PlaceAll,
            None,
            Some(item("tnt")),
        ))
        .await;

    assert!(outcome.cancelled);
    let notice = outcome.notice.expect("exactly one message");
    assert_eq!(notice.player, player);
    assert_eq!(notice.key, MessageKey::BlacklistedItem);
    assert_eq!(host.metrics().denied_blacklisted, 1);

    // Same slot, harmless item
    let outcome = host
        .send(vault_click(
            player,
            VAULT,
            InventoryAction::PlaceAll,
            None,
            Some(item("stone")),
        ))
        .await;
    assert_eq!(outcome, Outcome::proceed());

    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn scenario_b_take_without_tier_capability() {
    let mut host = HostSim::start(MediatorConfig::default());
    let player = PlayerId::random();
    host.seed_vault(player, VAULT, 2);
    // A lower tier's capability does not carry over
    host.permissions.grant(player, "vault.1.take");
    host.permissions.grant(player, "vault.2.add");
    host.connect_and_load(player).await;

    let outcome = host
        .send(vault_click(
            player,
            VAULT,
            InventoryAction::PickupAll,
            Some(item("diamond")),
            None,
        ))
        .await;

    assert!(outcome.cancelled);
    assert_eq!(outcome.notice.map(|n| n.key), Some(MessageKey::TakeNoPermission));

    host.permissions.grant(player, "vault.2.take");
    let outcome = host
        .send(vault_click(
            player,
            VAULT,
            InventoryAction::PickupAll,
            Some(item("diamond")),
            None,
        ))
        .await;
    assert!(outcome.is_allowed());

    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn scenario_c_disconnect_before_load_delay() {
    let mut host = HostSim::start(MediatorConfig::default());
    let player = PlayerId::random();
    host.seed_vault(player, VAULT, 1);

    host.connect(player).await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    host.disconnect(player).await;

    // Well past the original due time
    tokio::time::sleep(LOAD_DELAY * 3).await;

    assert_eq!(host.persister.load_count(), 0);
    assert_eq!(host.persister.save_count(), 0);
    let metrics = host.metrics();
    assert_eq!(metrics.loads_scheduled, 1);
    assert_eq!(metrics.loads_cancelled, 1);
    assert_eq!(metrics.loads_started, 0);

    let summary = host.shutdown().await;
    assert_eq!(summary.saves_on_shutdown, 0);
}

#[tokio::test(start_paused = true)]
async fn scenario_d_selector_before_load() {
    let config = MediatorConfig::default().with_selector_replacement(true);
    let mut host = HostSim::start(config);
    let player = PlayerId::random();
    host.seed_vault(player, VAULT, 1);

    host.connect(player).await;
    let outcome = host.send(ender_chest_click(player)).await;

    assert!(outcome.cancelled);
    assert_eq!(outcome.notice.map(|n| n.key), Some(MessageKey::PlayerNotLoaded));
    assert_eq!(host.next_selector_request().await, None);

    // Once loaded, the same interaction opens the selector on page 1
    host.wait_until(|m| m.loads_completed == 1).await;
    let outcome = host.send(ender_chest_click(player)).await;
    assert_eq!(outcome, Outcome::suppress());
    assert_eq!(host.next_selector_request().await, Some((player, 1)));

    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn selector_feature_off_leaves_ender_chest_alone() {
    let mut host = HostSim::start(MediatorConfig::default());
    let player = PlayerId::random();
    host.connect_and_load(player).await;

    assert_eq!(host.send(ender_chest_click(player)).await, Outcome::proceed());
    assert_eq!(host.next_selector_request().await, None);

    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn denials_carry_exactly_one_message_and_allows_none() {
    let config = MediatorConfig::default().with_blacklist(vec![item_type("bedrock")]);
    let mut host = HostSim::start(config);
    let player = PlayerId::random();
    host.seed_vault(player, VAULT, 3);
    host.permissions.grant(player, "vault.3.add");
    host.connect_and_load(player).await;

    let cases = [
        (InventoryAction::PickupAll, Some(item("stone")), None),
        (InventoryAction::PlaceAll, None, Some(item("stone"))),
        (InventoryAction::PlaceOne, None, Some(item("bedrock"))),
        (InventoryAction::CloneStack, Some(item("stone")), None),
        (InventoryAction::DropAllCursor, None, Some(item("stone"))),
        (InventoryAction::Nothing, None, None),
    ];

    for (action, current, cursor) in cases {
        let outcome = host
            .send(vault_click(player, VAULT, action, current, cursor))
            .await;
        assert_eq!(
            outcome.cancelled,
            outcome.notice.is_some(),
            "{action:?}: a denial always carries one message, an allow none"
        );
    }

    assert_eq!(host.metrics().total_denials(), 2);
    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn vault_without_order_fails_closed() {
    let mut host = HostSim::start(MediatorConfig::default());
    let player = PlayerId::random();
    host.seed_set(player, unordered_vault(VAULT));
    host.connect_and_load(player).await;

    let outcome = host
        .send(vault_click(
            player,
            VAULT,
            InventoryAction::PickupAll,
            Some(item("stone")),
            None,
        ))
        .await;

    assert_eq!(outcome, Outcome::suppress());
    assert_eq!(host.metrics().consistency_violations, 1);

    let summary = host.shutdown().await;
    assert_eq!(summary.events_failed, 1);
}
