//! # Blacklist Smuggling
//!
//! Every indirect path an item can take into a vault: shift-click from the
//! player inventory, hotbar swap, drag, and world transfers such as hoppers.

use vault_mediator::MediatorConfig;
use vault_types::{ContainerHandle, InventoryAction, MessageKey, Outcome, PlayerId};

use crate::fixtures::*;

const VAULT: ContainerHandle = ContainerHandle(4_000);
const OWN_INVENTORY: ContainerHandle = ContainerHandle(4_001);
const HOPPER: ContainerHandle = ContainerHandle(4_002);

async fn loaded_host() -> (HostSim, PlayerId) {
    host_with_grants(&["vault.1.take", "vault.1.add"]).await
}

async fn host_with_grants(grants: &[&str]) -> (HostSim, PlayerId) {
    let config = MediatorConfig::default().with_blacklist(vec![item_type("tnt")]);
    let mut host = HostSim::start(config);
    let player = PlayerId::random();
    host.seed_vault(player, VAULT, 1);
    for capability in grants {
        host.permissions.grant(player, capability);
    }
    host.connect_and_load(player).await;
    (host, player)
}

fn notice_key(outcome: &Outcome) -> Option<MessageKey> {
    outcome.notice.as_ref().map(|n| n.key)
}

fn blacklisted(outcome: &Outcome) -> bool {
    outcome.cancelled
        && outcome.notice.as_ref().map(|n| n.key) == Some(MessageKey::BlacklistedItem)
}

#[tokio::test(start_paused = true)]
async fn shift_click_from_player_inventory() {
    let (mut host, player) = loaded_host().await;

    let outcome = host
        .send(shift_click_from_player(player, VAULT, OWN_INVENTORY, item("tnt")))
        .await;
    assert!(blacklisted(&outcome));

    let outcome = host
        .send(shift_click_from_player(player, VAULT, OWN_INVENTORY, item("stone")))
        .await;
    assert!(outcome.is_allowed());

    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn hotbar_swap_into_empty_slot() {
    let (mut host, player) = loaded_host().await;

    // The hotbar stack is what enters the vault
    let outcome = host
        .send(hotbar_swap(player, VAULT, None, Some(item("tnt"))))
        .await;
    assert!(blacklisted(&outcome));

    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn hotbar_swap_onto_occupied_slot() {
    // Taking out is allowed, putting in is not
    let (mut host, player) = host_with_grants(&["vault.1.take"]).await;

    let outcome = host
        .send(hotbar_swap(player, VAULT, Some(item("dirt")), Some(item("tnt"))))
        .await;
    assert!(blacklisted(&outcome));

    let outcome = host
        .send(hotbar_swap(player, VAULT, Some(item("dirt")), Some(item("stone"))))
        .await;
    assert!(outcome.cancelled);
    assert_eq!(notice_key(&outcome), Some(MessageKey::AddNoPermission));

    // Nothing on the hotbar: a plain take
    let outcome = host
        .send(hotbar_swap(player, VAULT, Some(item("dirt")), None))
        .await;
    assert!(outcome.is_allowed());

    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn cursor_swap_takes_the_slot_stack() {
    // Putting in is allowed, taking out is not
    let (mut host, player) = host_with_grants(&["vault.1.add"]).await;

    let outcome = host
        .send(vault_click(
            player,
            VAULT,
            InventoryAction::SwapWithCursor,
            Some(item("diamond")),
            Some(item("stone")),
        ))
        .await;
    assert!(outcome.cancelled);
    assert_eq!(notice_key(&outcome), Some(MessageKey::TakeNoPermission));

    // Placing into an empty slot needs only the add capability
    let outcome = host
        .send(vault_click(
            player,
            VAULT,
            InventoryAction::PlaceAll,
            None,
            Some(item("stone")),
        ))
        .await;
    assert!(outcome.is_allowed());

    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn drag_across_vault_slots() {
    let (mut host, player) = loaded_host().await;

    assert!(blacklisted(&host.send(drag(player, VAULT, item("tnt"), true)).await));
    // The blacklist holds while the vault is open, wherever the drag lands
    assert!(blacklisted(&host.send(drag(player, VAULT, item("tnt"), false)).await));
    assert!(host
        .send(drag(player, VAULT, item("stone"), true))
        .await
        .is_allowed());

    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn hopper_into_vault_is_blocked_silently() {
    let (mut host, _player) = loaded_host().await;

    let outcome = host.send(transfer(HOPPER, VAULT, item("tnt"))).await;
    assert_eq!(outcome, Outcome::suppress());
    assert_eq!(host.metrics().transfers_blocked, 1);

    // Out of the vault, or harmless items in, are untouched
    assert_eq!(
        host.send(transfer(VAULT, HOPPER, item("tnt"))).await,
        Outcome::proceed()
    );
    assert_eq!(
        host.send(transfer(HOPPER, VAULT, item("stone"))).await,
        Outcome::proceed()
    );

    host.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn bypass_covers_clicks_but_not_transfers() {
    let (mut host, player) = loaded_host().await;
    host.permissions.allow_bypass(player);

    let outcome = host
        .send(shift_click_from_player(player, VAULT, OWN_INVENTORY, item("tnt")))
        .await;
    assert!(outcome.is_allowed());

    // Transfers have no acting player, so no bypass applies
    let outcome = host.send(transfer(HOPPER, VAULT, item("tnt"))).await;
    assert_eq!(outcome, Outcome::suppress());

    host.shutdown().await;
}
