//! # Test Fixtures
//!
//! `HostSim` plays the host binding: it starts a dispatcher on a fresh bus,
//! submits host events through the ingress and waits for the correlated
//! outcome.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tokio_stream::StreamExt;
use uuid::Uuid;
use vault_bus::{BusEvent, EventFilter, EventStream, EventTopic, HostIngress, InMemoryEventBus, Subscription};
use vault_mediator::adapters::{InMemoryPermissions, InMemoryVaultPersister, StaticMessageCatalog};
use vault_mediator::domain::{vault_set, Vault, VaultMetadata};
use vault_mediator::{MediatorConfig, MediatorPorts, Metrics, MetricsSnapshot, VaultSet};
use vault_runtime::{BusSelectorLauncher, DispatchSummary, VaultRuntime};
use vault_types::{
    BlockKind, ClickEvent, ContainerHandle, DragEvent, HostEvent, InteractAction, InteractEvent,
    InventoryAction, InventoryRef, ItemStack, ItemType, Outcome, PlayerId, TransferEvent, VaultId,
};

pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(60);

/// Default load delay (100 ticks).
pub const LOAD_DELAY: Duration = Duration::from_secs(5);

pub struct HostSim {
    pub bus: Arc<InMemoryEventBus>,
    pub persister: Arc<InMemoryVaultPersister>,
    pub permissions: Arc<InMemoryPermissions>,
    runtime: Option<VaultRuntime>,
    ingress: HostIngress,
    metrics: Arc<Metrics>,
    outcomes: Subscription,
    selector: EventStream,
}

impl HostSim {
    pub fn start(config: MediatorConfig) -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let outcomes = bus.subscribe(EventFilter::topics(vec![EventTopic::Outcome]));
        let selector = bus.event_stream(EventFilter::topics(vec![EventTopic::Selector]));
        let persister = Arc::new(InMemoryVaultPersister::new());
        let permissions = Arc::new(InMemoryPermissions::new());

        let ports = MediatorPorts {
            persister: persister.clone(),
            permissions: permissions.clone(),
            messages: Arc::new(StaticMessageCatalog::new()),
            selector: Arc::new(BusSelectorLauncher::new(bus.clone())),
        };
        let runtime = VaultRuntime::start(bus.clone(), config, ports, SHUTDOWN_GRACE)
            .expect("valid config");
        let metrics = runtime.metrics();
        let ingress = runtime.ingress();

        Self {
            bus,
            persister,
            permissions,
            runtime: Some(runtime),
            ingress,
            metrics,
            outcomes,
            selector,
        }
    }

    /// Give a player one stored vault of the given order on `container`.
    pub fn seed_vault(&self, player: PlayerId, container: ContainerHandle, order: i64) -> VaultId {
        let id = VaultId(Uuid::new_v4());
        let mut vaults = self.persister.stored(player).unwrap_or_default();
        vaults.insert(id, Vault::with_order(id, container, order));
        self.persister.seed(player, vaults);
        id
    }

    /// Seed a raw vault set, e.g. one with unusual metadata.
    pub fn seed_set(&self, player: PlayerId, vaults: VaultSet) {
        self.persister.seed(player, vaults);
    }

    /// Submit a host event and wait for its outcome.
    pub async fn send(&mut self, event: HostEvent) -> Outcome {
        let expected = self.submit(event);

        loop {
            let received = timeout(Duration::from_secs(5), self.outcomes.recv())
                .await
                .expect("outcome within timeout")
                .expect("outcome subscription intact");
            if let BusEvent::Outcome {
                correlation_id,
                outcome,
                ..
            } = received
            {
                if correlation_id == expected {
                    return outcome;
                }
            }
        }
    }

    /// Submit a host event without waiting for its outcome.
    pub fn submit(&self, event: HostEvent) -> Uuid {
        self.ingress.submit(event).expect("dispatcher running")
    }

    pub async fn connect(&mut self, player: PlayerId) -> Outcome {
        self.send(HostEvent::PlayerConnected { player }).await
    }

    pub async fn disconnect(&mut self, player: PlayerId) -> Outcome {
        self.send(HostEvent::PlayerDisconnected { player }).await
    }

    /// Connect and wait until the load has been registered.
    pub async fn connect_and_load(&mut self, player: PlayerId) {
        let before = self.metrics().loads_completed;
        self.connect(player).await;
        self.wait_until(|m| m.loads_completed > before).await;
    }

    /// Mediator metrics; still readable after shutdown.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Hand the dispatcher a new configuration.
    pub fn reload(&self, config: MediatorConfig) {
        self.runtime
            .as_ref()
            .expect("runtime running")
            .reload(config)
            .expect("dispatcher running");
    }

    /// Poll the mediator metrics until `done` holds.
    pub async fn wait_until(&self, done: impl Fn(&MetricsSnapshot) -> bool) {
        timeout(Duration::from_secs(600), async {
            while !done(&self.metrics.snapshot()) {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("condition reached");
    }

    /// Next selector request, if one arrives within a second.
    pub async fn next_selector_request(&mut self) -> Option<(PlayerId, u32)> {
        match timeout(Duration::from_secs(1), self.selector.next()).await {
            Ok(Some(BusEvent::SelectorRequested { player, page })) => Some((player, page)),
            _ => None,
        }
    }

    pub async fn shutdown(&mut self) -> DispatchSummary {
        self.runtime
            .take()
            .expect("runtime running")
            .shutdown()
            .await
            .expect("dispatcher finished")
    }
}

// =============================================================================
// EVENT BUILDERS
// =============================================================================

pub fn item(name: &str) -> ItemStack {
    ItemStack::new(ItemType::parse(name).expect("valid item type"), 1)
}

pub fn item_type(name: &str) -> ItemType {
    ItemType::parse(name).expect("valid item type")
}

/// A click inside the vault's own slots.
pub fn vault_click(
    player: PlayerId,
    vault: ContainerHandle,
    action: InventoryAction,
    current_item: Option<ItemStack>,
    cursor: Option<ItemStack>,
) -> HostEvent {
    HostEvent::InventoryClick(ClickEvent {
        player,
        view_top: vault,
        clicked: Some(InventoryRef::chest(vault)),
        action,
        current_item,
        cursor,
        hotbar_item: None,
    })
}

/// A hotbar swap on a vault slot.
pub fn hotbar_swap(
    player: PlayerId,
    vault: ContainerHandle,
    current_item: Option<ItemStack>,
    hotbar_item: Option<ItemStack>,
) -> HostEvent {
    HostEvent::InventoryClick(ClickEvent {
        player,
        view_top: vault,
        clicked: Some(InventoryRef::chest(vault)),
        action: InventoryAction::HotbarSwap,
        current_item,
        cursor: None,
        hotbar_item,
    })
}

/// Shift-click from the player's own inventory while a vault is open.
pub fn shift_click_from_player(
    player: PlayerId,
    vault: ContainerHandle,
    own_inventory: ContainerHandle,
    stack: ItemStack,
) -> HostEvent {
    HostEvent::InventoryClick(ClickEvent {
        player,
        view_top: vault,
        clicked: Some(InventoryRef::player(own_inventory)),
        action: InventoryAction::MoveToOtherInventory,
        current_item: Some(stack),
        cursor: None,
        hotbar_item: None,
    })
}

pub fn drag(player: PlayerId, vault: ContainerHandle, cursor: ItemStack, into_vault: bool) -> HostEvent {
    HostEvent::InventoryDrag(DragEvent {
        player,
        view_top: vault,
        cursor: Some(cursor),
        lands_in_view_top: into_vault,
    })
}

pub fn transfer(source: ContainerHandle, destination: ContainerHandle, stack: ItemStack) -> HostEvent {
    HostEvent::ItemTransfer(TransferEvent {
        source,
        destination,
        item: stack,
    })
}

pub fn ender_chest_click(player: PlayerId) -> HostEvent {
    HostEvent::BlockInteract(InteractEvent {
        player,
        action: InteractAction::RightClickBlock,
        block: Some(BlockKind::ender_chest()),
    })
}

/// A vault whose metadata has no `order` entry.
pub fn unordered_vault(container: ContainerHandle) -> VaultSet {
    let id = VaultId(Uuid::new_v4());
    vault_set([Vault::new(id, container, VaultMetadata::new().with("name", "loose"))])
}
