//! # Mediation Benchmarks
//!
//! Everything on the per-click path runs on the host's dispatch thread, so
//! it has to stay far below a tick (50 ms):
//!
//! | Step | Target |
//! |------|--------|
//! | Classify a click | < 100ns |
//! | Registry lookup (`is_vault` + `resolve`) | < 1µs with 1000 players |
//! | Policy decision | < 1µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use uuid::Uuid;
use vault_mediator::adapters::InMemoryPermissions;
use vault_mediator::domain::{
    classify_click, vault_set, Blacklist, Intent, PolicyEnforcer, Vault, VaultRegistry,
};
use vault_types::{ContainerHandle, InventoryAction, InventoryRef, ItemStack, ItemType, PlayerId, VaultId};

// ============================================================================
// Classification
// ============================================================================

fn bench_classify_click(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier");
    let vault = ContainerHandle(1);
    let actions = [
        InventoryAction::PickupAll,
        InventoryAction::PlaceAll,
        InventoryAction::HotbarSwap,
        InventoryAction::MoveToOtherInventory,
        InventoryAction::CloneStack,
    ];

    group.throughput(Throughput::Elements(actions.len() as u64));
    group.bench_function("classify_click_mix", |b| {
        b.iter(|| {
            for action in actions {
                black_box(classify_click(
                    vault,
                    Some(InventoryRef::chest(vault)),
                    black_box(action),
                    true,
                ));
            }
        })
    });
    group.finish();
}

// ============================================================================
// Registry
// ============================================================================

fn populated_registry(players: u64, vaults_per_player: u64) -> (VaultRegistry, PlayerId, ContainerHandle) {
    let mut registry = VaultRegistry::new();
    let mut last = (PlayerId::random(), ContainerHandle(0));

    for p in 0..players {
        let player = PlayerId::random();
        let vaults = vault_set((0..vaults_per_player).map(|v| {
            let handle = ContainerHandle(p * vaults_per_player + v);
            Vault::with_order(VaultId(Uuid::new_v4()), handle, (v + 1) as i64)
        }));
        registry.register(player, vaults).expect("fresh player");
        last = (player, ContainerHandle(p * vaults_per_player + vaults_per_player - 1));
    }

    (registry, last.0, last.1)
}

fn bench_registry_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    for players in [10u64, 100, 1_000] {
        let (registry, player, container) = populated_registry(players, 6);
        group.bench_with_input(
            BenchmarkId::new("is_vault_and_resolve", players),
            &players,
            |b, _| {
                b.iter(|| {
                    black_box(registry.is_vault(black_box(container)));
                    black_box(registry.resolve(black_box(player), black_box(container)));
                })
            },
        );
    }
    group.finish();
}

// ============================================================================
// Policy
// ============================================================================

fn bench_policy_decide(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy");

    let blacklist = Blacklist::new(
        true,
        ["TNT", "BEDROCK", "BARRIER", "COMMAND_BLOCK"]
            .iter()
            .map(|name| ItemType::parse(name).expect("valid item type")),
    );
    let enforcer = PolicyEnforcer::new(blacklist);
    let permissions = InMemoryPermissions::new();
    let player = PlayerId::random();
    permissions.grant(player, "vault.3.take");

    let vault = Vault::with_order(VaultId(Uuid::new_v4()), ContainerHandle(1), 3);
    let stone = ItemStack::new(ItemType::parse("stone").expect("valid item type"), 64);

    group.bench_function("decide_take_allowed", |b| {
        b.iter(|| {
            black_box(enforcer.decide(&permissions, player, &vault, Intent::Take, Some(&stone)))
        })
    });
    group.bench_function("decide_add_denied", |b| {
        b.iter(|| black_box(enforcer.decide(&permissions, player, &vault, Intent::Add, Some(&stone))))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_classify_click,
    bench_registry_lookup,
    bench_policy_decide
);
criterion_main!(benches);
