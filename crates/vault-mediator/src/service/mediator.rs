//! Interaction Mediator
//!
//! Top-level orchestrator wired to the host event stream. Interactions with
//! a vault are resolved, classified and decided; denials suppress the
//! interaction and produce exactly one message for the acting player.
//! Connects and disconnects go through the session lifecycle only.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use vault_types::{
    BlockKind, ClickEvent, ContainerHandle, DragEvent, InteractAction, InteractEvent, ItemStack,
    MessageKey, Notice, Outcome, PlayerId, TransferEvent,
};

use crate::domain::{
    classify_click, classify_drag, classify_transfer, subject_item, swap_counterpart, Blacklist,
    Decision, DenyReason, Intent, MediatorConfig, PolicyEnforcer, SessionPhase, SessionSignal,
    VaultRegistry,
};
use crate::error::{ConfigError, MediatorError};
use crate::metrics::Metrics;
use crate::ports::{
    InteractionHandler, MessageCatalog, PermissionSource, SelectorLauncher, VaultPersister,
};
use crate::service::SessionLifecycleManager;

/// Page the selector opens on.
pub const FIRST_SELECTOR_PAGE: u32 = 1;

/// Driven ports the mediator is constructed with
#[derive(Clone)]
pub struct MediatorPorts {
    pub persister: Arc<dyn VaultPersister>,
    pub permissions: Arc<dyn PermissionSource>,
    pub messages: Arc<dyn MessageCatalog>,
    pub selector: Arc<dyn SelectorLauncher>,
}

/// Interaction Mediator
///
/// Owned by the dispatch thread; every handler takes `&mut self`.
pub struct InteractionMediator {
    config: MediatorConfig,
    registry: VaultRegistry,
    lifecycle: SessionLifecycleManager,
    policy: PolicyEnforcer,
    permissions: Arc<dyn PermissionSource>,
    messages: Arc<dyn MessageCatalog>,
    selector: Arc<dyn SelectorLauncher>,
    metrics: Arc<Metrics>,
}

impl InteractionMediator {
    /// Create a mediator whose timers and workers report on `signals`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(
        config: MediatorConfig,
        ports: MediatorPorts,
        signals: mpsc::UnboundedSender<SessionSignal>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let metrics = Arc::new(Metrics::new());
        let lifecycle = SessionLifecycleManager::new(
            ports.persister,
            signals,
            config.load_delay(),
            Arc::clone(&metrics),
        );

        Ok(Self {
            policy: PolicyEnforcer::new(Blacklist::from_config(&config.blacklist)),
            config,
            registry: VaultRegistry::new(),
            lifecycle,
            permissions: ports.permissions,
            messages: ports.messages,
            selector: ports.selector,
            metrics,
        })
    }

    /// Swap in a reloaded configuration.
    ///
    /// Sessions are untouched; loads already scheduled keep their delay.
    pub fn apply_config(&mut self, config: MediatorConfig) -> Result<(), ConfigError> {
        config.validate()?;

        self.policy
            .set_blacklist(Blacklist::from_config(&config.blacklist));
        self.lifecycle.set_load_delay(config.load_delay());
        info!(
            load_delay_ticks = config.load_delay_ticks,
            replace_with_selector = config.replace_with_selector,
            blacklist_enabled = config.blacklist.enabled,
            blacklist_items = config.blacklist.items.len(),
            "Mediator configuration applied"
        );
        self.config = config;
        Ok(())
    }

    /// Save every loaded player and cancel every pending load.
    pub fn shutdown(&mut self) -> usize {
        self.lifecycle.shutdown(&mut self.registry)
    }

    /// No persistence work is running.
    pub fn is_idle(&self) -> bool {
        self.lifecycle.is_idle()
    }

    pub fn config(&self) -> &MediatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &VaultRegistry {
        &self.registry
    }

    pub fn is_loaded(&self, player: PlayerId) -> bool {
        self.registry.is_loaded(player)
    }

    pub fn phase(&self, player: PlayerId) -> Option<SessionPhase> {
        self.lifecycle.phase(player)
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    /// Resolve, decide and turn the decision into an outcome.
    fn mediate(
        &self,
        player: PlayerId,
        container: ContainerHandle,
        intent: Intent,
        item: Option<&ItemStack>,
    ) -> Result<Outcome, MediatorError> {
        let vault = self
            .registry
            .resolve(player, container)
            .ok_or(MediatorError::UnresolvedVault { player, container })?;

        let decision = self
            .policy
            .decide(self.permissions.as_ref(), player, vault, intent, item)?;

        debug!(
            player = %player,
            container = %container,
            vault = %vault.id(),
            ?intent,
            ?decision,
            "Vault interaction decided"
        );

        Ok(match decision {
            Decision::Allow => Outcome::proceed(),
            Decision::Deny(reason) => self.deny(player, reason),
        })
    }

    fn deny(&self, player: PlayerId, reason: DenyReason) -> Outcome {
        self.metrics.record_denial(reason);
        Outcome::denied(self.notice(player, reason.message_key()))
    }

    fn notice(&self, player: PlayerId, key: MessageKey) -> Notice {
        Notice {
            player,
            key,
            text: self.messages.get(key),
        }
    }

    /// Log and count an error before handing it to the host binding.
    fn report(&self, err: MediatorError) -> MediatorError {
        if err.is_consistency_violation() {
            self.metrics.record_violation();
            error!(error = %err, "Consistency violation, event processing aborted");
        } else {
            warn!(error = %err, "Event rejected");
        }
        err
    }

    fn is_selector_trigger(&self, event: &InteractEvent) -> bool {
        self.config.replace_with_selector
            && event.action == InteractAction::RightClickBlock
            && event
                .block
                .as_ref()
                .is_some_and(|block| block.as_str() == BlockKind::ENDER_CHEST)
    }
}

impl InteractionHandler for InteractionMediator {
    fn on_connect(&mut self, player: PlayerId) -> Result<Outcome, MediatorError> {
        self.lifecycle
            .on_connect(player)
            .map_err(|e| self.report(e))?;
        Ok(Outcome::proceed())
    }

    fn on_disconnect(&mut self, player: PlayerId) -> Result<Outcome, MediatorError> {
        self.lifecycle.on_disconnect(player, &mut self.registry);
        Ok(Outcome::proceed())
    }

    fn on_click(&mut self, event: &ClickEvent) -> Result<Outcome, MediatorError> {
        if !self.registry.is_vault(event.view_top) {
            return Ok(Outcome::proceed());
        }

        let intent = classify_click(
            event.view_top,
            event.clicked,
            event.action,
            event.slot_occupied(),
        );
        let item = subject_item(intent, event);

        // Swaps move stacks both ways; each leg is decided on its own.
        let outcome = self
            .mediate(event.player, event.view_top, intent, item)
            .and_then(|outcome| match swap_counterpart(intent, event) {
                Some((leg, stack)) if outcome.is_allowed() => {
                    self.mediate(event.player, event.view_top, leg, Some(stack))
                }
                _ => Ok(outcome),
            });

        outcome.map_err(|e| self.report(e))
    }

    fn on_drag(&mut self, event: &DragEvent) -> Result<Outcome, MediatorError> {
        if !self.registry.is_vault(event.view_top) {
            return Ok(Outcome::proceed());
        }

        let intent = classify_drag(event.lands_in_view_top);
        self.mediate(event.player, event.view_top, intent, event.cursor.as_ref())
            .map_err(|e| self.report(e))
    }

    fn on_transfer(&mut self, event: &TransferEvent) -> Result<Outcome, MediatorError> {
        let intent = classify_transfer(self.registry.is_vault(event.destination));
        if intent == Intent::Neutral {
            return Ok(Outcome::proceed());
        }

        match self.policy.decide_transfer(&event.item) {
            Decision::Allow => Ok(Outcome::proceed()),
            Decision::Deny(reason) => {
                self.metrics.record_transfer_blocked();
                debug!(
                    source = %event.source,
                    destination = %event.destination,
                    item = %event.item.item_type,
                    ?reason,
                    "Transfer into vault blocked"
                );
                Ok(Outcome::suppress())
            }
        }
    }

    fn on_block_interact(&mut self, event: &InteractEvent) -> Result<Outcome, MediatorError> {
        if !self.is_selector_trigger(event) {
            return Ok(Outcome::proceed());
        }

        if !self.registry.is_loaded(event.player) {
            self.metrics.record_not_loaded();
            debug!(player = %event.player, "Selector requested before vaults loaded");
            return Ok(Outcome::denied(
                self.notice(event.player, MessageKey::PlayerNotLoaded),
            ));
        }

        self.selector.launch_for(event.player, FIRST_SELECTOR_PAGE);
        self.metrics.record_selector_launch();
        debug!(player = %event.player, "Vault selector launched");
        Ok(Outcome::suppress())
    }

    fn on_signal(&mut self, signal: SessionSignal) -> Result<(), MediatorError> {
        self.lifecycle
            .handle_signal(signal, &mut self.registry)
            .map_err(|e| self.report(e))
    }
}
