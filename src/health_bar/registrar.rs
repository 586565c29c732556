use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{BarAttachmentOf, DamagePopup, HealthBar, HealthBarOf};
use super::config::HealthBarConfig;

/// Subscription of the bar systems to the frame loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RegistrarState {
    /// No bar has been added yet
    #[default]
    Uninitialized,
    /// Bars tick every frame
    Subscribed,
    /// Torn down for good; new bars are rejected
    Unsubscribed,
}

/// Per-app bookkeeping of live health bars.
#[derive(Resource, Debug, Default)]
pub struct HealthBarRegistrar {
    state: RegistrarState,
    bars: HashSet<Entity>,
    paused: bool,
    asleep: bool,
}

impl HealthBarRegistrar {
    pub fn state(&self) -> RegistrarState {
        self.state
    }

    pub fn is_subscribed(&self) -> bool {
        self.state == RegistrarState::Subscribed
    }

    /// Whether bar systems should run this frame.
    pub fn is_ticking(&self) -> bool {
        self.is_subscribed() && !self.paused && !self.asleep
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn contains(&self, bar: Entity) -> bool {
        self.bars.contains(&bar)
    }

    /// Track a new bar, subscribing on the first one.
    /// Returns `false` once the registrar has been destroyed.
    pub fn register(&mut self, bar: Entity) -> bool {
        match self.state {
            RegistrarState::Unsubscribed => false,
            RegistrarState::Uninitialized => {
                self.state = RegistrarState::Subscribed;
                self.bars.insert(bar);
                true
            }
            RegistrarState::Subscribed => {
                self.bars.insert(bar);
                true
            }
        }
    }

    pub fn unregister(&mut self, bar: Entity) -> bool {
        self.bars.remove(&bar)
    }

    /// Unsubscribe and hand back the bars that were still live.
    /// Calling it again returns nothing.
    pub fn destroy(&mut self) -> Vec<Entity> {
        self.state = RegistrarState::Unsubscribed;
        self.paused = false;
        self.asleep = false;
        self.bars.drain().collect()
    }

    /// Forget every bar without unsubscribing.
    pub fn clear(&mut self) -> Vec<Entity> {
        self.bars.drain().collect()
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn sleep(&mut self) {
        self.asleep = true;
    }

    pub fn wake(&mut self) {
        self.asleep = false;
    }
}

/// Run condition for the per-frame bar systems.
pub fn registrar_is_ticking(registrar: Option<Res<HealthBarRegistrar>>) -> bool {
    registrar.is_some_and(|registrar| registrar.is_ticking())
}

/// Tear down the registrar and despawn every live bar, along with damage
/// numbers that outlived their bar. Safe to call repeatedly.
pub fn destroy_registrar(world: &mut World) {
    let Some(mut registrar) = world.get_resource_mut::<HealthBarRegistrar>() else {
        return;
    };
    let bars = registrar.destroy();
    if !bars.is_empty() {
        debug!("Destroying health bar registrar with {} live bars", bars.len());
    }
    for bar in bars {
        if let Ok(entity) = world.get_entity_mut(bar) {
            entity.despawn();
        }
    }

    // Nothing animates these once the registrar stops ticking.
    let orphaned: Vec<Entity> = world
        .query_filtered::<Entity, (With<DamagePopup>, Without<BarAttachmentOf>)>()
        .iter(world)
        .collect();
    for popup in orphaned {
        world.despawn(popup);
    }
}

/// Health bar entry points on `Commands`.
pub trait HealthBarCommandsExt {
    /// Create a bar tracking `target` and return the bar entity.
    fn add_health_bar(&mut self, target: Entity, config: HealthBarConfig) -> Entity;

    /// Tear down a single bar. Does nothing if it is already gone.
    fn remove_health_bar(&mut self, bar: Entity);

    /// Tear down the registrar and every bar it tracks.
    fn destroy_health_bars(&mut self);
}

impl HealthBarCommandsExt for Commands<'_, '_> {
    fn add_health_bar(&mut self, target: Entity, config: HealthBarConfig) -> Entity {
        self.spawn((HealthBar::new(config), HealthBarOf(target))).id()
    }

    fn remove_health_bar(&mut self, bar: Entity) {
        if let Ok(mut bar) = self.get_entity(bar) {
            bar.try_despawn();
        }
    }

    fn destroy_health_bars(&mut self) {
        self.queue(destroy_registrar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn test_default_state_is_uninitialized() {
        let registrar = HealthBarRegistrar::default();
        assert_eq!(registrar.state(), RegistrarState::Uninitialized);
        assert!(!registrar.is_subscribed());
        assert!(!registrar.is_ticking());
    }

    #[test]
    fn test_first_register_subscribes() {
        let bars = entities(2);
        let mut registrar = HealthBarRegistrar::default();

        assert!(registrar.register(bars[0]));
        assert_eq!(registrar.state(), RegistrarState::Subscribed);
        assert!(registrar.register(bars[1]));
        assert_eq!(registrar.len(), 2);
        assert!(registrar.is_ticking());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let bars = entities(1);
        let mut registrar = HealthBarRegistrar::default();
        registrar.register(bars[0]);

        assert_eq!(registrar.destroy(), vec![bars[0]]);
        assert!(registrar.destroy().is_empty());
        assert_eq!(registrar.state(), RegistrarState::Unsubscribed);
        assert!(!registrar.is_subscribed());
    }

    #[test]
    fn test_destroy_without_init() {
        let mut registrar = HealthBarRegistrar::default();
        assert!(registrar.destroy().is_empty());
        assert_eq!(registrar.state(), RegistrarState::Unsubscribed);
    }

    #[test]
    fn test_destroyed_registrar_rejects_bars() {
        let bars = entities(1);
        let mut registrar = HealthBarRegistrar::default();
        registrar.destroy();

        assert!(!registrar.register(bars[0]));
        assert!(registrar.is_empty());
        assert_eq!(registrar.state(), RegistrarState::Unsubscribed);
    }

    #[test]
    fn test_pause_and_sleep_stop_ticking() {
        let bars = entities(1);
        let mut registrar = HealthBarRegistrar::default();
        registrar.register(bars[0]);

        registrar.pause();
        assert!(!registrar.is_ticking());
        registrar.resume();
        assert!(registrar.is_ticking());

        registrar.sleep();
        assert!(!registrar.is_ticking());
        registrar.wake();
        assert!(registrar.is_ticking());
    }

    #[test]
    fn test_clear_keeps_subscription() {
        let bars = entities(2);
        let mut registrar = HealthBarRegistrar::default();
        registrar.register(bars[0]);
        registrar.register(bars[1]);

        assert_eq!(registrar.clear().len(), 2);
        assert!(registrar.is_empty());
        assert!(registrar.is_subscribed());
    }

    #[test]
    fn test_destroy_registrar_despawns_orphaned_popups() {
        let mut world = World::new();
        world.init_resource::<HealthBarRegistrar>();
        let bar = world.spawn_empty().id();
        let owned = world.spawn((DamagePopup, BarAttachmentOf(bar))).id();
        let orphan = world.spawn(DamagePopup).id();

        destroy_registrar(&mut world);

        assert!(!world.entities().contains(orphan));
        assert!(world.entities().contains(owned));
    }

    #[test]
    fn test_destroy_registrar_without_resource() {
        let mut world = World::new();
        // Should not panic
        destroy_registrar(&mut world);
    }
}
