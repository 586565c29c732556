use bevy::prelude::*;

use super::config::HealthBarConfig;

/// A health bar drawn above the entity it tracks.
///
/// Spawn it together with [`HealthBarOf`]; the rest (sprites, label, follow
/// tween) is built when the component is added.
#[derive(Component, Debug, Clone)]
#[require(Transform, Visibility)]
pub struct HealthBar {
    pub config: HealthBarConfig,
    /// Health seen on the last redraw. `None` until the first frame.
    pub last_observed_health: Option<f32>,
}

impl HealthBar {
    pub fn new(config: HealthBarConfig) -> Self {
        Self {
            config,
            last_observed_health: None,
        }
    }

    /// Health lost since the last observation, if it went down.
    pub fn damage_since_last(&self, current: f32) -> Option<f32> {
        match self.last_observed_health {
            Some(previous) if previous > current => Some(previous - current),
            _ => None,
        }
    }
}

/// Links a bar to the entity it tracks.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
#[relationship(relationship_target = HealthBars)]
pub struct HealthBarOf(pub Entity);

impl HealthBarOf {
    pub fn target(&self) -> Entity {
        self.0
    }
}

/// Bars tracking this entity. Despawning the entity despawns them.
#[derive(Component, Debug)]
#[relationship_target(relationship = HealthBarOf, linked_spawn)]
pub struct HealthBars(Vec<Entity>);

/// Entities a bar owns that are not its children: label, damage popups and flashes.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
#[relationship(relationship_target = BarAttachments)]
pub struct BarAttachmentOf(pub Entity);

/// Despawning a bar cancels everything it spawned.
#[derive(Component, Debug)]
#[relationship_target(relationship = BarAttachmentOf, linked_spawn)]
pub struct BarAttachments(Vec<Entity>);

/// Entities a bar draws with.
#[derive(Component, Debug, Clone, Copy)]
pub struct BarParts {
    pub background: Entity,
    pub fill: Entity,
    pub label: Option<Entity>,
}

#[derive(Component, Debug)]
pub struct BarBackground;

#[derive(Component, Debug)]
pub struct BarFill;

#[derive(Component, Debug)]
pub struct HealthBarLabel;

/// Floating damage number; despawned when its tween finishes.
#[derive(Component, Debug)]
pub struct DamagePopup;

/// Tint, fade and shrink applied to a damaged entity.
/// Lives on its own entity so several flashes can overlap on one target.
#[derive(Component, Debug, Clone)]
pub struct EntityFlash {
    pub target: Entity,
    pub timer: Timer,
}

impl EntityFlash {
    pub const DURATION: f32 = 0.5;
    pub const ALPHA: f32 = 0.7;
    pub const SCALE: f32 = 0.85;

    pub fn new(target: Entity) -> Self {
        Self {
            target,
            timer: Timer::from_seconds(Self::DURATION, TimerMode::Once),
        }
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        self.timer.tick(delta);
    }

    pub fn is_finished(&self) -> bool {
        self.timer.is_finished()
    }
}

/// Appearance of a flashed entity before its first active flash.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FlashBaseline {
    pub color: Option<Color>,
    pub scale: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_bar_has_no_observation() {
        let bar = HealthBar::new(HealthBarConfig::default());
        assert!(bar.last_observed_health.is_none());
        assert_eq!(bar.damage_since_last(50.0), None);
    }

    #[test]
    fn test_damage_since_last() {
        let mut bar = HealthBar::new(HealthBarConfig::default());
        bar.last_observed_health = Some(80.0);
        assert_eq!(bar.damage_since_last(50.0), Some(30.0));
        assert_eq!(bar.damage_since_last(80.0), None);
        assert_eq!(bar.damage_since_last(90.0), None);
    }

    #[test]
    fn test_entity_flash_lasts_half_a_second() {
        let mut world = World::new();
        let target = world.spawn_empty().id();
        let mut flash = EntityFlash::new(target);
        assert!(!flash.is_finished());

        flash.tick(Duration::from_millis(400));
        assert!(!flash.is_finished());

        flash.tick(Duration::from_millis(150));
        assert!(flash.is_finished());
    }

    #[test]
    fn test_health_bar_of_links_target() {
        let mut world = World::new();
        let target = world.spawn_empty().id();
        let bar = world
            .spawn((HealthBar::new(HealthBarConfig::default()), HealthBarOf(target)))
            .id();

        assert_eq!(world.get::<HealthBarOf>(bar).unwrap().target(), target);
        assert!(world.get::<HealthBars>(target).is_some());
    }

    #[test]
    fn test_despawning_target_despawns_bar() {
        let mut world = World::new();
        let target = world.spawn_empty().id();
        let bar = world
            .spawn((HealthBar::new(HealthBarConfig::default()), HealthBarOf(target)))
            .id();
        let popup = world.spawn((DamagePopup, BarAttachmentOf(bar))).id();

        world.despawn(target);

        assert!(!world.entities().contains(bar));
        assert!(!world.entities().contains(popup));
    }
}
