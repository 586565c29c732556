use bevy::prelude::*;

use super::effects::{
    apply_entity_flashes, despawn_finished_popups, on_entity_flash_removed, spawn_damage_effects,
};
use super::events::{DamageTaken, HealthBarRedrawn, SceneLifecycle, TrackedEntityDepleted};
use super::registrar::{registrar_is_ticking, HealthBarRegistrar};
use super::systems::{
    follow_bars_with_labels, follow_tracked_entities, handle_scene_lifecycle, on_health_bar_added,
    on_health_bar_removed, refresh_health_bars, teardown_on_app_exit,
};
use crate::animation::advance_position_tweens;

/// System sets for the per-frame bar update, in execution order
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HealthBarSets {
    /// Lifecycle notifications and teardown; always runs
    Lifecycle,
    /// Retarget follow tweens at the tracked entities
    Follow,
    /// Redraw bars whose health changed
    Refresh,
    /// Spawn damage numbers and flashes
    Effects,
    /// Advance tweens and flashes, drop finished effects
    Animate,
}

/// Health bar plugin: registrar, observers and the per-frame update
pub fn plugin(app: &mut App) {
    app.init_resource::<HealthBarRegistrar>()
        .add_message::<HealthBarRedrawn>()
        .add_message::<DamageTaken>()
        .add_message::<TrackedEntityDepleted>()
        .add_message::<SceneLifecycle>()
        .add_message::<AppExit>()
        .add_observer(on_health_bar_added)
        .add_observer(on_health_bar_removed)
        .add_observer(on_entity_flash_removed)
        .configure_sets(
            Update,
            (
                HealthBarSets::Follow,
                HealthBarSets::Refresh,
                HealthBarSets::Effects,
                HealthBarSets::Animate,
            )
                .chain()
                .run_if(registrar_is_ticking),
        )
        .configure_sets(Update, HealthBarSets::Lifecycle.before(HealthBarSets::Follow))
        .add_systems(
            Update,
            (handle_scene_lifecycle, teardown_on_app_exit)
                .chain()
                .in_set(HealthBarSets::Lifecycle),
        )
        .add_systems(
            Update,
            (follow_tracked_entities, follow_bars_with_labels)
                .chain()
                .in_set(HealthBarSets::Follow),
        )
        .add_systems(Update, refresh_health_bars.in_set(HealthBarSets::Refresh))
        .add_systems(Update, spawn_damage_effects.in_set(HealthBarSets::Effects))
        .add_systems(
            Update,
            (advance_position_tweens, apply_entity_flashes, despawn_finished_popups)
                .chain()
                .in_set(HealthBarSets::Animate),
        );
}
