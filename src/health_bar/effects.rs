use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

use super::components::{BarAttachmentOf, DamagePopup, EntityFlash, FlashBaseline, HealthBar};
use super::config::HexColor;
use super::events::DamageTaken;
use super::geometry::BAR_DEPTH;
use crate::animation::PositionTween;

pub const POPUP_COLOR: HexColor = HexColor(0xb80a0a);
pub const POPUP_FONT_SIZE: f32 = 9.0;
/// How far a damage number floats up before it disappears.
pub const POPUP_RISE: f32 = 40.0;
pub const POPUP_MIN_MILLIS: u64 = 500;
pub const POPUP_MAX_MILLIS: u64 = 1000;
pub const FLASH_COLOR: HexColor = HexColor(0xcc0000);

/// Random lifetime of a damage number.
pub fn popup_duration(rng: &mut impl Rng) -> Duration {
    Duration::from_millis(rng.gen_range(POPUP_MIN_MILLIS..=POPUP_MAX_MILLIS))
}

/// Spawn a damage number and an entity flash for every detected health loss.
pub fn spawn_damage_effects(
    mut commands: Commands,
    mut damage: MessageReader<DamageTaken>,
    bars: Query<(), With<HealthBar>>,
    targets: Query<(&Transform, Option<&Sprite>)>,
) {
    let mut rng = rand::thread_rng();

    for event in damage.read() {
        let start = event.position;
        let popup = commands
            .spawn((
                DamagePopup,
                Text2d::new(event.label()),
                TextFont {
                    font_size: POPUP_FONT_SIZE,
                    ..default()
                },
                TextColor(POPUP_COLOR.to_color()),
                Transform::from_translation(start.extend(BAR_DEPTH + 1.0)),
                PositionTween::new(
                    start,
                    start + Vec2::new(0.0, POPUP_RISE),
                    popup_duration(&mut rng),
                    EaseFunction::QuadraticOut,
                ),
            ))
            .id();

        // A killing blow takes the bar with it; its number still plays out unowned.
        if !bars.contains(event.bar) {
            continue;
        }
        commands.entity(popup).insert(BarAttachmentOf(event.bar));

        let Ok((transform, sprite)) = targets.get(event.target) else {
            continue;
        };
        commands.entity(event.target).insert_if_new(FlashBaseline {
            color: sprite.map(|sprite| sprite.color),
            scale: transform.scale,
        });
        commands.spawn((EntityFlash::new(event.target), BarAttachmentOf(event.bar)));
    }
}

/// Hold flashed entities tinted, faded and shrunk until their flash runs out.
pub fn apply_entity_flashes(
    mut commands: Commands,
    time: Res<Time>,
    mut flashes: Query<(Entity, &mut EntityFlash)>,
    mut targets: Query<(&mut Transform, Option<&mut Sprite>, &FlashBaseline)>,
) {
    for (entity, mut flash) in flashes.iter_mut() {
        flash.tick(time.delta());
        if flash.is_finished() {
            commands.entity(entity).try_despawn();
            continue;
        }

        if let Ok((mut transform, sprite, baseline)) = targets.get_mut(flash.target) {
            transform.scale = baseline.scale * EntityFlash::SCALE;
            if let Some(mut sprite) = sprite {
                sprite.color = FLASH_COLOR.to_color().with_alpha(EntityFlash::ALPHA);
            }
        }
    }
}

/// Restore an entity's look once its last flash is gone, finished or cancelled.
pub fn on_entity_flash_removed(
    remove: On<Remove, EntityFlash>,
    mut commands: Commands,
    flashes: Query<(Entity, &EntityFlash)>,
    mut targets: Query<(&FlashBaseline, &mut Transform, Option<&mut Sprite>)>,
) {
    let Ok((_, flash)) = flashes.get(remove.entity) else {
        return;
    };
    let target = flash.target;
    let still_flashing = flashes
        .iter()
        .any(|(entity, other)| entity != remove.entity && other.target == target);
    if still_flashing {
        return;
    }

    let Ok((baseline, mut transform, sprite)) = targets.get_mut(target) else {
        return;
    };
    transform.scale = baseline.scale;
    if let (Some(mut sprite), Some(color)) = (sprite, baseline.color) {
        sprite.color = color;
    }
    commands.entity(target).try_remove::<FlashBaseline>();
}

/// Remove damage numbers whose rise has finished.
pub fn despawn_finished_popups(
    mut commands: Commands,
    popups: Query<(Entity, &PositionTween), With<DamagePopup>>,
) {
    for (entity, tween) in popups.iter() {
        if tween.is_finished() {
            commands.entity(entity).try_despawn();
        }
    }
}
