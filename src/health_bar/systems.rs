use bevy::prelude::*;

use super::components::{
    BarAttachmentOf, BarBackground, BarFill, BarParts, DamagePopup, HealthBar, HealthBarLabel,
    HealthBarOf,
};
use super::config::HealthBarConfig;
use super::events::{DamageTaken, HealthBarRedrawn, SceneLifecycle, TrackedEntityDepleted};
use super::geometry::{follow_anchor, label_anchor, spawn_anchor, BarGeometry, BarRect, BAR_DEPTH};
use super::registrar::{destroy_registrar, HealthBarRegistrar};
use crate::animation::PositionTween;
use crate::target::{EntityBounds, Health};

fn rect_sprite(rect: &BarRect, color: Color) -> (Sprite, Transform) {
    (
        Sprite::from_color(color, rect.sprite_size()),
        Transform::from_translation(rect.local_center().extend(0.0)),
    )
}

/// Build a freshly added bar: placement, sprites, label and follow tweens.
#[allow(clippy::type_complexity)]
pub fn on_health_bar_added(
    add: On<Add, HealthBar>,
    mut commands: Commands,
    mut registrar: ResMut<HealthBarRegistrar>,
    bars: Query<(&HealthBar, &HealthBarOf)>,
    targets: Query<(&Transform, &EntityBounds, Option<&Health>)>,
) {
    let bar = add.entity;

    if !registrar.register(bar) {
        warn!("Health bar registrar was destroyed; discarding bar {:?}", bar);
        commands.entity(bar).try_despawn();
        return;
    }

    let Ok((health_bar, of)) = bars.get(bar) else {
        warn!("Health bar {:?} has no target; discarding it", bar);
        commands.entity(bar).try_despawn();
        return;
    };
    let Ok((target_transform, bounds, health)) = targets.get(of.target()) else {
        warn!(
            "Health bar target {:?} has no Transform or EntityBounds; discarding bar {:?}",
            of.target(),
            bar
        );
        commands.entity(bar).try_despawn();
        return;
    };

    let config = &health_bar.config;
    let position = spawn_anchor(target_transform.translation.truncate(), bounds);
    let geometry = BarGeometry::initial(config);

    let background = commands
        .spawn((
            BarBackground,
            rect_sprite(&geometry.background, config.background.to_color()),
            ChildOf(bar),
        ))
        .id();
    let fill = commands
        .spawn((
            BarFill,
            rect_sprite(&geometry.fill, geometry.fill_color.to_color()),
            ChildOf(bar),
        ))
        .id();

    let label = config.label_name().map(|name| {
        let text = health
            .and_then(|health| config.label_text(health))
            .unwrap_or_else(|| name.to_string());
        spawn_label(&mut commands, bar, config, text, label_anchor(position, config))
    });

    commands.entity(bar).insert((
        Transform::from_translation(position.extend(BAR_DEPTH)),
        PositionTween::follow(position),
        BarParts {
            background,
            fill,
            label,
        },
    ));

    debug!("Created health bar {:?} for {:?}", bar, of.target());
}

fn spawn_label(
    commands: &mut Commands,
    bar: Entity,
    config: &HealthBarConfig,
    text: String,
    position: Vec2,
) -> Entity {
    commands
        .spawn((
            HealthBarLabel,
            Text2d::new(text),
            TextFont {
                font_size: config.font.size,
                ..default()
            },
            TextColor(config.font.fill.to_color()),
            Transform::from_translation(position.extend(BAR_DEPTH + 1.0)),
            PositionTween::follow(position),
            BarAttachmentOf(bar),
        ))
        .id()
}

/// Drop a bar from the registrar when it goes away, however that happens.
pub fn on_health_bar_removed(
    remove: On<Remove, HealthBar>,
    registrar: Option<ResMut<HealthBarRegistrar>>,
) {
    if let Some(mut registrar) = registrar {
        if registrar.unregister(remove.entity) {
            debug!("Health bar {:?} torn down", remove.entity);
        }
    }
}

/// Point every bar's follow tween at its target's current position.
pub fn follow_tracked_entities(
    mut bars: Query<(&HealthBarOf, &Transform, &mut PositionTween), With<HealthBar>>,
    targets: Query<(&Transform, &EntityBounds), Without<HealthBar>>,
) {
    for (of, transform, mut tween) in bars.iter_mut() {
        let Ok((target_transform, bounds)) = targets.get(of.target()) else {
            continue;
        };
        let goal = follow_anchor(target_transform.translation.truncate(), bounds);
        tween.retarget(transform.translation.truncate(), goal);
        if !tween.is_playing() {
            tween.play();
        }
    }
}

/// Point every label's follow tween just above its bar.
pub fn follow_bars_with_labels(
    bars: Query<(&HealthBar, &Transform)>,
    mut labels: Query<(&BarAttachmentOf, &Transform, &mut PositionTween), With<HealthBarLabel>>,
) {
    for (owner, transform, mut tween) in labels.iter_mut() {
        let Ok((bar, bar_transform)) = bars.get(owner.0) else {
            continue;
        };
        let goal = label_anchor(bar_transform.translation.truncate(), &bar.config);
        tween.retarget(transform.translation.truncate(), goal);
        if !tween.is_playing() {
            tween.play();
        }
    }
}

/// Redraw bars whose target's health changed since the last frame.
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub fn refresh_health_bars(
    mut commands: Commands,
    mut bars: Query<(Entity, &mut HealthBar, &HealthBarOf, &BarParts)>,
    targets: Query<
        (&Health, &Transform, &EntityBounds),
        (Without<BarFill>, Without<BarBackground>),
    >,
    mut rects: Query<(&mut Sprite, &mut Transform), Or<(With<BarFill>, With<BarBackground>)>>,
    mut labels: Query<&mut Text2d, With<HealthBarLabel>>,
    mut redrawn: MessageWriter<HealthBarRedrawn>,
    mut damage: MessageWriter<DamageTaken>,
    mut depleted: MessageWriter<TrackedEntityDepleted>,
) {
    for (bar, mut health_bar, of, parts) in bars.iter_mut() {
        let target = of.target();
        let Ok((health, transform, bounds)) = targets.get(target) else {
            continue;
        };
        let current = health.current;
        if health_bar.last_observed_health == Some(current) {
            continue;
        }

        let geometry = BarGeometry::for_health(&health_bar.config, current);
        redraw_rect(
            &mut rects,
            parts.background,
            &geometry.background,
            health_bar.config.background.to_color(),
        );
        redraw_rect(&mut rects, parts.fill, &geometry.fill, geometry.fill_color.to_color());

        if let Some(text) = health_bar.config.label_text(health) {
            if let Some(mut label) = parts.label.and_then(|label| labels.get_mut(label).ok()) {
                **label = text;
            }
        }

        redrawn.write(HealthBarRedrawn {
            bar,
            target,
            health: current,
        });

        if let Some(amount) = health_bar.damage_since_last(current) {
            damage.write(DamageTaken {
                bar,
                target,
                amount,
                position: follow_anchor(transform.translation.truncate(), bounds),
            });
        }

        health_bar.last_observed_health = Some(current);

        if health.is_dead() {
            info!("Health of {:?} depleted; despawning it", target);
            depleted.write(TrackedEntityDepleted { bar, target });
            commands.entity(target).try_despawn();
        }
    }
}

fn redraw_rect(
    rects: &mut Query<(&mut Sprite, &mut Transform), Or<(With<BarFill>, With<BarBackground>)>>,
    entity: Entity,
    rect: &BarRect,
    color: Color,
) {
    if let Ok((mut sprite, mut transform)) = rects.get_mut(entity) {
        sprite.color = color;
        sprite.custom_size = Some(rect.sprite_size());
        transform.translation = rect.local_center().extend(transform.translation.z);
    }
}

/// Apply lifecycle notifications forwarded by the host.
#[allow(clippy::type_complexity)]
pub fn handle_scene_lifecycle(
    mut commands: Commands,
    mut events: MessageReader<SceneLifecycle>,
    mut registrar: ResMut<HealthBarRegistrar>,
    mut visibility: Query<
        &mut Visibility,
        Or<(With<HealthBar>, With<HealthBarLabel>, With<DamagePopup>)>,
    >,
) {
    for event in events.read() {
        match event {
            SceneLifecycle::Pause => registrar.pause(),
            SceneLifecycle::Resume => registrar.resume(),
            SceneLifecycle::Sleep => {
                registrar.sleep();
                for mut visibility in visibility.iter_mut() {
                    *visibility = Visibility::Hidden;
                }
            }
            SceneLifecycle::Wake => {
                registrar.wake();
                for mut visibility in visibility.iter_mut() {
                    *visibility = Visibility::Inherited;
                }
            }
            SceneLifecycle::Shutdown => {
                for bar in registrar.clear() {
                    commands.entity(bar).try_despawn();
                }
            }
        }
    }
}

/// The app shutting down is the host's teardown event.
pub fn teardown_on_app_exit(mut commands: Commands, mut exits: MessageReader<AppExit>) {
    if exits.read().count() > 0 {
        commands.queue(destroy_registrar);
    }
}
