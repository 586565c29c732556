use bevy::prelude::*;

use super::tween::PositionTween;

/// Step every playing tween and write the result into the entity's translation.
/// Depth (z) is left untouched.
pub fn advance_position_tweens(
    time: Res<Time>,
    mut query: Query<(&mut PositionTween, &mut Transform)>,
) {
    for (mut tween, mut transform) in query.iter_mut() {
        if let Some(position) = tween.tick(time.delta()) {
            transform.translation.x = position.x;
            transform.translation.y = position.y;
        }
    }
}
