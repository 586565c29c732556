pub mod systems;
pub mod tween;

pub use systems::advance_position_tweens;
pub use tween::{PositionTween, FOLLOW_DURATION};
