pub use bevy::prelude::*;

// Re-export components
pub use crate::animation::PositionTween;
pub use crate::health_bar::components::*;
pub use crate::target::components::*;

// Re-export messages and configuration
pub use crate::health_bar::config::{ConfigError, HealthBarConfig, HexColor, LabelFont};
pub use crate::health_bar::events::*;
pub use crate::health_bar::registrar::{HealthBarCommandsExt, HealthBarRegistrar};
pub use crate::health_bar::HealthBarSets;
