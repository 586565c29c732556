pub mod components;
pub mod config;
pub mod effects;
pub mod events;
pub mod geometry;
pub mod plugin;
pub mod registrar;
pub mod systems;

pub use components::{
    BarAttachmentOf, BarAttachments, BarParts, DamagePopup, EntityFlash, HealthBar,
    HealthBarLabel, HealthBarOf, HealthBars,
};
pub use config::{ConfigError, HealthBarConfig, HexColor, LabelFont};
pub use events::{DamageTaken, HealthBarRedrawn, SceneLifecycle, TrackedEntityDepleted};
pub use plugin::{plugin, HealthBarSets};
pub use registrar::{destroy_registrar, HealthBarCommandsExt, HealthBarRegistrar, RegistrarState};
