use bevy::prelude::*;

/// Message fired when a bar redraws because its target's health changed
#[derive(Message, Debug, Clone)]
pub struct HealthBarRedrawn {
    pub bar: Entity,
    pub target: Entity,
    pub health: f32,
}

/// Message fired when a bar sees its target's health go down
#[derive(Message, Debug, Clone)]
pub struct DamageTaken {
    pub bar: Entity,
    pub target: Entity,
    /// Health lost since the previous observation (always positive)
    pub amount: f32,
    /// Where the damage number appears
    pub position: Vec2,
}

impl DamageTaken {
    /// Text shown by the damage number, e.g. "-30".
    pub fn label(&self) -> String {
        format!("-{}", self.amount)
    }
}

/// Message fired when a bar despawns its target because health reached zero
#[derive(Message, Debug, Clone)]
pub struct TrackedEntityDepleted {
    pub bar: Entity,
    pub target: Entity,
}

/// Scene lifecycle notifications a host may forward to the health bars.
/// Hosts that never send any get the default behaviour: bars always tick.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneLifecycle {
    /// Stop updating; bars stay visible.
    Pause,
    Resume,
    /// Stop updating and hide bars and labels.
    Sleep,
    Wake,
    /// Despawn every bar. The registrar stays subscribed for a later restart.
    Shutdown,
}
