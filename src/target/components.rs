use bevy::prelude::*;

/// Health of an entity that can carry a health bar.
/// Bars read `current` on a 0-100 scale; `max` is only used for display.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    /// Create a new Health component with full health
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage to this entity
    pub fn take_damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    /// Check if this entity is dead
    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// "current / max", rounded to whole points
    pub fn display(&self) -> String {
        format!("{:.0} / {:.0}", self.current, self.max)
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Width and height of an entity's bounding box, centred on its `Transform`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct EntityBounds(pub Vec2);

impl EntityBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self(Vec2::new(width, height))
    }

    pub fn width(&self) -> f32 {
        self.0.x
    }

    pub fn height(&self) -> f32 {
        self.0.y
    }

    /// Top-left corner of the box in world space (y points up).
    pub fn top_left(&self, center: Vec2) -> Vec2 {
        Vec2::new(center.x - self.0.x / 2.0, center.y + self.0.y / 2.0)
    }
}

impl Default for EntityBounds {
    fn default() -> Self {
        Self(Vec2::splat(32.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod health_tests {
        use super::*;

        #[test]
        fn test_health_new() {
            let health = Health::new(50.0);
            assert_eq!(health.current, 50.0);
            assert_eq!(health.max, 50.0);
        }

        #[test]
        fn test_health_default() {
            let health = Health::default();
            assert_eq!(health.current, 100.0);
            assert_eq!(health.max, 100.0);
        }

        #[test]
        fn test_health_take_damage_clamps_to_zero() {
            let mut health = Health::new(50.0);
            health.take_damage(100.0);
            assert_eq!(health.current, 0.0);
            assert!(health.is_dead());
        }

        #[test]
        fn test_negative_health_is_dead() {
            let health = Health { current: -5.0, max: 100.0 };
            assert!(health.is_dead());
            assert!(!Health::new(1.0).is_dead());
        }

        #[test]
        fn test_health_display() {
            let health = Health { current: 42.4, max: 100.0 };
            assert_eq!(health.display(), "42 / 100");
        }
    }

    mod bounds_tests {
        use super::*;

        #[test]
        fn test_bounds_accessors() {
            let bounds = EntityBounds::new(40.0, 20.0);
            assert_eq!(bounds.width(), 40.0);
            assert_eq!(bounds.height(), 20.0);
        }

        #[test]
        fn test_top_left_is_up_and_left_of_center() {
            let bounds = EntityBounds::new(40.0, 20.0);
            assert_eq!(bounds.top_left(Vec2::new(100.0, 50.0)), Vec2::new(80.0, 60.0));
        }
    }
}
