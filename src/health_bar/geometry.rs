//! Pixel layout of a bar and the anchors it follows.
//!
//! Bar-local rectangles use screen conventions: origin at the bar's top-left
//! corner, x to the right, y downward. World positions use Bevy's y-up axis.

use bevy::prelude::*;

use super::config::{HealthBarConfig, HexColor};
use crate::target::EntityBounds;

/// Gap between the background edge and the fill.
pub const BORDER: f32 = 2.0;
/// Below this health the fill switches to the danger colour.
pub const DANGER_THRESHOLD: f32 = 40.0;
/// Outward offset of the bar from the entity's top-left corner while following.
pub const FOLLOW_MARGIN: f32 = 3.0;
/// Gap between the bar's top edge and its label.
pub const LABEL_GAP: f32 = 3.0;
/// Render depth of bars; labels and popups sit one step above.
pub const BAR_DEPTH: f32 = 10.0;

/// Axis-aligned rectangle in bar-local screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BarRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Centre of the rectangle relative to the bar origin, in world axes.
    pub fn local_center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, -(self.y + self.height / 2.0))
    }

    /// Size to hand to a sprite. Negative extents collapse to zero.
    pub fn sprite_size(&self) -> Vec2 {
        Vec2::new(self.width.max(0.0), self.height.max(0.0))
    }
}

/// Everything needed to draw a bar for one health value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub background: BarRect,
    pub fill: BarRect,
    pub fill_color: HexColor,
}

impl BarGeometry {
    /// Layout drawn when the bar is first created: a `width` x `height`
    /// backdrop with a full foreground fill inset by the border on all sides.
    /// The first refresh switches to the health layout.
    pub fn initial(config: &HealthBarConfig) -> Self {
        Self {
            background: BarRect::new(0.0, 0.0, config.width, config.height),
            fill: BarRect::new(
                BORDER,
                BORDER,
                config.width - 2.0 * BORDER,
                config.height - 2.0 * BORDER,
            ),
            fill_color: config.foreground,
        }
    }

    /// Layout for `health`, on a 0-100 scale.
    pub fn for_health(config: &HealthBarConfig, health: f32) -> Self {
        let health = config.effective_health(health);
        Self::layout(config, fill_width(config.width, health), fill_color(config, health))
    }

    fn layout(config: &HealthBarConfig, fill: f32, fill_color: HexColor) -> Self {
        Self {
            background: BarRect::new(0.0, 0.0, config.width + 2.0 * BORDER, config.height),
            fill: BarRect::new(BORDER, BORDER, fill, config.height - 2.0 * BORDER),
            fill_color,
        }
    }
}

/// Fill width in whole pixels: `floor(width / 100 * health)`.
pub fn fill_width(width: f32, health: f32) -> f32 {
    (width / 100.0 * health).floor()
}

pub fn fill_color(config: &HealthBarConfig, health: f32) -> HexColor {
    if health < DANGER_THRESHOLD {
        config.danger
    } else {
        config.foreground
    }
}

/// Where a bar is first placed: the entity's top-left corner.
pub fn spawn_anchor(center: Vec2, bounds: &EntityBounds) -> Vec2 {
    bounds.top_left(center)
}

/// Where a bar eases toward each frame, also where damage numbers appear.
pub fn follow_anchor(center: Vec2, bounds: &EntityBounds) -> Vec2 {
    bounds.top_left(center) + Vec2::new(-FOLLOW_MARGIN, FOLLOW_MARGIN)
}

/// Label position for a bar whose origin is at `bar_position`.
pub fn label_anchor(bar_position: Vec2, config: &HealthBarConfig) -> Vec2 {
    bar_position + Vec2::new(0.0, config.height + LABEL_GAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_width_is_proportional() {
        for width in [30.0_f32, 47.0, 100.0] {
            for h in 0..=100 {
                let h = h as f32;
                assert_eq!(fill_width(width, h), (width / 100.0 * h).floor());
            }
        }
        assert_eq!(fill_width(30.0, 50.0), 15.0);
        assert_eq!(fill_width(30.0, 33.0), 9.0);
    }

    #[test]
    fn test_fill_height_leaves_border() {
        let config = HealthBarConfig::default();
        for h in [0.0, 39.0, 40.0, 100.0] {
            let geometry = BarGeometry::for_health(&config, h);
            assert_eq!(geometry.fill.height, config.height - 4.0);
            assert_eq!(geometry.fill.x, 2.0);
            assert_eq!(geometry.fill.y, 2.0);
        }
    }

    #[test]
    fn test_danger_threshold_boundaries() {
        let config = HealthBarConfig::default();
        assert_eq!(BarGeometry::for_health(&config, 40.0).fill_color, config.foreground);
        assert_eq!(BarGeometry::for_health(&config, 39.0).fill_color, config.danger);
        assert_eq!(BarGeometry::for_health(&config, 39.9).fill_color, config.danger);
        assert_eq!(BarGeometry::for_health(&config, 100.0).fill_color, config.foreground);
        assert_eq!(BarGeometry::for_health(&config, 0.0).fill_color, config.danger);
    }

    #[test]
    fn test_overflow_is_not_clamped_by_default() {
        let config = HealthBarConfig::default();
        let geometry = BarGeometry::for_health(&config, 150.0);
        assert_eq!(geometry.fill.width, 45.0);
    }

    #[test]
    fn test_overflow_clamped_when_enabled() {
        let config = HealthBarConfig::default().with_clamp(true);
        let geometry = BarGeometry::for_health(&config, 150.0);
        assert_eq!(geometry.fill.width, config.width);
        assert_eq!(geometry.fill_color, config.foreground);
    }

    #[test]
    fn test_full_fill_fits_inside_background() {
        let config = HealthBarConfig::default();
        let geometry = BarGeometry::for_health(&config, 100.0);
        assert_eq!(
            geometry.fill.x + geometry.fill.width + BORDER,
            geometry.background.width
        );
    }

    #[test]
    fn test_initial_layout_is_inset_on_all_sides() {
        let config = HealthBarConfig::default();
        let geometry = BarGeometry::initial(&config);
        assert_eq!(geometry.background, BarRect::new(0.0, 0.0, 30.0, 7.0));
        assert_eq!(geometry.fill, BarRect::new(2.0, 2.0, 26.0, 3.0));
        assert_eq!(geometry.fill_color, config.foreground);
    }

    #[test]
    fn test_local_center_points_down_from_origin() {
        let rect = BarRect::new(2.0, 2.0, 10.0, 4.0);
        assert_eq!(rect.local_center(), Vec2::new(7.0, -4.0));
    }

    #[test]
    fn test_sprite_size_never_negative() {
        let rect = BarRect::new(2.0, 2.0, -6.0, 3.0);
        assert_eq!(rect.sprite_size(), Vec2::new(0.0, 3.0));
    }

    #[test]
    fn test_anchors() {
        let bounds = EntityBounds::new(20.0, 10.0);
        let center = Vec2::new(100.0, 100.0);
        assert_eq!(spawn_anchor(center, &bounds), Vec2::new(90.0, 105.0));
        assert_eq!(follow_anchor(center, &bounds), Vec2::new(87.0, 108.0));

        let config = HealthBarConfig::default();
        assert_eq!(
            label_anchor(Vec2::new(87.0, 108.0), &config),
            Vec2::new(87.0, 118.0)
        );
    }
}
