use bevy::prelude::*;
use clap::Parser;
use health_bar_overlay::demo::{DamageTimer, DemoArgs, DemoSettings};
use health_bar_overlay::health_bar::ConfigError;
use health_bar_overlay::{demo_plugin, health_bar_plugin};

fn main() -> Result<(), ConfigError> {
    let args = DemoArgs::parse();
    let bar = args.bar_config()?;

    App::new()
        .add_plugins(DefaultPlugins)
        .insert_resource(DemoSettings {
            enemies: args.enemies,
            bar,
        })
        .insert_resource(DamageTimer::new(args.damage_interval))
        .add_plugins((health_bar_plugin, demo_plugin))
        .run();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_bar_overlay::prelude::*;

    #[test]
    fn test_components_exist() {
        let _popup = DamagePopup;
        let _label = HealthBarLabel;
        let _health = Health::new(100.0);
        let _bounds = EntityBounds::new(32.0, 32.0);
    }

    #[test]
    fn test_bad_config_path_fails_before_app_starts() {
        let args = DemoArgs::parse_from(["health-bar-demo", "--config", "missing.json"]);
        assert!(args.bar_config().is_err());
    }
}
