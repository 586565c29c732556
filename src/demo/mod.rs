//! Interactive demo: wandering sprites that take random damage.

use bevy::prelude::*;
use clap::Parser;
use rand::Rng;
use std::path::PathBuf;

use crate::health_bar::{ConfigError, HealthBarCommandsExt, HealthBarConfig};
use crate::target::{EntityBounds, Health};

/// Half extents of the area demo enemies wander in
const ARENA_HALF_SIZE: Vec2 = Vec2::new(400.0, 260.0);
const ENEMY_SIZE: f32 = 32.0;
const WANDER_SPEED: f32 = 60.0;

#[derive(Parser, Debug, Clone)]
#[command(name = "health-bar-demo", about = "Floating health bars over wandering sprites")]
pub struct DemoArgs {
    /// Number of enemies alive at once
    #[arg(long, default_value_t = 8)]
    pub enemies: usize,

    /// Bar width in pixels
    #[arg(long)]
    pub width: Option<f32>,

    /// Bar height in pixels
    #[arg(long)]
    pub height: Option<f32>,

    /// Label shown above each bar
    #[arg(long)]
    pub name: Option<String>,

    /// Clamp health to 0..=100 when drawing
    #[arg(long)]
    pub clamp: bool,

    /// Append "current / max" to the label
    #[arg(long)]
    pub show_health: bool,

    /// JSON file with bar options; command line flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seconds between random hits
    #[arg(long, default_value_t = 0.75, value_parser = parse_interval)]
    pub damage_interval: f32,
}

/// Longest accepted gap between hits, in seconds.
const MAX_DAMAGE_INTERVAL: f32 = 3600.0;

fn parse_interval(arg: &str) -> Result<f32, String> {
    let secs: f32 = arg
        .parse()
        .map_err(|_| format!("`{arg}` is not a number of seconds"))?;
    if secs.is_finite() && secs > 0.0 && secs <= MAX_DAMAGE_INTERVAL {
        Ok(secs)
    } else {
        Err(format!("must be between 0 and {MAX_DAMAGE_INTERVAL} seconds"))
    }
}

impl DemoArgs {
    /// Bar options from the config file (if any) with flags applied on top.
    pub fn bar_config(&self) -> Result<HealthBarConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => HealthBarConfig::from_file(path)?,
            None => HealthBarConfig::default(),
        };
        let width = self.width.unwrap_or(config.width);
        let height = self.height.unwrap_or(config.height);
        config = config.with_size(width, height);
        if let Some(name) = &self.name {
            config.name_bar = Some(name.clone());
        }
        config.clamp_health |= self.clamp;
        config.show_health |= self.show_health;
        Ok(config)
    }
}

/// Settings the demo systems read
#[derive(Resource, Debug, Clone)]
pub struct DemoSettings {
    pub enemies: usize,
    pub bar: HealthBarConfig,
}

#[derive(Resource, Debug)]
pub struct DamageTimer(pub Timer);

impl DamageTimer {
    pub fn new(interval_secs: f32) -> Self {
        let secs = if interval_secs.is_finite() {
            interval_secs.clamp(0.01, MAX_DAMAGE_INTERVAL)
        } else {
            MAX_DAMAGE_INTERVAL
        };
        Self(Timer::from_seconds(secs, TimerMode::Repeating))
    }
}

/// Demo enemy drifting in a straight line, bouncing off the arena edges
#[derive(Component, Debug, Clone, Copy)]
pub struct Wander(pub Vec2);

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, setup_camera)
        .add_systems(Update, (respawn_enemies, wander, damage_random_enemy).chain());
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Spawn a new wave once every enemy is gone.
pub fn respawn_enemies(
    mut commands: Commands,
    settings: Res<DemoSettings>,
    enemies: Query<(), With<Wander>>,
) {
    if !enemies.is_empty() {
        return;
    }
    let mut rng = rand::thread_rng();
    for _ in 0..settings.enemies {
        let position = Vec2::new(
            rng.gen_range(-ARENA_HALF_SIZE.x..ARENA_HALF_SIZE.x),
            rng.gen_range(-ARENA_HALF_SIZE.y..ARENA_HALF_SIZE.y),
        );
        let heading = Vec2::from_angle(rng.gen_range(0.0..std::f32::consts::TAU));
        let enemy = commands
            .spawn((
                Wander(heading * WANDER_SPEED),
                Health::new(100.0),
                EntityBounds::new(ENEMY_SIZE, ENEMY_SIZE),
                Sprite::from_color(Color::srgb(0.3, 0.5, 0.9), Vec2::splat(ENEMY_SIZE)),
                Transform::from_translation(position.extend(0.0)),
            ))
            .id();
        commands.add_health_bar(enemy, settings.bar.clone());
    }
    info!("Spawned a wave of {} enemies", settings.enemies);
}

pub fn wander(time: Res<Time>, mut query: Query<(&mut Wander, &mut Transform)>) {
    for (mut wander, mut transform) in query.iter_mut() {
        let mut position = transform.translation.truncate() + wander.0 * time.delta_secs();
        if position.x.abs() > ARENA_HALF_SIZE.x {
            wander.0.x = -wander.0.x;
            position.x = position.x.clamp(-ARENA_HALF_SIZE.x, ARENA_HALF_SIZE.x);
        }
        if position.y.abs() > ARENA_HALF_SIZE.y {
            wander.0.y = -wander.0.y;
            position.y = position.y.clamp(-ARENA_HALF_SIZE.y, ARENA_HALF_SIZE.y);
        }
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}

/// Every tick of the damage timer, hit one random enemy for 5-25 points.
pub fn damage_random_enemy(
    time: Res<Time>,
    mut timer: ResMut<DamageTimer>,
    mut enemies: Query<&mut Health, With<Wander>>,
) {
    timer.0.tick(time.delta());
    if !timer.0.just_finished() {
        return;
    }
    let count = enemies.iter().count();
    if count == 0 {
        return;
    }
    let mut rng = rand::thread_rng();
    let pick = rng.gen_range(0..count);
    if let Some(mut health) = enemies.iter_mut().nth(pick) {
        health.take_damage(rng.gen_range(5..=25) as f32);
    }
}
