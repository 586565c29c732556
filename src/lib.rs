pub mod animation;
pub mod demo;
pub mod health_bar;
pub mod prelude;
pub mod target;

pub use demo::plugin as demo_plugin;
pub use health_bar::plugin as health_bar_plugin;
