pub mod components;

pub use components::{EntityBounds, Health};
