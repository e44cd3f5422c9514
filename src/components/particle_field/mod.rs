//! Animated particle-field background.
//!
//! Renders a bounded, self-replenishing population of drifting particles on
//! an HTML canvas with:
//! - Particles that shrink each frame and are replaced when they expire
//! - Elastic bounces off the four canvas edges
//! - Thin links between particles that come close to each other
//! - A frame rate, population and link radius scaled to the device class
//! - Light and dark palettes that follow the host's theme signal
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{ParticleFieldCanvas, ThemeMode};
//!
//! let theme = RwSignal::new(ThemeMode::Dark);
//! view! { <ParticleFieldCanvas theme=theme /> }
//! ```

mod component;
pub mod config;
pub mod device;
pub mod engine;
mod frame;
mod particles;
pub mod render;
mod simulation;
pub mod theme;
mod viewport;

pub use component::ParticleFieldCanvas;
pub use config::FieldConfig;
pub use device::{DeviceClass, DeviceProfile};
pub use engine::{Control, EngineState, ParticleEngine};
pub use particles::Particle;
pub use render::DrawSurface;
pub use theme::{Color, ThemeMode};
pub use viewport::Viewport;
