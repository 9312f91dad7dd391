//! Zerglings that roam a surface, pick the elements they find there, and eat them.
//!
//! The crate is host-agnostic: everything it needs from the page (hit testing,
//! geometry, styles, sprites) goes through [`Surface`], and its tick loop is
//! driven by a [`Scheduler`].

pub mod config;
pub mod geometry;
pub mod memory;
pub mod scheduler;
pub mod surface;
pub mod swarm;
pub mod target;
pub mod zergling;

pub use config::{ConfigError, SwarmConfig};
pub use geometry::{Rect, Vector2D};
pub use memory::{ElementId, MemorySurface};
pub use scheduler::{ManualScheduler, Scheduler};
pub use surface::{Frame, StyleProperty, StylePatch, Surface};
pub use swarm::{start_swarm, ZergRush};
pub use target::{Target, TargetId, TargetRegistry};
pub use zergling::{scan_offsets, Zergling, ZerglingState};
