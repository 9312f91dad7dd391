//! The collaborator the simulation queries and draws through.
//!
//! A surface is whatever the swarm roams over: a browser document, or the
//! in-memory [`MemorySurface`](crate::memory::MemorySurface) used headless.

use core::fmt::Debug;
use core::hash::Hash;

use crate::geometry::{Rect, Vector2D};

/// Style properties the simulation reads and writes on targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Opacity,
    Visibility,
}

impl StyleProperty {
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleProperty::Opacity => "opacity",
            StyleProperty::Visibility => "visibility",
        }
    }
}

/// A list of property assignments. An empty value clears the property.
pub type StylePatch = Vec<(StyleProperty, String)>;

/// Where and how large an agent sprite is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub position: Vector2D,
    pub size: f64,
}

impl Frame {
    pub fn new(position: Vector2D, size: f64) -> Self {
        Self { position, size }
    }
}

pub trait Surface {
    /// Identity of an element. Equal handles must refer to the same element.
    type Element: Clone + Eq + Hash + Debug;
    /// Handle to an agent's own rendering.
    type Sprite;

    /// Topmost visible element at a viewport point.
    fn element_at_point(&mut self, x: f64, y: f64) -> Option<Self::Element>;

    fn parent_of(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Whether the element carries the anti-target marker.
    fn is_immune(&self, element: &Self::Element) -> bool;

    /// Whether the element is an agent's own rendering.
    fn is_sprite(&self, element: &Self::Element) -> bool;

    /// Page-space bounding box of the element.
    fn geometry_of(&self, element: &Self::Element) -> Rect;

    fn style_of(&self, element: &Self::Element, property: StyleProperty) -> Option<String>;

    fn set_style(&mut self, element: &Self::Element, patch: &[(StyleProperty, String)]);

    fn scroll_offset(&self) -> Vector2D;

    /// Creates an agent's rendering. Agents without one still simulate.
    fn spawn_sprite(&mut self, frame: Frame) -> Option<Self::Sprite>;

    fn place_sprite(&mut self, sprite: &Self::Sprite, frame: Frame);

    /// Fades the sprite out over `duration_ms` and removes it once faded.
    fn fade_out_sprite(&mut self, sprite: Self::Sprite, duration_ms: u32);

    fn remove_sprite(&mut self, sprite: Self::Sprite);

    /// Drops any handles the surface keeps for elements it has handed out.
    /// Called once the swarm no longer tracks any element.
    fn release_elements(&mut self) {}
}
