//! In-memory surface for headless hosts and tests.
//!
//! Elements are plain rectangles stacked in insertion order: the most
//! recently added element is on top. Agent sprites are elements too, tagged
//! `zergling`, so scans can land on them exactly as they do in a document.

use std::collections::HashMap;

use crate::geometry::{Rect, Vector2D};
use crate::surface::{Frame, StyleProperty, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Clone)]
struct Node {
    bounds: Rect,
    parent: Option<ElementId>,
    tag: &'static str,
    class: String,
    opacity: String,
    inline: HashMap<StyleProperty, String>,
    attached: bool,
}

impl Node {
    fn new(bounds: Rect, parent: Option<ElementId>, tag: &'static str) -> Self {
        Self {
            bounds,
            parent,
            tag,
            class: String::new(),
            opacity: "1".to_string(),
            inline: HashMap::new(),
            attached: true,
        }
    }

    fn is_hidden(&self) -> bool {
        self.inline
            .get(&StyleProperty::Visibility)
            .is_some_and(|v| v == "hidden")
    }
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    nodes: Vec<Node>,
    scroll: Vector2D,
    probes: Vec<Vector2D>,
    faded: Vec<(ElementId, u32)>,
    releases: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&mut self, bounds: Rect) -> ElementId {
        self.push(Node::new(bounds, None, "div"))
    }

    pub fn add_child(&mut self, parent: ElementId, bounds: Rect) -> ElementId {
        self.push(Node::new(bounds, Some(parent), "div"))
    }

    fn push(&mut self, node: Node) -> ElementId {
        self.nodes.push(node);
        ElementId(self.nodes.len() - 1)
    }

    pub fn set_class(&mut self, element: ElementId, class: &str) {
        self.nodes[element.0].class = class.to_string();
    }

    /// Sets the stylesheet opacity, the value reported when no inline opacity is set.
    pub fn set_opacity(&mut self, element: ElementId, opacity: &str) {
        self.nodes[element.0].opacity = opacity.to_string();
    }

    pub fn set_scroll(&mut self, scroll: Vector2D) {
        self.scroll = scroll;
    }

    pub fn inline_style(&self, element: ElementId, property: StyleProperty) -> Option<String> {
        self.nodes[element.0].inline.get(&property).cloned()
    }

    pub fn is_hidden(&self, element: ElementId) -> bool {
        self.nodes[element.0].is_hidden()
    }

    pub fn is_attached(&self, element: ElementId) -> bool {
        self.nodes[element.0].attached
    }

    pub fn bounds(&self, element: ElementId) -> Rect {
        self.nodes[element.0].bounds
    }

    /// Viewport points passed to `element_at_point`, oldest first.
    pub fn probes(&self) -> &[Vector2D] {
        &self.probes
    }

    pub fn clear_probes(&mut self) {
        self.probes.clear();
    }

    /// Sprites handed to `fade_out_sprite`, with their fade durations.
    pub fn faded_sprites(&self) -> &[(ElementId, u32)] {
        &self.faded
    }

    /// Times the swarm reported it no longer tracks any element.
    pub fn release_count(&self) -> usize {
        self.releases
    }

    /// Sprites still attached.
    pub fn sprite_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.tag == "zergling" && node.attached)
            .count()
    }
}

impl Surface for MemorySurface {
    type Element = ElementId;
    type Sprite = ElementId;

    fn element_at_point(&mut self, x: f64, y: f64) -> Option<ElementId> {
        self.probes.push(Vector2D::new(x, y));
        let page = Vector2D::new(x, y) + self.scroll;
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, node)| node.attached && !node.is_hidden() && node.bounds.contains(page))
            .map(|(index, _)| ElementId(index))
    }

    fn parent_of(&self, element: &ElementId) -> Option<ElementId> {
        self.nodes[element.0].parent
    }

    fn is_immune(&self, element: &ElementId) -> bool {
        self.nodes[element.0]
            .class
            .to_ascii_lowercase()
            .contains("antizerg")
    }

    fn is_sprite(&self, element: &ElementId) -> bool {
        self.nodes[element.0].tag == "zergling"
    }

    fn geometry_of(&self, element: &ElementId) -> Rect {
        self.nodes[element.0].bounds
    }

    fn style_of(&self, element: &ElementId, property: StyleProperty) -> Option<String> {
        let node = &self.nodes[element.0];
        match (node.inline.get(&property), property) {
            (Some(value), _) => Some(value.clone()),
            (None, StyleProperty::Opacity) => Some(node.opacity.clone()),
            (None, StyleProperty::Visibility) => Some("visible".to_string()),
        }
    }

    fn set_style(&mut self, element: &ElementId, patch: &[(StyleProperty, String)]) {
        let inline = &mut self.nodes[element.0].inline;
        for (property, value) in patch {
            if value.is_empty() {
                inline.remove(property);
            } else {
                inline.insert(*property, value.clone());
            }
        }
    }

    fn scroll_offset(&self) -> Vector2D {
        self.scroll
    }

    fn spawn_sprite(&mut self, frame: Frame) -> Option<ElementId> {
        let bounds = Rect::new(frame.position.x, frame.position.y, frame.size, frame.size);
        Some(self.push(Node::new(bounds, None, "zergling")))
    }

    fn place_sprite(&mut self, sprite: &ElementId, frame: Frame) {
        self.nodes[sprite.0].bounds =
            Rect::new(frame.position.x, frame.position.y, frame.size, frame.size);
    }

    fn fade_out_sprite(&mut self, sprite: ElementId, duration_ms: u32) {
        self.faded.push((sprite, duration_ms));
        self.remove_sprite(sprite);
    }

    fn remove_sprite(&mut self, sprite: ElementId) {
        self.nodes[sprite.0].attached = false;
    }

    fn release_elements(&mut self) {
        self.releases += 1;
    }
}
