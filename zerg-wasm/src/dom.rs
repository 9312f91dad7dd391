use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, SvgElement, Window};
use zerg_core::{Frame, Rect, StyleProperty, Surface, Vector2D};

/// Tag name of agent sprites. Anything with this tag is never a target.
pub const SPRITE_TAG: &str = "zergling";

/// Class-name marker that makes an element and its subtree immune.
pub const IMMUNE_MARKER: &str = "antizerg";

/// Handle to an element the swarm has seen, interned by object identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomNode(u32);

/// A [`Surface`] over the live document.
///
/// Elements are interned into a side table keyed by object identity, so the
/// page itself is never tagged.
pub struct DomSurface {
    window: Window,
    document: Document,
    body: HtmlElement,
    nodes: RefCell<Vec<Element>>,
    index: js_sys::Map,
}

impl DomSurface {
    pub fn new(window: &Window) -> Result<Self, JsValue> {
        let document = window.document().ok_or("no document")?;
        let body = document.body().ok_or("document has no body")?;
        Ok(Self {
            window: window.clone(),
            document,
            body,
            nodes: RefCell::new(Vec::new()),
            index: js_sys::Map::new(),
        })
    }

    fn intern(&self, element: Element) -> DomNode {
        if let Some(id) = self.index.get(element.as_ref()).as_f64() {
            return DomNode(id as u32);
        }
        let mut nodes = self.nodes.borrow_mut();
        let id = nodes.len() as u32;
        self.index.set(element.as_ref(), &JsValue::from(id));
        nodes.push(element);
        DomNode(id)
    }

    /// The live element behind a handle.
    pub fn element(&self, node: &DomNode) -> Element {
        self.nodes.borrow()[node.0 as usize].clone()
    }

    /// Interns an element the caller already holds.
    pub fn node_for(&self, element: &Element) -> DomNode {
        self.intern(element.clone())
    }

    /// Number of elements currently interned.
    pub fn interned_count(&self) -> usize {
        self.nodes.borrow().len()
    }

    fn inline_style(&self, node: &DomNode) -> Option<CssStyleDeclaration> {
        let element = self.element(node);
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            return Some(html.style());
        }
        element.dyn_ref::<SvgElement>().map(SvgElement::style)
    }
}

fn set_css(style: &CssStyleDeclaration, name: &str, value: &str) {
    let result = if value.is_empty() {
        style.remove_property(name).map(|_| ())
    } else {
        style.set_property(name, value)
    };
    if let Err(err) = result {
        log::debug!("could not set {}: {:?}", name, err);
    }
}

fn place(sprite: &HtmlElement, frame: Frame) {
    let style = sprite.style();
    set_css(&style, "left", &format!("{}px", frame.position.x));
    set_css(&style, "top", &format!("{}px", frame.position.y));
    set_css(&style, "width", &format!("{}px", frame.size));
    set_css(&style, "height", &format!("{}px", frame.size));
}

impl Surface for DomSurface {
    type Element = DomNode;
    type Sprite = HtmlElement;

    fn element_at_point(&mut self, x: f64, y: f64) -> Option<DomNode> {
        self.document
            .element_from_point(x as f32, y as f32)
            .map(|element| self.intern(element))
    }

    fn parent_of(&self, node: &DomNode) -> Option<DomNode> {
        self.element(node)
            .parent_element()
            .map(|parent| self.intern(parent))
    }

    fn is_immune(&self, node: &DomNode) -> bool {
        self.element(node)
            .get_attribute("class")
            .is_some_and(|class| class.to_ascii_lowercase().contains(IMMUNE_MARKER))
    }

    fn is_sprite(&self, node: &DomNode) -> bool {
        self.element(node).node_name().eq_ignore_ascii_case(SPRITE_TAG)
    }

    fn geometry_of(&self, node: &DomNode) -> Rect {
        let rect = self.element(node).get_bounding_client_rect();
        let scroll = self.scroll_offset();
        Rect::new(
            rect.left() + scroll.x,
            rect.top() + scroll.y,
            rect.width(),
            rect.height(),
        )
    }

    fn style_of(&self, node: &DomNode, property: StyleProperty) -> Option<String> {
        let computed = self
            .window
            .get_computed_style(&self.element(node))
            .ok()
            .flatten()?;
        computed.get_property_value(property.css_name()).ok()
    }

    fn set_style(&mut self, node: &DomNode, patch: &[(StyleProperty, String)]) {
        let Some(style) = self.inline_style(node) else {
            log::debug!("element {:?} has no inline style", node);
            return;
        };
        for (property, value) in patch {
            set_css(&style, property.css_name(), value);
        }
    }

    fn scroll_offset(&self) -> Vector2D {
        let root = self.document.document_element();
        let left = root.as_ref().map_or(0, Element::scroll_left);
        let top = root.as_ref().map_or(0, Element::scroll_top);
        Vector2D::new(
            f64::from(self.body.scroll_left().max(left)),
            f64::from(self.body.scroll_top().max(top)),
        )
    }

    fn spawn_sprite(&mut self, frame: Frame) -> Option<HtmlElement> {
        let sprite = self
            .document
            .create_element(SPRITE_TAG)
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;

        let style = sprite.style();
        set_css(&style, "position", "absolute");
        set_css(&style, "display", "block");
        set_css(&style, "background", "red");
        set_css(&style, "border-radius", "5px");
        set_css(&style, "z-index", "9999");
        place(&sprite, frame);

        if let Err(err) = self.body.append_child(&sprite) {
            log::warn!("could not attach zergling: {:?}", err);
            return None;
        }
        Some(sprite)
    }

    fn place_sprite(&mut self, sprite: &HtmlElement, frame: Frame) {
        place(sprite, frame);
    }

    fn fade_out_sprite(&mut self, sprite: HtmlElement, duration_ms: u32) {
        let style = sprite.style();
        set_css(&style, "transition", &format!("opacity {}ms linear", duration_ms));
        set_css(&style, "opacity", "0");

        let remove = Closure::once_into_js(move || sprite.remove());
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                remove.unchecked_ref(),
                duration_ms as i32,
            )
        {
            log::warn!("could not schedule sprite removal: {:?}", err);
        }
    }

    fn remove_sprite(&mut self, sprite: HtmlElement) {
        sprite.remove();
    }

    fn release_elements(&mut self) {
        self.nodes.borrow_mut().clear();
        self.index.clear();
    }
}
