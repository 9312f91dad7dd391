use rand::rngs::mock::StepRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, SvgElement};
use zerg_core::{ManualScheduler, Scheduler, Surface, SwarmConfig, TargetRegistry};
use zerg_wasm::{start_scheduled, DomSurface, IntervalScheduler, ZergRush};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> web_sys::Window {
    web_sys::window().expect("no global window")
}

fn add_box(class: Option<&str>, css: &str) -> HtmlElement {
    let document = window().document().expect("no document");
    let element = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    if let Some(class) = class {
        element.set_class_name(class);
    }
    element.set_attribute("style", css).unwrap();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

fn sprites_on_page() -> u32 {
    window()
        .document()
        .unwrap()
        .query_selector_all("zergling")
        .unwrap()
        .length()
}

fn lone_zergling() -> zerg_core::ZergRush<DomSurface, ManualScheduler, StepRng> {
    let config = SwarmConfig {
        spawn_extent: 0.0,
        ..SwarmConfig::default()
    };
    zerg_core::ZergRush::new(
        DomSurface::new(&window()).unwrap(),
        ManualScheduler::new(),
        StepRng::new(u64::MAX / 2, 0),
        config,
    )
    .unwrap()
}

#[wasm_bindgen_test]
fn test_zergling_destroys_and_teardown_restores() {
    let target = add_box(
        None,
        "position:absolute;left:0;top:0;width:40px;height:40px;z-index:1000;background:blue",
    );

    let mut rush = lone_zergling();
    rush.start(1);
    assert_eq!(rush.surface().scroll_offset().x, 0.0);

    rush.run_until_idle(60);
    let style = target.style();
    assert_eq!(style.get_property_value("visibility").unwrap(), "hidden");
    assert_eq!(style.get_property_value("opacity").unwrap(), "0");

    let node = rush.surface().node_for(&target);
    let id = rush.targets().lookup(&node).expect("target tracked");
    assert!(!rush.targets().get(id).unwrap().is_alive());

    rush.teardown();
    assert_eq!(style.get_property_value("visibility").unwrap(), "");
    assert_eq!(style.get_property_value("opacity").unwrap(), "1");
    assert_eq!(rush.surface().interned_count(), 0);

    target.remove();
}

#[wasm_bindgen_test]
fn test_svg_targets_fade_hide_and_restore() {
    let document = window().document().unwrap();
    let svg = document
        .create_element_ns(Some("http://www.w3.org/2000/svg"), "svg")
        .unwrap();
    svg.set_attribute(
        "style",
        "position:absolute;left:0;top:0;width:40px;height:40px;z-index:1000;display:block;background:green",
    )
    .unwrap();
    document.body().unwrap().append_child(&svg).unwrap();

    let mut rush = lone_zergling();
    rush.start(1);
    rush.run_until_idle(60);

    let style = svg.dyn_ref::<SvgElement>().unwrap().style();
    assert_eq!(style.get_property_value("visibility").unwrap(), "hidden");
    assert_eq!(style.get_property_value("opacity").unwrap(), "0");

    rush.teardown();
    assert_eq!(style.get_property_value("visibility").unwrap(), "");
    assert_eq!(style.get_property_value("opacity").unwrap(), "1");

    svg.remove();
}

#[wasm_bindgen_test]
fn test_interval_scheduler_start_and_cancel() {
    let mut scheduler = IntervalScheduler::new(&window());
    scheduler.bind(Closure::wrap(Box::new(|| {}) as Box<dyn FnMut()>));
    assert!(!scheduler.is_active());

    scheduler.start(30);
    assert!(scheduler.is_active());

    scheduler.cancel();
    assert!(!scheduler.is_active());
    scheduler.cancel();
    assert!(!scheduler.is_active());
}

#[wasm_bindgen_test]
fn test_unbound_scheduler_leaves_no_sprites_behind() {
    let before = sprites_on_page();
    let mut rush = zerg_core::ZergRush::new(
        DomSurface::new(&window()).unwrap(),
        IntervalScheduler::new(&window()),
        StepRng::new(u64::MAX / 2, 0),
        SwarmConfig::default(),
    )
    .unwrap();

    assert!(start_scheduled(&mut rush, 2).is_err());
    assert!(!rush.is_running());
    assert!(!rush.scheduler().is_active());
    assert_eq!(sprites_on_page(), before);
}

#[wasm_bindgen_test]
fn test_handle_runs_until_teardown() {
    let before = sprites_on_page();
    let rush = ZergRush::new(2).unwrap();
    assert!(rush.is_running());
    assert_eq!(rush.agent_count(), 2);
    assert_eq!(sprites_on_page(), before + 2);

    rush.teardown();
    assert!(!rush.is_running());
    assert_eq!(sprites_on_page(), before);
}

#[wasm_bindgen_test]
fn test_immune_panels_and_their_children() {
    let panel = add_box(
        Some("sidebar AntiZerg"),
        "position:absolute;left:0;top:0;width:60px;height:60px",
    );
    let child = window()
        .document()
        .unwrap()
        .create_element("span")
        .unwrap();
    panel.append_child(&child).unwrap();

    let surface = DomSurface::new(&window()).unwrap();
    let registry = TargetRegistry::new(&SwarmConfig::default());
    let panel_node = surface.node_for(&panel);
    let child_node = surface.node_for(&child);

    assert!(surface.is_immune(&panel_node));
    assert!(!surface.is_immune(&child_node));
    assert!(!registry.is_suitable(&surface, Some(&panel_node)));
    assert!(!registry.is_suitable(&surface, Some(&child_node)));

    panel.remove();
}

#[wasm_bindgen_test]
fn test_elements_intern_to_stable_handles() {
    let element = add_box(None, "width:10px;height:10px");
    let surface = DomSurface::new(&window()).unwrap();

    let first = surface.node_for(&element);
    let again = surface.node_for(&element);
    assert_eq!(first, again);
    let body = window().document().unwrap().body().unwrap();
    assert_eq!(surface.parent_of(&first), Some(surface.node_for(&body)));
    assert!(!surface.is_sprite(&first));

    element.remove();
}

#[wasm_bindgen_test]
fn test_handle_rejects_bad_config() {
    assert!(ZergRush::with_config(3, r#"{"life": 0}"#).is_err());
    assert!(ZergRush::with_config(3, "not json").is_err());

    let rush = ZergRush::new(0).unwrap();
    assert!(!rush.is_running());
    assert_eq!(rush.agent_count(), 0);
    assert_eq!(rush.target_count(), 0);
    rush.destroy();
}
