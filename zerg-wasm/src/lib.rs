//! Browser bindings for the zerg rush.
//!
//! `new ZergRush(count)` spawns `count` zerglings over the current page and
//! drives them from a `setInterval` timer until nothing is left to destroy.

mod dom;
mod interval;

use std::cell::RefCell;
use std::rc::Rc;

use log::{Level, LevelFilter, Log, Metadata, Record};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::prelude::*;
use zerg_core::{Scheduler, Surface, SwarmConfig};

pub use dom::{DomNode, DomSurface, IMMUNE_MARKER, SPRITE_TAG};
pub use interval::IntervalScheduler;

type BrowserRush = zerg_core::ZergRush<DomSurface, IntervalScheduler, StdRng>;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

/// Routes the `log` facade to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Error => web_sys::console::error_1(&format!("{}", record.args()).into()),
            Level::Warn => web_sys::console::warn_1(&format!("{}", record.args()).into()),
            _ => console_log!("[{}] {}", record.target(), record.args()),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

#[wasm_bindgen(start)]
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// A running swarm over the current page.
#[wasm_bindgen]
pub struct ZergRush {
    inner: Rc<RefCell<BrowserRush>>,
}

#[wasm_bindgen]
impl ZergRush {
    #[wasm_bindgen(constructor)]
    pub fn new(count: usize) -> Result<ZergRush, JsValue> {
        Self::launch(count, SwarmConfig::default())
    }

    /// Starts a swarm with tunables given as JSON. Missing fields keep their defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(count: usize, config: &str) -> Result<ZergRush, JsValue> {
        let config: SwarmConfig = serde_json::from_str(config)
            .map_err(|err| JsValue::from_str(&format!("invalid config: {}", err)))?;
        Self::launch(count, config)
    }

    fn launch(count: usize, config: SwarmConfig) -> Result<ZergRush, JsValue> {
        let window = web_sys::window().ok_or("no global window")?;
        let surface = DomSurface::new(&window)?;
        let scheduler = IntervalScheduler::new(&window);
        let rush = BrowserRush::new(surface, scheduler, StdRng::from_entropy(), config)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let inner = Rc::new(RefCell::new(rush));
        let weak = Rc::downgrade(&inner);
        let tick = Closure::wrap(Box::new(move || {
            let Some(swarm) = weak.upgrade() else {
                return;
            };
            // Re-entrant ticks are skipped rather than stacked.
            if let Ok(mut swarm) = swarm.try_borrow_mut() {
                swarm.tick();
            };
        }) as Box<dyn FnMut()>);

        {
            let mut rush = inner.borrow_mut();
            rush.scheduler_mut().bind(tick);
            start_scheduled(&mut *rush, count)?;
        }

        console_log!("Zerg rush launched with {} zerglings", count);
        Ok(ZergRush { inner })
    }

    /// Stops the swarm, removes every zergling and restores every target.
    pub fn teardown(&self) {
        self.inner.borrow_mut().teardown();
    }

    /// Same as [`teardown`](Self::teardown).
    pub fn destroy(&self) {
        self.teardown();
    }

    /// Runs one tick immediately. Returns whether the swarm is still running.
    pub fn step(&self) -> bool {
        self.inner.borrow_mut().tick()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner.borrow().is_running()
    }

    #[wasm_bindgen(js_name = agentCount)]
    pub fn agent_count(&self) -> usize {
        self.inner.borrow().zerglings().len()
    }

    #[wasm_bindgen(js_name = finishedCount)]
    pub fn finished_count(&self) -> usize {
        self.inner.borrow().finished_count()
    }

    #[wasm_bindgen(js_name = targetCount)]
    pub fn target_count(&self) -> usize {
        self.inner.borrow().targets().len()
    }
}

/// Starts `count` zerglings and checks their ticks were scheduled. On failure
/// the swarm is torn down so no sprite is left on the page.
pub fn start_scheduled<S, Sch, R>(
    rush: &mut zerg_core::ZergRush<S, Sch, R>,
    count: usize,
) -> Result<(), JsValue>
where
    S: Surface,
    Sch: Scheduler,
    R: Rng,
{
    rush.start(count);
    if count > 0 && !rush.scheduler().is_active() {
        rush.teardown();
        return Err(JsValue::from_str("failed to schedule zerg rush ticks"));
    }
    Ok(())
}

/// Launches a swarm of `count` zerglings with the default tunables.
#[wasm_bindgen(js_name = startSwarm)]
pub fn start_swarm(count: usize) -> Result<ZergRush, JsValue> {
    ZergRush::new(count)
}
