use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;
use zerg_core::Scheduler;

/// A [`Scheduler`] backed by `window.setInterval`.
///
/// The callback is bound once and kept alive for the scheduler's lifetime, so
/// cancelling from inside the callback never frees the running closure.
pub struct IntervalScheduler {
    window: Window,
    callback: Option<Closure<dyn FnMut()>>,
    interval_id: Option<i32>,
}

impl IntervalScheduler {
    pub fn new(window: &Window) -> Self {
        Self {
            window: window.clone(),
            callback: None,
            interval_id: None,
        }
    }

    /// Sets the function run on every interval. Must happen before `start`.
    pub fn bind(&mut self, callback: Closure<dyn FnMut()>) {
        self.callback = Some(callback);
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&mut self, period_ms: u32) {
        self.cancel();
        let Some(callback) = self.callback.as_ref() else {
            log::error!("interval scheduler started without a callback");
            return;
        };
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period_ms as i32,
            ) {
            Ok(id) => self.interval_id = Some(id),
            Err(err) => log::error!("failed to schedule ticks: {:?}", err),
        }
    }

    fn cancel(&mut self) {
        if let Some(id) = self.interval_id.take() {
            self.window.clear_interval_with_handle(id);
        }
    }

    fn is_active(&self) -> bool {
        self.interval_id.is_some()
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
