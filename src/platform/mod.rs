//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic milliseconds since start)
//! - Input events (pointer clicks, quit)

/// Raw input from the windowing backend, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Click { x: f32, y: f32 },
    Quit,
}

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since the clock was created; never decreases
    fn now_ms(&self) -> u64;
}

/// Hand-driven clock for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self { now: start }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now = self.now.saturating_add(ms);
    }

    /// Jump to `ms` (ignored if it would go backwards)
    pub fn set(&mut self, ms: u64) {
        self.now = self.now.max(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }
}

/// Wall clock backed by `std::time::Instant`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Browser clock backed by `performance.now()`
#[cfg(target_arch = "wasm32")]
pub struct WebClock {
    performance: web_sys::Performance,
    start: f64,
}

#[cfg(target_arch = "wasm32")]
impl WebClock {
    pub fn new() -> Option<Self> {
        let performance = web_sys::window()?.performance()?;
        let start = performance.now();
        Some(Self { performance, start })
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for WebClock {
    fn now_ms(&self) -> u64 {
        (self.performance.now() - self.start).max(0.0) as u64
    }
}
