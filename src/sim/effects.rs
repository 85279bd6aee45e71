//! Timed visual effects keyed by cell
//!
//! Two independent registries share one shape: a grid-indexed arena with
//! one optional record per cell. Entries are created explicitly and removed
//! either explicitly or when a query finds them expired.

use std::f32::consts::PI;

use super::board::Cell;
use crate::settings::Timings;

/// One optional record per grid cell, addressed by `row * cols + col`
#[derive(Debug, Clone)]
pub struct CellSlots<T> {
    rows: usize,
    cols: usize,
    slots: Vec<Option<T>>,
}

impl<T> CellSlots<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            slots: std::iter::repeat_with(|| None).take(rows * cols).collect(),
        }
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.rows && cell.col < self.cols).then(|| cell.row * self.cols + cell.col)
    }

    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.index(cell).and_then(|i| self.slots[i].as_ref())
    }

    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut T> {
        self.index(cell).and_then(|i| self.slots[i].as_mut())
    }

    /// Insert or overwrite (ignored off the grid)
    pub fn insert(&mut self, cell: Cell, value: T) {
        if let Some(i) = self.index(cell) {
            self.slots[i] = Some(value);
        }
    }

    pub fn remove(&mut self, cell: Cell) -> Option<T> {
        self.index(cell).and_then(|i| self.slots[i].take())
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Fade-in started when a card is turned face-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealFade {
    pub started_at: u64,
}

/// Match celebration on one card of a matched pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPulse {
    pub pivot: u64,
    pub pulsing: bool,
}

/// What the renderer needs from a pulse this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseSample {
    pub scale: f32,
    /// Draw the highlight border (for the whole life of the entry)
    pub highlight: bool,
}

impl PulseSample {
    pub const NONE: PulseSample = PulseSample {
        scale: 1.0,
        highlight: false,
    };
}

/// Scale of a pulsing card: one half sine period over `duration_ms`
#[inline]
pub fn pulse_scale(elapsed_ms: u64, duration_ms: u64, amplitude: f32) -> f32 {
    if duration_ms == 0 {
        return 1.0;
    }
    let phase = (elapsed_ms as f32 / duration_ms as f32) * PI;
    1.0 + amplitude * phase.sin()
}

/// All active fade-ins and match pulses
#[derive(Debug, Clone)]
pub struct EffectRegistry {
    timings: Timings,
    reveals: CellSlots<RevealFade>,
    pulses: CellSlots<MatchPulse>,
}

impl EffectRegistry {
    pub fn new(rows: usize, cols: usize, timings: Timings) -> Self {
        Self {
            timings,
            reveals: CellSlots::new(rows, cols),
            pulses: CellSlots::new(rows, cols),
        }
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    // === Reveal fade-in ===

    /// Start (or restart) the fade-in of `cell`
    pub fn start_reveal(&mut self, cell: Cell, now: u64) {
        self.reveals.insert(cell, RevealFade { started_at: now });
    }

    /// Opacity ramp in [0, 1]. Reaching 1 retires the entry; no entry reads as 1.
    pub fn fade_progress(&mut self, cell: Cell, now: u64) -> f32 {
        let Some(fade) = self.reveals.get(cell) else {
            return 1.0;
        };
        let elapsed = now.saturating_sub(fade.started_at);
        let progress = if self.timings.fade_ms == 0 {
            1.0
        } else {
            (elapsed as f32 / self.timings.fade_ms as f32).min(1.0)
        };
        if progress >= 1.0 {
            self.reveals.remove(cell);
        }
        progress
    }

    /// Drop a fade-in (card hidden again before it finished)
    pub fn cancel_reveal(&mut self, cell: Cell) {
        self.reveals.remove(cell);
    }

    pub fn has_reveal(&self, cell: Cell) -> bool {
        self.reveals.get(cell).is_some()
    }

    pub fn reveal(&self, cell: Cell) -> Option<&RevealFade> {
        self.reveals.get(cell)
    }

    // === Match pulse ===

    /// Start the pulse on both cells of a matched pair with a shared pivot
    pub fn start_pulse(&mut self, a: Cell, b: Cell, now: u64) {
        let pulse = MatchPulse {
            pivot: now,
            pulsing: true,
        };
        self.pulses.insert(a, pulse);
        self.pulses.insert(b, pulse);
    }

    /// Sample the pulse of `cell`, advancing and retiring it by elapsed time
    pub fn pulse(&mut self, cell: Cell, now: u64) -> PulseSample {
        let Timings {
            pulse_ms,
            pulse_grace_ms,
            pulse_amplitude,
            ..
        } = self.timings;

        let Some(pulse) = self.pulses.get_mut(cell) else {
            return PulseSample::NONE;
        };
        let elapsed = now.saturating_sub(pulse.pivot);

        if elapsed > pulse_ms.saturating_add(pulse_grace_ms) {
            self.pulses.remove(cell);
            return PulseSample::NONE;
        }
        if elapsed > pulse_ms {
            pulse.pulsing = false;
        }

        let scale = if pulse.pulsing {
            pulse_scale(elapsed, pulse_ms, pulse_amplitude)
        } else {
            1.0
        };
        PulseSample {
            scale,
            highlight: true,
        }
    }

    pub fn has_pulse(&self, cell: Cell) -> bool {
        self.pulses.get(cell).is_some()
    }

    pub fn match_pulse(&self, cell: Cell) -> Option<&MatchPulse> {
        self.pulses.get(cell)
    }

    pub fn active_reveals(&self) -> usize {
        self.reveals.len()
    }

    pub fn active_pulses(&self) -> usize {
        self.pulses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const A: Cell = Cell::new(0, 0);
    const B: Cell = Cell::new(1, 2);
    const PULSE_GRACE: u64 = crate::consts::PULSE_GRACE_MS;

    fn registry() -> EffectRegistry {
        EffectRegistry::new(4, 5, Timings::default())
    }

    #[test]
    fn test_fade_progress_ramps_then_retires() {
        let mut fx = registry();
        fx.start_reveal(A, 1000);

        assert_eq!(fx.fade_progress(A, 1000), 0.0);
        assert!((fx.fade_progress(A, 1250) - 0.5).abs() < 1e-6);
        assert!(fx.has_reveal(A));

        assert_eq!(fx.fade_progress(A, 1500), 1.0);
        assert!(!fx.has_reveal(A), "completed fade is deleted on query");
        // No entry reads as fully opaque
        assert_eq!(fx.fade_progress(A, 1501), 1.0);
    }

    #[test]
    fn test_fade_restart_and_cancel() {
        let mut fx = registry();
        fx.start_reveal(A, 0);
        fx.start_reveal(A, 400);
        assert_eq!(fx.reveal(A), Some(&RevealFade { started_at: 400 }));
        assert!((fx.fade_progress(A, 650) - 0.5).abs() < 1e-6);

        fx.cancel_reveal(A);
        assert!(!fx.has_reveal(A));
        fx.cancel_reveal(A); // idempotent
        assert_eq!(fx.active_reveals(), 0);
    }

    #[test]
    fn test_pulse_follows_sine_then_grace_then_gone() {
        let mut fx = registry();
        fx.start_pulse(A, B, 10_000);
        assert_eq!(fx.active_pulses(), 2);

        let start = fx.pulse(A, 10_000);
        assert_eq!(start.scale, 1.0);
        assert!(start.highlight);

        let peak = fx.pulse(A, 10_150);
        assert!((peak.scale - 1.2).abs() < 1e-5);

        let rising = fx.pulse(B, 10_075);
        let falling = fx.pulse(B, 10_225);
        assert!(rising.scale > 1.0 && rising.scale < peak.scale);
        assert!((rising.scale - falling.scale).abs() < 1e-5);

        // Last sample on the sine: back to 1.0, still pulsing
        let last = fx.pulse(A, 10_300);
        assert!((last.scale - 1.0).abs() < 1e-5);
        assert!(last.highlight);
        assert_eq!(fx.match_pulse(A).map(|p| p.pulsing), Some(true));

        // Grace period: no scale, border still shown
        let grace = fx.pulse(A, 10_301);
        assert_eq!(grace.scale, 1.0);
        assert!(grace.highlight);
        assert_eq!(fx.match_pulse(A).map(|p| p.pulsing), Some(false));

        let end_of_grace = fx.pulse(A, 10_500);
        assert_eq!(end_of_grace.scale, 1.0);
        assert!(end_of_grace.highlight);

        assert_eq!(fx.pulse(A, 10_501), PulseSample::NONE);
        assert!(!fx.has_pulse(A));
        // B is retired independently
        assert!(fx.has_pulse(B));
    }

    #[test]
    fn test_pulse_does_not_resume_after_grace_started() {
        let mut fx = registry();
        fx.start_pulse(A, B, 0);
        fx.pulse(A, 350);
        // An out-of-order earlier sample stays flat once pulsing ended
        assert_eq!(fx.pulse(A, 100).scale, 1.0);
    }

    #[test]
    fn test_huge_pulse_timings_do_not_overflow() {
        let timings = Timings {
            pulse_ms: u64::MAX,
            pulse_grace_ms: PULSE_GRACE,
            ..Timings::default()
        };
        let mut fx = EffectRegistry::new(4, 5, timings);
        fx.start_pulse(A, B, 0);

        let sample = fx.pulse(A, 10);
        assert!(sample.highlight);
        assert!(fx.has_pulse(A));
        // Still alive long after a wrapped sum would have retired it
        assert!(fx.pulse(A, 1_000_000).highlight);
    }

    #[test]
    fn test_missing_pulse_is_neutral() {
        let mut fx = registry();
        assert_eq!(fx.pulse(A, 123), PulseSample::NONE);
        assert!(!fx.has_pulse(A));
    }

    #[test]
    fn test_off_grid_cells_ignored() {
        let mut fx = registry();
        let outside = Cell::new(9, 9);
        fx.start_reveal(outside, 0);
        fx.start_pulse(outside, outside, 0);
        assert_eq!(fx.active_reveals(), 0);
        assert_eq!(fx.active_pulses(), 0);
    }

    proptest! {
        #[test]
        fn prop_pulse_scale_bounded(elapsed in 0u64..=300) {
            let scale = pulse_scale(elapsed, 300, 0.2);
            prop_assert!(scale >= 1.0 - 1e-6);
            prop_assert!(scale <= 1.2 + 1e-6);
        }

        #[test]
        fn prop_pulse_scale_symmetric(elapsed in 0u64..=300) {
            let a = pulse_scale(elapsed, 300, 0.2);
            let b = pulse_scale(300 - elapsed, 300, 0.2);
            prop_assert!((a - b).abs() < 1e-4);
        }
    }
}
