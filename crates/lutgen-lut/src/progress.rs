//! Progress observers for lattice sampling.

/// Receives completion percentages while a lattice is built.
///
/// Values are in `[0, 100]` and never decrease within one run. Observers
/// must tolerate one call per lattice node (up to 262 144 for 64^3) with no
/// fixed step size.
///
/// Any `FnMut(f32)` closure is an observer:
///
/// ```rust
/// use lutgen_core::{PixelBuffer, Resolution};
/// use lutgen_lut::sample;
///
/// let img = PixelBuffer::filled(8, 8, [10, 20, 30, 255]);
/// let mut last = 0.0;
/// let raw = sample(&img, Resolution::R17, &mut |p: f32| last = p);
/// assert!(last > 99.9);
/// assert_eq!(raw.get(0, 0, 0), [10, 20, 30]);
/// ```
pub trait Progress {
    /// Called with the percentage of work done so far.
    fn report(&mut self, percent: f32);
}

impl<F: FnMut(f32)> Progress for F {
    #[inline]
    fn report(&mut self, percent: f32) {
        self(percent)
    }
}

/// Observer that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    #[inline]
    fn report(&mut self, _percent: f32) {}
}
