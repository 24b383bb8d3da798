//! Generate / preview / export workflow state.
//!
//! A [`Session`] holds the current [`LutSettings`], the latest generated
//! lattice and whether the LUT is switched on. Every stage it calls is a
//! pure function; the session only decides which inputs to feed them.

use crate::{apply, cube, generate, Lattice, Progress};
use lutgen_core::{LutSettings, PixelBuffer, Resolution, Strength};
#[allow(unused_imports)]
use tracing::{debug, info};

/// Holds the latest lattice and the settings used to preview and export it.
///
/// # Example
///
/// ```rust
/// use lutgen_core::{LutSettings, PixelBuffer, Strength};
/// use lutgen_lut::{NoProgress, Session};
///
/// let reference = PixelBuffer::filled(16, 16, [200, 40, 40, 255]);
/// let target = PixelBuffer::filled(4, 4, [10, 10, 10, 255]);
///
/// let mut session = Session::new(LutSettings::default());
/// assert!(session.preview(&target).is_none());
///
/// session.generate(&reference, &mut NoProgress);
/// let graded = session.preview(&target).unwrap();
/// assert_eq!(graded.pixel(0, 0), Some([200, 40, 40, 255]));
///
/// session.set_strength(Strength::NONE);
/// assert_eq!(session.preview(&target).unwrap(), target);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    settings: LutSettings,
    lattice: Option<Lattice>,
    active: bool,
}

impl Session {
    /// Creates a session with no lattice; the LUT starts switched on.
    pub fn new(settings: LutSettings) -> Self {
        Self {
            settings,
            lattice: None,
            active: true,
        }
    }

    /// Current settings.
    pub fn settings(&self) -> LutSettings {
        self.settings
    }

    /// Latest generated lattice, if any.
    pub fn lattice(&self) -> Option<&Lattice> {
        self.lattice.as_ref()
    }

    /// Whether previews go through the lattice.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Resolution for the next [`generate`](Self::generate). An existing
    /// lattice keeps the resolution it was built with.
    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.settings.resolution = resolution;
    }

    /// Strength used by [`preview`](Self::preview).
    pub fn set_strength(&mut self, strength: Strength) {
        self.settings.strength = strength;
    }

    /// Switches the LUT on or off for previews.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Builds a new lattice from `reference`, replacing the previous one.
    pub fn generate<P>(&mut self, reference: &PixelBuffer, progress: &mut P) -> &Lattice
    where
        P: Progress + ?Sized,
    {
        let lattice = generate(reference, self.settings.resolution, progress);
        info!(resolution = %lattice.resolution(), "Generated LUT");
        self.lattice.insert(lattice)
    }

    /// Renders `image` with the current lattice and strength.
    ///
    /// Returns `None` before the first generation and an unchanged copy
    /// while the LUT is switched off.
    pub fn preview(&self, image: &PixelBuffer) -> Option<PixelBuffer> {
        let lattice = self.lattice.as_ref()?;
        if !self.active {
            debug!("LUT inactive, preview shows the original");
            return Some(image.clone());
        }
        Some(apply(image, lattice, self.settings.strength))
    }

    /// `.cube` text for the current lattice.
    pub fn export(&self) -> Option<String> {
        self.lattice.as_ref().map(cube::export)
    }

    /// Download name for the current lattice, e.g. `myLUT_17x17x17.cube`.
    ///
    /// Uses the lattice's own resolution when one exists, otherwise the
    /// configured resolution.
    pub fn file_name(&self) -> String {
        let resolution = self
            .lattice
            .as_ref()
            .map_or(self.settings.resolution, Lattice::resolution);
        cube::file_name(cube::DEFAULT_PREFIX, resolution)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LutSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoProgress;

    #[test]
    fn test_resolution_change_applies_to_next_generate() {
        let reference = PixelBuffer::filled(8, 8, [1, 2, 3, 255]);
        let mut session = Session::default();
        session.generate(&reference, &mut NoProgress);

        session.set_resolution(Resolution::R33);
        assert_eq!(session.lattice().map(Lattice::resolution), Some(Resolution::R17));
        assert_eq!(session.file_name(), "myLUT_17x17x17.cube");

        session.generate(&reference, &mut NoProgress);
        assert_eq!(session.lattice().map(Lattice::resolution), Some(Resolution::R33));
        assert_eq!(session.file_name(), "myLUT_33x33x33.cube");
    }

    #[test]
    fn test_inactive_preview_is_original() {
        let reference = PixelBuffer::filled(8, 8, [250, 0, 0, 255]);
        let target = PixelBuffer::filled(3, 3, [0, 90, 0, 255]);
        let mut session = Session::default();
        session.generate(&reference, &mut NoProgress);

        session.set_active(false);
        assert_eq!(session.preview(&target), Some(target.clone()));

        session.set_active(true);
        assert_ne!(session.preview(&target), Some(target));
    }

    #[test]
    fn test_export_requires_lattice() {
        let mut session = Session::default();
        assert!(session.export().is_none());
        assert_eq!(session.file_name(), "myLUT_17x17x17.cube");

        session.generate(&PixelBuffer::filled(2, 2, [9, 9, 9, 255]), &mut NoProgress);
        let text = session.export().unwrap();
        assert_eq!(text.lines().count(), 4 + 4913);
    }
}
