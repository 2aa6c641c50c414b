//! Section rendering seam.
//!
//! DESIGN
//! ======
//! The gate decides which section is active; the renderer only toggles
//! visibility. Markup for each section is owned by the page, not this crate.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::section::Section;

/// Receives the active section after every navigation.
pub trait Renderer: Send {
    fn show(&mut self, section: Section);
}

/// Per-section visibility flags, one visible at a time after the first `show`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionVisibility {
    visible: Option<Section>,
    shows: u64,
}

impl SectionVisibility {
    #[must_use]
    pub fn is_visible(&self, section: Section) -> bool {
        self.visible == Some(section)
    }

    /// The single visible section, if any has been shown yet.
    #[must_use]
    pub fn visible(&self) -> Option<Section> {
        self.visible
    }

    /// Element ids currently hidden.
    #[must_use]
    pub fn hidden_view_ids(&self) -> Vec<&'static str> {
        Section::ALL
            .into_iter()
            .filter(|s| !self.is_visible(*s))
            .map(Section::view_id)
            .collect()
    }

    /// Number of `show` calls received.
    #[must_use]
    pub fn show_count(&self) -> u64 {
        self.shows
    }
}

impl Renderer for SectionVisibility {
    fn show(&mut self, section: Section) {
        self.visible = Some(section);
        self.shows += 1;
        tracing::debug!(view = section.view_id(), "section shown");
    }
}
