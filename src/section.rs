//! Application sections: the mutually exclusive views of the journal page.
//!
//! DESIGN
//! ======
//! Exactly one section is active at a time. The element ids mirror the
//! markup the renderer toggles, so they are part of the contract with the
//! page and must stay stable.

#[cfg(test)]
#[path = "section_test.rs"]
mod section_test;

/// A top-level view of the single-page application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Section {
    /// Landing view, active on load.
    #[default]
    Home,
    /// Journal feed for the current user.
    Journals,
    /// Journal authoring form.
    CreateJournal,
}

impl Section {
    /// Every section, in page order.
    pub const ALL: [Self; 3] = [Self::Home, Self::Journals, Self::CreateJournal];

    /// Element id of the view container for this section.
    #[must_use]
    pub fn view_id(self) -> &'static str {
        match self {
            Self::Home => "home-section",
            Self::Journals => "journals-section",
            Self::CreateJournal => "create-journal-section",
        }
    }
}
