//! Navigation controls and click wiring.
//!
//! DESIGN
//! ======
//! Each clickable control is a [`NavControl`] variant with a fixed element
//! id and target section. Handlers are plain named functions registered on
//! an [`EventSource`]; a control accepts exactly one registration.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::gate::SessionGate;
use crate::section::Section;

/// Clickable navigation elements on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavControl {
    /// Header link to the landing view.
    NavHome,
    /// Header link to the journal feed.
    NavJournals,
    /// Header link to the authoring form.
    NavCreateJournal,
    /// "Create journal" button inside the feed.
    CreateJournalButton,
}

impl NavControl {
    pub const ALL: [Self; 4] = [Self::NavHome, Self::NavJournals, Self::NavCreateJournal, Self::CreateJournalButton];

    #[must_use]
    pub fn element_id(self) -> &'static str {
        match self {
            Self::NavHome => "nav-home",
            Self::NavJournals => "nav-journals",
            Self::NavCreateJournal => "nav-create-journal",
            Self::CreateJournalButton => "create-journal-btn",
        }
    }

    /// Section this control selects.
    #[must_use]
    pub fn target(self) -> Section {
        match self {
            Self::NavHome => Section::Home,
            Self::NavJournals => Section::Journals,
            Self::NavCreateJournal | Self::CreateJournalButton => Section::CreateJournal,
        }
    }

    /// Look a control up by its element id.
    #[must_use]
    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.element_id() == id)
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

pub type ClickHandler = fn(&mut SessionGate);

pub fn show_home_section(gate: &mut SessionGate) {
    gate.navigate_to(Section::Home);
}

pub fn show_journals_section(gate: &mut SessionGate) {
    gate.navigate_to(Section::Journals);
}

pub fn show_create_journal_section(gate: &mut SessionGate) {
    gate.navigate_to(Section::CreateJournal);
}

/// Named handler wired to `control` by default.
#[must_use]
pub fn handler_for(control: NavControl) -> ClickHandler {
    match control.target() {
        Section::Home => show_home_section,
        Section::Journals => show_journals_section,
        Section::CreateJournal => show_create_journal_section,
    }
}

// =============================================================================
// EVENT SOURCE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("control {} already has a click handler", .0.element_id())]
    AlreadyRegistered(NavControl),
}

/// Something that delivers clicks for navigation controls.
pub trait EventSource {
    /// Attach `handler` to `control`.
    ///
    /// # Errors
    ///
    /// Fails if `control` already has a handler.
    fn register(&mut self, control: NavControl, handler: ClickHandler) -> Result<(), RegistrationError>;
}

/// In-process event source: clicks are dispatched by calling [`Self::click`].
#[derive(Default)]
pub struct ClickRouter {
    handlers: HashMap<NavControl, ClickHandler>,
}

impl ClickRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_registered(&self, control: NavControl) -> bool {
        self.handlers.contains_key(&control)
    }

    /// Deliver one click. Returns `false` if nothing is registered for `control`.
    pub fn click(&self, control: NavControl, gate: &mut SessionGate) -> bool {
        let Some(handler) = self.handlers.get(&control) else {
            tracing::debug!(control = control.element_id(), "click on unwired control");
            return false;
        };
        handler(gate);
        true
    }
}

impl EventSource for ClickRouter {
    fn register(&mut self, control: NavControl, handler: ClickHandler) -> Result<(), RegistrationError> {
        match self.handlers.entry(control) {
            Entry::Occupied(_) => Err(RegistrationError::AlreadyRegistered(control)),
            Entry::Vacant(slot) => {
                slot.insert(handler);
                Ok(())
            }
        }
    }
}
