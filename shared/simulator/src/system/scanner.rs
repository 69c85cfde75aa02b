use crate::snapshot::{Contact, SceneInformation};
use serde::{Deserialize, Serialize};
use spacegame_api::{ActionKind, PilotAction};

/// Targeting.
///
/// Keeps the contacts of the latest scene snapshot and a cursor into them.
/// `range` and `accuracy` are carried for ship records but do not filter
/// contacts yet.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Scanner {
    pub accuracy: f64,
    pub range: f64,
    #[serde(skip)]
    targets: Vec<Contact>,
    #[serde(skip)]
    celestials: Vec<Contact>,
    #[serde(skip)]
    selected_target: Option<Selection>,
    #[serde(skip)]
    selected_celestial: Option<Selection>,
    #[serde(skip)]
    owner: Option<String>,
}

impl Default for Scanner {
    fn default() -> Self {
        Scanner::new(100.0, 300000.0)
    }
}

/// A selected contact and the slot it was selected at. Contacts may share a
/// name, so the slot tells duplicates apart.
#[derive(Clone, Debug, PartialEq)]
struct Selection {
    index: usize,
    contact: Contact,
}

impl Selection {
    fn at(observed: &[Contact], index: usize) -> Option<Selection> {
        observed.get(index).map(|contact| Selection {
            index,
            contact: contact.clone(),
        })
    }

    /// The selection's slot in `observed`: its old slot if that still holds
    /// the same name, otherwise the first contact with that name.
    fn locate(&self, observed: &[Contact]) -> Option<usize> {
        match observed.get(self.index) {
            Some(c) if c.name == self.contact.name => Some(self.index),
            _ => observed.iter().position(|c| c.name == self.contact.name),
        }
    }
}

/// Moves `selected` by `delta` through `observed`.
///
/// With nothing selected, forward picks the first contact and backward the
/// last. Stepping off either end clears the selection. A selection that is
/// no longer observed is left as it is.
fn cycle(observed: &[Contact], selected: &mut Option<Selection>, delta: isize) {
    let Some(current) = selected.as_ref() else {
        *selected = if delta > 0 {
            Selection::at(observed, 0)
        } else {
            observed
                .len()
                .checked_sub(1)
                .and_then(|last| Selection::at(observed, last))
        };
        return;
    };
    let Some(index) = current.locate(observed) else {
        log::debug!("selected contact {} is no longer observed", current.contact.name);
        return;
    };
    let next = index as isize + delta;
    *selected = if next >= 0 {
        Selection::at(observed, next as usize)
    } else {
        None
    };
}

/// The freshest observation of `selected`, or the selection itself if it is
/// no longer observed.
fn latest<'a>(observed: &'a [Contact], selected: &'a Option<Selection>) -> Option<&'a Contact> {
    let selected = selected.as_ref()?;
    Some(
        selected
            .locate(observed)
            .map_or(&selected.contact, |index| &observed[index]),
    )
}

impl Scanner {
    pub const NAME: &'static str = "scanner";

    pub fn new(accuracy: f64, range: f64) -> Scanner {
        Scanner {
            accuracy,
            range,
            targets: Vec::new(),
            celestials: Vec::new(),
            selected_target: None,
            selected_celestial: None,
            owner: None,
        }
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub(crate) fn install(&mut self, owner: &str) {
        self.owner = Some(owner.to_string());
        log::info!("scanner installed on ship {}", owner);
    }

    pub fn activate(&mut self, action: PilotAction) {
        log::debug!("scanner activate {:?}", action);
        match action.kind {
            ActionKind::TargetNext => self.next_target(),
            ActionKind::TargetPrevious => self.previous_target(),
            ActionKind::TargetCelestialNext => self.next_celestial(),
            ActionKind::ClearTarget => self.clear_target(),
            // A smarter scanner would pick the nearest celestial to land on.
            ActionKind::Land => self.next_celestial(),
            _ => {}
        }
    }

    pub fn update(&mut self, info: &SceneInformation) {
        self.targets.clone_from(&info.entities);
        self.celestials.clone_from(&info.celestials);
    }

    pub fn targets(&self) -> &[Contact] {
        &self.targets
    }

    pub fn celestials(&self) -> &[Contact] {
        &self.celestials
    }

    pub fn target(&self) -> Option<&Contact> {
        latest(&self.targets, &self.selected_target)
    }

    pub fn celestial(&self) -> Option<&Contact> {
        latest(&self.celestials, &self.selected_celestial)
    }

    /// The ship target if there is one, otherwise the celestial target.
    pub fn selection(&self) -> Option<&Contact> {
        self.target().or_else(|| self.celestial())
    }

    pub fn next_target(&mut self) {
        cycle(&self.targets, &mut self.selected_target, 1);
    }

    pub fn previous_target(&mut self) {
        cycle(&self.targets, &mut self.selected_target, -1);
    }

    pub fn next_celestial(&mut self) {
        if self.celestials.is_empty() {
            log::debug!("no celestials");
        }
        cycle(&self.celestials, &mut self.selected_celestial, 1);
    }

    /// Clears the ship target, or the celestial target if no ship is targeted.
    pub fn clear_target(&mut self) {
        if self.selected_target.is_some() {
            self.selected_target = None;
        } else {
            self.selected_celestial = None;
        }
    }
}
