//! State-change broadcast for UI observers.
//!
//! Every mutation of the engine's observable state is announced as a
//! [`StateChange`] carrying the old and new values. Listeners are plain
//! closures invoked synchronously, in registration order, before the
//! mutating call returns. There is no queue and no asynchronous
//! delivery; a listener that needs the full current state should read an
//! engine snapshot when it registers.
//!
//! Listeners receive values only. The engine is mutably borrowed while
//! it dispatches, so a listener cannot call back into it.

use serde::{Deserialize, Serialize};

/// A single observable property transition.
///
/// One variant per property the engine exposes. [`property`] maps each
/// variant to the stable wire-level name a UI binding layer keys on.
///
/// [`property`]: StateChange::property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChange {
    /// First die face changed.
    Die1 { old: u8, new: u8 },
    /// Second die face changed.
    Die2 { old: u8, new: u8 },
    /// Point established (0 → total) or cleared.
    Point { old: u8, new: u8 },
    /// Bankroll debited or credited.
    Bankroll { old: i64, new: i64 },
    /// Bet placed, cleared, or forfeited.
    CurrentBet { old: i64, new: i64 },
    /// Player win counter advanced.
    PlayerWins { old: u32, new: u32 },
    /// House win counter advanced.
    HouseWins { old: u32, new: u32 },
    /// Round started or resolved.
    GameActive { old: bool, new: bool },
    /// Outcome flag of the most recently resolved round.
    GameWon { old: bool, new: bool },
}

impl StateChange {
    /// Stable property name for this change.
    #[must_use]
    pub const fn property(&self) -> &'static str {
        match self {
            StateChange::Die1 { .. } => "die1",
            StateChange::Die2 { .. } => "die2",
            StateChange::Point { .. } => "point",
            StateChange::Bankroll { .. } => "bankroll",
            StateChange::CurrentBet { .. } => "currentBet",
            StateChange::PlayerWins { .. } => "playerWins",
            StateChange::HouseWins { .. } => "houseWins",
            StateChange::GameActive { .. } => "gameActive",
            StateChange::GameWon { .. } => "gameWon",
        }
    }
}

impl std::fmt::Display for StateChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateChange::Die1 { old, new }
            | StateChange::Die2 { old, new }
            | StateChange::Point { old, new } => {
                write!(f, "{}: {} -> {}", self.property(), old, new)
            }
            StateChange::Bankroll { old, new } | StateChange::CurrentBet { old, new } => {
                write!(f, "{}: {} -> {}", self.property(), old, new)
            }
            StateChange::PlayerWins { old, new } | StateChange::HouseWins { old, new } => {
                write!(f, "{}: {} -> {}", self.property(), old, new)
            }
            StateChange::GameActive { old, new } | StateChange::GameWon { old, new } => {
                write!(f, "{}: {} -> {}", self.property(), old, new)
            }
        }
    }
}

/// Handle for removing a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl ListenerId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

/// Ordered listener registry.
///
/// Dispatch walks the registered closures in registration order. Removal
/// is by [`ListenerId`]; ids are never reused within a registry.
#[derive(Default)]
pub struct Listeners {
    next_id: u32,
    entries: Vec<(ListenerId, Box<dyn FnMut(&StateChange)>)>,
}

impl Listeners {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; returns the handle for removal.
    pub fn add(&mut self, listener: impl FnMut(&StateChange) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener by handle. Returns false if it was not
    /// registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dispatch a change to every listener, in registration order.
    pub fn emit(&mut self, change: StateChange) {
        for (_, listener) in &mut self.entries {
            listener(&change);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
