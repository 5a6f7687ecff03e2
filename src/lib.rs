//! # craps-engine
//!
//! A self-contained rules engine for pass-line Craps: bankroll and
//! betting, weighted dice, round resolution, and synchronous state-change
//! broadcast for driving a UI.
//!
//! ## Design Principles
//!
//! 1. **Engine Only**: no widgets, no networking, no persistence. The
//!    engine owns all mutable session state; everything around it is a
//!    thin consumer.
//!
//! 2. **Injectable Randomness**: the engine draws die faces through the
//!    [`dice::DiceRoller`] trait. Production uses the loaded
//!    [`dice::WeightedDice`]; tests inject a [`dice::ScriptedDice`]
//!    sequence for deterministic outcomes.
//!
//! 3. **Synchronous Observation**: every state mutation is announced to
//!    registered listeners in registration order before the mutating
//!    call returns. No queues, no threads.
//!
//! ## Modules
//!
//! - `engine`: The [`CrapsEngine`] state machine and round resolution
//! - `dice`: Dice sources and the weighted face distribution
//! - `observe`: State-change events and the listener registry
//! - `error`: Bet validation errors
//!
//! ## Example
//!
//! ```
//! use craps_engine::{CrapsEngine, RollOutcome};
//!
//! let mut engine = CrapsEngine::with_seed(42);
//! engine.set_bankroll(100);
//! engine.place_bet(10)?;
//!
//! let mut outcome = engine.roll();
//! while !matches!(outcome, RollOutcome::Resolved(_)) {
//!     outcome = engine.roll();
//! }
//! # Ok::<(), craps_engine::BetError>(())
//! ```

pub mod dice;
pub mod engine;
pub mod error;
pub mod observe;

// Re-export commonly used types
pub use crate::dice::{DiceRoller, ScriptedDice, WeightedDice, WeightedDiceState};
pub use crate::engine::{CrapsEngine, EngineSnapshot, RollOutcome, RoundResult};
pub use crate::error::BetError;
pub use crate::observe::{ListenerId, StateChange};
