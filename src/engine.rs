//! The craps rules engine: betting, rolling, and round resolution.
//!
//! ## Round Lifecycle
//!
//! A round moves through two phases:
//!
//! 1. **Come-out** (`point == 0`): 7 or 11 is an immediate player win
//!    ("natural"), 2, 3, or 12 an immediate house win ("craps"); any
//!    other total becomes the point.
//! 2. **Point** (`point != 0`): repeating the point wins for the player
//!    ("point made"), a 7 wins for the house ("seven-out"); anything
//!    else keeps the round open.
//!
//! A winning round credits twice the outstanding bet (stake plus
//! even-money profit); a losing round forfeits the bet, which was
//! already deducted when placed.
//!
//! ## Observers
//!
//! Every mutation is announced through the engine's listener registry
//! before the mutating call returns; see [`crate::observe`]. The engine
//! is single-threaded and synchronous throughout; callers needing
//! concurrent access must serialize externally.

use serde::{Deserialize, Serialize};

use crate::dice::{DiceRoller, WeightedDice};
use crate::error::BetError;
use crate::observe::{ListenerId, Listeners, StateChange};

/// How a round resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    /// Come-out roll of 7 or 11: immediate player win.
    Natural,
    /// Come-out roll of 2, 3, or 12: immediate house win.
    Craps,
    /// Point repeated before a 7: player win.
    PointMade,
    /// 7 rolled during the point phase: house win.
    SevenOut,
}

impl RoundResult {
    /// Check if the player won.
    #[must_use]
    pub const fn player_won(self) -> bool {
        matches!(self, RoundResult::Natural | RoundResult::PointMade)
    }
}

impl std::fmt::Display for RoundResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoundResult::Natural => "natural",
            RoundResult::Craps => "craps",
            RoundResult::PointMade => "point made",
            RoundResult::SevenOut => "seven-out",
        };
        f.write_str(name)
    }
}

/// What a single roll did to the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollOutcome {
    /// Come-out roll established this point; the round continues.
    PointSet(u8),
    /// Point-phase roll that resolved nothing; the round continues.
    StillRolling,
    /// The roll ended the round.
    Resolved(RoundResult),
}

/// Serde-able copy of every observable engine field.
///
/// Lets a late-registering observer read the current state instead of
/// replaying change events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub die1: u8,
    pub die2: u8,
    pub point: u8,
    pub bankroll: i64,
    pub current_bet: i64,
    pub game_active: bool,
    pub game_won: bool,
    pub player_wins: u32,
    pub house_wins: u32,
}

/// Pass-line craps engine.
///
/// Owns all mutable session state and the injected dice source. One
/// instance per session; an explicit [`reset_session`] zeroes it in
/// place.
///
/// ## Defaults
///
/// All counters and balances start at zero with no round active. Fund
/// the session with [`set_bankroll`] before the first bet.
///
/// ```
/// use craps_engine::{CrapsEngine, dice::ScriptedDice};
///
/// let mut engine = CrapsEngine::with_roller(Box::new(ScriptedDice::new([4, 3])));
/// engine.set_bankroll(100);
/// engine.place_bet(10).unwrap();
/// engine.roll(); // 7 on the come-out: a natural
/// assert_eq!(engine.bankroll(), 110);
/// assert_eq!(engine.player_wins(), 1);
/// ```
///
/// [`reset_session`]: CrapsEngine::reset_session
/// [`set_bankroll`]: CrapsEngine::set_bankroll
pub struct CrapsEngine {
    die1: u8,
    die2: u8,
    point: u8,
    bankroll: i64,
    current_bet: i64,
    game_active: bool,
    game_won: bool,
    player_wins: u32,
    house_wins: u32,
    dice: Box<dyn DiceRoller>,
    listeners: Listeners,
}

impl Default for CrapsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CrapsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrapsEngine")
            .field("die1", &self.die1)
            .field("die2", &self.die2)
            .field("point", &self.point)
            .field("bankroll", &self.bankroll)
            .field("current_bet", &self.current_bet)
            .field("game_active", &self.game_active)
            .field("game_won", &self.game_won)
            .field("player_wins", &self.player_wins)
            .field("house_wins", &self.house_wins)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl CrapsEngine {
    /// Create an engine with an entropy-seeded weighted dice source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_roller(Box::new(WeightedDice::from_entropy()))
    }

    /// Create an engine whose weighted dice replay the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_roller(Box::new(WeightedDice::seeded(seed)))
    }

    /// Create an engine with an injected dice source.
    ///
    /// Tests pass a [`crate::dice::ScriptedDice`] to drive specific
    /// outcomes.
    #[must_use]
    pub fn with_roller(dice: Box<dyn DiceRoller>) -> Self {
        Self {
            die1: 0,
            die2: 0,
            point: 0,
            bankroll: 0,
            current_bet: 0,
            game_active: false,
            game_won: false,
            player_wins: 0,
            house_wins: 0,
            dice,
            listeners: Listeners::new(),
        }
    }

    // === Observers ===

    /// Register a state-change listener; returns the removal handle.
    pub fn add_listener(&mut self, listener: impl FnMut(&StateChange) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn emit(&mut self, change: StateChange) {
        self.listeners.emit(change);
    }

    // === Betting ===

    /// Place a bet for the current round.
    ///
    /// The amount is deducted from the bankroll immediately; it is
    /// returned doubled on a win and forfeited on a loss.
    ///
    /// # Errors
    ///
    /// [`BetError::Negative`] for a negative amount,
    /// [`BetError::ExceedsBankroll`] when the amount exceeds available
    /// funds. State is untouched on error.
    pub fn place_bet(&mut self, amount: i64) -> Result<(), BetError> {
        if amount < 0 {
            return Err(BetError::Negative(amount));
        }
        if amount > self.bankroll {
            return Err(BetError::ExceedsBankroll {
                bet: amount,
                bankroll: self.bankroll,
            });
        }

        let old_bankroll = self.bankroll;
        let old_bet = self.current_bet;
        self.bankroll -= amount;
        self.current_bet = amount;

        tracing::debug!(amount, bankroll = self.bankroll, "bet placed");
        self.emit(StateChange::Bankroll {
            old: old_bankroll,
            new: self.bankroll,
        });
        self.emit(StateChange::CurrentBet {
            old: old_bet,
            new: self.current_bet,
        });
        Ok(())
    }

    /// Set the bankroll directly (the session buy-in path).
    pub fn set_bankroll(&mut self, amount: i64) {
        let old = self.bankroll;
        self.bankroll = amount;
        self.emit(StateChange::Bankroll {
            old,
            new: self.bankroll,
        });
    }

    /// Clear the outstanding bet without resolving the round.
    ///
    /// The cleared amount is not refunded; it was deducted at bet time.
    pub fn reset_bet(&mut self) {
        let old = self.current_bet;
        self.current_bet = 0;
        self.emit(StateChange::CurrentBet { old, new: 0 });
    }

    /// Whether the player still has funds to bet with.
    #[must_use]
    pub fn can_continue_playing(&self) -> bool {
        self.bankroll > 0
    }

    // === Rolling ===

    /// Roll both dice and advance the round state machine.
    ///
    /// Starts a round if none is active, draws two faces from the
    /// injected dice source, and applies pass-line resolution. Change
    /// notifications fire for the dice, then for whatever the
    /// resolution touched, in a fixed order (see the module docs of
    /// [`crate::observe`]).
    pub fn roll(&mut self) -> RollOutcome {
        if !self.game_active {
            self.game_active = true;
        }

        let old_die1 = self.die1;
        let old_die2 = self.die2;
        let (die1, die2) = self.dice.roll_pair();
        self.die1 = die1;
        self.die2 = die2;
        let total = die1 + die2;

        tracing::debug!(die1, die2, total, point = self.point, "dice rolled");
        self.emit(StateChange::Die1 {
            old: old_die1,
            new: die1,
        });
        self.emit(StateChange::Die2 {
            old: old_die2,
            new: die2,
        });

        if self.point == 0 {
            match total {
                2 | 3 | 12 => RollOutcome::Resolved(self.end_round(RoundResult::Craps)),
                7 | 11 => RollOutcome::Resolved(self.end_round(RoundResult::Natural)),
                _ => {
                    let old_point = self.point;
                    self.point = total;
                    tracing::info!(point = total, "point established");
                    self.emit(StateChange::Point {
                        old: old_point,
                        new: total,
                    });
                    RollOutcome::PointSet(total)
                }
            }
        } else if total == self.point {
            RollOutcome::Resolved(self.end_round(RoundResult::PointMade))
        } else if total == 7 {
            RollOutcome::Resolved(self.end_round(RoundResult::SevenOut))
        } else {
            RollOutcome::StillRolling
        }
    }

    /// End the round: settle the bet, bump the win counter, notify.
    ///
    /// The point reset is deliberately not notified; observers learn of
    /// the new round from the `gameActive` transition.
    fn end_round(&mut self, result: RoundResult) -> RoundResult {
        let player_won = result.player_won();

        self.game_active = false;
        self.game_won = player_won;
        self.point = 0;

        if player_won {
            let old_wins = self.player_wins;
            self.player_wins += 1;
            self.credit_win();
            self.emit(StateChange::PlayerWins {
                old: old_wins,
                new: self.player_wins,
            });
        } else {
            let old_wins = self.house_wins;
            self.house_wins += 1;
            self.reset_bet();
            self.emit(StateChange::HouseWins {
                old: old_wins,
                new: self.house_wins,
            });
        }

        tracing::info!(
            %result,
            player_wins = self.player_wins,
            house_wins = self.house_wins,
            "round resolved"
        );
        self.emit(StateChange::GameActive {
            old: true,
            new: false,
        });
        self.emit(StateChange::GameWon {
            old: !player_won,
            new: player_won,
        });
        result
    }

    /// Credit a winning round: stake back plus even-money profit.
    fn credit_win(&mut self) {
        let winnings = self.current_bet * 2;
        let old_bankroll = self.bankroll;
        let old_bet = self.current_bet;

        self.bankroll += winnings;
        self.current_bet = 0;

        self.emit(StateChange::Bankroll {
            old: old_bankroll,
            new: self.bankroll,
        });
        self.emit(StateChange::CurrentBet { old: old_bet, new: 0 });
    }

    // === Session ===

    /// Reset the whole session to its initial state in place.
    ///
    /// Notifies `playerWins`, `houseWins`, `bankroll`, and `currentBet`
    /// only; the point and round flags are cleared silently.
    pub fn reset_session(&mut self) {
        let old_player_wins = self.player_wins;
        let old_house_wins = self.house_wins;
        let old_bankroll = self.bankroll;
        let old_bet = self.current_bet;

        self.player_wins = 0;
        self.house_wins = 0;
        self.bankroll = 0;
        self.current_bet = 0;
        self.point = 0;
        self.game_active = false;
        self.game_won = false;

        tracing::info!("session reset");
        self.emit(StateChange::PlayerWins {
            old: old_player_wins,
            new: 0,
        });
        self.emit(StateChange::HouseWins {
            old: old_house_wins,
            new: 0,
        });
        self.emit(StateChange::Bankroll {
            old: old_bankroll,
            new: 0,
        });
        self.emit(StateChange::CurrentBet { old: old_bet, new: 0 });
    }

    // === Accessors ===

    /// Last-rolled face of die 1; 0 before the first roll.
    #[must_use]
    pub fn die1(&self) -> u8 {
        self.die1
    }

    /// Last-rolled face of die 2; 0 before the first roll.
    #[must_use]
    pub fn die2(&self) -> u8 {
        self.die2
    }

    /// The established point, or 0 during the come-out phase.
    #[must_use]
    pub fn point(&self) -> u8 {
        self.point
    }

    /// The player's available funds.
    #[must_use]
    pub fn bankroll(&self) -> i64 {
        self.bankroll
    }

    /// The outstanding wager; already deducted from the bankroll.
    #[must_use]
    pub fn current_bet(&self) -> i64 {
        self.current_bet
    }

    /// Whether a round is in progress.
    #[must_use]
    pub fn is_game_active(&self) -> bool {
        self.game_active
    }

    /// Whether the player won the most recently resolved round.
    #[must_use]
    pub fn game_won(&self) -> bool {
        self.game_won
    }

    /// Rounds won by the player this session.
    #[must_use]
    pub fn player_wins(&self) -> u32 {
        self.player_wins
    }

    /// Rounds won by the house this session.
    #[must_use]
    pub fn house_wins(&self) -> u32 {
        self.house_wins
    }

    /// Copy of every observable field.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            die1: self.die1,
            die2: self.die2,
            point: self.point,
            bankroll: self.bankroll,
            current_bet: self.current_bet,
            game_active: self.game_active,
            game_won: self.game_won,
            player_wins: self.player_wins,
            house_wins: self.house_wins,
        }
    }
}
