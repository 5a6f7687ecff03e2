//! Error types for bet validation.

/// Errors raised when a bet cannot be accepted.
///
/// These are caller mistakes, not engine faults: the engine leaves its
/// state untouched and expects the caller to re-prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BetError {
    /// The wagered amount is negative.
    #[error("bet cannot be negative (got {0})")]
    Negative(i64),

    /// The wagered amount exceeds the player's available funds.
    #[error("bet of {bet} exceeds bankroll of {bankroll}")]
    ExceedsBankroll { bet: i64, bankroll: i64 },
}
