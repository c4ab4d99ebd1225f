//! First-class invariants for tic-tac-toe boards.
//!
//! Invariants are logical properties that must hold for every reachable
//! board. They are checked as postconditions of each move and can be
//! tested independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod single_winner;
pub mod symbol_balance;

pub use single_winner::SingleWinnerInvariant;
pub use symbol_balance::SymbolBalanceInvariant;

/// All board invariants as a composable set.
pub type BoardInvariants = (SymbolBalanceInvariant, SingleWinnerInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    #[test]
    fn test_invariant_set_holds_for_empty_board() {
        assert!(BoardInvariants::check_all(&Board::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        // Two O lines and one X line, with O ahead on count.
        let board: Board = "OOO|XXX|OOO".parse().unwrap();
        let violations = BoardInvariants::check_all(&board).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
