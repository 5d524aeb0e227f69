//! Direction of integer division.

/// Which way a division that leaves a remainder is settled.
///
/// The ledger settles every division in its own favor: payouts (swap
/// outputs, withdrawals, minted shares) are floored, charges (exact-out
/// inputs, the retained fee) are ceiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Ceiling; used for what the caller owes the pool.
    Up,
    /// Floor; used for what the pool owes the caller.
    Down,
}

impl Rounding {
    /// `true` for [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}
