//! Subscriber seam for committed pool events.
//!
//! The ledger keeps its own append-only log per pool; an [`EventSink`] is an
//! additional, push-based consumer (an indexer, a websocket fan-out, a test
//! collector).  A sink is called once the pool's new state has committed and
//! before the next operation on that pool starts, so records of one pool
//! arrive in sequence order.  Records from different pools may interleave.
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, atomic::{AtomicU64, Ordering}};
//! use amm_ledger::domain::EventRecord;
//! use amm_ledger::traits::EventSink;
//!
//! let seen = Arc::new(AtomicU64::new(0));
//! let counter = Arc::clone(&seen);
//! let sink = move |_: &EventRecord| {
//!     counter.fetch_add(1, Ordering::Relaxed);
//! };
//! let boxed: Box<dyn EventSink> = Box::new(sink);
//! # drop(boxed);
//! ```

use core::fmt;

use crate::domain::EventRecord;

/// Handle returned when a sink is registered; pass it back to stop delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// Receives every committed [`EventRecord`].
///
/// Implementations must not call back into the
/// [`PoolManager`](crate::ledger::PoolManager) that notifies them for the
/// same pool; they should hand the record off and return quickly.
pub trait EventSink: Send + Sync {
    /// Called once per committed record.
    fn publish(&self, record: &EventRecord);
}

impl<F> EventSink for F
where
    F: Fn(&EventRecord) + Send + Sync,
{
    fn publish(&self, record: &EventRecord) {
        self(record);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::domain::{AccountId, Amount, LiquidityAdded, Shares, TokenAddress};

    #[test]
    fn closures_are_sinks() {
        let collected = Arc::new(Mutex::new(Vec::new()));
        let inner = Arc::clone(&collected);
        let sink: Box<dyn EventSink> = Box::new(move |r: &EventRecord| inner.lock().push(*r));

        let token = TokenAddress::from_bytes([1; 20]);
        let record = EventRecord {
            sequence: 1,
            token,
            event: LiquidityAdded {
                provider: AccountId::from_bytes([2; 20]),
                token,
                token_amount: Amount::new(1_000),
                base_amount: Amount::new(10),
                shares_minted: Shares::new(100),
            }
            .into(),
        };
        sink.publish(&record);
        assert_eq!(collected.lock().as_slice(), &[record]);
    }
}
