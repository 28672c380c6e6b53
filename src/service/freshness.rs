// Freshness policy for the story cache.
// One pure decision function; every request path consults it, none
// re-derive the age comparison themselves.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Maximum cache age served without a refetch: 3 hours.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(3 * 60 * 60);

/// Outcome of evaluating a cache entry against the freshness window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Cache is fresh; serve it without touching the network.
    ServeCached,
    /// Cache is absent or expired; refetch. With `stale_fallback`, a failed
    /// refetch falls back to the expired entry instead of erroring.
    Refetch { stale_fallback: bool },
}

/// Decide what to do for a cache entry fetched at `last_fetched`.
///
/// `None` means no usable cache exists. An age that cannot be represented
/// (clock skew) counts as expired.
pub fn evaluate(
    last_fetched: Option<DateTime<Utc>>,
    window: Duration,
    now: DateTime<Utc>,
) -> Freshness {
    let Some(fetched) = last_fetched else {
        return Freshness::Refetch {
            stale_fallback: false,
        };
    };

    let age = now
        .signed_duration_since(fetched)
        .to_std()
        .unwrap_or(Duration::MAX);

    if age < window {
        Freshness::ServeCached
    } else {
        Freshness::Refetch {
            stale_fallback: true,
        }
    }
}
