//! System-wide constants for the OpenLedger point ledger.

/// Coins debited from the rater for every rating, positive or negative.
pub const RATING_COIN_COST: i64 = 2;

/// Cash credited to the rater for every rating.
pub const RATING_CASH_REWARD: i64 = 1;

/// Magnitude of the coin adjustment applied to both the content owner and
/// the content itself per rating (sign follows the rating direction).
pub const RATING_CONTENT_DELTA: i64 = 1;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenLedger";
