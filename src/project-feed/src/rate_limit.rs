//! Rate limit inspection for the GitHub API.
//!
//! The feed makes a handful of requests per run, so it never sleeps for a
//! reset. It only reports when the remaining budget is nearly exhausted,
//! which explains later fallbacks to placeholder images.

use octocrab::Octocrab;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Minimum remaining requests before the budget is considered low.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Rate limit information for a specific resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Returns true if fewer than a handful of requests remain.
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining < MIN_REMAINING_THRESHOLD
    }

    /// Seconds until the window resets, relative to `now` (Unix seconds).
    #[must_use]
    pub fn seconds_until_reset(&self, now: u64) -> u64 {
        self.reset.saturating_sub(now)
    }
}

/// Checks the current rate limit status for the core API.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: core.remaining as u32,
        reset: core.reset,
        limit: core.limit as u32,
    })
}

/// Logs the rate limit status, returning true if the budget is low.
pub fn report_rate_limit(info: &RateLimitInfo) -> bool {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    if info.is_low() {
        warn!(
            remaining = info.remaining,
            limit = info.limit,
            reset_in_secs = info.seconds_until_reset(now),
            "GitHub rate limit nearly exhausted, some requests may fail"
        );
        return true;
    }

    debug!(
        remaining = info.remaining,
        limit = info.limit,
        "GitHub rate limit"
    );
    false
}
