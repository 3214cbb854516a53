use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Simple in-memory rate limiter keyed by caller-chosen strings
/// (OTP issuance per email, verification per client address).
pub struct RateLimiter {
    requests: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Returns true if the request is allowed, false once `max_requests`
    /// have been seen for `key` within `window`.
    pub fn check_rate_limit(
        &self,
        key: &str,
        max_requests: usize,
        window: Duration,
    ) -> bool {
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = requests.entry(key.to_string()).or_default();
        entry.retain(|time| time.elapsed() < window);

        if entry.len() >= max_requests {
            return false;
        }

        entry.push(Instant::now());

        // Drop exhausted keys so the map does not grow without bound.
        requests.retain(|_, times| !times.is_empty());

        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Email validation
pub fn validate_email(email: &str) -> bool {
    let email = email.trim();

    if email.is_empty() || email.len() > 254 {
        return false;
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || local.len() > 64 || domain.is_empty() {
        return false;
    }

    // Domain must have at least one dot
    if !domain.contains('.') {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limiter_allows_up_to_max_then_blocks() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(60);

        assert!(limiter.check_rate_limit("key", 2, window));
        assert!(limiter.check_rate_limit("key", 2, window));
        assert!(!limiter.check_rate_limit("key", 2, window));
    }

    #[test]
    fn rate_limiter_keys_are_independent() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(60);

        assert!(limiter.check_rate_limit("key-a", 1, window));
        assert!(!limiter.check_rate_limit("key-a", 1, window));
        assert!(limiter.check_rate_limit("key-b", 1, window));
    }

    #[test]
    fn rate_limiter_recovers_after_window() {
        let limiter = RateLimiter::new();
        let window = Duration::from_millis(10);

        assert!(limiter.check_rate_limit("key", 1, window));
        assert!(!limiter.check_rate_limit("key", 1, window));

        std::thread::sleep(Duration::from_millis(20));
        assert!(limiter.check_rate_limit("key", 1, window));
    }

    #[test]
    fn validate_email_accepts_plain_addresses() {
        assert!(validate_email("desk@example.com"));
        assert!(validate_email("  desk@example.com  "));
    }

    #[test]
    fn validate_email_rejects_malformed_addresses() {
        assert!(!validate_email(""));
        assert!(!validate_email("desk"));
        assert!(!validate_email("desk@"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("desk@localhost"));
        assert!(!validate_email("a@b@example.com"));
    }
}
