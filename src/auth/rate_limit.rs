use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const MAX_ATTEMPTS: usize = 5;
const WINDOW_SECS: u64 = 900; // 15 minutes

/// Failed sign-in attempts per account (lowercased email) within a sliding
/// window.
#[derive(Clone)]
pub struct LoginThrottle {
    attempts: Arc<Mutex<HashMap<String, Vec<Instant>>>>,
    max_attempts: usize,
    window: Duration,
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginThrottle {
    pub fn new() -> Self {
        Self::with_limits(MAX_ATTEMPTS, Duration::from_secs(WINDOW_SECS))
    }

    pub fn with_limits(max_attempts: usize, window: Duration) -> Self {
        Self {
            attempts: Arc::new(Mutex::new(HashMap::new())),
            max_attempts,
            window,
        }
    }

    /// True once the account reached the failure limit inside the window.
    /// Stale timestamps for the account are dropped on the way.
    pub fn is_blocked(&self, account: &str) -> bool {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let Some(cutoff) = Instant::now().checked_sub(self.window) else {
            return map.get(&key(account)).is_some_and(|t| t.len() >= self.max_attempts);
        };

        match map.get_mut(&key(account)) {
            Some(timestamps) => {
                timestamps.retain(|t| *t > cutoff);
                timestamps.len() >= self.max_attempts
            }
            None => false,
        }
    }

    /// Record a failed attempt. Accounts whose failures have all left the
    /// window are swept on the way.
    pub fn record_failure(&self, account: &str) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        if let Some(cutoff) = now.checked_sub(self.window) {
            map.retain(|_, timestamps| {
                timestamps.retain(|t| *t > cutoff);
                !timestamps.is_empty()
            });
        }
        map.entry(key(account)).or_default().push(now);
    }

    /// Number of accounts with failures still on record.
    pub fn tracked_accounts(&self) -> usize {
        self.attempts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Forget the account's failures (after a successful sign-in).
    pub fn clear(&self, account: &str) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&key(account));
    }
}

fn key(account: &str) -> String {
    account.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_after_max_failures() {
        let throttle = LoginThrottle::with_limits(3, Duration::from_secs(60));
        for _ in 0..2 {
            throttle.record_failure("user@nextmail.com");
        }
        assert!(!throttle.is_blocked("user@nextmail.com"));
        throttle.record_failure("user@nextmail.com");
        assert!(throttle.is_blocked("user@nextmail.com"));
        assert!(!throttle.is_blocked("other@nextmail.com"));
    }

    #[test]
    fn accounts_are_case_insensitive() {
        let throttle = LoginThrottle::with_limits(1, Duration::from_secs(60));
        throttle.record_failure("User@NextMail.com");
        assert!(throttle.is_blocked("user@nextmail.com"));
    }

    #[test]
    fn clear_resets_account() {
        let throttle = LoginThrottle::with_limits(1, Duration::from_secs(60));
        throttle.record_failure("a@b.co");
        throttle.clear("a@b.co");
        assert!(!throttle.is_blocked("a@b.co"));
    }

    #[test]
    fn expired_accounts_are_swept() {
        let throttle = LoginThrottle::with_limits(5, Duration::from_millis(10));
        for i in 0..1_000 {
            throttle.record_failure(&format!("user{i}@nextmail.com"));
        }
        assert_eq!(throttle.tracked_accounts(), 1_000);

        std::thread::sleep(Duration::from_millis(30));
        throttle.record_failure("other@nextmail.com");

        assert_eq!(throttle.tracked_accounts(), 1);
    }

    #[test]
    fn failures_expire_after_window() {
        let throttle = LoginThrottle::with_limits(1, Duration::from_millis(20));
        throttle.record_failure("a@b.co");
        std::thread::sleep(Duration::from_millis(40));
        assert!(!throttle.is_blocked("a@b.co"));
    }
}
