use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Per-IP sliding-window limiter for failed login attempts.
#[derive(Clone)]
pub struct RateLimiter {
    max_attempts: usize,
    window: Duration,
    attempts: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        // 5 failures per 15 minutes
        RateLimiter::new(5, Duration::from_secs(900))
    }
}

impl RateLimiter {
    pub fn new(max_attempts: usize, window: Duration) -> Self {
        RateLimiter {
            max_attempts,
            window,
            attempts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// True when the IP has exhausted its attempts inside the window.
    /// Stale entries for the checked IP are pruned lazily.
    pub fn is_blocked(&self, ip: IpAddr) -> bool {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let cutoff = Instant::now() - self.window;
        match map.get_mut(&ip) {
            Some(timestamps) => {
                timestamps.retain(|t| *t > cutoff);
                timestamps.len() >= self.max_attempts
            }
            None => false,
        }
    }

    pub fn record_failure(&self, ip: IpAddr) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(ip).or_default().push(Instant::now());
    }

    /// Forget an IP after a successful login.
    pub fn clear(&self, ip: IpAddr) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&ip);
    }
}
