use std::time::Duration;

use bytes::Bytes;

/// Per-request options forwarded by the walk engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Ask intermediaries not to serve a cached copy (live playlist refresh).
    pub no_cache: bool,
    /// The caller expects opaque binary data rather than text.
    pub read_as_buffer: bool,
}

impl LoadOptions {
    /// Options for playlist fetches: text, bypassing caches.
    #[must_use]
    pub fn playlist() -> Self {
        Self {
            no_cache: true,
            read_as_buffer: false,
        }
    }

    /// Options for opaque payloads (segments, init maps, keys).
    #[must_use]
    pub fn buffer() -> Self {
        Self {
            no_cache: false,
            read_as_buffer: true,
        }
    }
}

/// A fetched resource: payload plus the mime type reported by the source.
#[derive(Clone, Debug)]
pub struct Loaded {
    pub data: Bytes,
    pub mime_type: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NetOptions {
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub max_retry_delay: Duration,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(100),
            max_retry_delay: Duration::from_secs(5),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        let opts = NetOptions::default();
        Self::from_options(&opts)
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn from_options(opts: &NetOptions) -> Self {
        Self {
            max_retries: opts.max_retries,
            base_delay: opts.retry_base_delay,
            max_delay: opts.max_retry_delay,
        }
    }

    /// Exponential backoff, capped at `max_delay`. Attempt 0 is the initial
    /// request and carries no delay.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponential_delay = self.base_delay * 2_u32.pow(attempt.saturating_sub(1));
        std::cmp::min(exponential_delay, self.max_delay)
    }
}
