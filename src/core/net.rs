// src/core/net.rs
use std::{thread, time::Duration};

use tracing::{debug, warn};

use crate::config::consts::*;
use crate::core::address::cap_integer;
use crate::error::Result;

/// Retry budget for a single page request. Delay doubles after each retry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// Both values are capped so a request never stalls for long.
    pub fn new(retries: i64, delay_secs: i64) -> Self {
        let retries = cap_integer(retries, 0, i64::from(RETRY_COUNT_MAX));
        let delay = cap_integer(delay_secs, 0, RETRY_DELAY_MAX_SECS as i64);
        Self {
            retries: u32::try_from(retries).unwrap_or(0),
            delay: Duration::from_secs(u64::try_from(delay).unwrap_or(0)),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(i64::from(RETRY_COUNT), RETRY_DELAY_SECS as i64)
    }
}

/// GET `url` with `query` appended, retrying per `policy`.
pub fn http_get(url: &str, query: &[(&str, &str)], policy: &RetryPolicy) -> Result<String> {
    let mut delay = policy.delay;
    let mut attempt = 0;
    loop {
        match get_once(url, query) {
            Ok(body) => return Ok(body),
            Err(e) if attempt < policy.retries => {
                warn!(url, attempt, error = %e, "request failed, retrying in {:?}", delay);
                thread::sleep(delay);
                delay *= 2;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn get_once(url: &str, query: &[(&str, &str)]) -> Result<String> {
    let mut req = ureq::get(url).header("User-Agent", USER_AGENT);
    for (k, v) in query {
        req = req.query(*k, *v);
    }
    debug!(url, ?query, "GET");
    let mut resp = req.call()?;
    Ok(resp.body_mut().read_to_string()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_is_capped() {
        let p = RetryPolicy::new(99, -5);
        assert_eq!(p.retries, RETRY_COUNT_MAX);
        assert_eq!(p.delay, Duration::ZERO);
        assert_eq!(RetryPolicy::default().retries, 3);
    }
}
