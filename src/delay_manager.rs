use std::time::Duration;
use std::thread;
use rand::Rng;
use log::debug;

pub const REQUEST_DELAY_MIN: Duration = Duration::from_secs(1);
pub const REQUEST_DELAY_MAX: Duration = Duration::from_secs(5);

// Uniformly random pause in [min, max]. Spreads workers out so a full pool
// does not hit a host in one synchronized burst.
pub fn random_delay_between(min: Duration, max: Duration) {
    let min_ms = min.as_millis() as u64;
    let max_ms = max.as_millis() as u64;
    let wait_ms = if max_ms > min_ms {
        rand::thread_rng().gen_range(min_ms..=max_ms)
    } else {
        min_ms
    };
    if wait_ms > 0 {
        debug!("Waiting {} ms before request...", wait_ms);
        thread::sleep(Duration::from_millis(wait_ms));
    }
}
