use std::time::Duration;
use log::{info, error};

use crate::delay_manager::{self, REQUEST_DELAY_MAX, REQUEST_DELAY_MIN};
use crate::extractor::Extractor;
use crate::fetcher::{FailureKind, Fetch};

pub const MAX_ATTEMPTS: u32 = 3;

const REQUEST_ERROR_REASON: &str = "Request Error";

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SuccessRecord {
    pub url: String,
    // None means the page was checked and held no addresses, which is not
    // the same thing as an empty list of a page never checked.
    pub emails: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RejectedRecord {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Collected(SuccessRecord),
    Rejected(RejectedRecord),
}

// One attempt ends in exactly one of these; only Retryable loops back.
enum Attempt {
    Success(SuccessRecord),
    Retryable(String),
    Terminal(String),
}

pub struct RetryingWorker<F: Fetch> {
    fetcher: F,
    extractor: Extractor,
    max_attempts: u32,
    delay_min: Duration,
    delay_max: Duration,
}

impl<F: Fetch> RetryingWorker<F> {
    pub fn new(fetcher: F) -> Self {
        RetryingWorker {
            fetcher,
            extractor: Extractor::new(),
            max_attempts: MAX_ATTEMPTS,
            delay_min: REQUEST_DELAY_MIN,
            delay_max: REQUEST_DELAY_MAX,
        }
    }

    pub fn with_delay(mut self, min: Duration, max: Duration) -> Self {
        self.delay_min = min;
        self.delay_max = max;
        self
    }

    // Drives one URL to a terminal state. Every path out of here produces
    // exactly one outcome; no fault may drop a task on the floor.
    pub fn process(&self, url: &str) -> Outcome {
        for attempt in 1..=self.max_attempts {
            match self.attempt(url) {
                Attempt::Success(record) => {
                    info!("Successfully processed {}", url);
                    return Outcome::Collected(record);
                }
                Attempt::Retryable(message) => {
                    error!("Attempt {} failed for {}: {}", attempt, url, message);
                }
                Attempt::Terminal(reason) => {
                    error!("Error processing {}: {}", url, reason);
                    return Outcome::Rejected(RejectedRecord {
                        url: url.to_string(),
                        reason,
                    });
                }
            }
        }

        Outcome::Rejected(RejectedRecord {
            url: url.to_string(),
            reason: REQUEST_ERROR_REASON.to_string(),
        })
    }

    fn attempt(&self, url: &str) -> Attempt {
        // Every attempt is paced, including the first.
        delay_manager::random_delay_between(self.delay_min, self.delay_max);

        match self.fetcher.fetch(url) {
            Ok(content) => {
                let emails = self.extractor.extract(&content);
                Attempt::Success(SuccessRecord {
                    url: url.to_string(),
                    emails: if emails.is_empty() { None } else { Some(emails) },
                })
            }
            Err(failure) => match failure.kind {
                FailureKind::RequestError => Attempt::Retryable(failure.message),
                FailureKind::UnexpectedError => Attempt::Terminal(failure.message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::FetchFailure;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    struct ScriptedFetcher {
        script: Mutex<Vec<Result<String, FetchFailure>>>,
        calls: Arc<AtomicU32>,
    }

    impl ScriptedFetcher {
        fn new(script: Vec<Result<String, FetchFailure>>, calls: Arc<AtomicU32>) -> Self {
            ScriptedFetcher {
                script: Mutex::new(script),
                calls,
            }
        }
    }

    impl Fetch for ScriptedFetcher {
        fn fetch(&self, _url: &str) -> Result<String, FetchFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                Err(FetchFailure::request("script exhausted"))
            } else {
                script.remove(0)
            }
        }
    }

    fn quick_worker(fetcher: ScriptedFetcher) -> RetryingWorker<ScriptedFetcher> {
        RetryingWorker::new(fetcher).with_delay(Duration::ZERO, Duration::ZERO)
    }

    #[test]
    fn request_errors_reject_after_exactly_three_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let fetcher = ScriptedFetcher::new(
            vec![
                Err(FetchFailure::request("timeout")),
                Err(FetchFailure::request("timeout")),
                Err(FetchFailure::request("timeout")),
            ],
            Arc::clone(&calls),
        );

        let outcome = quick_worker(fetcher).process("http://flaky.test/");

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            outcome,
            Outcome::Rejected(RejectedRecord {
                url: "http://flaky.test/".to_string(),
                reason: "Request Error".to_string(),
            })
        );
    }

    #[test]
    fn unexpected_errors_reject_without_retry() {
        let calls = Arc::new(AtomicU32::new(0));
        let fetcher = ScriptedFetcher::new(
            vec![Err(FetchFailure::unexpected("undecodable body"))],
            Arc::clone(&calls),
        );

        let outcome = quick_worker(fetcher).process("http://broken.test/");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            outcome,
            Outcome::Rejected(RejectedRecord {
                url: "http://broken.test/".to_string(),
                reason: "undecodable body".to_string(),
            })
        );
    }

    #[test]
    fn recovers_on_second_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let fetcher = ScriptedFetcher::new(
            vec![
                Err(FetchFailure::request("connection reset")),
                Ok("<p>mail me: team@example.com</p>".to_string()),
            ],
            Arc::clone(&calls),
        );

        let outcome = quick_worker(fetcher).process("http://recovering.test/");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            outcome,
            Outcome::Collected(SuccessRecord {
                url: "http://recovering.test/".to_string(),
                emails: Some(vec!["team@example.com".to_string()]),
            })
        );
    }

    #[test]
    fn page_without_addresses_maps_to_absent() {
        let calls = Arc::new(AtomicU32::new(0));
        let fetcher = ScriptedFetcher::new(
            vec![Ok("<p>nothing to see here</p>".to_string())],
            Arc::clone(&calls),
        );

        let outcome = quick_worker(fetcher).process("http://empty.test/");

        assert_eq!(
            outcome,
            Outcome::Collected(SuccessRecord {
                url: "http://empty.test/".to_string(),
                emails: None,
            })
        );
    }
}
