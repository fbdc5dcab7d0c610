use std::collections::VecDeque;
use std::mem;
use std::sync::{Arc, Mutex};
use std::thread;
use log::info;

use crate::fetcher::Fetch;
use crate::worker::{Outcome, RejectedRecord, RetryingWorker, SuccessRecord};

pub const POOL_WIDTH: usize = 10;

pub struct Dispatcher<F: Fetch + 'static> {
    worker: Arc<RetryingWorker<F>>,
    pool_width: usize,
}

impl<F: Fetch + 'static> Dispatcher<F> {
    pub fn new(worker: RetryingWorker<F>) -> Self {
        Dispatcher {
            worker: Arc::new(worker),
            pool_width: POOL_WIDTH,
        }
    }

    pub fn with_pool_width(mut self, width: usize) -> Self {
        self.pool_width = width.max(1);
        self
    }

    // Drains the task list through a fixed pool of worker threads. A thread
    // picks up the next URL the moment it finishes the previous one, so
    // completion order carries no meaning. Blocks until every task has
    // reached a terminal state, then hands back both collections.
    pub fn run(&self, tasks: Vec<String>) -> (Vec<SuccessRecord>, Vec<RejectedRecord>) {
        let width = self.pool_width.min(tasks.len());
        if width == 0 {
            return (Vec::new(), Vec::new());
        }
        info!("Dispatching {} URLs across {} workers", tasks.len(), width);

        let queue = Arc::new(Mutex::new(tasks.into_iter().collect::<VecDeque<_>>()));
        let collected = Arc::new(Mutex::new(Vec::new()));
        let rejected = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::with_capacity(width);
        for _ in 0..width {
            let queue = Arc::clone(&queue);
            let collected = Arc::clone(&collected);
            let rejected = Arc::clone(&rejected);
            let worker = Arc::clone(&self.worker);

            handles.push(thread::spawn(move || loop {
                // Pop under a short-lived lock; holding it across process()
                // would serialize the whole pool.
                let next = queue.lock().unwrap().pop_front();
                let url = match next {
                    Some(url) => url,
                    None => break,
                };
                match worker.process(&url) {
                    Outcome::Collected(record) => collected.lock().unwrap().push(record),
                    Outcome::Rejected(record) => rejected.lock().unwrap().push(record),
                }
            }));
        }

        for handle in handles {
            handle.join().expect("worker thread panicked");
        }

        let successes = mem::take(&mut *collected.lock().unwrap());
        let failures = mem::take(&mut *rejected.lock().unwrap());
        (successes, failures)
    }
}
