pub mod input_loader;
pub mod fetcher;
pub mod extractor;
pub mod worker;
pub mod dispatcher;
pub mod output_writer;
pub mod delay_manager;
pub mod logger;

// Exporting types for convenience
pub use dispatcher::Dispatcher;
pub use extractor::Extractor;
pub use fetcher::{Fetch, FetchFailure, FailureKind, HttpFetcher};
pub use worker::{Outcome, RejectedRecord, RetryingWorker, SuccessRecord};
