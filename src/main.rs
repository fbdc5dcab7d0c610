use email_harvester_lib::{input_loader, logger, output_writer};
use email_harvester_lib::{Dispatcher, HttpFetcher, RetryingWorker};

use std::env;
use std::error::Error;
use log::{info, error};

const INPUT_FILE: &str = "urls.csv";
const COLLECTED_FILE: &str = "collected_mails.csv";
const REJECTED_FILE: &str = "rejected_urls.csv";

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();

    let input_file = env::args().nth(1).unwrap_or_else(|| INPUT_FILE.to_string());
    info!("Starting email harvest from {}", input_file);

    let urls = input_loader::load_urls(&input_file);
    if urls.is_empty() {
        error!("No valid URLs found in {}. Nothing to do.", input_file);
        return Ok(());
    }

    let dispatcher = Dispatcher::new(RetryingWorker::new(HttpFetcher::new()));
    let (collected, rejected) = dispatcher.run(urls);

    output_writer::write_collected(COLLECTED_FILE, &collected)?;
    output_writer::write_rejected(REJECTED_FILE, &rejected)?;

    info!("Complete. {} collected, {} rejected.", collected.len(), rejected.len());
    Ok(())
}
