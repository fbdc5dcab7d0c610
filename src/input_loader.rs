use std::fs::File;
use std::path::Path;
use log::{info, warn, error};
use url::Url;

// Loads candidate URLs from a header-less CSV. The first field of each row
// is the candidate; remaining fields are ignored. Rows that fail the syntax
// check are logged and dropped so they never reach the dispatcher.
pub fn load_urls<P: AsRef<Path>>(path: P) -> Vec<String> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            error!("Could not open input file {:?}: {}", path, e);
            return Vec::new();
        }
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut urls = Vec::new();
    for result in rdr.records() {
        match result {
            Ok(record) => {
                let candidate = record.get(0).unwrap_or("");
                if is_valid_url(candidate) {
                    urls.push(candidate.to_string());
                } else {
                    warn!("Invalid URL skipped: {}", candidate);
                }
            }
            Err(e) => {
                error!("Error parsing CSV record: {}", e);
            }
        }
    }

    info!("Loaded {} URLs from {:?}", urls.len(), path);
    urls
}

fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}
