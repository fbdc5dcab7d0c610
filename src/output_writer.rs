use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use log::info;

use crate::worker::{RejectedRecord, SuccessRecord};

pub fn write_collected<P: AsRef<Path>>(
    path: P,
    records: &[SuccessRecord],
) -> Result<(), Box<dyn Error>> {
    if records.is_empty() {
        info!("No data collected.");
        return Ok(());
    }

    let file = File::create(path.as_ref())?;
    serialize_collected(file, records)?;
    info!("Data saved to {:?}", path.as_ref());
    Ok(())
}

pub fn write_rejected<P: AsRef<Path>>(
    path: P,
    records: &[RejectedRecord],
) -> Result<(), Box<dyn Error>> {
    if records.is_empty() {
        info!("No URLs were rejected.");
        return Ok(());
    }

    let file = File::create(path.as_ref())?;
    serialize_rejected(file, records)?;
    info!("Rejected URLs saved to {:?}", path.as_ref());
    Ok(())
}

fn serialize_collected<W: Write>(
    writer: W,
    records: &[SuccessRecord],
) -> Result<(), Box<dyn Error>> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(["url", "Company Email"])?;
    for record in records {
        let emails = match &record.emails {
            Some(list) => list.join("; "),
            None => String::new(),
        };
        csv_writer.write_record([record.url.as_str(), emails.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn serialize_rejected<W: Write>(
    writer: W,
    records: &[RejectedRecord],
) -> Result<(), Box<dyn Error>> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(["url", "reason"])?;
    for record in records {
        csv_writer.write_record([record.url.as_str(), record.reason.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}
