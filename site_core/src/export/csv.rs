//! CSV export of the message collection

use chrono::{Local, NaiveDate};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{AppError, Result};
use crate::messages::Message;

const HEADER: [&str; 7] = ["Date", "Name", "Phone", "Email", "Subject", "Message", "Status"];

/// Every field is quoted and inner quotes are doubled, so commas and line
/// breaks inside a message survive the export.
pub fn messages_to_csv(messages: &[Message]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for message in messages {
        writer.write_record([
            message.date.as_str(),
            message.name.as_str(),
            message.phone.as_str(),
            message.email.as_str(),
            message.subject.as_str(),
            message.message.as_str(),
            message.status.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Other(anyhow::anyhow!("Failed to flush CSV export: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::Other(anyhow::anyhow!("CSV export is not UTF-8: {}", e)))
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("messages_{}.csv", date.format("%Y-%m-%d"))
}

pub fn default_export_file_name() -> String {
    export_file_name(Local::now().date_naive())
}
