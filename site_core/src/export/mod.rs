pub mod csv;

pub use self::csv::{default_export_file_name, export_file_name, messages_to_csv};
