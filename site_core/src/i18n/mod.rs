//! Languages, text direction and the localized service catalog

pub mod catalog;
pub mod language;

pub use catalog::{LocalizedText, ServiceCatalog, ServiceId};
pub use language::{DocumentAttributes, Language, TextDirection, Theme};
