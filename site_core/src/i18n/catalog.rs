//! Service descriptions keyed by a closed set of ids and languages.
//!
//! The catalog is checked when it is loaded: every service must carry a
//! non-empty title and description in every language, and no unknown keys are
//! allowed. After a successful load every lookup is infallible.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::language::Language;
use crate::error::{AppError, Result};

const EMBEDDED_CATALOG: &str = include_str!("services.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceId {
    StructuralWorks,
    FinishingWorks,
    CivilEngineering,
    RoadsNetworks,
    Renovation,
    ProjectManagement,
}

impl ServiceId {
    pub const ALL: [ServiceId; 6] = [
        ServiceId::StructuralWorks,
        ServiceId::FinishingWorks,
        ServiceId::CivilEngineering,
        ServiceId::RoadsNetworks,
        ServiceId::Renovation,
        ServiceId::ProjectManagement,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ServiceId::StructuralWorks => "structural-works",
            ServiceId::FinishingWorks => "finishing-works",
            ServiceId::CivilEngineering => "civil-engineering",
            ServiceId::RoadsNetworks => "roads-networks",
            ServiceId::Renovation => "renovation",
            ServiceId::ProjectManagement => "project-management",
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ServiceId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        ServiceId::ALL
            .into_iter()
            .find(|id| id.slug() == s)
            .ok_or_else(|| AppError::Catalog(format!("Unknown service id '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    entries: HashMap<(ServiceId, Language), LocalizedText>,
}

impl ServiceCatalog {
    /// Catalog shipped with the crate.
    pub fn load() -> Result<Self> {
        Self::from_toml(EMBEDDED_CATALOG)
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, LocalizedText>> = toml::from_str(source)
            .map_err(|e| AppError::Catalog(format!("Invalid catalog document: {}", e)))?;

        let mut entries = HashMap::new();
        for (service_key, translations) in raw {
            let service: ServiceId = service_key.parse()?;

            for (lang_key, text) in translations {
                let lang = Language::from_code(&lang_key).ok_or_else(|| {
                    AppError::Catalog(format!("Unknown language '{}' for service '{}'", lang_key, service))
                })?;

                if text.title.trim().is_empty() || text.description.trim().is_empty() {
                    return Err(AppError::Catalog(format!(
                        "Empty text for service '{}' in '{}'",
                        service, lang
                    )));
                }

                if entries.insert((service, lang), text).is_some() {
                    return Err(AppError::Catalog(format!(
                        "Duplicate '{}' translation for service '{}' (key '{}')",
                        lang, service, lang_key
                    )));
                }
            }
        }

        for service in ServiceId::ALL {
            for lang in Language::ALL {
                if !entries.contains_key(&(service, lang)) {
                    return Err(AppError::Catalog(format!(
                        "Missing '{}' translation for service '{}'",
                        lang, service
                    )));
                }
            }
        }

        debug!("Service catalog loaded with {} entries", entries.len());
        Ok(Self { entries })
    }

    pub fn get(&self, service: ServiceId, lang: Language) -> &LocalizedText {
        // Completeness is checked in `from_toml`.
        &self.entries[&(service, lang)]
    }

    pub fn title(&self, service: ServiceId, lang: Language) -> &str {
        &self.get(service, lang).title
    }

    pub fn services(&self, lang: Language) -> Vec<(ServiceId, &LocalizedText)> {
        ServiceId::ALL
            .into_iter()
            .map(|id| (id, self.get(id, lang)))
            .collect()
    }
}
