use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    About,
    Expertise,
    Engagement,
    Contact,
    Admin,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::About,
        Page::Expertise,
        Page::Engagement,
        Page::Contact,
        Page::Admin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Expertise => "expertise",
            Page::Engagement => "engagement",
            Page::Contact => "contact",
            Page::Admin => "admin",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown page: {}", s))
    }
}
