use crate::{documents::Game, voting::Eligibility};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Vote {
    pub game_id: i64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NewTitle {
    pub title: String,
}

impl std::fmt::Display for NewTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MarkOwned {
    pub game_id: i64,

    /// Title as shown to the user, only used in the confirmation message.
    #[serde(default)]
    pub title: Option<String>,
}

/// Text shown in the page's message panel.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub text: String,
    pub error: bool,
}

impl Message {
    pub fn info(text: impl Into<String>) -> Self {
        Message {
            text: text.into(),
            error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Message {
            text: text.into(),
            error: true,
        }
    }
}

/// Content of the store page: both game lists and whether the visitor may
/// vote or add a title right now.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct StorePage {
    pub owned: Vec<Game>,
    pub wanted: Vec<Game>,
    pub entries_enabled: bool,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl StorePage {
    pub fn new(owned: Vec<Game>, wanted: Vec<Game>, eligibility: Eligibility) -> Self {
        StorePage {
            owned,
            wanted,
            entries_enabled: eligibility.is_allowed(),
            message: eligibility
                .denial()
                .map(|denial| Message::error(denial.message())),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct WantedPage {
    pub wanted: Vec<Game>,
}
