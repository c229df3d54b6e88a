//! Conversation and contact records read by the variable builder
//!
//! Only the fields the builder reads are modelled; anything else in the
//! incoming JSON is ignored.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::variables::Value;
use crate::error::Error;

/// A conversation participant (sender or assignee)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
}

impl Person {
    /// Create a person with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the phone number
    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    /// Set the identifier
    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConversationMeta {
    #[serde(default)]
    pub sender: Option<Person>,
    #[serde(default)]
    pub assignee: Option<Person>,
}

/// A conversation as delivered by the messaging backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conversation {
    pub id: Value,
    #[serde(default)]
    pub meta: ConversationMeta,
    #[serde(default)]
    pub custom_attributes: BTreeMap<String, Value>,
}

impl Conversation {
    /// Create a conversation with no participants or attributes
    pub fn new(id: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            meta: ConversationMeta::default(),
            custom_attributes: BTreeMap::new(),
        }
    }

    /// Set the sender
    pub fn with_sender(mut self, sender: Person) -> Self {
        self.meta.sender = Some(sender);
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: Person) -> Self {
        self.meta.assignee = Some(assignee);
        self
    }

    /// Add a custom attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom_attributes.insert(key.into(), value.into());
        self
    }

    /// Parse a conversation from JSON text
    pub fn from_json(content: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a conversation from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// A contact with its custom attributes
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub custom_attributes: BTreeMap<String, Value>,
}

impl Contact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom_attributes.insert(key.into(), value.into());
        self
    }

    /// Parse a contact from JSON text
    pub fn from_json(content: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a contact from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
