//! Inbound webhook notification envelope.
//!
//! A notification is an unauthenticated payload delivered by the payment
//! processor to a public endpoint. It claims that an object reached a status
//! (`"event": "payment.succeeded"`) and embeds a snapshot of that object.
//! The embedded snapshot is untrusted: receivers must re-fetch the object
//! from the API and compare before acknowledging. Notifications exist only
//! for the duration of request handling and are never stored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

/// The object family a notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Payment,
    Refund,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Payment => "payment",
            EventCategory::Refund => "refund",
        }
    }
}

impl Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure to interpret a notification's `event` field.
#[derive(Debug, thiserror::Error)]
pub enum EventNameError {
    #[error("Event name {0:?} is not of the form category.status")]
    MissingSeparator(String),
    #[error("Unknown event category {0:?}: expected payment or refund")]
    UnknownCategory(String),
    #[error("Event name {0:?} has an empty status part")]
    EmptyStatus(String),
}

/// A parsed `category.status` event name, e.g. `payment.waiting_for_capture`.
///
/// The status part is kept as a string: it is the *claim* made by the sender,
/// to be compared against the authoritative record's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventName {
    pub category: EventCategory,
    pub status: String,
}

impl FromStr for EventName {
    type Err = EventNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, status) = s
            .split_once('.')
            .ok_or_else(|| EventNameError::MissingSeparator(s.to_owned()))?;
        let category = match category {
            "payment" => EventCategory::Payment,
            "refund" => EventCategory::Refund,
            other => return Err(EventNameError::UnknownCategory(other.to_owned())),
        };
        if status.is_empty() {
            return Err(EventNameError::EmptyStatus(s.to_owned()));
        }
        Ok(EventName {
            category,
            status: status.to_owned(),
        })
    }
}

impl Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category, self.status)
    }
}

/// The object a notification refers to. Only the id is required; whatever
/// snapshot the sender embedded rides along in `extra`, unused.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationObject {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A decoded webhook notification: an event name plus the object it claims
/// changed. Requires at minimum `{event: string, object: {id: string}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub event: String,
    pub object: NotificationObject,
}

impl Notification {
    /// Parses the `event` field into its category and claimed status.
    pub fn event_name(&self) -> Result<EventName, EventNameError> {
        self.event.parse()
    }
}
