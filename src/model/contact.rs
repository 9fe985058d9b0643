use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record_id;

record_id!(
    /// Identifier of a contact-form message.
    ContactMessageId
);

/// A message left through the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub responded: bool,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactMessageCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

/// Fields shown to admins when a new message arrives.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ContactMessage> for ContactSummary {
    fn from(message: &ContactMessage) -> Self {
        Self {
            id: message.id.clone(),
            name: message.name.clone(),
            email: message.email.clone(),
            created_at: message.created_at,
        }
    }
}
