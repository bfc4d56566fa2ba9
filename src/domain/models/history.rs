#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;
use super::Sender;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub sender: Sender,
    pub text: String,
    #[serde(default, alias = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A question and its answer as the server stores them, one row per exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub message: String,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryRecord {
    Message(MessageRecord),
    Exchange(ExchangeRecord),
}

impl HistoryRecord {
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            HistoryRecord::Message(record) => {
                let msg = Message::new(record.sender, &record.text);
                if let Some(created_at) = record.created_at {
                    return vec![msg.created(created_at)];
                }
                return vec![msg];
            }
            HistoryRecord::Exchange(record) => {
                let created_at = record.timestamp.unwrap_or_else(Utc::now);
                let mut messages =
                    vec![Message::new(Sender::User, &record.message).created(created_at)];
                if let Some(response) = record.response {
                    messages.push(Message::new(Sender::Assistant, &response).created(created_at));
                }
                return messages;
            }
        }
    }
}

pub fn records_to_messages(records: Vec<HistoryRecord>) -> Vec<Message> {
    return records
        .into_iter()
        .flat_map(|record| return record.into_messages())
        .collect();
}
