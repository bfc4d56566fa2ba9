use serde_json::json;
use serde_json::Value;

/// History as the Curio API returns it, mixing plain message records with the
/// stored exchange rows the server persists.
pub fn history_fixture() -> Value {
    return json!([
        {
            "sender": "user",
            "text": "hi",
            "createdAt": "2024-03-01T10:00:00Z"
        },
        {
            "sender": "bot",
            "text": "hello",
            "createdAt": "2024-03-01T10:00:05Z"
        },
        {
            "id": 7,
            "userId": 1,
            "message": "What is photosynthesis?",
            "response": "Photosynthesis is how plants turn light into food.",
            "timestamp": "2024-03-02T09:30:00Z"
        },
        {
            "id": 8,
            "userId": 1,
            "message": "Are you there?",
            "response": null,
            "timestamp": "2024-03-02T09:31:00Z"
        }
    ]);
}

pub fn long_passage_fixture() -> &'static str {
    return r#"
Mangrove forests such as the Sundarbans act as natural barriers against storm
surges. Their dense root systems trap sediment, slow incoming water and
provide nursery habitat for fish and crustaceans.
"#
    .trim();
}
