mod mock_openphone_client;

pub use mock_openphone_client::MockOpenPhoneClient;

use serde_json::{json, Value};

#[allow(dead_code)]
pub fn message(id: &str, from: &str, text: &str) -> Value {
    json!({
        "id": id,
        "from": from,
        "to": ["+15550009999"],
        "text": text,
        "direction": "incoming",
        "createdAt": "2024-05-01T10:00:00Z"
    })
}

#[allow(dead_code)]
pub fn contact(id: &str, first_name: &str, last_name: &str) -> Value {
    json!({
        "id": id,
        "defaultFields": {
            "firstName": first_name,
            "lastName": last_name,
            "company": null,
            "phoneNumbers": [{"name": "mobile", "value": "+15550004444"}]
        }
    })
}

#[allow(dead_code)]
pub fn call(id: &str, participants: &[&str]) -> Value {
    json!({
        "id": id,
        "participants": participants,
        "direction": "outgoing",
        "status": "completed",
        "duration": 42,
        "createdAt": "2024-05-01T11:00:00Z"
    })
}
