use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Custom deserializer: the backend sends `Id` as either a string or a number
fn deserialize_entry_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Null => Ok(None),
        other => Err(D::Error::custom(format!(
            "Id must be a string or a number, got {}",
            other
        ))),
    }
}

/// One record of the list endpoint body
#[derive(Deserialize, Clone, PartialEq)]
pub struct WireCredential {
    #[serde(rename = "Id", deserialize_with = "deserialize_entry_id", default)]
    pub id: Option<String>,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password", default)]
    pub password: String,
    #[serde(rename = "Url", default)]
    pub url: String,
}

impl fmt::Debug for WireCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireCredential")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("url", &self.url)
            .finish()
    }
}

/// Body of the add endpoint; the id is assigned by the server
#[derive(Serialize)]
pub struct AddCredentialRequest<'a> {
    #[serde(rename = "Username")]
    pub username: &'a str,
    #[serde(rename = "Password")]
    pub password: &'a str,
    #[serde(rename = "Url")]
    pub url: &'a str,
}

/// Body of the remove endpoint, keyed by username and url only
#[derive(Debug, Serialize)]
pub struct RemoveCredentialRequest<'a> {
    #[serde(rename = "Username")]
    pub username: &'a str,
    #[serde(rename = "Url")]
    pub url: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numeric_and_string_ids() {
        let json = r#"[
            {"Id": 1, "Username": "Mark", "Password": "p1", "Url": "https://x"},
            {"Id": "abc-2", "Username": "Jacob", "Password": "p2", "Url": "https://y"},
            {"Id": null, "Username": "Larry", "Password": "p3", "Url": "https://z"},
            {"Username": "Anna", "Password": "p4", "Url": "https://w"}
        ]"#;
        let records: Vec<WireCredential> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].id.as_deref(), Some("1"));
        assert_eq!(records[0].username, "Mark");
        assert_eq!(records[0].password, "p1");
        assert_eq!(records[0].url, "https://x");
        assert_eq!(records[1].id.as_deref(), Some("abc-2"));
        assert_eq!(records[2].id, None);
        assert_eq!(records[3].id, None);
    }

    #[test]
    fn test_malformed_id_is_rejected() {
        for id in ["true", "{}", "[1]"] {
            let json = format!(
                r#"[{{"Id": {}, "Username": "Mark", "Password": "p1", "Url": "https://x"}}]"#,
                id
            );
            let result: Result<Vec<WireCredential>, _> = serde_json::from_str(&json);
            assert!(result.is_err(), "Id {} should not decode", id);
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let json = r#"{"Id": 7, "Username": "Mark", "Password": "hunter2", "Url": "https://x"}"#;
        let record: WireCredential = serde_json::from_str(json).unwrap();
        let rendered = format!("{:?}", record);
        assert!(rendered.contains("Mark"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_field_names_are_case_sensitive() {
        let json = r#"[{"id": 1, "username": "Mark"}]"#;
        let result: Result<Vec<WireCredential>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_add_request_has_no_id() {
        let request = AddCredentialRequest {
            username: "Jacob",
            password: "p2",
            url: "https://y",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Username": "Jacob", "Password": "p2", "Url": "https://y"})
        );
    }

    #[test]
    fn test_remove_request_omits_password_and_id() {
        let request = RemoveCredentialRequest {
            username: "Mark",
            url: "https://x",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"Username": "Mark", "Url": "https://x"}));
    }
}
