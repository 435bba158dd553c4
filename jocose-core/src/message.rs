use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Opaque message identifier.
///
/// Dumps normally use UUID strings, but numeric ids are accepted too. Those
/// are kept as their JSON text and never compare equal to a string id, so
/// `17` and `"17"` are different messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageId {
    Text(String),
    Number(String),
}

impl MessageId {
    pub fn as_str(&self) -> &str {
        match self {
            MessageId::Text(s) | MessageId::Number(s) => s,
        }
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        MessageId::Text(s.to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Participant role of a message.
///
/// Only `user` and `assistant` form an opposite pair. Every other role,
/// including the dump's own `prompter`, is kept verbatim and never takes part
/// in opposite-role preference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Asker,
    Responder,
    Other(String),
}

impl Role {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "user" => Role::Asker,
            "assistant" => Role::Responder,
            other => Role::Other(other.to_string()),
        }
    }

    /// The conversational counterpart, if this role has one.
    pub fn opposite(&self) -> Option<Role> {
        match self {
            Role::Asker => Some(Role::Responder),
            Role::Responder => Some(Role::Asker),
            Role::Other(_) => None,
        }
    }
}

/// Crowd-sourced rating summary for one label category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Label {
    /// Mean rating, only present when the source value is a JSON number.
    pub value: Option<f64>,
}

/// Rating labels keyed by category name (`humor`, `quality`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Labels(BTreeMap<String, Label>);

impl Labels {
    pub fn get(&self, category: &str) -> Option<&Label> {
        self.0.get(category)
    }

    /// Numeric value of a category, if the category exists and carries one.
    pub fn value(&self, category: &str) -> Option<f64> {
        self.get(category).and_then(|label| label.value)
    }
}

impl FromIterator<(String, Label)> for Labels {
    fn from_iter<I: IntoIterator<Item = (String, Label)>>(iter: I) -> Self {
        Labels(iter.into_iter().collect())
    }
}

/// A single conversational turn as read from the dataset.
///
/// Only the fields the selector looks at are decoded. Every field is optional
/// and a value of the wrong JSON type decodes to its absent/default form
/// instead of rejecting the record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Message {
    #[serde(rename = "message_id", default, deserialize_with = "lenient::identifier")]
    pub id: Option<MessageId>,
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub parent_id: Option<MessageId>,
    #[serde(default, deserialize_with = "lenient::role")]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub lang: Option<String>,
    #[serde(default, deserialize_with = "lenient::labels")]
    pub labels: Labels,
    /// Whether the message passed review. Decoded by truthiness.
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub review_result: bool,
    #[serde(default, deserialize_with = "lenient::unsigned")]
    pub review_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub rank: Option<i64>,
}

impl Message {
    /// Parses one JSON object. Anything else (arrays, scalars, broken JSON)
    /// yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(line).ok()?;
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    pub fn id(&self) -> Option<&MessageId> {
        self.id.as_ref()
    }

    pub fn parent_id(&self) -> Option<&MessageId> {
        self.parent_id.as_ref()
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.role.as_ref() == Some(role)
    }
}

/// Field decoders that fall back to "absent" on type mismatch.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{Label, Labels, MessageId, Role};

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }

    /// Non-empty strings and non-zero numbers; anything else has no id.
    pub fn identifier<'de, D>(deserializer: D) -> Result<Option<MessageId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = match Value::deserialize(deserializer)? {
            Value::String(s) if !s.is_empty() => Some(MessageId::Text(s)),
            Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => {
                Some(MessageId::Number(n.to_string()))
            }
            _ => None,
        };
        Ok(id)
    }

    pub fn role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(string(deserializer)?.map(|s| Role::from_wire(&s)))
    }

    pub fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let truthy = match Value::deserialize(deserializer)? {
            Value::Null => false,
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
        };
        Ok(truthy)
    }

    pub fn unsigned<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Value::deserialize(deserializer)?.as_u64())
    }

    /// Integral JSON numbers only; `3.0` is a float and decodes to `None`.
    pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Value::deserialize(deserializer)?.as_i64())
    }

    pub fn labels<'de, D>(deserializer: D) -> Result<Labels, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::Object(map) = Value::deserialize(deserializer)? else {
            return Ok(Labels::default());
        };

        Ok(map
            .into_iter()
            .filter_map(|(category, summary)| {
                let Value::Object(summary) = summary else {
                    return None;
                };
                let label = Label {
                    value: summary.get("value").and_then(Value::as_f64),
                };
                Some((category, label))
            })
            .collect())
    }
}
