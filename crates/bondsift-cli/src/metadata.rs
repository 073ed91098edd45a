use std::fmt::{Display, Formatter};

use bondsift_core::UtcTimestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request identifier (UUID v4) stamped on every CLI invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Per-invocation metadata attached to every rendered report.
///
/// Field order is fixed to keep the JSON envelope stable for scripts
/// that consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub request_id: RequestId,
    pub session: String,
    pub generated_at: UtcTimestamp,
}

impl ReportMeta {
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new_v4(),
            session: session.into(),
            generated_at: UtcTimestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_is_uuid_v4() {
        let request_id = RequestId::new_v4();
        assert_eq!(request_id.0.get_version_num(), 4);
    }

    #[test]
    fn meta_serializes_session_and_utc_timestamp() {
        let meta = ReportMeta::new("tty");
        let value = serde_json::to_value(&meta).expect("meta serializes");

        assert_eq!(value["session"], "tty");
        assert!(value["generated_at"]
            .as_str()
            .is_some_and(|ts| ts.ends_with('Z')));
        assert!(value["request_id"].as_str().is_some_and(|id| id.len() == 36));
    }
}
