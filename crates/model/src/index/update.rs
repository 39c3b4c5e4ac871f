use serde::{Deserialize, Serialize};

/// Set-style modifier of an atomic update (`{"set": value}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetField<T> {
    pub set: T,
}

/// Partial update that replaces only the status code of an indexed tender.
/// No other field is ever written through this path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePayload {
    pub id: String,
    pub status_code: SetField<i64>,
}

impl UpdatePayload {
    pub fn set_status(id: impl Into<String>, status_code: i64) -> Self {
        Self {
            id: id.into(),
            status_code: SetField { set: status_code },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_wire_shape() {
        let payload = UpdatePayload::set_status("X", 8);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"id": "X", "status_code": {"set": 8}})
        );
    }
}
