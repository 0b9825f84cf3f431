//! JSON envelope rendering for compatibility-sensitive consumers.
//!
//! Operations return `Result` internally; the wire contract is the legacy
//! shape: the serialized record (or `{"msg": ...}` for acknowledgements)
//! on success, `{"error": <string>}` on failure. Callers distinguish the
//! two solely by key presence.

use crate::Error;
use serde::Serialize;
use serde_json::{Value, json};

/// Renders a record-producing operation result.
pub fn render<T: Serialize>(result: &crate::Result<T>) -> Value {
    match result {
        Ok(payload) => match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(err) => json!({ "error": err.to_string() }),
        },
        Err(err) => json!({ "error": error_text(err) }),
    }
}

/// Renders an acknowledgement-producing operation result.
pub fn message(result: &crate::Result<String>) -> Value {
    match result {
        Ok(msg) => json!({ "msg": msg }),
        Err(err) => json!({ "error": error_text(err) }),
    }
}

/// The error string placed in the envelope. `CommandFailed` carries the
/// tool's stderr verbatim; `InvalidParameter` uses the fixed legacy text.
fn error_text(err: &Error) -> String {
    match err {
        Error::InvalidParameter => "invalid parameter".to_string(),
        Error::CommandFailed(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InterfaceMap;

    #[test]
    fn success_payload_is_the_record_itself() {
        let mut map = InterfaceMap::new();
        map.insert("wlan0".into(), "connected".into());
        assert_eq!(render(&Ok(map)), json!({ "wlan0": "connected" }));
    }

    #[test]
    fn acknowledgement_wraps_in_msg() {
        assert_eq!(message(&Ok("ok".into())), json!({ "msg": "ok" }));
    }

    #[test]
    fn invalid_parameter_uses_the_fixed_text() {
        let value = render::<InterfaceMap>(&Err(Error::InvalidParameter));
        assert_eq!(value, json!({ "error": "invalid parameter" }));
    }

    #[test]
    fn command_failure_passes_stderr_through_verbatim() {
        let value = message(&Err(Error::CommandFailed(
            "Error: unknown connection 'nope'.".into(),
        )));
        assert_eq!(value, json!({ "error": "Error: unknown connection 'nope'." }));
    }

    #[test]
    fn field_count_renders_its_display_text() {
        let value = render::<InterfaceMap>(&Err(Error::FieldCount {
            expected: 3,
            got: 2,
        }));
        assert_eq!(
            value,
            json!({ "error": "expected 3 fields per row, got 2" })
        );
    }
}
