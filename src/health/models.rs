use serde_json::{Map, Value};

/// Outcome of a single GET against the backend.
///
/// A transport failure has no status; its description is carried both as
/// `error` and as the body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub status: Option<u16>,
    pub body: String,
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn response(status: u16, body: String) -> Self {
        Self {
            status: Some(status),
            body,
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            status: None,
            body: error.clone(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Some(200)
    }

    /// `1` for HTTP 200, `0` for anything else including transport failures.
    pub fn gauge(&self) -> i64 {
        i64::from(self.is_ok())
    }
}

/// Per-check statuses reported by the readiness endpoint, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckMap {
    checks: Map<String, Value>,
}

impl CheckMap {
    /// Extract `checks` from a readiness body.
    ///
    /// Returns `None` when the body is not JSON, the top level is not an
    /// object, or `checks` is missing or not an object.
    pub fn parse(body: &str) -> Option<Self> {
        let mut root = match serde_json::from_str::<Value>(body).ok()? {
            Value::Object(root) => root,
            _ => return None,
        };

        match root.remove("checks")? {
            Value::Object(checks) => Some(Self { checks }),
            _ => None,
        }
    }

    /// `(check name, passing)` pairs. Only a string status equal to `ok`
    /// in any letter case counts as passing.
    pub fn statuses(&self) -> impl Iterator<Item = (&str, bool)> {
        self.checks
            .iter()
            .map(|(name, status)| (name.as_str(), is_ok_status(status)))
    }
}

fn is_ok_status(status: &Value) -> bool {
    match status {
        Value::String(s) => s.to_lowercase() == "ok",
        _ => false,
    }
}
