//! # Result Rendering
//!
//! Maps every terminal dispatch outcome to exactly one externally visible
//! response: a transport-agnostic status code plus a body. Denials always
//! render the same status regardless of which check produced them; errors
//! carry the stable JSON envelope `{"error": {"code", "message"}}` with the
//! offending parameter when one is known.

use http::StatusCode;
use serde_json::{json, Value};

use crate::engine::StreamBody;
use crate::error::{DispatchError, DispatchResult};

/// Body of a rendered response.
#[derive(Debug)]
pub enum ResponseBody {
    None,
    Json(Value),
    Text {
        content_type: &'static str,
        text: String,
    },
    Stream(StreamBody),
}

impl ResponseBody {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Terminal response of a dispatched command.
#[derive(Debug)]
pub struct JobResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

/// Render a dispatch result. Success is always OK, body present or not;
/// failures map per the error taxonomy.
pub fn render(result: DispatchResult<ResponseBody>) -> JobResponse {
    match result {
        Ok(body) => JobResponse {
            status: StatusCode::OK,
            body,
        },
        Err(err) => render_error(&err),
    }
}

fn render_error(err: &DispatchError) -> JobResponse {
    let (status, code, param) = match err {
        DispatchError::AuthDenied { .. } => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", None),
        DispatchError::Validation { code, param, .. } => {
            (StatusCode::BAD_REQUEST, *code, param.clone())
        }
        DispatchError::NotFound { job_id } => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", Some(job_id.clone()))
        }
        // Business-rule violations reported by the engine are client errors.
        DispatchError::Engine { .. } => (StatusCode::BAD_REQUEST, "ENGINE_REJECTED", None),
        DispatchError::Transport { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "TRANSPORT_ERROR", None)
        }
    };

    let mut envelope = json!({
        "error": {
            "code": code,
            "message": err.to_string(),
        }
    });
    if let Some(param) = param {
        envelope["error"]["param"] = Value::String(param);
    }

    JobResponse {
        status,
        body: ResponseBody::Json(envelope),
    }
}
