//! Connection check
//!
//! One GET against the probe endpoint, classified by status and error code:
//!
//! | Response                              | Outcome                    |
//! |---------------------------------------|----------------------------|
//! | 200                                   | success                    |
//! | 403 + `APP_ID_NOT_EXIST`              | `InvalidToken`             |
//! | 403 + `APP_ID_MISSING`                | `MissingToken`             |
//! | 404                                   | `ServerUnreachable`        |
//! | anything else                         | `GenericConnectionFailure` |

use crate::error::{AuthFailure, Result};
use crate::http::HttpClient;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

/// Path probed by the connection check
pub const PROBE_PATH: &str = "/user";

const INVALID_TOKEN_CODE: &str = "APP_ID_NOT_EXIST";
const MISSING_TOKEN_CODE: &str = "APP_ID_MISSING";

/// Classify a probe response
///
/// The error code is read from the top-level `error` field, which is either
/// the code itself or an object carrying it under its own `error` key.
pub fn classify_response(
    status: StatusCode,
    body: &str,
) -> std::result::Result<(), AuthFailure> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::FORBIDDEN => match error_code(body).as_deref() {
            Some(INVALID_TOKEN_CODE) => Err(AuthFailure::InvalidToken),
            Some(MISSING_TOKEN_CODE) => Err(AuthFailure::MissingToken),
            _ => Err(AuthFailure::GenericConnectionFailure),
        },
        StatusCode::NOT_FOUND => Err(AuthFailure::ServerUnreachable),
        _ => Err(AuthFailure::GenericConnectionFailure),
    }
}

fn error_code(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("error")? {
        Value::String(code) => Some(code.clone()),
        Value::Object(nested) => nested.get("error")?.as_str().map(str::to_string),
        _ => None,
    }
}

/// Probe the API and classify the answer
///
/// Transport failures (connect errors, timeouts) are returned as they are;
/// only an answered request is classified.
pub async fn check_connection(http: &HttpClient) -> Result<()> {
    let response = http.get(PROBE_PATH).await?;
    let status = response.status();
    // An unreadable body only matters for 403 classification
    let body = response.text().await.unwrap_or_default();

    match classify_response(status, &body) {
        Ok(()) => {
            debug!("Connection check passed");
            Ok(())
        }
        Err(failure) => {
            warn!(
                "Connection check failed with HTTP {}: {failure}",
                status.as_u16()
            );
            Err(failure.into())
        }
    }
}
