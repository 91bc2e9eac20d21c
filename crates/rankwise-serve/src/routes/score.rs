//! Score field normalization endpoint.

use axum::Json;
use rankwise_core::{ScoreField, ScoreValue};
use serde::{Deserialize, Serialize};

/// Request body for a score field keystroke.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeRequest {
    /// Full text of the field after the keystroke.
    pub raw: String,
    /// Field value before the keystroke.
    #[serde(default)]
    pub previous: Option<ScoreValue>,
}

/// Field state after the keystroke.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeResponse {
    /// One of "empty", "partial", "final", "rejected".
    pub state: &'static str,
    pub value: Option<ScoreValue>,
    pub display: String,
}

/// `POST /api/v1/score/normalize`
///
/// Applies one keystroke to a score field. Rejected keystrokes leave the
/// previous value in place.
pub async fn normalize(Json(request): Json<NormalizeRequest>) -> Json<NormalizeResponse> {
    let mut field = ScoreField::new(request.previous);
    let input = field.apply(&request.raw);

    Json(NormalizeResponse {
        state: input.kind(),
        display: field.display(),
        value: field.into_value(),
    })
}
