use axum::{body::Bytes, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gcode::{self, GCodeMetadata};

#[derive(Debug, Serialize, Deserialize)]
pub struct InspectResponse {
    #[serde(flatten)]
    pub metadata: GCodeMetadata,
    pub complete: bool,
    pub missing: Vec<String>,
}

/// Handle /v1/gcode/inspect endpoint
/// Body is the raw contents of a `.gcode` file
pub async fn inspect_gcode(body: Bytes) -> Json<InspectResponse> {
    let metadata = gcode::extract_bytes(&body);
    debug!("Inspected {} bytes of G-code: {:?}", body.len(), metadata);

    Json(InspectResponse {
        metadata,
        complete: metadata.is_complete(),
        missing: metadata.missing_fields().into_iter().map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inspect_complete_file() {
        let body = Bytes::from_static(b";Filament used: 5m\n;TIME_ELAPSED:1800\n");
        let Json(response) = inspect_gcode(body).await;

        assert!(response.complete);
        assert!(response.missing.is_empty());
        assert_eq!(response.metadata.hours, Some(0.5));
    }

    #[tokio::test]
    async fn test_inspect_empty_body() {
        let Json(response) = inspect_gcode(Bytes::new()).await;

        assert!(!response.complete);
        assert_eq!(response.missing, vec!["print time", "filament usage"]);
    }
}
