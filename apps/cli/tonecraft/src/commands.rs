//! Operations shared by the interactive loop and one-shot runs.

use crate::error::TonecraftError;

use tone_core::AdjustmentOrchestrator;
use tone_core::tones::{find_tone, tone_at};

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;

use log::{error, info};
use serde::Serialize;

/// Result of a non-interactive `--tone` run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AdjustmentReport {
    pub tone: String,
    pub original: String,
    pub adjusted: String,
}

/// Resolve a tone argument: a grid number (`"3"`) or an id, case-insensitive.
///
/// Unknown ids are passed through so the orchestrator reports them.
pub fn resolve_tone_argument(argument: &str) -> String {
    let argument = argument.trim();
    if let Ok(index) = argument.parse::<usize>() {
        if let Some(tone) = tone_at(index) {
            return tone.id.to_string();
        }
    }

    let id = argument.to_lowercase();
    find_tone(&id).map(|t| t.id.to_string()).unwrap_or(id)
}

/// Read `path` and make it the original text.
pub async fn import_file(
    orchestrator: &AdjustmentOrchestrator,
    path: &Path,
) -> Result<(), TonecraftError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        error!("Failed to read {}: {}", path.display(), e);
        TonecraftError::Io {
            message: format!("Could not read {}: {e}", path.display()),
            location: ErrorLocation::from(Location::caller()),
        }
    })?;

    orchestrator
        .import_text(&text)
        .await
        .map_err(|e| TonecraftError::core(e))?;

    info!("Loaded {} as original text", path.display());
    Ok(())
}

/// Adjust the current text once and report the outcome.
///
/// Unlike the interactive path, the selection is not persisted.
pub async fn adjust_once(
    orchestrator: &AdjustmentOrchestrator,
    tone_argument: &str,
) -> Result<AdjustmentReport, TonecraftError> {
    let tone = resolve_tone_argument(tone_argument);
    let original = orchestrator.snapshot().await.current;

    let adjusted = orchestrator
        .request_adjustment(&tone)
        .await
        .map_err(|e| TonecraftError::Core {
            message: e.user_message(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(AdjustmentReport {
        tone,
        original,
        adjusted,
    })
}
