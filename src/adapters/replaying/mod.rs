//! Replaying adapters that serve recorded interactions.

pub mod analysis;
pub mod comparison;
pub mod files;

pub use analysis::ReplayingSourceAnalyzer;
pub use comparison::ReplayingRevisionComparison;
pub use files::ReplayingProjectFiles;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

/// Pulls the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics if the replayer lock is poisoned or the cassette has no matching
/// interaction left.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output.clone()
}

/// Decodes a recorded `Result` (mirror of `recording::record_result`).
///
/// Accepts `{"Ok": v}` / `{"Err": msg}` as written by the recorder, their
/// lowercase forms for hand-written cassettes, and a bare value as `Ok`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("Ok").or_else(|| output.get("ok")).unwrap_or(&output).clone();
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
