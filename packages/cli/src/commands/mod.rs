pub mod apply;
pub mod check;
pub mod inspect;
pub mod migrate;

pub use apply::{apply, ApplyArgs};
pub use check::{check, CheckArgs};
pub use inspect::{inspect, InspectArgs};
pub use migrate::{migrate, MigrateArgs};

use anyhow::{Context, Result};
use pagecraft_editor::{EditSession, EditorConfig, StoredSession};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse a session file without hydrating it
pub(crate) fn read_stored(path: &Path) -> Result<StoredSession> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let stored = StoredSession::from_json(&content)
        .with_context(|| format!("{} is not a session file", path.display()))?;

    debug!(path = %path.display(), legacy = stored.is_legacy(), "Read session file");
    Ok(stored)
}

pub(crate) fn load_session(path: &Path, config: &EditorConfig) -> Result<EditSession> {
    let stored = read_stored(path)?;
    let session = EditSession::from_stored(stored, config.clone())
        .with_context(|| format!("Cannot load {}", path.display()))?;
    Ok(session)
}

/// Write the exported session to `output`, or stdout
pub(crate) fn write_session(session: &EditSession, output: Option<&Path>) -> Result<()> {
    let json = session.export().to_json()?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Cannot write {}", path.display()))?;
        }
        None => println!("{}", json),
    }
    Ok(())
}
