//! Atomic checkpoint I/O (§4.8): `bincode`-encode to a temp file in the
//! same directory, then rename over the destination, so a crash never
//! leaves a torn checkpoint behind.

use std::fs;
use std::path::Path;

use sim_types::CheckpointError;

use crate::state::{SimulationState, SCHEMA_VERSION};

/// Serialize `state` and write it atomically to `path`.
pub fn save(state: &SimulationState, path: &Path) -> Result<(), CheckpointError> {
    let bytes = bincode::serialize(state).map_err(|e| CheckpointError::Decode(e.to_string()))?;

    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, &bytes).map_err(|source| CheckpointError::Io {
        path: tmp_path.display().to_string(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| CheckpointError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

/// Load and validate a checkpoint from `path`. Refuses a schema mismatch
/// rather than attempting to interpret bytes from an incompatible layout.
pub fn load(path: &Path) -> Result<SimulationState, CheckpointError> {
    let bytes = fs::read(path).map_err(|source| CheckpointError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let state: SimulationState =
        bincode::deserialize(&bytes).map_err(|e| CheckpointError::Decode(e.to_string()))?;
    if state.schema_version != SCHEMA_VERSION {
        return Err(CheckpointError::SchemaMismatch {
            found: state.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(state)
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
