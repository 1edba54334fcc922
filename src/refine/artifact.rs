//! Refiner artifact files (JSON).
//!
//! Artifacts are produced by external training tooling. Two kinds are read:
//!
//! ```json
//! { "kind": "linear", "intercept": 1.2, "coefficients": [0.3, 0.1, 0.6] }
//! { "kind": "forest", "trees": [ { "nodes": [ ... ] } ] }
//! ```
//!
//! Loading happens once per process. A missing or broken artifact never stops
//! the engine: `load_refiner` logs and returns `None`, and predictions use the
//! baseline.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{ForestRefiner, LinearRefiner, LinearSpec, RefineError, RegressionTree, Refiner};

/// Shared, read-only refiner handle.
pub type SharedRefiner = Arc<dyn Refiner>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelArtifact {
    Linear(LinearSpec),
    Forest { trees: Vec<RegressionTree> },
}

impl ModelArtifact {
    /// Validate and turn the artifact into a callable refiner.
    pub fn into_refiner(self) -> Result<SharedRefiner, RefineError> {
        match self {
            ModelArtifact::Linear(spec) => Ok(Arc::new(LinearRefiner::from_spec(&spec)?)),
            ModelArtifact::Forest { trees } => Ok(Arc::new(ForestRefiner::new(trees)?)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::Linear(_) => "linear",
            ModelArtifact::Forest { .. } => "forest",
        }
    }
}

/// Parse an artifact from a JSON string.
pub fn parse_artifact(json: &str) -> Result<SharedRefiner, RefineError> {
    let artifact: ModelArtifact = serde_json::from_str(json)?;
    artifact.into_refiner()
}

/// Read and validate an artifact file.
pub fn read_artifact(path: &Path) -> Result<SharedRefiner, RefineError> {
    let file = File::open(path).map_err(|source| RefineError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file))?;
    let kind = artifact.kind();
    let refiner = artifact.into_refiner()?;
    info!(path = %path.display(), kind, "loaded refiner artifact");
    Ok(refiner)
}

/// Load the refiner if one is configured and usable.
///
/// - no path configured, or the file does not exist: `None`
/// - the file exists but cannot be read/validated: `None` (logged at `warn`)
pub fn load_refiner(path: Option<&Path>) -> Option<SharedRefiner> {
    let path = path?;
    if !path.exists() {
        info!(path = %path.display(), "no refiner artifact found; using baseline only");
        return None;
    }

    match read_artifact(path) {
        Ok(refiner) => Some(refiner),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to load refiner; using baseline only");
            None
        }
    }
}
