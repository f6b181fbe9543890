use std::path::PathBuf;
use std::sync::Arc;

use ferrite_classify::Classifier;

/// Everything a request handler needs. Built once in `main` and never
/// mutated afterwards.
#[derive(Debug)]
pub struct AppState {
    /// `None` when the model failed to load at startup; every prediction
    /// then answers 500.
    pub classifier: Option<Classifier>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

/// Handle to the state cloned into every handler thread.
pub type SharedState = Arc<AppState>;
