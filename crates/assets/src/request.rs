use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::diagnostics::log_directory_listing;
use crate::import::import_model;
use crate::model::ModelData;
use crate::AssetError;

/// Result of a model request, delivered exactly once.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(ModelData),
    Failed(AssetError),
}

impl From<Result<ModelData, AssetError>> for LoadOutcome {
    fn from(result: Result<ModelData, AssetError>) -> Self {
        match result {
            Ok(model) => LoadOutcome::Loaded(model),
            Err(e) => LoadOutcome::Failed(e),
        }
    }
}

type Importer = fn(&Path) -> Result<ModelData, AssetError>;

/// A one-shot request for a single model file.
///
/// No retry and no fallback asset. An optional timeout turns a hung import
/// into [`AssetError::TimedOut`]; the import thread itself is abandoned.
#[derive(Debug, Clone)]
pub struct AssetRequest {
    path: PathBuf,
    timeout: Option<Duration>,
    importer: Importer,
}

impl AssetRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timeout: None,
            importer: |path| import_model(path),
        }
    }

    #[cfg(test)]
    fn with_importer(mut self, importer: Importer) -> Self {
        self.importer = importer;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the request on the calling thread.
    pub fn load_blocking(&self) -> LoadOutcome {
        let outcome = match self.timeout {
            None => LoadOutcome::from((self.importer)(&self.path)),
            Some(timeout) => self.import_with_timeout(timeout),
        };
        if let LoadOutcome::Failed(e) = &outcome {
            tracing::debug!(path = %self.path.display(), "model request failed: {e}");
            log_directory_listing(&self.path);
        }
        outcome
    }

    /// Run the request on a worker thread and hand the outcome to
    /// `on_complete`, which is called exactly once.
    pub fn spawn<F>(self, on_complete: F) -> Result<JoinHandle<()>, AssetError>
    where
        F: FnOnce(LoadOutcome) + Send + 'static,
    {
        tracing::info!(path = %self.path.display(), "requesting model");
        let handle = thread::Builder::new()
            .name("asset-loader".into())
            .spawn(move || on_complete(self.load_blocking()))?;
        Ok(handle)
    }

    fn import_with_timeout(&self, timeout: Duration) -> LoadOutcome {
        let (tx, rx) = mpsc::channel();
        let path = self.path.clone();
        let importer = self.importer;
        let spawned = thread::Builder::new()
            .name("asset-import".into())
            .spawn(move || {
                // The receiver is gone once the request timed out.
                let _ = tx.send(importer(&path));
            });
        if let Err(e) = spawned {
            return LoadOutcome::Failed(AssetError::Io(e));
        }

        match rx.recv_timeout(timeout) {
            Ok(result) => result.into(),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                LoadOutcome::Failed(AssetError::TimedOut(timeout))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                LoadOutcome::Failed(AssetError::WorkerLost)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::sync::{Arc, Mutex};

    fn spawn_and_collect(request: AssetRequest) -> Vec<LoadOutcome> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handle = request
            .spawn(move |outcome| sink.lock().unwrap().push(outcome))
            .unwrap();
        handle.join().unwrap();
        Arc::try_unwrap(seen).unwrap().into_inner().unwrap()
    }

    #[test]
    fn successful_request_completes_once_with_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write(&dir, "lily.gltf", &fixtures::two_node_gltf());

        let outcomes = spawn_and_collect(AssetRequest::new(path));
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], LoadOutcome::Loaded(_)));
    }

    #[test]
    fn missing_asset_completes_once_with_failure() {
        let dir = tempfile::tempdir().unwrap();
        let outcomes = spawn_and_collect(AssetRequest::new(dir.path().join("lily.glb")));
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], LoadOutcome::Failed(_)));
    }

    #[test]
    fn generous_timeout_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write(&dir, "lily.gltf", &fixtures::two_node_gltf());

        let request = AssetRequest::new(path).with_timeout(Some(Duration::from_secs(30)));
        match request.load_blocking() {
            LoadOutcome::Loaded(model) => assert_eq!(model.primitives.len(), 2),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    /// Never returns; stands in for an import stuck on a stalled read.
    fn hang(_: &Path) -> Result<ModelData, AssetError> {
        loop {
            thread::park();
        }
    }

    #[test]
    fn hung_import_times_out() {
        let timeout = Duration::from_millis(50);
        let outcome = AssetRequest::new("lily.glb")
            .with_importer(hang)
            .with_timeout(Some(timeout))
            .load_blocking();
        match outcome {
            LoadOutcome::Failed(AssetError::TimedOut(d)) => assert_eq!(d, timeout),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn hung_import_still_completes_exactly_once() {
        let request = AssetRequest::new("lily.glb")
            .with_importer(hang)
            .with_timeout(Some(Duration::from_millis(50)));

        let outcomes = spawn_and_collect(request);
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(
            outcomes[0],
            LoadOutcome::Failed(AssetError::TimedOut(_))
        ));
    }

    #[test]
    fn importer_runs_without_timeout_on_the_calling_thread() {
        fn stub(_: &Path) -> Result<ModelData, AssetError> {
            Ok(ModelData::default())
        }
        let outcome = AssetRequest::new("lily.glb").with_importer(stub).load_blocking();
        assert!(matches!(outcome, LoadOutcome::Loaded(_)));
    }
}
