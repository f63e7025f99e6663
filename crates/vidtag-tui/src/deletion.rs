//! Background deletion task.

use std::fs;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::session::DeletionOutcome;

/// Start an async deletion of `paths`, in order.
///
/// Exactly one [`DeletionOutcome`] arrives on the returned channel.
/// Execution stops at the first failure: earlier paths stay deleted,
/// later paths are never attempted.
pub fn start_deletion(paths: Vec<PathBuf>) -> mpsc::Receiver<DeletionOutcome> {
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        let _ = tx.send(delete_impl(paths).await).await;
    });

    rx
}

async fn delete_impl(paths: Vec<PathBuf>) -> DeletionOutcome {
    for path in paths {
        let path_clone = path.clone();
        let result = tokio::task::spawn_blocking(move || fs::remove_file(&path_clone))
            .await
            .map_err(|e| format!("Task failed: {}", e));

        match result {
            Ok(Ok(())) => {
                debug!(path = %path.display(), "deleted");
            }
            Ok(Err(e)) => {
                warn!(path = %path.display(), error = %e, "deletion failed");
                return DeletionOutcome::Failed {
                    path,
                    error: e.to_string(),
                };
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "deletion failed");
                return DeletionOutcome::Failed { path, error: e };
            }
        }
    }

    DeletionOutcome::AllRemoved
}
