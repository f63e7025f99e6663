//! Worker pool batch orchestration.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, info};

use vidtag_core::BatchOptions;
use vidtag_probe::MetadataProber;

use crate::{is_network_path, tag_file, BatchSummary, FileOutcome, TagEvent};

/// Resolve the worker count for a batch.
///
/// An explicit override always wins. Otherwise any input path on a
/// network mount forces a single worker (parallel reads over
/// high-latency mounts just contend), and local batches get the host's
/// logical core count.
pub fn effective_workers(paths: &[PathBuf], override_workers: Option<usize>) -> usize {
    if let Some(n) = override_workers {
        return n.max(1);
    }

    if paths.iter().any(|p| is_network_path(p)) {
        debug!("network mount detected, forcing single worker");
        return 1;
    }

    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Start a tagging batch and return the event stream.
///
/// A single producer enqueues every path and closes the queue; a fixed
/// pool of workers drains it, each handling one file end-to-end before
/// taking the next. The stream ends with [`TagEvent::BatchComplete`]
/// once every worker has exited; event order across workers is
/// unspecified. A batch of one file, or a pool of one, runs the
/// identical per-file logic on a single thread with no queue at all.
pub fn start_batch(
    prober: Arc<dyn MetadataProber>,
    paths: Vec<PathBuf>,
    options: BatchOptions,
) -> Receiver<TagEvent> {
    let (event_tx, event_rx) = unbounded();
    let workers = effective_workers(&paths, options.workers);
    let total = paths.len();
    let interval = options.progress_interval;

    info!(files = total, workers, "starting tagging batch");

    if workers == 1 || total <= 1 {
        thread::spawn(move || {
            let mut summary = BatchSummary::default();
            for (done, path) in paths.into_iter().enumerate() {
                process_one(0, prober.as_ref(), path, interval, &event_tx, &mut summary);
                let _ = event_tx.send(TagEvent::OverallProgress {
                    completed: done + 1,
                    total,
                });
            }
            let _ = event_tx.send(TagEvent::BatchComplete(summary));
        });
        return event_rx;
    }

    // Fill the queue completely, then close it by dropping the sender.
    let (job_tx, job_rx) = unbounded::<PathBuf>();
    for path in paths {
        let _ = job_tx.send(path);
    }
    drop(job_tx);

    // Workers report into an internal channel; nothing else is shared.
    let (raw_tx, raw_rx) = unbounded::<TagEvent>();
    let mut handles = Vec::with_capacity(workers);
    for worker in 0..workers {
        let job_rx = job_rx.clone();
        let raw_tx = raw_tx.clone();
        let prober = Arc::clone(&prober);
        handles.push(thread::spawn(move || {
            let mut summary = BatchSummary::default();
            for path in job_rx.iter() {
                process_one(worker, prober.as_ref(), path, interval, &raw_tx, &mut summary);
            }
            summary
        }));
    }
    drop(raw_tx);

    // Forwarder: relays worker events and interleaves the batch-wide
    // completion counter, then joins the pool and emits the summary.
    thread::spawn(move || {
        let mut completed = 0;
        for event in raw_rx.iter() {
            let finished_one = matches!(event, TagEvent::WorkerCompleted { .. });
            let _ = event_tx.send(event);
            if finished_one {
                completed += 1;
                let _ = event_tx.send(TagEvent::OverallProgress { completed, total });
            }
        }

        let mut summary = BatchSummary::default();
        for handle in handles {
            if let Ok(worker_summary) = handle.join() {
                summary.tagged += worker_summary.tagged;
                summary.skipped += worker_summary.skipped;
                summary.failed += worker_summary.failed;
            }
        }
        let _ = event_tx.send(TagEvent::BatchComplete(summary));
    });

    event_rx
}

/// Run one file through the per-file logic, emitting start, rate-limited
/// progress, and completion events, and recording the outcome.
fn process_one(
    worker: usize,
    prober: &dyn MetadataProber,
    path: PathBuf,
    interval: Duration,
    tx: &Sender<TagEvent>,
    summary: &mut BatchSummary,
) {
    let _ = tx.send(TagEvent::WorkerStarted {
        worker,
        path: path.clone(),
    });

    let mut last_emit: Option<Instant> = None;
    let outcome = tag_file(prober, &path, |ratio| {
        let now = Instant::now();
        if last_emit.is_none_or(|t| now.duration_since(t) >= interval) {
            last_emit = Some(now);
            let _ = tx.send(TagEvent::WorkerProgress {
                worker,
                path: path.clone(),
                ratio,
            });
        }
    });

    match &outcome {
        FileOutcome::Tagged { .. } => summary.tagged += 1,
        FileOutcome::Skipped(_) => summary.skipped += 1,
        FileOutcome::Failed(_) => summary.failed += 1,
    }

    let _ = tx.send(TagEvent::WorkerCompleted {
        worker,
        path,
        outcome,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use vidtag_core::SkipReason;
    use vidtag_probe::ProbeError;

    struct FixedProber;

    impl MetadataProber for FixedProber {
        fn resolution(&self, _path: &Path) -> Result<String, ProbeError> {
            Ok("1280x720".into())
        }

        fn duration_secs(&self, _path: &Path) -> Result<f64, ProbeError> {
            Ok(120.0)
        }
    }

    fn drain(rx: Receiver<TagEvent>) -> (Vec<TagEvent>, BatchSummary) {
        let mut events = Vec::new();
        let mut summary = None;
        for event in rx.iter() {
            if let TagEvent::BatchComplete(s) = &event {
                summary = Some(*s);
            }
            events.push(event);
        }
        (events, summary.expect("batch never completed"))
    }

    #[test]
    fn test_effective_workers_override_wins() {
        let network = vec![PathBuf::from("/mnt/nas/a.mp4")];
        assert_eq!(effective_workers(&network, Some(8)), 8);
        assert_eq!(effective_workers(&network, Some(0)), 1);
    }

    #[test]
    fn test_effective_workers_network_forces_one() {
        let paths = vec![
            PathBuf::from("/home/user/a.mp4"),
            PathBuf::from("/mnt/nas/b.mp4"),
        ];
        assert_eq!(effective_workers(&paths, None), 1);
    }

    #[test]
    fn test_effective_workers_local_uses_cores() {
        let paths = vec![PathBuf::from("/home/user/a.mp4")];
        let cores = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        assert_eq!(effective_workers(&paths, None), cores);
    }

    #[test]
    fn test_batch_tags_files_and_reports() {
        let temp = TempDir::new().unwrap();
        let mut paths = Vec::new();
        for (name, content) in [("a.mp4", "aaa"), ("b.mkv", "bbbb"), ("c.webm", "c")] {
            let path = temp.path().join(name);
            fs::write(&path, content).unwrap();
            paths.push(path);
        }
        // A skip and a failure mixed into the same batch.
        let text = temp.path().join("notes.txt");
        fs::write(&text, "x").unwrap();
        paths.push(text);
        paths.push(temp.path().join("missing.mp4"));

        let rx = start_batch(
            Arc::new(FixedProber),
            paths.clone(),
            BatchOptions::builder().workers(Some(3)).build().unwrap(),
        );
        let (events, summary) = drain(rx);

        assert_eq!(
            summary,
            BatchSummary {
                tagged: 3,
                skipped: 1,
                failed: 1
            }
        );

        // Per-file failures never abort the batch: every input gets a
        // completion event.
        let completions = events
            .iter()
            .filter(|e| matches!(e, TagEvent::WorkerCompleted { .. }))
            .count();
        assert_eq!(completions, paths.len());

        // Overall progress reaches the total exactly once at the end.
        let last_progress = events
            .iter()
            .filter_map(|e| match e {
                TagEvent::OverallProgress { completed, total } => Some((*completed, *total)),
                _ => None,
            })
            .next_back();
        assert_eq!(last_progress, Some((paths.len(), paths.len())));

        // Renames actually happened, hash matching file contents.
        let expected = temp
            .path()
            .join(format!("a_[1280x720][2min][{:08X}].mp4", crc32fast::hash(b"aaa")));
        assert!(expected.exists(), "missing {}", expected.display());
    }

    #[test]
    fn test_single_file_runs_without_pool() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("solo.mp4");
        fs::write(&path, "solo").unwrap();

        let rx = start_batch(
            Arc::new(FixedProber),
            vec![path],
            BatchOptions::default(),
        );
        let (events, summary) = drain(rx);

        assert_eq!(summary.tagged, 1);
        assert!(events
            .iter()
            .all(|e| !matches!(e, TagEvent::WorkerStarted { worker, .. } if *worker != 0)));
    }

    #[test]
    fn test_already_tagged_is_counted_as_skip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("done_[1280x720][2min][01020304].mp4");
        fs::write(&path, "x").unwrap();

        let rx = start_batch(
            Arc::new(FixedProber),
            vec![path.clone()],
            BatchOptions::default(),
        );
        let (events, summary) = drain(rx);

        assert_eq!(summary.skipped, 1);
        assert!(path.exists());
        assert!(events.iter().any(|e| matches!(
            e,
            TagEvent::WorkerCompleted {
                outcome: FileOutcome::Skipped(SkipReason::AlreadyTagged),
                ..
            }
        )));
    }
}
