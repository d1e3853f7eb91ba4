//! Fans a run out into one task per part and collects the results.
//!
//! All parts are launched at once. The collector waits for every task, keeps
//! the first failure it sees and only hands the parts to the assembler when
//! none failed.
use crate::assembler::assemble;
use crate::config::Config;
use crate::error::{MultiGetError, PartError};
use crate::fetcher::{StatusPolicy, fetch_part};
use crate::observer::Reporter;
use crate::part::{PartReport, plan_parts};
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Result of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Reports of every part, in index order.
    pub parts: Vec<PartReport>,
    /// Where the resource was written. `None` when there was nothing to do.
    pub destination: Option<PathBuf>,
    pub bytes: u64,
}

/// Runs downloads against a shared client.
pub struct MultiGet {
    client: reqwest::Client,
    work_dir: PathBuf,
    reporter: Reporter,
    policy: StatusPolicy,
}

impl MultiGet {
    /// Works in the current directory without drawing progress bars.
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            work_dir: PathBuf::from("."),
            reporter: Reporter::hidden(),
            policy: StatusPolicy::default(),
        }
    }

    /// Directory holding the temporary parts and the destination file.
    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn status_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Downloads every part of `config` and assembles them.
    ///
    /// # Errors
    ///
    /// Returns the first part failure in completion order, after every other
    /// part has finished. The assembler does not run in that case and the
    /// destination is left as it was.
    pub async fn run(&self, config: &Config) -> Result<RunReport, MultiGetError> {
        if config.count == 0 {
            debug!("no parts requested, nothing to do");
            return Ok(RunReport::default());
        }

        let handles = plan_parts(config.count).into_iter().map(|part| {
            debug!("Downloading part {}", part.index);
            let handle = tokio::spawn(fetch_part(
                self.client.clone(),
                config.url.clone(),
                part,
                self.work_dir.clone(),
                self.reporter.part(&part),
                self.policy,
            ));
            (part.index, handle)
        });

        let mut reports = collect_parts(handles).await?;
        reports.sort_by_key(|r| r.index);

        let bytes = assemble(&self.work_dir, config.count, &config.destination).await?;
        let destination = self.work_dir.join(&config.destination);
        info!(
            "Saved {} bytes from {} parts to {}",
            bytes,
            reports.len(),
            destination.display()
        );

        Ok(RunReport {
            parts: reports,
            destination: Some(destination),
            bytes,
        })
    }
}

/// Awaits every part task and keeps the first failure in completion order.
///
/// Every task is awaited even after a failure, so no part is still writing
/// its temporary file when this returns.
async fn collect_parts(
    handles: impl IntoIterator<Item = (u32, JoinHandle<Result<PartReport, PartError>>)>,
) -> Result<Vec<PartReport>, MultiGetError> {
    let mut tasks: FuturesUnordered<_> = handles
        .into_iter()
        .map(|(index, handle)| async move { (index, handle.await) })
        .collect();

    let mut reports = Vec::with_capacity(tasks.len());
    let mut first_failure: Option<MultiGetError> = None;

    while let Some((index, joined)) = tasks.next().await {
        let outcome = match joined {
            Ok(result) => result.map_err(MultiGetError::from),
            Err(source) => Err(MultiGetError::Task { index, source }),
        };

        match outcome {
            Ok(report) => reports.push(report),
            Err(e) if first_failure.is_none() => {
                error!("{}", e);
                first_failure = Some(e);
            }
            Err(e) => warn!("additional failure: {}", e),
        }
    }

    match first_failure {
        Some(e) => Err(e),
        None => Ok(reports),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn report(index: u32) -> PartReport {
        PartReport {
            index,
            status: StatusCode::PARTIAL_CONTENT,
            bytes: 1,
            path: PathBuf::from(format!("part-{}", index)),
        }
    }

    #[tokio::test]
    async fn test_collect_returns_all_reports() {
        let handles = (0..3u32).map(|i| {
            (i, tokio::spawn(async move { Ok::<_, PartError>(report(i)) }))
        });

        let mut reports = collect_parts(handles).await.unwrap();
        reports.sort_by_key(|r| r.index);
        assert_eq!(reports, vec![report(0), report(1), report(2)]);
    }

    #[tokio::test]
    async fn test_panicked_part_names_its_index() {
        let handles = (0..3u32).map(|i| {
            let handle = tokio::spawn(async move {
                if i == 1 {
                    panic!("part task blew up");
                }
                Ok::<_, PartError>(report(i))
            });
            (i, handle)
        });

        let err = collect_parts(handles).await.unwrap_err();
        assert!(err.to_string().starts_with("part 1:"), "{}", err);

        match err {
            MultiGetError::Task { index, source } => {
                assert_eq!(index, 1);
                assert!(source.is_panic());
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }
}
