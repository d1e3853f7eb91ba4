use crate::error::PartError;
use crate::observer::ProgressObserver;
use crate::part::{Part, PartReport};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderName, RANGE};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, warn};
use url::Url;

/// Diagnostic header carrying the part index.
pub const PART_HEADER: HeaderName = HeaderName::from_static("x-part");

/// How the status code of a range response is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Any response counts; anything but 206 is only logged.
    #[default]
    Lenient,
    /// Only `206 Partial Content` counts as a fetched part.
    Strict,
}

/// Downloads one part into its temporary file with buffered writing.
///
/// The file is created (or truncated) once a response has arrived, so a part
/// that never got an answer leaves nothing behind.
pub async fn fetch_part(
    client: reqwest::Client,
    url: Url,
    part: Part,
    work_dir: PathBuf,
    observer: Arc<dyn ProgressObserver>,
    policy: StatusPolicy,
) -> Result<PartReport, PartError> {
    let index = part.index;
    let path = part.temp_path(&work_dir);

    let result: Result<PartReport, PartError> = async {
        let range = part.range_header();
        debug!(index, %range, "requesting part");
        observer.message(format!("Part {} requesting", index));

        let mut response = client
            .get(url)
            .header(RANGE, range)
            .header(PART_HEADER, index.to_string())
            .header(ACCEPT_LANGUAGE, "en-GB,en-US,en")
            .send()
            .await
            .map_err(|source| PartError::NoResponse { index, source })?;

        let status = response.status();
        if status != StatusCode::PARTIAL_CONTENT {
            match policy {
                StatusPolicy::Strict => return Err(PartError::UnexpectedStatus { index, status }),
                StatusPolicy::Lenient => {
                    warn!(index, %status, "server did not answer with a partial range")
                }
            }
        }

        let temp_err = |source| PartError::TempFile {
            index,
            path: path.clone(),
            source,
        };

        let file = File::create(&path).await.map_err(temp_err)?;
        observer.message(format!("Part {} writing ({})", index, status.as_u16()));
        let mut writer = BufWriter::new(file);
        let mut bytes = 0u64;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|source| PartError::Transport {
                index,
                status,
                source,
            })?
        {
            writer.write_all(&chunk).await.map_err(temp_err)?;
            bytes += chunk.len() as u64;
            observer.inc(chunk.len() as u64);
        }

        // Everything must be on disk before the part is reported done
        writer.flush().await.map_err(temp_err)?;

        Ok(PartReport {
            index,
            status,
            bytes,
            path: path.clone(),
        })
    }
    .await;

    match &result {
        Ok(report) => {
            info!(
                "Part {} complete.  Response code: {}",
                index,
                report.status.as_u16()
            );
            observer.finish(format!("Part {} done ({})", index, report.status.as_u16()));
        }
        Err(e) => observer.finish(format!("Part {} failed: {}", index, e)),
    }

    result
}
