//! Stitches downloaded parts into the destination file.
//!
//! Parts are copied strictly by index, never by the order they finished in.
//! Temporary files are only removed once the destination is fully written;
//! after a failure they stay on disk for inspection.
use crate::error::AssemblyError;
use crate::part::temp_path;
use std::path::{Component, Path};
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tracing::{debug, info};

/// Concatenates parts `0..count` from `work_dir` into `work_dir/destination`.
///
/// Every part file is opened before the destination is created, so a missing
/// part leaves an existing destination untouched. Returns the bytes written.
pub async fn assemble(work_dir: &Path, count: u32, destination: &str) -> Result<u64, AssemblyError> {
    let dest_path = work_dir.join(destination);
    if let Some(index) = (0..count).find(|&i| same_path(&dest_path, &temp_path(work_dir, i))) {
        return Err(AssemblyError::DestinationIsPart {
            index,
            path: dest_path,
        });
    }

    let mut parts = Vec::with_capacity(count as usize);
    for index in 0..count {
        let path = temp_path(work_dir, index);
        let file = File::open(&path)
            .await
            .map_err(|source| AssemblyError::MissingPart {
                index,
                path: path.clone(),
                source,
            })?;
        parts.push((path, file));
    }

    let dest_err = |source| AssemblyError::Destination {
        path: dest_path.clone(),
        source,
    };

    info!("All parts are complete, saving to {}", dest_path.display());

    let mut writer = BufWriter::new(File::create(&dest_path).await.map_err(dest_err)?);
    let mut total = 0u64;

    let mut buf = vec![0u8; COPY_BUF_SIZE];
    for (index, (path, file)) in (0u32..).zip(parts.iter_mut()) {
        let mut copied = 0u64;
        loop {
            let n = file
                .read(&mut buf)
                .await
                .map_err(|source| AssemblyError::ReadPart {
                    index,
                    path: path.clone(),
                    source,
                })?;
            if n == 0 {
                break;
            }
            writer.write_all(&buf[..n]).await.map_err(dest_err)?;
            copied += n as u64;
        }
        debug!(path = %path.display(), copied, "appended part");
        total += copied;
    }

    writer.flush().await.map_err(dest_err)?;
    drop(parts);

    for index in 0..count {
        let path = temp_path(work_dir, index);
        fs::remove_file(&path)
            .await
            .map_err(|source| AssemblyError::Cleanup { path, source })?;
    }

    info!("Complete, removed {} temporary files", count);
    Ok(total)
}

const COPY_BUF_SIZE: usize = 64 * 1024;

/// Lexical comparison that ignores `.` components.
fn same_path(a: &Path, b: &Path) -> bool {
    fn significant(p: &Path) -> Vec<Component<'_>> {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect::<Vec<_>>()
    }
    significant(a) == significant(b)
}
