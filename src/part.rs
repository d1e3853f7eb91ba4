//! Byte-range parts and their temporary files.
//!
//! Every part covers a fixed 1 MiB window of the remote resource. The window
//! and the temporary file name are pure functions of the part index, so a
//! given index always maps to the same range and the same file within a run.
use reqwest::StatusCode;
use std::path::{Path, PathBuf};

/// Size of every part in bytes (1 MiB).
pub const PART_SIZE: u64 = 1024 * 1024;

/// Prefix shared by all temporary part files.
pub const TEMP_PREFIX: &str = ".tmp.multi-get.part.";

/// Represents one byte range of the remote resource.
///
/// The range is inclusive, meaning `start` and `end` are both part of the part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part {
    /// Index of the part (0-based).
    pub index: u32,
    /// The first byte requested.
    pub start: u64,
    /// The last byte requested.
    pub end: u64,
}

impl Part {
    pub fn new(index: u32) -> Self {
        let start = u64::from(index) * PART_SIZE;
        Self {
            index,
            start,
            end: start + PART_SIZE - 1,
        }
    }

    /// Value for the `Range` request header, e.g. `bytes=0-1048575`.
    pub fn range_header(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }

    pub fn temp_path(&self, work_dir: &Path) -> PathBuf {
        temp_path(work_dir, self.index)
    }
}

/// Name of the temporary file holding part `index`.
pub fn temp_file_name(index: u32) -> String {
    format!("{}{}", TEMP_PREFIX, index)
}

pub fn temp_path(work_dir: &Path, index: u32) -> PathBuf {
    work_dir.join(temp_file_name(index))
}

/// Builds the dense list of parts `0..count`.
pub fn plan_parts(count: u32) -> Vec<Part> {
    (0..count).map(Part::new).collect()
}

/// What a successfully fetched part reports back to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartReport {
    pub index: u32,
    /// Status code the server answered with. Logged, only enforced in strict mode.
    pub status: StatusCode,
    /// Number of body bytes written to the temporary file.
    pub bytes: u64,
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_parts_ranges() {
        assert_eq!(Part::new(0).range_header(), "bytes=0-1048575");
        assert_eq!(Part::new(1).range_header(), "bytes=1048576-2097151");
        assert_eq!(Part::new(3).range_header(), "bytes=3145728-4194303");
    }

    #[test]
    fn test_every_part_is_one_mebibyte() {
        for part in plan_parts(8) {
            assert_eq!(part.end - part.start + 1, PART_SIZE);
        }
    }

    #[test]
    fn test_parts_are_dense_and_contiguous() {
        let parts = plan_parts(5);
        assert_eq!(parts.len(), 5);

        for (i, pair) in parts.windows(2).enumerate() {
            assert_eq!(pair[0].index, i as u32);
            assert_eq!(pair[1].start, pair[0].end + 1);
        }

        assert!(plan_parts(0).is_empty());
    }

    #[test]
    fn test_large_index_does_not_overflow() {
        let part = Part::new(u32::MAX);
        assert_eq!(part.start, u64::from(u32::MAX) * PART_SIZE);
    }

    #[test]
    fn test_temp_paths_are_deterministic_and_distinct() {
        let dir = Path::new("work");
        assert_eq!(temp_file_name(2), ".tmp.multi-get.part.2");
        assert_eq!(Part::new(2).temp_path(dir), dir.join(".tmp.multi-get.part.2"));
        assert_eq!(temp_path(dir, 7), temp_path(dir, 7));
        assert_ne!(temp_path(dir, 1), temp_path(dir, 11));
    }
}
