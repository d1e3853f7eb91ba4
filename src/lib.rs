//! # multi-get
//!
//! `multi-get` downloads a file over HTTP by splitting it into fixed 1 MiB
//! byte ranges, fetching every range concurrently into its own temporary
//! file, and joining the parts in index order into the destination file.
//!
//! - Range requests with one task per part, no concurrency cap
//! - First-failure reporting after every part has finished
//! - Ordered assembly and cleanup of temporary files on success only
//!
//! ## Example Usage
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use multi_get::{Config, MultiGet, utils};
//!
//! let config = Config::new("http://example.com/big.iso", 4, "big.iso")?;
//! let client = utils::build_client(utils::DEFAULT_USER_AGENT, None)?;
//! let report = MultiGet::new(client).run(&config).await?;
//! println!("{} bytes", report.bytes);
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod assembler;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod observer;
pub mod part;
pub mod utils;

pub use args::Args;
pub use config::{Config, Settings};
pub use coordinator::{MultiGet, RunReport};
pub use error::{AssemblyError, ConfigError, MultiGetError, PartError};
pub use fetcher::{StatusPolicy, fetch_part};
pub use part::{PART_SIZE, Part, PartReport};
