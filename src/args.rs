use clap::{Parser, Subcommand};

/// Download a file in concurrent 1 MiB ranges.
///
/// Each part is fetched with its own range request into a temporary file,
/// then the parts are joined in order into the destination file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get multiple blocks of a file from the internet
    #[command(name = "multi-get")]
    MultiGet {
        /// Url of a file to download from.
        #[arg(short, long)]
        url: String,

        /// Number of 1 MiB blocks to download. Defaults to 4.
        #[arg(short, long, allow_negative_numbers = true)]
        count: Option<i64>,

        /// Destination filename. Defaults to "multi-get.dest".
        #[arg(short, long)]
        destination: Option<String>,

        /// Give up on a request after this many seconds.
        #[arg(long)]
        timeout: Option<u64>,

        /// Fail any part the server does not answer with 206 Partial Content.
        #[arg(long)]
        strict: bool,
    },
}
