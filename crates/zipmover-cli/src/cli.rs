//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zipmover")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a directory, verify the archive and unpack it elsewhere
    Move(MoveArgs),
    /// Generate shell completion scripts
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct MoveArgs {
    /// Directory to pack
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory to unpack into (created if missing)
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Archive file to use instead of a private temporary one
    #[arg(short = 'a', long, value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Leave the archive on disk after unpacking
    #[arg(short = 'k', long, requires = "archive")]
    pub keep_archive: bool,

    /// Compression level (0 = store, 1-9 = deflate)
    #[arg(short = 'l', long, default_value = "6", value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compression_level: u8,

    /// Follow symbolic links instead of skipping them
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Exclude pattern (can be repeated)
    #[arg(long = "exclude", short = 'x', value_name = "PATTERN")]
    pub exclude: Vec<String>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
