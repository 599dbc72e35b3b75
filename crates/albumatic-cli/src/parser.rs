//! CLI parser and argument handling.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

/// Command-line interface for the album sync tool.
///
/// Every flag has an environment fallback so the tool can run unattended
/// (containers, timers) with configuration from the environment or a `.env`
/// file.
#[derive(Debug, Parser)]
#[command(name = "albumatic")]
#[command(about = "Create and update Immich albums from marker files in a photo library")]
#[command(version)]
pub struct Cli {
    /// Root of the photo library to scan for album markers
    #[arg(long, env = "LIBRARY_ROOT")]
    pub library_root: PathBuf,

    /// Immich API URL (should typically end with '/api')
    #[arg(long, env = "IMMICH_API_URL")]
    pub api_url: String,

    /// Immich API key
    #[arg(long, env = "IMMICH_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Regex to compute the album name from the directory name; capture
    /// group 1 wins, otherwise the whole match (default: use the directory
    /// name as-is)
    #[arg(short = 'r', long, env = "ALBUM_NAME_REGEX")]
    pub album_regex: Option<String>,

    /// Max number of assets to add per API call. Large single calls have
    /// been seen to fail server-side; lower this if adds fail.
    #[arg(short = 's', long, env = "API_CHUNK_SIZE")]
    pub chunk_size: Option<NonZeroUsize>,

    /// Marker filename whose presence makes a directory an album
    #[arg(long, env = "ALBUM_MARKER_NAME", default_value = ".album")]
    pub marker_name: String,

    /// Don't create albums or add assets, just report what would happen
    /// (useful to test your regex)
    #[arg(short = 'n', long, env = "DRY_RUN")]
    pub dry_run: bool,

    /// Delete ALL existing Immich albums before syncing (runs even with
    /// --dry-run)
    #[arg(short = 'X', long, env = "DELETE_ALL_ALBUMS")]
    pub delete_all_albums: bool,

    /// Re-run every N seconds instead of exiting after one sync
    #[arg(long, value_name = "SECONDS", env = "SYNC_INTERVAL")]
    pub interval: Option<u64>,

    /// Increase verbosity (up to -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
