//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together:
//! the reqwest-backed Immich client is built here and handed to the
//! reconciler behind its port trait. Nothing outside this module knows the
//! concrete client type.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use albumatic_core::{NamePattern, Reconciler, RunOptions};
use albumatic_immich::{DefaultImmichClient, ImmichClientConfig};

use crate::parser::Cli;

/// Fully composed application context for a run.
pub struct CliContext {
    /// The reconciliation engine, wired to the real Immich client.
    pub reconciler: Reconciler,
    /// Options derived from the command line, reused across interval runs.
    pub options: RunOptions,
    /// Library root to scan.
    pub library_root: PathBuf,
    /// Verbosity level for report rendering.
    pub verbose: u8,
}

impl std::fmt::Debug for CliContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliContext")
            .field("options", &self.options)
            .field("library_root", &self.library_root)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

/// Compose the application from parsed arguments.
pub fn bootstrap(cli: &Cli) -> Result<CliContext> {
    let pattern = cli
        .album_regex
        .as_deref()
        .map(NamePattern::new)
        .transpose()
        .context("invalid --album-regex pattern")?;

    let config = ImmichClientConfig::new(&cli.api_url, &cli.api_key);
    let client = DefaultImmichClient::new(&config).context("invalid --api-url")?;

    let options = RunOptions {
        dry_run: cli.dry_run,
        delete_all_first: cli.delete_all_albums,
        chunk_size: cli.chunk_size,
        pattern,
        marker_name: cli.marker_name.clone(),
    };

    Ok(CliContext {
        reconciler: Reconciler::new(Arc::new(client)),
        options,
        library_root: cli.library_root.clone(),
        verbose: cli.verbose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(extra: &[&str]) -> Cli {
        let mut args = vec![
            "albumatic",
            "--library-root",
            "/photos",
            "--api-url",
            "http://immich.local:2283/api",
            "--api-key",
            "secret",
        ];
        args.extend(extra);
        Cli::parse_from(args)
    }

    #[test]
    fn bootstrap_builds_context_from_args() {
        let ctx = bootstrap(&cli(&["-n", "--marker-name", ".myalbum"])).unwrap();
        assert!(ctx.options.dry_run);
        assert_eq!(ctx.options.marker_name, ".myalbum");
        assert_eq!(ctx.library_root, PathBuf::from("/photos"));
    }

    #[test]
    fn invalid_regex_is_rejected_at_bootstrap() {
        let err = bootstrap(&cli(&["-r", "([unclosed"])).unwrap_err();
        assert!(err.to_string().contains("album-regex"));
    }

    #[test]
    fn invalid_api_url_is_rejected_at_bootstrap() {
        let mut parsed = cli(&[]);
        parsed.api_url = "not a url".to_string();
        assert!(bootstrap(&parsed).is_err());
    }
}
