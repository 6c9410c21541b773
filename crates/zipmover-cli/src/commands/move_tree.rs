//! Move command implementation.

use crate::cli::MoveArgs;
use crate::error::add_archive_context;
use crate::error::convert_mover_error;
use crate::output::MoveSummary;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use std::fs;
use std::path::Path;
use zipmover_core::ArchiveMover;
use zipmover_core::MoverConfig;

pub fn execute(args: &MoveArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = MoverConfig {
        compression_level: args.compression_level,
        follow_symlinks: args.follow_symlinks,
        exclude_patterns: args.exclude.clone(),
    };

    let mover = match &args.archive {
        Some(path) => add_archive_context(ArchiveMover::at(path), path)?,
        None => ArchiveMover::new().map_err(|e| convert_mover_error(e, Path::new("")))?,
    };
    let mut mover = mover.with_config(config);
    let archive = mover.archive_path().to_path_buf();

    let pack = add_archive_context(mover.pack(&args.source), &archive)?;

    let unpacked = ensure_dir(&args.dest)
        .and_then(|()| add_archive_context(mover.unpack(&args.dest), &archive));
    let unpack = match unpacked {
        Ok(report) => report,
        Err(err) => {
            if !args.keep_archive
                && let Err(cleanup) = mover.dispose()
            {
                formatter.format_warning(&cleanup.to_string());
            }
            return Err(err);
        }
    };

    let kept_archive = if args.keep_archive {
        Some(archive.clone())
    } else {
        add_archive_context(mover.dispose(), &archive)?;
        None
    };

    formatter.format_move_result(&MoveSummary {
        source: args.source.clone(),
        dest: args.dest.clone(),
        kept_archive,
        pack,
        unpack,
    })
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    Ok(())
}
