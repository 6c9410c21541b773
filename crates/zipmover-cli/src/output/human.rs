//! Human-readable output formatter with colors and styling.

use super::formatter::MoveSummary;
use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_move_result(&self, summary: &MoveSummary) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let headline = format!(
            "Moved {} -> {}",
            summary.source.display(),
            summary.dest.display()
        );
        if self.use_colors {
            self.line(&format!("{} {headline}", style("✓").green().bold()));
        } else {
            self.line(&headline);
        }

        let pack = &summary.pack;
        let unpack = &summary.unpack;
        self.line(&format!("  Files packed:     {}", pack.files_added));
        self.line(&format!("  Files extracted:  {}", unpack.files_extracted));
        self.line(&format!(
            "  Total size:       {}",
            Self::format_size(pack.bytes_written)
        ));
        self.line(&format!(
            "  Archive size:     {}",
            Self::format_size(pack.archive_size)
        ));
        if let Some(hash) = &pack.hash {
            self.line(&format!("  SHA-256:          {hash}"));
        }
        if let Some(archive) = &summary.kept_archive {
            self.line(&format!("  Archive kept:     {}", archive.display()));
        }

        if pack.files_skipped > 0 {
            self.line(&format!("  Files skipped:    {}", pack.files_skipped));
        }

        if self.verbose {
            self.line(&format!(
                "  Directories:      {}",
                unpack.directories_created
            ));
            self.line(&format!("  Pack time:        {:?}", pack.duration));
            self.line(&format!("  Unpack time:      {:?}", unpack.duration));
        }

        if pack.has_warnings() {
            self.line("");
            if self.use_colors {
                self.line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                self.line("Warnings:");
            }
            for warning in &pack.warnings {
                self.line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            self.line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            self.line(&format!("WARNING: {message}"));
        }
    }
}
