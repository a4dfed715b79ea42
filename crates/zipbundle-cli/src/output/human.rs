//! Human-readable output formatter with colors and styling.

use super::formatter::HeadersView;
use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use zipbundle_core::BuildReport;

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

    fn format_number(n: usize) -> String {
        let digits = n.to_string();
        let mut result = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_build_result(&self, output_path: &Path, report: &BuildReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            self.line(&format!(
                "{} Archive created: {}",
                style("✓").green().bold(),
                output_path.display()
            ));
        } else {
            self.line(&format!("Archive created: {}", output_path.display()));
        }

        self.line("");
        self.line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        self.line(&format!(
            "  Directories:      {}",
            Self::format_number(report.directories_added)
        ));
        self.line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_read)
        ));
        self.line(&format!(
            "  Archive size:     {}",
            Self::format_size(report.archive_size)
        ));

        if self.verbose {
            self.line(&format!(
                "  Ratio:            {:.2}",
                report.compression_ratio()
            ));
            self.line(&format!("  Prefix stripped:  {}", report.prefix_stripped));
            if report.entries_skipped > 0 {
                self.line(&format!("  Entries skipped:  {}", report.entries_skipped));
            }
            self.line(&format!("  Duration:         {:?}", report.duration));
        }

        Ok(())
    }

    fn format_headers(&self, view: &HeadersView) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for (name, value) in &view.headers {
            if self.use_colors {
                self.line(&format!("{}: {value}", style(name).bold()));
            } else {
                self.line(&format!("{name}: {value}"));
            }
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_success(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            self.line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            self.line(message);
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(HumanFormatter::format_size(0), "0 B");
        assert_eq!(HumanFormatter::format_size(1023), "1023 B");
        assert_eq!(HumanFormatter::format_size(1536), "1.5 KB");
        assert_eq!(HumanFormatter::format_size(2 * 1024 * 1024), "2.0 MB");
        assert_eq!(HumanFormatter::format_size(1024 * 1024 * 1024), "1.0 GB");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(999), "999");
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(123_456), "123,456");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }
}
