//! Command-line arguments for diffnote.
//!
//! Every flag is optional. Flags override the matching key in
//! `config.toml`, which in turn overrides the built-in default.

use std::path::PathBuf;

use clap::Parser;

/// Review a diff in the terminal and export line comments as JSON.
///
/// By default the diff is the working tree (with staged changes) against
/// HEAD of the repository containing the current directory. Comments are
/// written to `feedback.json` when the session ends.
#[derive(Parser, Debug, Default)]
#[command(name = "diffnote")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read the diff from a file instead of the repository (`-` for stdin).
    #[arg(long, value_name = "PATH")]
    pub diff_file: Option<PathBuf>,

    /// Where to write the feedback JSON (`-` for stdout).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Color theme: `dark` or `catppuccin-mocha`.
    #[arg(long)]
    pub theme: Option<String>,

    /// Rows moved by PageUp / PageDown (defaults to the diff panel height).
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub page_size: Option<u16>,

    /// Abort when a hunk does not match its header instead of skipping it.
    #[arg(long)]
    pub strict: bool,

    /// Write diagnostics to this file (filter with `DIFFNOTE_LOG`).
    #[arg(long, value_name = "PATH", env = "DIFFNOTE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Command string recorded as `diff_command` in the feedback.
    #[arg(long, value_name = "CMD")]
    pub diff_command: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "diffnote",
            "--diff-file",
            "-",
            "-o",
            "out/review.json",
            "--page-size",
            "15",
            "--strict",
        ])
        .unwrap();
        assert_eq!(cli.diff_file, Some(PathBuf::from("-")));
        assert_eq!(cli.output, Some(PathBuf::from("out/review.json")));
        assert_eq!(cli.page_size, Some(15));
        assert!(cli.strict);
        assert!(cli.theme.is_none());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(Cli::try_parse_from(["diffnote", "--page-size", "0"]).is_err());
    }
}
