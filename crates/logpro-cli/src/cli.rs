//! CLI argument definitions

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "logpro")]
#[command(version, about = "Project-local development logs with per-process isolation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write one log entry
    Write(WriteArgs),

    /// Delete logs (keeps persistent entries unless --all)
    Clear {
        /// Also delete persistent entries
        #[arg(long)]
        all: bool,
    },

    /// Remove ephemeral directories left by dead processes
    Reclaim,

    /// Show the log directories for this process
    Layout,
}

#[derive(Args)]
pub struct WriteArgs {
    /// Content to write
    pub content: String,

    /// Target file name (".txt" is added when it has no extension)
    #[arg(short, long, default_value = logpro_core::DEFAULT_FILENAME)]
    pub file: String,

    /// Keep the entry across runs
    #[arg(short, long)]
    pub persistent: bool,

    /// Prefix the entry with a timestamp line
    #[arg(short, long)]
    pub timestamp: bool,

    /// Blank lines after the entry
    #[arg(short, long, default_value_t = logpro_core::DEFAULT_BLANK_LINES)]
    pub lines: usize,

    /// Subfolder under the ephemeral directory (ignored with --persistent)
    #[arg(long)]
    pub folder: Option<String>,

    /// Append when the file was already written this run instead of truncating
    #[arg(long)]
    pub no_force: bool,

    /// Parse the content as JSON and write it pretty-printed
    #[arg(long)]
    pub parse_json: bool,

    /// Keep running for this many seconds after writing; a termination
    /// signal still migrates the logs
    #[arg(long, value_name = "SECONDS")]
    pub hold: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_write_defaults() {
        let cli = Cli::parse_from(["logpro", "write", "hello"]);
        match cli.command {
            Commands::Write(args) => {
                assert_eq!(args.content, "hello");
                assert_eq!(args.file, "default.txt");
                assert_eq!(args.lines, 1);
                assert!(!args.persistent);
                assert!(args.folder.is_none());
                assert!(!args.no_force);
                assert!(args.hold.is_none());
            }
            _ => panic!("expected write"),
        }
    }

    #[test]
    fn test_write_no_force_and_hold() {
        let cli = Cli::parse_from(["logpro", "write", "x", "--no-force", "--hold", "30"]);
        match cli.command {
            Commands::Write(args) => {
                assert!(args.no_force);
                assert_eq!(args.hold, Some(30));
            }
            _ => panic!("expected write"),
        }
    }

    #[test]
    fn test_clear_all_flag() {
        let cli = Cli::parse_from(["logpro", "clear", "--all"]);
        assert!(matches!(cli.command, Commands::Clear { all: true }));
    }
}
