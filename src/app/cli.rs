use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Computes the next semantic version of a Python module from changes to its public API.", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,

    /// Suppress progress output, only printing results and errors.
    #[clap(short, long, global = true)]
    pub quiet: bool,

    /// Write structured logs to this file instead of stderr.
    #[clap(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the next version given the old version and both revisions.
    Bump {
        /// Version of the old revision, e.g. 1.4.2
        old_version: String,
        /// Old revision: a .py file or a package directory
        old_path: PathBuf,
        /// New revision: a .py file or a package directory
        new_path: PathBuf,
        /// Also list the removed and added signatures on stderr.
        #[clap(long)]
        explain: bool,
    },
    /// Print every public API signature of a module or package.
    Signatures {
        /// A .py file or a package directory
        path: PathBuf,
    },
}
