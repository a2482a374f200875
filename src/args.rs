use crate::error::Error;
use crate::log::Reporter;
use crate::result::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Step configuration, read from environment keys or the matching flags
#[derive(Debug)]
pub struct Args {
    /// Log every archive entry as it is written
    pub verbose: bool,

    /// File or directory to compress
    pub source_path: PathBuf,

    /// Output path; `.zip` is appended when missing
    pub destination: PathBuf,
}

impl Args {
    /// Parse command-line arguments and environment
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            verbose: matches.get_flag("verbose"),
            source_path: matches
                .get_one::<String>("source_path")
                .map(PathBuf::from)
                .unwrap_or_default(),
            destination: matches
                .get_one::<String>("destination")
                .map(PathBuf::from)
                .unwrap_or_default(),
        }
    }

    /// Reject configurations that cannot produce an archive
    pub fn validate(&self) -> Result<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(Error::config("source_path is empty"));
        }
        if !self.source_path.exists() {
            return Err(Error::config(format!(
                "source_path {} does not exist",
                self.source_path.display()
            )));
        }
        if self.destination.as_os_str().is_empty() {
            return Err(Error::config("destination is empty"));
        }
        Ok(())
    }

    /// Log the configuration summary
    pub fn print(&self, log: &mut dyn Reporter) {
        log.info(&format!(
            "Create ZIP configs:\n- SourcePath: {}\n- Destination: {}",
            self.source_path.display(),
            self.destination.display()
        ));
    }
}

fn command() -> Command {
    Command::new("ziptree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compress a file or directory tree into a ZIP archive")
        .arg(
            Arg::new("source_path")
                .long("source-path")
                .env("source_path")
                .value_name("PATH")
                .required(true)
                .help("File or directory to compress"),
        )
        .arg(
            Arg::new("destination")
                .long("destination")
                .env("destination")
                .value_name("PATH")
                .required(true)
                .help("Archive path; the .zip extension is appended if missing"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .env("verbose")
                .action(ArgAction::SetTrue)
                .help("Log every entry as it is added"),
        )
}
