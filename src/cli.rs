use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "verse-sprout",
    version,
    about = "Browse Bible verses by age group, topic and book in the terminal"
)]
pub struct Cli {
    /// Verse collection to load: a JSON file path or an http(s) URL.
    #[arg(long, short = 's', value_name = "PATH_OR_URL")]
    pub source: Option<String>,

    /// Age group to filter by on startup (empty for all).
    #[arg(long = "age-group", value_name = "GROUP")]
    pub age_group: Option<String>,

    /// Alternate config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
