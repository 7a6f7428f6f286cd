// Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Query a DOMjudge server: list contests, teams, problems and submissions,
/// export listings as CSV and download submitted sources.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Server API base URL, e.g. https://judge.example.org/api/v4
    #[arg(short, long)]
    pub server: Option<String>,

    #[arg(short, long)]
    pub username: Option<String>,

    #[arg(short, long)]
    pub passwd: Option<String>,

    /// Contest id, required by every contest-scoped operation
    #[arg(short, long)]
    pub contest: Option<i64>,

    /// Print all contests
    #[arg(long)]
    pub get_contests: bool,

    /// Print the teams of the contest
    #[arg(long, requires = "contest")]
    pub get_teams: bool,

    /// Print the problems of the contest
    #[arg(long, requires = "contest")]
    pub get_problems: bool,

    /// Print the submissions of the contest
    #[arg(long, requires = "contest")]
    pub get_submissions: bool,

    /// Download every submission's source into this directory
    #[arg(long, requires = "contest")]
    pub submissions_dir_path: Option<PathBuf>,

    /// Also write each printed listing to this CSV file
    #[arg(long)]
    pub csv_file_path: Option<PathBuf>,

    /// File with one team name per line; listings keep only these teams
    #[arg(long)]
    pub teams_subset_file_path: Option<PathBuf>,

    /// INI config file [default: ./config.cfg, then the user config dir]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log progress and show a progress bar while downloading
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
