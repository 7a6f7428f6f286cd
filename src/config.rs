// Connection settings: command-line flags first, then the INI config file.
//
// The config file is looked up at `--config` when given, otherwise at
// `./config.cfg` and then `<user config dir>/domjudge-cli/config.cfg`.
//
// ```ini
// [server]
// base_url = https://judge.example.org/api/v4
//
// [login]
// username = admin
// password = secret
//
// [data]
// teams_subset_file_path = teams.txt
// csv_file_path = out.csv
// ```
//
// Values are taken verbatim: backslashes and quotes are not interpreted, so
// Windows paths and passwords survive unchanged.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ini::{Ini, ParseOption};
use tracing::debug;

use crate::cli::Cli;

pub const DEFAULT_CONFIG_FILE: &str = "config.cfg";

#[derive(Debug, Default)]
pub struct FileConfig {
    pub server: ServerSection,
    pub login: LoginSection,
    pub data: DataSection,
}

#[derive(Debug, Default)]
pub struct ServerSection {
    pub base_url: Option<String>,
}

#[derive(Debug, Default)]
pub struct LoginSection {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default)]
pub struct DataSection {
    pub teams_subset_file_path: Option<PathBuf>,
    pub csv_file_path: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_file_opt(path, raw)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        Ok(Self::from_ini(&ini))
    }

    fn from_ini(ini: &Ini) -> Self {
        let get = |section: &str, key: &str| ini.get_from(Some(section), key).map(str::to_owned);
        FileConfig {
            server: ServerSection {
                base_url: get("server", "base_url"),
            },
            login: LoginSection {
                username: get("login", "username"),
                password: get("login", "password"),
            },
            data: DataSection {
                teams_subset_file_path: get("data", "teams_subset_file_path").map(PathBuf::from),
                csv_file_path: get("data", "csv_file_path").map(PathBuf::from),
            },
        }
    }
}

/// The config file to read, if any.
pub fn locate_config(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }
    Ok(dirs::config_dir()
        .map(|dir| dir.join("domjudge-cli").join(DEFAULT_CONFIG_FILE))
        .filter(|path| path.is_file()))
}

/// Everything needed to build the client and run the requested operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub teams_subset: Option<HashSet<String>>,
    pub csv_file_path: Option<PathBuf>,
}

impl Settings {
    /// Merge flags over the config file. A flag always wins.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let Some(base_url) = cli.server.clone().or(file.server.base_url) else {
            bail!("no server URL: pass --server or set base_url in the [server] section");
        };

        let teams_subset = cli
            .teams_subset_file_path
            .clone()
            .or(file.data.teams_subset_file_path)
            .map(|path| read_teams_subset(&path))
            .transpose()?;

        Ok(Settings {
            base_url,
            username: cli.username.clone().or(file.login.username),
            password: cli.passwd.clone().or(file.login.password),
            teams_subset,
            csv_file_path: cli.csv_file_path.clone().or(file.data.csv_file_path),
        })
    }

    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match locate_config(cli.config.as_deref())? {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                FileConfig::load(&path)?
            }
            None => FileConfig::default(),
        };
        Self::resolve(cli, file)
    }
}

/// One team name per line; surrounding whitespace and blank lines are dropped.
pub fn read_teams_subset(path: &Path) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not read teams subset file {}", path.display()))?;
    Ok(parse_teams_subset(&content))
}

fn parse_teams_subset(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
