// Command runner: executes the operations requested on the command line in
// a fixed order (contests, teams, problems, submissions, then the source
// download) and hands every listing to the presenter.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use dialoguer::Password;
use tracing::info;

use crate::api::{ApiClient, Transport};
use crate::cli::Cli;
use crate::config::Settings;
use crate::presenter::{present, Presenter};

/// Resolve settings, build the HTTP client and run the requested operations.
pub fn run(cli: &Cli) -> Result<()> {
    let mut settings = Settings::load(cli)?;
    if settings.username.is_some() && settings.password.is_none() && io::stdin().is_terminal() {
        let password = Password::new()
            .with_prompt("Password")
            .interact()
            .context("could not read password")?;
        settings.password = Some(password);
    }

    let mut api = ApiClient::new(
        settings.base_url.clone(),
        settings.username.clone(),
        settings.password.clone(),
    )?;
    if let Some(teams) = settings.teams_subset.clone() {
        api = api.with_teams_subset(teams);
    }

    let stdout = io::stdout();
    execute(&api, cli, &settings, &mut stdout.lock())
}

/// Run every operation whose flag is set, writing listings to `out`.
pub fn execute<T: Transport, W: Write>(
    api: &ApiClient<T>,
    cli: &Cli,
    settings: &Settings,
    out: &mut W,
) -> Result<()> {
    let csv = settings.csv_file_path.as_deref();
    let contest_scoped = cli.get_teams
        || cli.get_problems
        || cli.get_submissions
        || cli.submissions_dir_path.is_some();
    if contest_scoped && cli.contest.is_none() {
        bail!("--contest is required to list teams, problems or submissions");
    }

    if cli.get_contests {
        let contests = api.list_contests()?.collect::<Result<Vec<_>, _>>()?;
        print_listing(out, &contests, csv)?;
    }

    let Some(contest_id) = cli.contest else {
        return Ok(());
    };

    if cli.get_teams {
        let teams = api.list_teams(contest_id)?.collect::<Result<Vec<_>, _>>()?;
        print_listing(out, &teams, csv)?;
    }
    if cli.get_problems {
        let problems = api.list_problems(contest_id)?.collect::<Result<Vec<_>, _>>()?;
        print_listing(out, &problems, csv)?;
    }
    if cli.get_submissions {
        let submissions = api
            .list_submissions(contest_id)?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("could not list submissions of contest {contest_id}"))?;
        print_listing(out, &submissions, csv)?;
    }
    if let Some(dir) = &cli.submissions_dir_path {
        info!(contest_id, dir = %dir.display(), "downloading submission sources");
        api.download_submission_files(contest_id, dir, cli.verbose)
            .with_context(|| format!("could not download submissions into {}", dir.display()))?;
    }

    Ok(())
}

fn print_listing<P: Presenter, W: Write>(out: &mut W, records: &[P], csv: Option<&Path>) -> Result<()> {
    info!(kind = ?P::KIND, count = records.len(), "retrieved records");
    present(out, records, csv)?;
    Ok(())
}
