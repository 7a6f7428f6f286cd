// API client module: a small blocking HTTP client for the judging server's
// REST API. Every listing is a single GET; submissions are joined in memory
// with the judgements, teams and problems of the same contest.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ClientError, Result};
use crate::models::{Contest, Judgement, Problem, SourceCode, Submission, SubmissionJson, Team};

/// Fetches a URL and hands back its JSON body.
pub trait Transport {
    fn get_json(&self, url: &str) -> Result<Value>;
}

/// reqwest-backed transport with optional HTTP Basic credentials.
pub struct HttpTransport {
    client: Client,
    auth: Option<(String, String)>,
}

impl HttpTransport {
    /// Credentials are only attached when both username and password are set.
    pub fn new(username: Option<String>, password: Option<String>) -> Result<Self> {
        static APP_USER_AGENT: &str =
            concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(ClientError::Builder)?;
        Ok(HttpTransport {
            client,
            auth: username.zip(password),
        })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str) -> Result<Value> {
        let mut req = self.client.get(url);
        if let Some((username, password)) = &self.auth {
            req = req.basic_auth(username, Some(password));
        }

        let res = req.send().map_err(|source| ClientError::Http {
            url: url.to_owned(),
            source,
        })?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            return Err(ClientError::Status {
                url: url.to_owned(),
                status,
                body,
            });
        }

        let bytes = res.bytes().map_err(|source| ClientError::Http {
            url: url.to_owned(),
            source,
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Lazily turns the elements of a JSON array into records. Builders return
/// `Ok(None)` for elements that are filtered out.
pub struct Records<T> {
    items: std::vec::IntoIter<Value>,
    build: Box<dyn FnMut(Value) -> Result<Option<T>>>,
}

impl<T> Records<T> {
    fn new(items: Vec<Value>, build: impl FnMut(Value) -> Result<Option<T>> + 'static) -> Self {
        Records {
            items: items.into_iter(),
            build: Box::new(build),
        }
    }
}

impl<T> Iterator for Records<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        for content in self.items.by_ref() {
            match (self.build)(content) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

/// Client for one server. Configuration is fixed after construction.
pub struct ApiClient<T = HttpTransport> {
    transport: T,
    base_url: String,
    teams_subset: Option<HashSet<String>>,
}

impl ApiClient<HttpTransport> {
    /// Build a client talking HTTP to `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self> {
        let transport = HttpTransport::new(username, password)?;
        Ok(ApiClient::with_transport(transport, base_url))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(transport: T, base_url: impl Into<String>) -> Self {
        ApiClient {
            transport,
            base_url: base_url.into(),
            teams_subset: None,
        }
    }

    /// Restrict team and submission listings to teams with these names.
    pub fn with_teams_subset(mut self, teams: impl IntoIterator<Item = String>) -> Self {
        self.teams_subset = Some(teams.into_iter().collect());
        self
    }

    pub fn list_contests(&self) -> Result<Records<Contest>> {
        let items = self.fetch_list("contests")?;
        Ok(Records::new(items, |content| Contest::from_json(content).map(Some)))
    }

    pub fn list_teams(&self, contest_id: i64) -> Result<Records<Team>> {
        let items = self.fetch_list(&format!("contests/{contest_id}/teams"))?;
        let subset = self.teams_subset.clone();
        Ok(Records::new(items, move |content| {
            let team = Team::from_json(content)?;
            Ok(is_selected(&subset, &team.name).then_some(team))
        }))
    }

    pub fn list_problems(&self, contest_id: i64) -> Result<Records<Problem>> {
        let items = self.fetch_list(&format!("contests/{contest_id}/problems"))?;
        Ok(Records::new(items, |content| Problem::from_json(content).map(Some)))
    }

    /// Submissions joined with their judgement (by submission id) and the
    /// name of their team and problem (by team and problem id).
    pub fn list_submissions(&self, contest_id: i64) -> Result<Records<Submission>> {
        let teams = index_by_id(
            self.fetch_list(&format!("contests/{contest_id}/teams"))?,
            Team::from_json,
            |team| team.id,
        )?;
        let problems = index_by_id(
            self.fetch_list(&format!("contests/{contest_id}/problems"))?,
            Problem::from_json,
            |problem| problem.id,
        )?;
        // A rejudged submission has several judgements; the last one listed wins.
        let judgements = index_by_id(
            self.fetch_list(&format!("contests/{contest_id}/judgements"))?,
            |content| Ok(serde_json::from_value::<Judgement>(content)?),
            |judgement| judgement.submission_id,
        )?;
        debug!(
            teams = teams.len(),
            problems = problems.len(),
            judgements = judgements.len(),
            "built lookup indexes"
        );

        let items = self.fetch_list(&format!("contests/{contest_id}/submissions"))?;
        let subset = self.teams_subset.clone();
        Ok(Records::new(items, move |content| {
            let raw: SubmissionJson = serde_json::from_value(content)?;
            let team = teams.get(&raw.team_id).ok_or(ClientError::UnknownTeam {
                team_id: raw.team_id,
                submission_id: raw.id,
            })?;
            if !is_selected(&subset, &team.name) {
                return Ok(None);
            }
            let judgement = judgements
                .get(&raw.id)
                .ok_or(ClientError::MissingJudgement { submission_id: raw.id })?;
            let problem = problems
                .get(&raw.problem_id)
                .ok_or(ClientError::UnknownProblem {
                    problem_id: raw.problem_id,
                    submission_id: raw.id,
                })?;
            Ok(Some(Submission::join(raw, judgement, team, problem)))
        }))
    }

    pub fn get_source_code(&self, contest_id: i64, submission_id: i64) -> Result<SourceCode> {
        let path = format!("contests/{contest_id}/submissions/{submission_id}/source-code");
        let first = self
            .fetch_list(&path)?
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::EmptyResponse {
                url: self.api_url(&path),
            })?;
        SourceCode::from_json(first)
    }

    /// Write every submission's source to
    /// `{output_dir}/{problem}/{team}_{submission}_{judgement}.{language}`.
    /// The first failure aborts the remaining downloads.
    pub fn download_submission_files(
        &self,
        contest_id: i64,
        output_dir: &Path,
        verbose: bool,
    ) -> Result<()> {
        let submissions = self
            .list_submissions(contest_id)?
            .collect::<Result<Vec<_>>>()?;

        let progress = if verbose {
            let style = ProgressStyle::with_template("{msg} {wide_bar} {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            ProgressBar::new(submissions.len() as u64)
                .with_style(style)
                .with_message("downloading submissions")
        } else {
            ProgressBar::hidden()
        };

        for submission in &submissions {
            let source = self.get_source_code(contest_id, submission.id)?;
            let path = submission_file_path(output_dir, submission);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| ClientError::io(parent, e))?;
            }
            fs::write(&path, source.source_code).map_err(|e| ClientError::io(&path, e))?;
            debug!(path = %path.display(), "wrote submission source");
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!(
            count = submissions.len(),
            dir = %output_dir.display(),
            "downloaded submission sources"
        );
        Ok(())
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn fetch_list(&self, path: &str) -> Result<Vec<Value>> {
        let url = self.api_url(path);
        debug!(%url, "GET");
        let content = self.transport.get_json(&url)?;
        Ok(serde_json::from_value(content)?)
    }
}

/// Where `download_submission_files` puts a submission's source. Names come
/// from the server, so each one is reduced to a single path component that
/// stays inside `output_dir`.
pub fn submission_file_path(output_dir: &Path, submission: &Submission) -> PathBuf {
    let judgement = submission.judgement_type_id.as_deref().unwrap_or("pending");
    output_dir
        .join(path_component(&submission.problem_name))
        .join(format!(
            "{}_{}_{}.{}",
            path_component(&submission.team_name),
            submission.id,
            path_component(judgement),
            path_component(&submission.language_id)
        ))
}

/// Separators and NUL become `_`; an empty, `.` or `..` name becomes `_`.
fn path_component(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    match safe.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => safe,
    }
}

fn is_selected(subset: &Option<HashSet<String>>, team_name: &str) -> bool {
    subset.as_ref().map_or(true, |names| names.contains(team_name))
}

fn index_by_id<R>(
    items: Vec<Value>,
    build: impl Fn(Value) -> Result<R>,
    key: impl Fn(&R) -> i64,
) -> Result<HashMap<i64, R>> {
    items
        .into_iter()
        .map(|content| build(content).map(|record| (key(&record), record)))
        .collect()
}
