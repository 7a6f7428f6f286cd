// Errors raised while talking to the judging server or writing its data out.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Builder(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("source payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("source payload is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("no judgement found for submission {submission_id}")]
    MissingJudgement { submission_id: i64 },

    #[error("submission {submission_id} references unknown team {team_id}")]
    UnknownTeam { team_id: i64, submission_id: i64 },

    #[error("submission {submission_id} references unknown problem {problem_id}")]
    UnknownProblem { problem_id: i64, submission_id: i64 },

    #[error("{url} returned an empty list")]
    EmptyResponse { url: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
}

impl ClientError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for client and presentation operations.
pub type Result<T> = std::result::Result<T, ClientError>;
