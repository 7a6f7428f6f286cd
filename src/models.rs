// Read-only records built from the judging server's JSON responses.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, FixedOffset};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Result;

/// Ids come back as numbers from older servers and as numeric strings from
/// newer ones.
fn de_id<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Str(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Int(id) => Ok(id),
        RawId::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid id {s:?}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contest {
    #[serde(deserialize_with = "de_id")]
    pub id: i64,
    #[serde(rename = "formal_name")]
    pub long_name: String,
    #[serde(rename = "shortname")]
    pub short_name: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
}

impl Contest {
    pub fn from_json(content: Value) -> Result<Self> {
        Ok(serde_json::from_value(content)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Team {
    #[serde(deserialize_with = "de_id")]
    pub id: i64,
    pub name: String,
}

impl Team {
    pub fn from_json(content: Value) -> Result<Self> {
        Ok(serde_json::from_value(content)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Problem {
    #[serde(deserialize_with = "de_id")]
    pub id: i64,
    #[serde(rename = "name")]
    pub long_name: String,
    pub short_name: String,
}

impl Problem {
    pub fn from_json(content: Value) -> Result<Self> {
        Ok(serde_json::from_value(content)?)
    }
}

/// A submission joined with its judgement, team and problem.
///
/// `from_json` expects the merged object: the submission's own fields plus
/// `team_name`, `problem_name`, `max_run_time` and `judgement_type_id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Submission {
    #[serde(deserialize_with = "de_id")]
    pub id: i64,
    #[serde(deserialize_with = "de_id")]
    pub team_id: i64,
    pub team_name: String,
    #[serde(deserialize_with = "de_id")]
    pub problem_id: i64,
    pub problem_name: String,
    pub language_id: String,
    pub time: DateTime<FixedOffset>,
    /// `None` while the submission is still being judged.
    pub max_run_time: Option<f64>,
    pub judgement_type_id: Option<String>,
}

impl Submission {
    pub fn from_json(content: Value) -> Result<Self> {
        Ok(serde_json::from_value(content)?)
    }

    pub(crate) fn join(
        raw: SubmissionJson,
        judgement: &Judgement,
        team: &Team,
        problem: &Problem,
    ) -> Self {
        Self {
            id: raw.id,
            team_id: raw.team_id,
            team_name: team.name.clone(),
            problem_id: raw.problem_id,
            problem_name: problem.short_name.clone(),
            language_id: raw.language_id,
            time: raw.time,
            max_run_time: judgement.max_run_time,
            judgement_type_id: judgement.judgement_type_id.clone(),
        }
    }
}

/// Submission as served by `/contests/{id}/submissions`, before the join.
#[derive(Debug, Deserialize)]
pub(crate) struct SubmissionJson {
    #[serde(deserialize_with = "de_id")]
    pub id: i64,
    #[serde(deserialize_with = "de_id")]
    pub team_id: i64,
    #[serde(deserialize_with = "de_id")]
    pub problem_id: i64,
    pub language_id: String,
    pub time: DateTime<FixedOffset>,
}

/// Only the judgement fields the submission listing needs.
#[derive(Debug, Deserialize)]
pub(crate) struct Judgement {
    #[serde(deserialize_with = "de_id")]
    pub submission_id: i64,
    pub max_run_time: Option<f64>,
    pub judgement_type_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceCode {
    pub id: i64,
    pub submission_id: i64,
    /// Decoded source text with `\r\n` normalized to `\n`.
    pub source_code: String,
}

impl SourceCode {
    pub fn from_json(content: Value) -> Result<Self> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(deserialize_with = "de_id")]
            id: i64,
            #[serde(deserialize_with = "de_id")]
            submission_id: i64,
            source: String,
        }

        let raw: Raw = serde_json::from_value(content)?;
        let bytes = STANDARD.decode(raw.source.as_bytes())?;
        let text = String::from_utf8(bytes)?;

        Ok(Self {
            id: raw.id,
            submission_id: raw.submission_id,
            source_code: text.replace("\r\n", "\n"),
        })
    }
}
