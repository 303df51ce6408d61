use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A response field that may be missing (`None`) or explicitly `null` (`Some(None)`).
pub type Nullable<T> = Option<Option<T>>;

fn present<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Repository metadata, limited to the fields recorded in the statistics document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepoMetadata {
    #[serde(default, deserialize_with = "present")]
    pub created_at: Nullable<DateTime<Utc>>,
    #[serde(default, deserialize_with = "present")]
    pub updated_at: Nullable<DateTime<Utc>>,
    #[serde(default, deserialize_with = "present")]
    pub pushed_at: Nullable<DateTime<Utc>>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default, deserialize_with = "present")]
    pub language: Nullable<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl RepoMetadata {
    /// The statistics to record for this metadata, in recording order.
    ///
    /// Timestamps and the language are omitted when the forge left them out, and recorded as
    /// `null` when the forge sent `null`.
    #[must_use]
    pub fn stats(&self) -> Vec<(&'static str, Value)> {
        let timestamp = |t: &DateTime<Utc>| Value::String(t.to_rfc3339_opts(SecondsFormat::Secs, true));

        let mut stats = Vec::with_capacity(6);
        for (key, value) in [("created_at", &self.created_at), ("updated_at", &self.updated_at), ("pushed_at", &self.pushed_at)] {
            if let Some(t) = value {
                stats.push((key, t.as_ref().map_or(Value::Null, timestamp)));
            }
        }

        stats.push(("stargazers_count", Value::from(self.stargazers_count)));

        if let Some(language) = &self.language {
            stats.push(("language", language.clone().map_or(Value::Null, Value::String)));
        }

        stats.push(("topics", Value::from(self.topics.clone())));
        stats
    }
}

/// Kind of account behind a contributor record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ContributorKind {
    User,
    Bot,
    Organization,

    /// Commits whose author email is not linked to an account (`anon=true`).
    Anonymous,

    #[default]
    #[serde(other)]
    Other,
}

/// One entry of a repository's contributor list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Contributor {
    pub login: Option<String>,

    /// Only present for anonymous contributors.
    pub name: Option<String>,

    #[serde(default)]
    pub contributions: u64,

    #[serde(rename = "type", default)]
    pub kind: ContributorKind,
}
