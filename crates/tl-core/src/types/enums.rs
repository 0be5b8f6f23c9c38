use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Provenance tag of a unified event. The tag doubles as the id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogType {
    Eqp,
    Tip,
    Racb,
    Ctttm,
    Jira,
}

impl LogType {
    pub const ALL: [LogType; 5] = [
        LogType::Eqp,
        LogType::Tip,
        LogType::Racb,
        LogType::Ctttm,
        LogType::Jira,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogType::Eqp => "EQP",
            LogType::Tip => "TIP",
            LogType::Racb => "RACB",
            LogType::Ctttm => "CTTTM",
            LogType::Jira => "JIRA",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogType(pub String);

impl fmt::Display for UnknownLogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log type: {}", self.0)
    }
}

impl FromStr for LogType {
    type Err = UnknownLogType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        LogType::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownLogType(trimmed.to_string()))
    }
}
