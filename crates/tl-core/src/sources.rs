//! Catalog of the event sources merged into a timeline.
//!
//! Each source is a table sharing the scoping columns (`line_id`, `sdwt_prod`,
//! `eqp_cb`) and the timing/provenance columns (`event_time`, `end_time`,
//! `operator`, `comment`). What differs is where the event type comes from and
//! whether rows link back to an external system.

use crate::types::enums::LogType;
use serde::Deserialize;

pub const LINE_COLUMN: &str = "line_id";
pub const EQP_COLUMN: &str = "eqp_cb";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTypeColumn {
    Column(&'static str),
    Literal(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpec {
    pub log_type: LogType,
    pub table: &'static str,
    pub event_type: EventTypeColumn,
    /// Sub-division column; sources without one ignore the sub-division filter.
    pub sdwt_column: Option<&'static str>,
    /// Column whose value is appended to the source's deep link.
    pub link_column: Option<&'static str>,
}

pub const SOURCES: [SourceSpec; 5] = [
    SourceSpec {
        log_type: LogType::Eqp,
        table: "eqp_status_hist",
        event_type: EventTypeColumn::Column("status_type"),
        sdwt_column: Some("sdwt_prod"),
        link_column: None,
    },
    SourceSpec {
        log_type: LogType::Tip,
        table: "gpm_tip_hist",
        event_type: EventTypeColumn::Column("tip_type"),
        sdwt_column: Some("sdwt_prod"),
        link_column: Some("id"),
    },
    SourceSpec {
        log_type: LogType::Racb,
        table: "racb_list",
        event_type: EventTypeColumn::Literal("RACB"),
        sdwt_column: Some("sdwt_prod"),
        link_column: Some("id"),
    },
    SourceSpec {
        log_type: LogType::Ctttm,
        table: "ctttm_log_hist",
        event_type: EventTypeColumn::Column("ctttm_type"),
        sdwt_column: Some("sdwt_prod"),
        link_column: None,
    },
    SourceSpec {
        log_type: LogType::Jira,
        table: "jira_issue_hist",
        event_type: EventTypeColumn::Column("issue_status"),
        sdwt_column: Some("sdwt_prod"),
        link_column: Some("issue_key"),
    },
];

/// Base URLs of the external systems events link back to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkTemplates {
    pub tip_base_url: String,
    pub racb_base_url: String,
    pub jira_base_url: String,
}

impl Default for LinkTemplates {
    fn default() -> Self {
        Self {
            tip_base_url: "https://tip.example.com".to_string(),
            racb_base_url: "https://racb.example.com".to_string(),
            jira_base_url: "https://jira.example.com".to_string(),
        }
    }
}

impl LinkTemplates {
    pub fn link_for(&self, log_type: LogType, key: &str) -> Option<String> {
        let (base, path) = match log_type {
            LogType::Tip => (&self.tip_base_url, "issue"),
            LogType::Racb => (&self.racb_base_url, "alarm"),
            LogType::Jira => (&self.jira_base_url, "browse"),
            LogType::Eqp | LogType::Ctttm => return None,
        };
        Some(format!("{}/{path}/{key}", base.trim_end_matches('/')))
    }
}
