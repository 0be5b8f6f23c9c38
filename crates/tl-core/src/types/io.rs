use crate::types::enums::LogType;

/// Validated input of a timeline request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineQuery {
    pub line_id: String,
    pub eqp_id: String,
    pub sdwt_id: Option<String>,
    /// Sources to merge, in catalog order. Never empty.
    pub log_types: Vec<LogType>,
}

/// Optional narrowing of the equipment listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EquipmentFilter {
    pub line_id: String,
    pub sdwt_id: Option<String>,
    pub prc_group: Option<String>,
}
