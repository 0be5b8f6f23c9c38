use crate::error::ValidationError;
use crate::types::{EquipmentFilter, LogType, TimelineQuery};

/// Returns the value as supplied, or `MissingParam` when absent or blank.
pub fn require_param(name: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    optional_param(value).ok_or(ValidationError::MissingParam { name })
}

/// Blank optional parameters are treated as absent. Non-blank values are kept
/// verbatim, padding included.
pub fn optional_param(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

/// Parses a comma separated list of source tags. Absent, blank or an empty
/// list (`,`) means every source; duplicates collapse and the result follows
/// catalog order.
pub fn parse_log_types(value: Option<&str>) -> Result<Vec<LogType>, ValidationError> {
    let Some(value) = value.filter(|value| !value.trim().is_empty()) else {
        return Ok(LogType::ALL.to_vec());
    };
    let mut selected = Vec::new();
    for part in value.split(',').filter(|part| !part.trim().is_empty()) {
        let log_type = part
            .parse::<LogType>()
            .map_err(|err| ValidationError::InvalidParam {
                name: "logTypes",
                message: err.to_string(),
            })?;
        if !selected.contains(&log_type) {
            selected.push(log_type);
        }
    }
    if selected.is_empty() {
        return Ok(LogType::ALL.to_vec());
    }
    selected.sort();
    Ok(selected)
}

pub fn validate_timeline_query(
    line_id: Option<&str>,
    eqp_id: Option<&str>,
    sdwt_id: Option<&str>,
    log_types: Option<&str>,
) -> Result<TimelineQuery, ValidationError> {
    Ok(TimelineQuery {
        line_id: require_param("lineId", line_id)?,
        eqp_id: require_param("eqpId", eqp_id)?,
        sdwt_id: optional_param(sdwt_id),
        log_types: parse_log_types(log_types)?,
    })
}

pub fn validate_equipment_filter(
    line_id: Option<&str>,
    sdwt_id: Option<&str>,
    prc_group: Option<&str>,
) -> Result<EquipmentFilter, ValidationError> {
    Ok(EquipmentFilter {
        line_id: require_param("lineId", line_id)?,
        sdwt_id: optional_param(sdwt_id),
        prc_group: optional_param(prc_group),
    })
}
