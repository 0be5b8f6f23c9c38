use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the equipment dimension: which line, sub-division and process
/// group an equipment belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentScope {
    pub id: String,
    pub line_id: String,
    pub sdwt_id: Option<String>,
    pub prc_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LineSummary {
    pub id: String,
    pub name: String,
}

impl LineSummary {
    pub fn new(id: String) -> Self {
        let name = format!("Line {id}");
        Self { id, name }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SdwtSummary {
    pub id: String,
    pub line_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrcGroupSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentSummary {
    pub id: String,
    pub line_id: String,
    pub sdwt_id: Option<String>,
    pub prc_group: Option<String>,
    pub name: String,
}

impl From<EquipmentScope> for EquipmentSummary {
    fn from(scope: EquipmentScope) -> Self {
        Self {
            name: scope.id.clone(),
            id: scope.id,
            line_id: scope.line_id,
            sdwt_id: scope.sdwt_id,
            prc_group: scope.prc_group,
        }
    }
}
