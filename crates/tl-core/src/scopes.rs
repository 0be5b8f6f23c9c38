use crate::error::StoreError;
use crate::types::{EquipmentFilter, EquipmentScope};

pub trait ScopeRepository {
    fn lines(&self) -> Result<Vec<String>, StoreError>;
    fn sdwts(&self, line_id: &str) -> Result<Vec<String>, StoreError>;
    fn prc_groups(&self, line_id: &str, sdwt_id: &str) -> Result<Vec<String>, StoreError>;
    fn equipments(&self, filter: &EquipmentFilter) -> Result<Vec<EquipmentScope>, StoreError>;
    fn equipment(&self, eqp_id: &str, line_id: &str)
        -> Result<Option<EquipmentScope>, StoreError>;
    fn ping(&self) -> Result<(), StoreError>;
    fn equipment_count(&self) -> Result<i64, StoreError>;
}
