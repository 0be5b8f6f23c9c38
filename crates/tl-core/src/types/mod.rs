pub mod enums;
pub mod event;
pub mod health;
pub mod io;
pub mod scope;

pub use enums::LogType;
pub use event::{SourceRow, UnifiedEvent};
pub use health::{HealthReport, UnhealthyReport};
pub use io::{EquipmentFilter, TimelineQuery};
pub use scope::{EquipmentScope, EquipmentSummary, LineSummary, PrcGroupSummary, SdwtSummary};
