use crate::error::{ScopeError, StoreError, TimelineError};
use crate::events::TimelineRepository;
use crate::scopes::ScopeRepository;
use crate::sources::LinkTemplates;
use crate::store::Store;
use crate::types::{
    EquipmentFilter, EquipmentScope, EquipmentSummary, HealthReport, LineSummary,
    PrcGroupSummary, SdwtSummary, SourceRow, TimelineQuery, UnifiedEvent,
};
use chrono::{DateTime, Utc};

pub struct Timeline<S: Store> {
    store: S,
    links: LinkTemplates,
}

impl<S: Store> Timeline<S> {
    pub fn new(store: S, links: LinkTemplates) -> Self {
        Self { store, links }
    }

    pub fn events(&self) -> EventsApi<'_, S> {
        EventsApi { core: self }
    }

    pub fn scopes(&self) -> ScopesApi<'_, S> {
        ScopesApi { core: self }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn health(&self, now: DateTime<Utc>) -> Result<HealthReport, StoreError> {
        let scopes = self.store.scopes();
        scopes.ping()?;
        let eqp_count = scopes.equipment_count()?;
        Ok(HealthReport {
            status: "healthy".to_string(),
            database: "connected".to_string(),
            eqp_count,
            timestamp: now.to_rfc3339(),
        })
    }
}

pub struct EventsApi<'a, S: Store> {
    core: &'a Timeline<S>,
}

impl<S: Store> EventsApi<'_, S> {
    /// Merged timeline of one equipment, newest first.
    pub fn list(&self, query: &TimelineQuery) -> Result<Vec<UnifiedEvent>, TimelineError> {
        let rows = self.core.store.timeline().source_rows(query)?;
        tracing::debug!(
            line_id = %query.line_id,
            eqp_id = %query.eqp_id,
            rows = rows.len(),
            "fetched source rows"
        );
        Ok(merge_rows(rows, &self.core.links))
    }
}

/// Derives ids, links and durations, then orders by `event_time` descending
/// with `id` ascending as the tie-breaker.
pub fn merge_rows(rows: Vec<SourceRow>, links: &LinkTemplates) -> Vec<UnifiedEvent> {
    let mut events: Vec<UnifiedEvent> = rows
        .into_iter()
        .map(|row| UnifiedEvent::from_row(row, links))
        .collect();
    events.sort_by(|a, b| {
        b.event_time
            .cmp(&a.event_time)
            .then_with(|| a.id.cmp(&b.id))
    });
    events
}

pub struct ScopesApi<'a, S: Store> {
    core: &'a Timeline<S>,
}

impl<S: Store> ScopesApi<'_, S> {
    pub fn lines(&self) -> Result<Vec<LineSummary>, TimelineError> {
        let lines = self.core.store.scopes().lines()?;
        Ok(lines.into_iter().map(LineSummary::new).collect())
    }

    pub fn sdwts(&self, line_id: &str) -> Result<Vec<SdwtSummary>, TimelineError> {
        let sdwts = self.core.store.scopes().sdwts(line_id)?;
        Ok(sdwts
            .into_iter()
            .map(|id| SdwtSummary {
                name: id.clone(),
                id,
                line_id: line_id.to_string(),
            })
            .collect())
    }

    pub fn prc_groups(
        &self,
        line_id: &str,
        sdwt_id: &str,
    ) -> Result<Vec<PrcGroupSummary>, TimelineError> {
        let groups = self.core.store.scopes().prc_groups(line_id, sdwt_id)?;
        Ok(groups
            .into_iter()
            .map(|id| PrcGroupSummary {
                name: id.clone(),
                id,
            })
            .collect())
    }

    pub fn equipments(
        &self,
        filter: &EquipmentFilter,
    ) -> Result<Vec<EquipmentSummary>, TimelineError> {
        let scopes = self.core.store.scopes().equipments(filter)?;
        Ok(scopes.into_iter().map(EquipmentSummary::from).collect())
    }

    pub fn equipment_info(
        &self,
        eqp_id: &str,
        line_id: &str,
    ) -> Result<EquipmentScope, TimelineError> {
        self.core
            .store
            .scopes()
            .equipment(eqp_id, line_id)?
            .ok_or_else(|| {
                TimelineError::Scope(ScopeError::EquipmentNotFound {
                    eqp_id: eqp_id.to_string(),
                    line_id: line_id.to_string(),
                })
            })
    }
}
