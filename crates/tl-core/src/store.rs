use crate::events::TimelineRepository;
use crate::scopes::ScopeRepository;

pub trait Store {
    type Timeline<'a>: TimelineRepository
    where
        Self: 'a;
    type Scopes<'a>: ScopeRepository
    where
        Self: 'a;

    fn timeline(&self) -> Self::Timeline<'_>;
    fn scopes(&self) -> Self::Scopes<'_>;
}
