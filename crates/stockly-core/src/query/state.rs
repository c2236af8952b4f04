// ── Query state ──

use std::sync::Arc;

use crate::error::CoreError;

/// Lifecycle of one cached query.
///
/// `T` may be unsized: the cache itself stores `QueryState<dyn Any>` and
/// handles downcast on read.
#[derive(Debug)]
pub enum QueryState<T: ?Sized> {
    /// No result yet.
    Loading,
    Ready(Arc<T>),
    Failed(Arc<CoreError>),
}

impl<T: ?Sized> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Loading => Self::Loading,
            Self::Ready(v) => Self::Ready(Arc::clone(v)),
            Self::Failed(e) => Self::Failed(Arc::clone(e)),
        }
    }
}

impl<T: ?Sized> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// A published state plus its freshness flags.
#[derive(Debug)]
pub struct Snapshot<T: ?Sized> {
    pub state: QueryState<T>,
    /// Invalidated since the last successful load.
    pub stale: bool,
    /// A load is in flight.
    pub fetching: bool,
}

impl<T: ?Sized> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            stale: self.stale,
            fetching: self.fetching,
        }
    }
}

impl<T: ?Sized> Snapshot<T> {
    pub(crate) fn initial() -> Self {
        Self {
            state: QueryState::Loading,
            stale: false,
            fetching: false,
        }
    }

    /// Nothing is in flight and a result (or error) is available.
    pub fn is_settled(&self) -> bool {
        !self.fetching && !self.state.is_loading()
    }
}
