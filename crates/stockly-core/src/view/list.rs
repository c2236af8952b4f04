// ── Generic list view ──

use serde::Serialize;

use super::column::{Cell, Column, RenderContext};
use crate::format::{PageFooter, pagination_footer};
use crate::query::{Filters, QueryKey, QueryState, Resource};
use crate::record::Collection;

/// Hint shown under every fetch error.
pub const RETRY_HINT: &str = "Press r to retry";

/// Placeholder for an empty collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub icon: &'static str,
    pub title: String,
    pub description: String,
}

/// What a list view shows for a given query state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    Loading {
        text: String,
    },
    Error {
        message: String,
        retry_hint: &'static str,
    },
    Empty {
        icon: &'static str,
        title: String,
        description: String,
    },
    Table {
        headers: Vec<&'static str>,
        rows: Vec<Vec<Cell>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        footer: Option<PageFooter>,
    },
}

impl ViewState {
    pub fn row_count(&self) -> usize {
        match self {
            Self::Table { rows, .. } => rows.len(),
            _ => 0,
        }
    }
}

/// A remote collection rendered as a table.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    resource: Resource,
    filters: Filters,
    columns: Vec<Column<T>>,
    empty: EmptyState,
    loading: String,
}

impl<T> ListView<T> {
    pub fn builder(resource: Resource) -> ListViewBuilder<T> {
        ListViewBuilder {
            resource,
            filters: Filters::new(),
            columns: Vec::new(),
            empty: EmptyState {
                icon: "📦",
                title: format!("No {} found", resource.as_ref().replace('_', " ")),
                description: String::new(),
            },
            loading: "Loading...".into(),
        }
    }

    /// Cache identity of this view's query.
    pub fn key(&self) -> QueryKey {
        QueryKey::with_filters(self.resource, self.filters.clone())
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Change a filter in place; a blank value clears it.
    pub fn set_filter(&mut self, key: &str, value: impl Into<String>) {
        self.filters.insert(key, value);
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.label).collect()
    }

    pub fn empty_state(&self) -> &EmptyState {
        &self.empty
    }

    /// Render against the current time.
    pub fn render(&self, state: &QueryState<Collection<T>>) -> ViewState {
        self.render_with(state, &RenderContext::now())
    }

    pub fn render_with(&self, state: &QueryState<Collection<T>>, ctx: &RenderContext) -> ViewState {
        match state {
            QueryState::Loading => ViewState::Loading {
                text: self.loading.clone(),
            },
            QueryState::Failed(err) => ViewState::Error {
                message: err.to_string(),
                retry_hint: RETRY_HINT,
            },
            QueryState::Ready(collection) if collection.is_empty() => ViewState::Empty {
                icon: self.empty.icon,
                title: self.empty.title.clone(),
                description: self.empty.description.clone(),
            },
            QueryState::Ready(collection) => ViewState::Table {
                headers: self.headers(),
                rows: collection
                    .items
                    .iter()
                    .map(|item| self.render_row(item, ctx))
                    .collect(),
                footer: collection.pagination.as_ref().map(pagination_footer),
            },
        }
    }

    pub fn render_row(&self, item: &T, ctx: &RenderContext) -> Vec<Cell> {
        self.columns.iter().map(|c| (c.render)(item, ctx)).collect()
    }
}

/// Builder for [`ListView`].
pub struct ListViewBuilder<T> {
    resource: Resource,
    filters: Filters,
    columns: Vec<Column<T>>,
    empty: EmptyState,
    loading: String,
}

impl<T> ListViewBuilder<T> {
    pub fn filter(mut self, key: &str, value: impl Into<String>) -> Self {
        self.filters.insert(key, value);
        self
    }

    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn column(
        mut self,
        key: &'static str,
        label: &'static str,
        render: fn(&T, &RenderContext) -> Cell,
    ) -> Self {
        self.columns.push(Column::new(key, label, render));
        self
    }

    pub fn empty(
        mut self,
        icon: &'static str,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.empty = EmptyState {
            icon,
            title: title.into(),
            description: description.into(),
        };
        self
    }

    pub fn loading(mut self, text: impl Into<String>) -> Self {
        self.loading = text.into();
        self
    }

    pub fn build(self) -> ListView<T> {
        ListView {
            resource: self.resource,
            filters: self.filters,
            columns: self.columns,
            empty: self.empty,
            loading: self.loading,
        }
    }
}
