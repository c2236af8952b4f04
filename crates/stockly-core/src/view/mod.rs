// ── Entity list views ──
//
// One generic list view, configured per entity with a column spec and
// empty/loading texts. Rendering is pure: a `QueryState` goes in, a
// `ViewState` comes out.

mod column;
mod list;
pub mod views;

pub use column::{Cell, Column, RenderContext};
pub use list::{EmptyState, ListView, ListViewBuilder, RETRY_HINT, ViewState};
