//! The filter/render pipeline.
//!
//! (catalog, selection, favorites) -> visible records -> grid layout ->
//! HTML. Each stage is a pure function of its inputs.

mod filter;
mod layout;
mod template;

pub use filter::{FilterState, filter_records};
pub use layout::{AD_FREQUENCY, EmptyState, Grid, GridItem, layout, sponsor_count};
pub use template::{GridRenderer, RenderContext, category_icon};
