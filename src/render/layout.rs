//! Grid layout: cards interleaved with sponsor blocks.

use crate::domain::{AdSlot, CategoryFilter, NoteRecord, SponsorBoard, grid_slot_name};

/// A sponsor block follows every this many cards.
pub const AD_FREQUENCY: usize = 4;

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridItem<'a> {
    Card(&'a NoteRecord),
    /// `ad` is `None` when the placeholder is shown.
    Sponsor { slot: String, ad: Option<&'a AdSlot> },
}

/// Shown instead of the grid when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoResults,
    NoFavorites,
}

impl EmptyState {
    pub fn for_category(category: &CategoryFilter) -> Self {
        if category.is_favorites() {
            EmptyState::NoFavorites
        } else {
            EmptyState::NoResults
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            EmptyState::NoResults => "No notes found",
            EmptyState::NoFavorites => "No saved notes yet",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoResults => "Try another semester, category or search term.",
            EmptyState::NoFavorites => "Tap the heart on a note to keep it here.",
        }
    }
}

/// The laid-out result of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grid<'a> {
    Items(Vec<GridItem<'a>>),
    Empty(EmptyState),
}

impl<'a> Grid<'a> {
    /// Cards in display order.
    pub fn cards(&self) -> Vec<&'a NoteRecord> {
        match self {
            Grid::Items(items) => items
                .iter()
                .filter_map(|item| match item {
                    GridItem::Card(r) => Some(*r),
                    GridItem::Sponsor { .. } => None,
                })
                .collect(),
            Grid::Empty(_) => Vec::new(),
        }
    }

    pub fn sponsor_blocks(&self) -> usize {
        match self {
            Grid::Items(items) => items
                .iter()
                .filter(|item| matches!(item, GridItem::Sponsor { .. }))
                .count(),
            Grid::Empty(_) => 0,
        }
    }
}

/// Number of sponsor blocks for `cards` visible cards.
pub fn sponsor_count(cards: usize) -> usize {
    let trailing = usize::from(cards > 0 && cards < AD_FREQUENCY);
    cards / AD_FREQUENCY + trailing
}

/// Lays out `visible` records, interleaving sponsor slots.
pub fn layout<'a>(
    visible: &[&'a NoteRecord],
    sponsors: &'a SponsorBoard,
    category: &CategoryFilter,
) -> Grid<'a> {
    if visible.is_empty() {
        return Grid::Empty(EmptyState::for_category(category));
    }

    let sponsor = |n: usize| {
        let slot = grid_slot_name(n);
        let ad = sponsors.resolve_grid(&slot);
        GridItem::Sponsor { slot, ad }
    };

    let mut items = Vec::with_capacity(visible.len() + sponsor_count(visible.len()));
    let mut next_slot = 1;
    for (i, record) in visible.iter().enumerate() {
        items.push(GridItem::Card(record));
        if (i + 1) % AD_FREQUENCY == 0 {
            items.push(sponsor(next_slot));
            next_slot += 1;
        }
    }
    if visible.len() < AD_FREQUENCY {
        items.push(sponsor(1));
    }

    Grid::Items(items)
}
