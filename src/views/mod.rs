// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Focusable views backing the demo shell.
//!
//! Each view implements the [`FocusView`](crate::focus::view::FocusView)
//! collaborator contract: it owns its cursor and visibility state, maps
//! forwarded control events to semantic events, and draws itself with
//! `ratatui`. Routing between views lives entirely in the focus router;
//! nothing in here changes focus.

mod button_row;
mod dialog;
mod list;
mod player;
mod shoveler;

pub(crate) use button_row::ButtonRowView;
pub(crate) use dialog::DialogView;
pub(crate) use list::CategoryListView;
pub(crate) use player::PlayerOverlayView;
pub(crate) use shoveler::{RowData, ShovelerView};

use std::cell::RefCell;
use std::rc::Rc;

use crate::focus::SubcategoryFactory;
use crate::focus::view::FocusView;
use crate::model::{Category, items_at_path};

/// Builds drill-down rows from the in-memory catalog.
pub(crate) struct CatalogFactory {
    catalog: Vec<Category>,
}

impl CatalogFactory {
    pub(crate) fn new(catalog: Vec<Category>) -> Self {
        Self { catalog }
    }
}

impl SubcategoryFactory for CatalogFactory {
    fn subcategory_view(&mut self, category: usize, path: &[usize]) -> Option<Box<dyn FocusView>> {
        let category = self.catalog.get(category)?;

        let (leaf, parents) = path.split_last()?;
        let parent_items = items_at_path(category, parents)?;
        let entry = parent_items.get(*leaf)?;

        let items = items_at_path(category, path)?;
        if items.is_empty() {
            return None;
        }

        let data = Rc::new(RefCell::new(RowData::from_items(&entry.title, items)));
        Some(Box::new(ShovelerView::new(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::sample_catalog;

    #[test]
    fn factory_builds_rows_for_nested_paths_only() {
        let mut factory = CatalogFactory::new(sample_catalog());

        // "Director's Cuts" in the Featured category has children.
        assert!(factory.subcategory_view(0, &[2]).is_some());
        assert!(factory.subcategory_view(0, &[2, 1]).is_some());

        // A playable leaf has none, and bogus indices have no view either.
        assert!(factory.subcategory_view(0, &[0]).is_none());
        assert!(factory.subcategory_view(9, &[0]).is_none());
        assert!(factory.subcategory_view(0, &[99]).is_none());
    }
}
