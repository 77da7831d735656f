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

//! Domain models and the built-in demo catalog.
//!
//! Data-source adapters (feeds, pagination, retries) live outside this
//! application, so the demo shell ships a small static catalog of categories
//! and content items, including nested subcategories for drill-down
//! navigation.

/// What selecting a content item does.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ContentKind {
    Playable,
    Subcategory,
}

#[derive(Clone, Debug)]
pub(crate) struct ContentItem {
    pub(crate) title: String,
    pub(crate) kind: ContentKind,
    /// Playback length for playable items; zero for subcategories.
    pub(crate) duration_secs: u64,
    /// Nested row contents for subcategory items.
    pub(crate) children: Vec<ContentItem>,
}

impl ContentItem {
    pub(crate) fn playable(title: &str, duration_secs: u64) -> Self {
        Self {
            title: title.to_string(),
            kind: ContentKind::Playable,
            duration_secs,
            children: vec![],
        }
    }

    pub(crate) fn subcategory(title: &str, children: Vec<ContentItem>) -> Self {
        Self {
            title: title.to_string(),
            kind: ContentKind::Subcategory,
            duration_secs: 0,
            children,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Category {
    pub(crate) title: String,
    pub(crate) items: Vec<ContentItem>,
}

/// Follows a drill-down index path into a category, returning the item list
/// at that depth.
pub(crate) fn items_at_path<'a>(
    category: &'a Category,
    path: &[usize],
) -> Option<&'a [ContentItem]> {
    let mut items = category.items.as_slice();
    for index in path {
        items = items.get(*index)?.children.as_slice();
    }
    Some(items)
}

/// The static catalog backing the demo shell.
pub(crate) fn sample_catalog() -> Vec<Category> {
    vec![
        Category {
            title: "Featured".to_string(),
            items: vec![
                ContentItem::playable("Harbour Lights", 5400),
                ContentItem::playable("The Long Meadow", 6300),
                ContentItem::subcategory(
                    "Director's Cuts",
                    vec![
                        ContentItem::playable("Harbour Lights (Extended)", 7200),
                        ContentItem::subcategory(
                            "Commentaries",
                            vec![ContentItem::playable("Harbour Lights (Commentary)", 5400)],
                        ),
                    ],
                ),
                ContentItem::playable("Night Ferry", 4800),
            ],
        },
        Category {
            title: "Documentaries".to_string(),
            items: vec![
                ContentItem::playable("Tidelands", 3300),
                ContentItem::playable("City of Cranes", 2700),
                ContentItem::subcategory(
                    "Series: Coastlines",
                    vec![
                        ContentItem::playable("Coastlines: North", 2900),
                        ContentItem::playable("Coastlines: South", 3100),
                    ],
                ),
            ],
        },
        Category {
            title: "Shorts".to_string(),
            items: vec![
                ContentItem::playable("Paper Boats", 720),
                ContentItem::playable("The Allotment", 860),
                ContentItem::playable("Last Bus Home", 640),
            ],
        },
    ]
}
