//! Static category registry
//!
//! Categories are fixed for the lifetime of the process. Tasks keep only a
//! [`CategoryId`]; names and colors are resolved here at render time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a registry category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u32);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category label with its display colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: &'static str,
    /// Badge color token
    pub display_color: &'static str,
    /// Fill color used by charts
    pub chart_color: &'static str,
}

/// All categories, in display order.
pub static CATEGORIES: &[Category] = &[
    Category {
        id: CategoryId(1),
        name: "Práca",
        display_color: "bg-blue-500",
        chart_color: "#3B82F6",
    },
    Category {
        id: CategoryId(2),
        name: "Osobné",
        display_color: "bg-green-500",
        chart_color: "#22C55E",
    },
    Category {
        id: CategoryId(3),
        name: "Nákupy",
        display_color: "bg-purple-500",
        chart_color: "#A855F7",
    },
    Category {
        id: CategoryId(4),
        name: "Projekt",
        display_color: "bg-yellow-500",
        chart_color: "#EAB308",
    },
];

/// Returns the full registry.
pub fn all() -> &'static [Category] {
    CATEGORIES
}

/// Looks up a category by id.
pub fn find(id: CategoryId) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

impl CategoryId {
    /// Resolve this id against the registry
    pub fn resolve(self) -> Option<&'static Category> {
        find(self)
    }
}
