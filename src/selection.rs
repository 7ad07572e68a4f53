//! Which of the fetched routes is currently selected.

use crate::route::{Route, RouteSet};

/// Line styling the presentation layer applies per route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStyle {
    pub weight: u8,
    pub opacity: f32,
}

impl RouteStyle {
    pub const SELECTED: RouteStyle = RouteStyle {
        weight: 8,
        opacity: 1.0,
    };
    pub const DIMMED: RouteStyle = RouteStyle {
        weight: 6,
        opacity: 0.4,
    };
}

/// Routes of one query session and the selected index.
///
/// `selected_index` is `Some` exactly when there is at least one route, and
/// then always in bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    routes: RouteSet,
    selected_index: Option<usize>,
}

impl SelectionState {
    /// Takes ownership of `routes`, selecting the first one if any.
    pub fn initialize(routes: RouteSet) -> Self {
        let selected_index = (!routes.is_empty()).then_some(0);
        Self {
            routes,
            selected_index,
        }
    }

    /// Selects `index`. Out-of-range indices leave the state unchanged.
    pub fn select(self, index: usize) -> Self {
        if index >= self.routes.len() {
            return self;
        }
        Self {
            selected_index: Some(index),
            ..self
        }
    }

    pub fn is_active(&self) -> bool {
        self.selected_index.is_some()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&Route> {
        self.selected_index.and_then(|index| self.routes.get(index))
    }

    pub fn routes(&self) -> &RouteSet {
        &self.routes
    }

    pub fn style_for(&self, index: usize) -> RouteStyle {
        if self.selected_index == Some(index) {
            RouteStyle::SELECTED
        } else {
            RouteStyle::DIMMED
        }
    }

    /// `(label, is_selected)` for every route, in order.
    pub fn labels(&self) -> Vec<(String, bool)> {
        self.routes
            .iter()
            .enumerate()
            .map(|(index, route)| (route.label(), self.selected_index == Some(index)))
            .collect()
    }
}
