//! One query session: fetched routes, the selection, and the marker.

use crate::animation::{AnimationController, AnimationStatus, TickOutcome};
use crate::route::{Route, RouteSet};
use crate::selection::SelectionState;
use crate::traits::PositionSink;

/// Keeps the animation bound to whichever route is selected.
///
/// Changing the selection always stops playback and rewinds the marker to
/// the newly selected route's first coordinate.
#[derive(Debug, Clone, Default)]
pub struct NavigationSession {
    selection: SelectionState,
    animation: AnimationController,
}

impl NavigationSession {
    pub fn new(routes: RouteSet) -> Self {
        let selection = SelectionState::initialize(routes);
        let mut animation = AnimationController::new();
        if let Some(route) = selection.selected() {
            animation.load(route.coordinates.points());
        }
        Self {
            selection,
            animation,
        }
    }

    /// Selects route `index`. Out-of-range indices change nothing.
    ///
    /// On a valid index the animation is stopped, reloaded with the new
    /// route and the marker snapped to its first coordinate.
    pub fn select(&mut self, index: usize, sink: &mut impl PositionSink) -> bool {
        if index >= self.selection.routes().len() {
            return false;
        }

        self.selection = std::mem::take(&mut self.selection).select(index);
        let first = self
            .selection
            .selected()
            .and_then(|route| self.animation.load(route.coordinates.points()));
        if let Some(first) = first {
            sink.marker_moved(first);
        }
        true
    }

    /// Starts or resumes playback of the selected route.
    pub fn play(&mut self) -> bool {
        self.animation.play()
    }

    pub fn pause(&mut self) {
        self.animation.pause();
    }

    pub fn set_speed(&mut self, multiplier: f64) -> f64 {
        self.animation.set_speed(multiplier)
    }

    pub fn tick(&mut self, sink: &mut impl PositionSink) -> TickOutcome {
        self.animation.tick(sink)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected(&self) -> Option<&Route> {
        self.selection.selected()
    }

    pub fn animation(&self) -> &AnimationController {
        &self.animation
    }

    pub fn status(&self) -> AnimationStatus {
        self.animation.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::polyline::Polyline;
    use crate::route::Profile;

    fn route(index: usize, base: f64, points: usize) -> Route {
        let coords = (0..points)
            .map(|i| GeoPoint::new(base + i as f64 * 0.01, base))
            .collect::<Vec<_>>();
        Route::new(Profile::Driving, index, 1_000.0, 60.0, Polyline::new(coords))
    }

    fn session() -> NavigationSession {
        NavigationSession::new(RouteSet::new(vec![route(0, 10.0, 6), route(1, 20.0, 4)]))
    }

    #[test]
    fn test_new_loads_first_route() {
        let session = session();
        assert_eq!(session.selection().selected_index(), Some(0));
        assert_eq!(session.status(), AnimationStatus::Idle);
        assert_eq!(session.animation().coordinates().len(), 6);
    }

    #[test]
    fn test_select_while_running_resets() {
        let mut session = session();
        let mut sink: Vec<GeoPoint> = Vec::new();
        assert!(session.play());
        session.tick(&mut sink);
        session.tick(&mut sink);
        assert_eq!(session.animation().position(), 2);

        assert!(session.select(1, &mut sink));
        assert_eq!(session.status(), AnimationStatus::Idle);
        assert_eq!(session.animation().position(), 0);
        assert_eq!(session.animation().coordinates().len(), 4);
        assert_eq!(sink.last(), Some(&GeoPoint::new(20.0, 20.0)));
    }

    #[test]
    fn test_select_out_of_range_keeps_animation() {
        let mut session = session();
        let mut sink: Vec<GeoPoint> = Vec::new();
        session.play();
        session.tick(&mut sink);

        assert!(!session.select(5, &mut sink));
        assert_eq!(session.selection().selected_index(), Some(0));
        assert!(session.animation().is_running());
        assert_eq!(session.animation().position(), 1);
    }

    #[test]
    fn test_empty_session_cannot_play() {
        let mut session = NavigationSession::new(RouteSet::default());
        assert!(!session.selection().is_active());
        assert!(!session.play());
        assert_eq!(session.tick(&mut Vec::<GeoPoint>::new()), TickOutcome::Inactive);
    }

    #[test]
    fn test_select_route_without_geometry() {
        let empty = Route::new(Profile::Walking, 0, 0.0, 0.0, Polyline::default());
        let mut session = NavigationSession::new(RouteSet::new(vec![route(0, 1.0, 3), empty]));
        let mut sink: Vec<GeoPoint> = Vec::new();

        assert!(session.select(1, &mut sink));
        assert!(sink.is_empty());
        assert!(!session.play());
    }
}
