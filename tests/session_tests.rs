//! End-to-end session tests
//!
//! Fetch through the scripted transport, hand the routes to a navigation
//! session, then select and animate.

mod fixtures;

use ecoroute::animation::{AnimationStatus, TickOutcome};
use ecoroute::fetcher::RouteFetcher;
use ecoroute::geo::GeoPoint;
use ecoroute::route::Profile;
use ecoroute::selection::RouteStyle;
use ecoroute::session::NavigationSession;
use ecoroute::traits::PositionSink;

use fixtures::{
    AS_PROVIDED_COORDS, BASE_URL, EMPTY_ROUTES, ONE_POINT_POLYLINE, ScriptedTransport,
    THREE_POINT_POLYLINE, end, geojson_body, is_request, ok, polyline_body, start,
};

/// Sink that keeps moves and arrivals apart.
#[derive(Default)]
struct RecordingSink {
    moves: Vec<GeoPoint>,
    arrivals: Vec<GeoPoint>,
}

impl PositionSink for RecordingSink {
    fn marker_moved(&mut self, position: GeoPoint) {
        self.moves.push(position);
    }

    fn arrived(&mut self, position: GeoPoint) {
        self.arrivals.push(position);
    }
}

fn fetched_session() -> NavigationSession {
    let transport = ScriptedTransport::new(|url| {
        if is_request(url, "driving", "polyline", AS_PROVIDED_COORDS) {
            ok(polyline_body(&[THREE_POINT_POLYLINE, ONE_POINT_POLYLINE]))
        } else if is_request(url, "walking", "geojson", AS_PROVIDED_COORDS) {
            ok(geojson_body(&[
                (77.25, 12.5),
                (77.3, 12.6),
                (77.4, 12.7),
                (77.5, 12.8),
                (80.5, 13.75),
            ]))
        } else {
            ok(EMPTY_ROUTES)
        }
    });
    let fetcher = RouteFetcher::new(transport, BASE_URL);
    let outcome = fetcher.fetch_routes(start(), end(), &[Profile::Driving, Profile::Walking]);
    assert_eq!(outcome.routes.len(), 3);
    NavigationSession::new(outcome.routes)
}

#[test]
fn first_route_selected_after_fetch() {
    let session = fetched_session();

    assert_eq!(session.selection().selected_index(), Some(0));
    assert_eq!(session.selection().style_for(0), RouteStyle::SELECTED);
    assert_eq!(session.selection().style_for(2), RouteStyle::DIMMED);

    let labels = session.selection().labels();
    assert_eq!(labels[0].0, "Driving #1 — 1.50 km / 5 min");
    assert_eq!(labels[1].0, "Driving #2 — 1.75 km / 6 min");
    assert_eq!(labels[2].0, "Walking #1 — 2.10 km / 8 min");
}

#[test]
fn animate_selected_route_to_arrival() {
    let mut session = fetched_session();
    let mut sink = RecordingSink::default();

    assert!(session.play());
    let mut ticks = 0;
    while session.animation().is_running() {
        session.tick(&mut sink);
        ticks += 1;
    }

    assert_eq!(ticks, 3);
    assert_eq!(sink.moves.len(), 2);
    assert_eq!(sink.arrivals, vec![GeoPoint::new(43.252, -126.453)]);
    assert_eq!(session.status(), AnimationStatus::Arrived);
    assert_eq!(session.tick(&mut sink), TickOutcome::Inactive);
}

#[test]
fn reselect_mid_animation_snaps_to_new_route() {
    let mut session = fetched_session();
    let mut sink = RecordingSink::default();

    session.play();
    session.tick(&mut sink);
    assert_eq!(session.animation().position(), 1);

    assert!(session.select(2, &mut sink));
    assert_eq!(session.status(), AnimationStatus::Idle);
    assert_eq!(session.animation().position(), 0);
    assert_eq!(sink.moves.last(), Some(&GeoPoint::new(12.5, 77.25)));
    assert_eq!(session.selected().map(|r| r.profile), Some(Profile::Walking));

    session.set_speed(2.0);
    session.play();
    assert_eq!(session.tick(&mut sink), TickOutcome::Moved(GeoPoint::new(12.7, 77.4)));
    assert_eq!(session.tick(&mut sink), TickOutcome::Moved(GeoPoint::new(13.75, 80.5)));
    assert_eq!(
        session.tick(&mut sink),
        TickOutcome::Arrived(GeoPoint::new(13.75, 80.5))
    );
}

#[test]
fn pause_then_resume_continues() {
    let mut session = fetched_session();
    let mut sink = RecordingSink::default();
    session.select(2, &mut sink);

    session.play();
    session.tick(&mut sink);
    session.pause();
    assert_eq!(session.tick(&mut sink), TickOutcome::Inactive);
    assert_eq!(session.animation().position(), 1);

    assert!(session.play());
    assert_eq!(session.tick(&mut sink), TickOutcome::Moved(GeoPoint::new(12.7, 77.4)));
}

#[test]
fn out_of_range_selection_is_ignored() {
    let mut session = fetched_session();
    let mut sink = RecordingSink::default();

    assert!(!session.select(3, &mut sink));
    assert_eq!(session.selection().selected_index(), Some(0));
    assert!(sink.moves.is_empty());
}
