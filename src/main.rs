use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ecoroute::emissions;
use ecoroute::fetcher::{FetchOptions, RouteFetcher};
use ecoroute::geo::GeoPoint;
use ecoroute::osrm::{OsrmClient, OsrmConfig};
use ecoroute::route::{Profile, format_duration};
use ecoroute::session::NavigationSession;
use ecoroute::traits::PositionSink;

/// Delay between animation ticks in the terminal.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Fetch routes between two points and walk a marker along one of them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, allow_negative_numbers = true)]
struct Args {
    /// Start latitude
    start_lat: f64,

    /// Start longitude
    start_lon: f64,

    /// End latitude
    end_lat: f64,

    /// End longitude
    end_lon: f64,

    /// Travel profiles to request, comma separated
    #[arg(long, value_delimiter = ',', value_parser = parse_profile, default_values_t = Profile::ALL.to_vec())]
    profiles: Vec<Profile>,

    /// Stop after the as-provided and swapped passes
    #[arg(long)]
    two_pass: bool,

    /// [Optional] Index of the alternative to select
    #[arg(long)]
    select: Option<usize>,

    /// Animate the marker along the selected route
    #[arg(long)]
    animate: bool,

    /// Animation speed multiplier
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// [Optional] Print a straight-line CO2 estimate at this many g/km
    #[arg(long)]
    co2: Option<f64>,

    /// Print every request the fetcher made
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn start(&self) -> GeoPoint {
        GeoPoint::new(self.start_lat, self.start_lon)
    }

    fn end(&self) -> GeoPoint {
        GeoPoint::new(self.end_lat, self.end_lon)
    }
}

fn parse_profile(name: &str) -> Result<Profile, String> {
    Profile::parse(name).ok_or_else(|| format!("unknown profile: {name}"))
}

struct TerminalSink;

impl PositionSink for TerminalSink {
    fn marker_moved(&mut self, position: GeoPoint) {
        println!("  marker {:.5}, {:.5}", position.lat, position.lon);
    }

    fn arrived(&mut self, position: GeoPoint) {
        println!("  arrived {:.5}, {:.5}", position.lat, position.lon);
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let (start, end) = (args.start(), args.end());

    if let Some(grams_per_km) = args.co2 {
        let estimate = emissions::estimate(start, end, Some(grams_per_km));
        println!("Distance: {:.2} km", estimate.distance_km);
        println!("Emission factor: {} g/km", estimate.grams_per_km);
        println!("Total CO2 emissions: {:.1} g", estimate.total_grams);
    }

    let client = match OsrmClient::new(OsrmConfig::from_env()) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Failed to create OSRM client: {err}");
            return ExitCode::FAILURE;
        }
    };
    let fetcher = RouteFetcher::from_client(client);

    let mut options = FetchOptions::default().with_profiles(&args.profiles);
    if args.two_pass {
        options = options.two_pass();
    }
    let outcome = fetcher.fetch_with(start, end, &options);

    if args.debug {
        for line in outcome.diagnostics.render() {
            eprintln!("{line}");
        }
    }

    if outcome.routes.is_empty() {
        let line = emissions::straight_line(start, end);
        println!("No routes available — straight line fallback:");
        for point in line.points() {
            println!("  {:.5}, {:.5}", point.lat, point.lon);
        }
        return ExitCode::SUCCESS;
    }

    println!("Estimated travel times (primary route):");
    for profile in &args.profiles {
        match outcome.routes.primary(*profile) {
            Some(route) => println!(
                "  {}: {}, {:.2} km",
                profile.label(),
                format_duration(route.duration_seconds),
                route.distance_km()
            ),
            None => println!("  {}: -", profile.label()),
        }
    }

    let mut session = NavigationSession::new(outcome.routes);
    let mut sink = TerminalSink;
    if let Some(index) = args.select {
        if !session.select(index, &mut sink) {
            eprintln!("No route #{index}; keeping the first route selected");
        }
    }

    println!("Alternatives:");
    for (label, selected) in session.selection().labels() {
        println!("  {} {}", if selected { "*" } else { " " }, label);
    }
    if let Some(route) = session.selected() {
        println!("{}", route.selected_caption());
    }

    if args.animate {
        session.set_speed(args.speed);
        if !session.play() {
            eprintln!("Selected route has no geometry to animate");
            return ExitCode::SUCCESS;
        }
        while session.animation().is_running() {
            session.tick(&mut sink);
            std::thread::sleep(FRAME_INTERVAL);
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates_and_flags() {
        let parsed = Args::try_parse_from([
            "ecoroute", "12.97", "77.59", "13.08", "80.27", "--profiles", "driving,walking", "--co2",
            "140", "--animate", "--speed", "2.5",
        ])
        .unwrap();
        assert_eq!(parsed.start(), GeoPoint::new(12.97, 77.59));
        assert_eq!(parsed.end(), GeoPoint::new(13.08, 80.27));
        assert_eq!(parsed.profiles, vec![Profile::Driving, Profile::Walking]);
        assert_eq!(parsed.co2, Some(140.0));
        assert!(parsed.animate);
        assert_eq!(parsed.speed, 2.5);
    }

    #[test]
    fn test_parse_defaults_and_negative_coordinates() {
        let parsed =
            Args::try_parse_from(["ecoroute", "-33.87", "151.21", "-37.81", "-144.96"]).unwrap();
        assert_eq!(parsed.start(), GeoPoint::new(-33.87, 151.21));
        assert_eq!(parsed.end(), GeoPoint::new(-37.81, -144.96));
        assert_eq!(parsed.profiles, Profile::ALL.to_vec());
        assert_eq!(parsed.speed, 1.0);
        assert_eq!(parsed.select, None);
        assert!(!parsed.two_pass && !parsed.debug);
    }

    #[test]
    fn test_parse_rejects_missing_coordinates() {
        assert!(Args::try_parse_from(["ecoroute", "12.97", "77.59"]).is_err());
        assert!(Args::try_parse_from(["ecoroute", "1", "2", "3", "north"]).is_err());
        assert!(
            Args::try_parse_from(["ecoroute", "1", "2", "3", "4", "--profiles", "flying"]).is_err()
        );
    }
}
