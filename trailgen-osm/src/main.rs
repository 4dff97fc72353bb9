use clap::{value_t, App, AppSettings, Arg, ArgMatches, SubCommand};
use log::{error, info};
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;
use trailgen::export::route_to_gpx;
use trailgen::generator::{generate_routes_with, RouteRequest, Strategy, DEFAULT_MAX_ATTEMPTS};
use trailgen::graph_impl::SpatialGraph;
use trailgen::spatial::{from_lat_lon, Position};
use trailgen::waypoint::match_waypoint;
use trailgen_osm::{import_osm_pbf, load_graph, save_graph, Area, ImportOptions, WayFilter};

// Search radius of the spatial index when snapping waypoints
const SNAP_RADIUS_M: f64 = 500.0;

fn parse_lat_lon(s: &str) -> Result<Position, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(format!("Expected 'lat,lon', got '{}'", s));
    }
    let lat: f64 = parts[0]
        .parse()
        .map_err(|_| format!("Invalid latitude '{}'", parts[0]))?;
    let lon: f64 = parts[1]
        .parse()
        .map_err(|_| format!("Invalid longitude '{}'", parts[1]))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(format!("Coordinates out of range: {}", s));
    }
    Ok(from_lat_lon(lat, lon))
}

fn run_import(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let pbf_path = value_t!(matches, "pbf", String)?;
    let out_graph = value_t!(matches, "out", String)?;

    let filter = if matches.is_present("trails") {
        WayFilter::Trails
    } else {
        WayFilter::Walkable
    };
    let area = match matches.value_of("around") {
        Some(around) => Some(Area {
            center: parse_lat_lon(around)?,
            radius_m: value_t!(matches, "radius", f64)?,
        }),
        None => None,
    };

    let load_timer = Instant::now();
    let graph = import_osm_pbf(&pbf_path, &ImportOptions { filter, area })?;
    println!(
        "Loaded graph with {} nodes and {} edges in {:.2} seconds",
        graph.number_of_nodes(),
        graph.number_of_edges(),
        load_timer.elapsed().as_secs_f32()
    );
    graph.log_stats();

    save_graph(&graph, &out_graph)?;
    info!("Saved graph to {}", out_graph);
    Ok(())
}

fn run_routes(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let graph_path = value_t!(matches, "graph", String)?;
    let start = parse_lat_lon(&value_t!(matches, "start", String)?)?;
    let end = match matches.value_of("end") {
        Some(end) => Some(parse_lat_lon(end)?),
        None => None,
    };
    let distance = value_t!(matches, "distance", f64)?;
    let tolerance = value_t!(matches, "tolerance", f64)?;
    let alternatives = value_t!(matches, "alternatives", usize)?;
    let out_dir = value_t!(matches, "out-dir", String)?;
    let strategy = if matches.is_present("sampling") {
        let seed = match matches.value_of("seed") {
            Some(_) => Some(value_t!(matches, "seed", u64)?),
            None => None,
        };
        Strategy::Sampling {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed,
        }
    } else {
        Strategy::default()
    };

    let load_timer = Instant::now();
    let graph = SpatialGraph::new(load_graph(&graph_path)?);
    info!(
        "Loaded graph with {} nodes and {} edges in {:.2} seconds",
        graph.inner().number_of_nodes(),
        graph.inner().number_of_edges(),
        load_timer.elapsed().as_secs_f32()
    );

    let snapped_start = match_waypoint(&graph, &start, SNAP_RADIUS_M)
        .ok_or("Graph has no nodes to snap the start to")?;
    let snapped_end = match end {
        Some(end) => match_waypoint(&graph, &end, SNAP_RADIUS_M)
            .ok_or("Graph has no nodes to snap the end to")?,
        None => snapped_start,
    };
    info!("Snapped start {:?}, end {:?}", snapped_start, snapped_end);

    let request = RouteRequest::new(snapped_start.id, snapped_end.id, distance, tolerance)
        .with_alternatives(alternatives);
    let route_timer = Instant::now();
    let routes = generate_routes_with(graph.inner(), &request, &strategy);
    info!(
        "Generated {} routes in {:.2} seconds",
        routes.len(),
        route_timer.elapsed().as_secs_f32()
    );

    if routes.is_empty() {
        println!("No routes found. Try adjusting distance or tolerance.");
        return Ok(());
    }

    std::fs::create_dir_all(&out_dir)?;
    for (i, route) in routes.iter().enumerate() {
        let name = format!("Route {}", i + 1);
        let path = Path::new(&out_dir).join(format!("route_{}.gpx", i + 1));
        let file = BufWriter::new(File::create(&path)?);
        route_to_gpx(graph.inner(), &route.ids, Some(&name), file)?;
        println!(
            "{}: {:.2} km, {} nodes, saved to {}",
            name,
            route.length() / 1000.0,
            route.ids.len(),
            path.display()
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let matches = App::new("trailgen-osm")
        .about("Imports OpenStreetMap walking networks and generates running routes")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("import")
                .about("Builds a walking graph from an OSM .pbf extract")
                .arg(Arg::with_name("pbf").required(true))
                .arg(Arg::with_name("out").required(true))
                .arg(
                    Arg::with_name("trails")
                        .long("trails")
                        .help("Keep only paths, footways, tracks and similar trails"),
                )
                .arg(
                    Arg::with_name("around")
                        .long("around")
                        .takes_value(true)
                        .value_name("lat,lon")
                        .allow_hyphen_values(true)
                        .help("Keep only the network around this point"),
                )
                .arg(
                    Arg::with_name("radius")
                        .long("radius")
                        .takes_value(true)
                        .default_value("10000")
                        .help("Radius in meters used with --around"),
                ),
        )
        .subcommand(
            SubCommand::with_name("routes")
                .about("Generates routes of a given distance and writes them as GPX")
                .arg(Arg::with_name("graph").required(true))
                .arg(
                    Arg::with_name("start")
                        .long("start")
                        .takes_value(true)
                        .required(true)
                        .value_name("lat,lon")
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::with_name("end")
                        .long("end")
                        .takes_value(true)
                        .value_name("lat,lon")
                        .allow_hyphen_values(true)
                        .help("Defaults to the start, producing loops"),
                )
                .arg(
                    Arg::with_name("distance")
                        .long("distance")
                        .takes_value(true)
                        .default_value("3000")
                        .help("Target distance in meters"),
                )
                .arg(
                    Arg::with_name("tolerance")
                        .long("tolerance")
                        .takes_value(true)
                        .default_value("300")
                        .help("Allowed deviation from the target distance in meters"),
                )
                .arg(
                    Arg::with_name("alternatives")
                        .long("alternatives")
                        .takes_value(true)
                        .default_value("3"),
                )
                .arg(
                    Arg::with_name("out-dir")
                        .long("out-dir")
                        .takes_value(true)
                        .default_value("."),
                )
                .arg(
                    Arg::with_name("sampling")
                        .long("sampling")
                        .help("Pick random via-points instead of scanning by distance"),
                )
                .arg(
                    Arg::with_name("seed")
                        .long("seed")
                        .takes_value(true)
                        .requires("sampling"),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("import", Some(sub)) => run_import(sub),
        ("routes", Some(sub)) => run_routes(sub),
        _ => Ok(()),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
