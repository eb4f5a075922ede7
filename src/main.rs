use anyhow::{Context, Result};
use clap::{
    builder::{PathBufValueParser, RangedU64ValueParser},
    value_parser, Arg, ArgMatches, Command,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info};
use vincenty_direct::{
    Bearing, DirectRequest, DirectResult, Distance, DistanceUnit, Ellipsoid, GeodesicPoint,
    VincentyDirect,
};

fn main() {
    let args = match parse_cmdline() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(args.log_level.as_str())
        .init();

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &CmdlineArgs) -> Result<()> {
    let start = args
        .start
        .parse::<GeodesicPoint>()
        .with_context(|| format!("invalid start point '{}'", args.start))?;
    let unit = DistanceUnit::from_tag(args.units.as_deref())?;
    let distance = Distance::new(args.distance, unit);
    let bearing = args
        .bearing
        .parse::<Bearing>()
        .with_context(|| format!("invalid bearing '{}'", args.bearing))?;
    let ellipsoid = select_ellipsoid(args)?;

    info!("start = {start}, distance = {distance}, bearing = {bearing}");

    let solver = VincentyDirect::default()
        .with_tolerance(args.tolerance)
        .with_max_iterations(args.max_iterations);
    let request = DirectRequest::new(start, distance.to_meters(), bearing.degrees())
        .with_ellipsoid(ellipsoid);
    let result = solver
        .solve(&request)
        .context("failed to compute the destination")?;

    info!("converged after {} iterations", result.iterations);
    println!("destination: {}", result.destination);
    println!("reverse azimuth: {:.6}\u{00B0}", result.reverse_azimuth);

    if let Some(path) = &args.kml {
        let file = File::create(path)
            .with_context(|| format!("failed to create '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_destination_kml(&mut writer, start, &result)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        writer.flush()?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

fn select_ellipsoid(args: &CmdlineArgs) -> Result<Ellipsoid> {
    match (args.semi_major, args.semi_minor) {
        (Some(a), Some(b)) => Ok(Ellipsoid::from_axes(a, b)?),
        _ => args
            .ellipsoid
            .parse::<Ellipsoid>()
            .context("failed to select the ellipsoid"),
    }
}

struct CmdlineArgs {
    start: String,
    distance: f64,
    units: Option<String>,
    bearing: String,
    ellipsoid: String,
    semi_major: Option<f64>,
    semi_minor: Option<f64>,
    tolerance: f64,
    max_iterations: usize,
    kml: Option<PathBuf>,
    log_level: String,
}

fn command() -> Command {
    Command::new("vincenty_direct")
        .version("0.1.0")
        .about("Computes the destination reached from a start point after travelling a distance on an initial bearing, using Vincenty's direct formula.")
        .arg(
            Arg::new("start")
                .long("start")
                .required(true)
                .allow_hyphen_values(true)
                .value_name("LAT, LON")
                .help("Start point in decimal degrees, e.g. \"25.761681, -80.191788\".")
        )
        .arg(
            Arg::new("distance")
                .long("distance")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .help("Distance to travel, in --units.")
        )
        .arg(
            Arg::new("units")
                .long("units")
                .value_name("UNITS")
                .help("miles, kilometers, meters or feet. Meters when omitted.")
        )
        .arg(
            Arg::new("bearing")
                .long("bearing")
                .required(true)
                .allow_hyphen_values(true)
                .value_name("BEARING")
                .help("Initial bearing in decimal degrees, or quadrant notation such as \"S 35 00 00 E\".")
        )
        .arg(
            Arg::new("ellipsoid")
                .long("ellipsoid")
                .default_value("wgs84")
                .help("Named ellipsoid: wgs84, grs80, intl or clrk66.")
        )
        .arg(
            Arg::new("semi_major")
                .long("semi-major")
                .value_parser(value_parser!(f64))
                .requires("semi_minor")
                .help("Semi-major axis in meters; overrides --ellipsoid.")
        )
        .arg(
            Arg::new("semi_minor")
                .long("semi-minor")
                .value_parser(value_parser!(f64))
                .requires("semi_major")
                .help("Semi-minor axis in meters; overrides --ellipsoid.")
        )
        .arg(
            Arg::new("tolerance")
                .long("tolerance")
                .default_value("1e-12")
                .value_parser(value_parser!(f64))
                .help("Convergence tolerance on sigma, in radians.")
        )
        .arg(
            Arg::new("max_iterations")
                .long("max-iterations")
                .default_value("200")
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
                .help("Refinement steps allowed before giving up.")
        )
        .arg(
            Arg::new("kml")
                .long("kml")
                .value_name("PATH")
                .value_parser(PathBufValueParser::new())
                .help("Also write the start and destination points to a KML file.")
        )
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .default_value("warn")
                .help("Tracing filter, e.g. info or vincenty_direct=trace.")
        )
}

fn parse_cmdline() -> Result<CmdlineArgs> {
    cmdline_args(&command().get_matches())
}

fn cmdline_args(m: &ArgMatches) -> Result<CmdlineArgs> {
    let required = |id: &str| {
        m.get_one::<String>(id)
            .cloned()
            .with_context(|| format!("missing --{id}"))
    };

    Ok(CmdlineArgs {
        start: required("start")?,
        distance: *m
            .get_one::<f64>("distance")
            .context("missing --distance")?,
        units: m.get_one::<String>("units").cloned(),
        bearing: required("bearing")?,
        ellipsoid: required("ellipsoid")?,
        semi_major: m.get_one::<f64>("semi_major").copied(),
        semi_minor: m.get_one::<f64>("semi_minor").copied(),
        tolerance: *m
            .get_one::<f64>("tolerance")
            .context("missing --tolerance")?,
        max_iterations: *m
            .get_one::<usize>("max_iterations")
            .context("missing --max-iterations")?,
        kml: m.get_one::<PathBuf>("kml").cloned(),
        log_level: required("log_level")?,
    })
}

fn write_destination_kml<W: Write>(
    writer: &mut W,
    start: GeodesicPoint,
    result: &DirectResult,
) -> std::io::Result<()> {
    let destination = result.destination;

    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(writer, r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#)?;
    writeln!(writer, "<Document>")?;
    writeln!(writer, "\t<name>Vincenty Direct</name>")?;
    writeln!(writer, "{}", get_style_kml())?;

    for (name, point) in [("Start", start), ("Destination", destination)] {
        writeln!(writer, "\t<Placemark>")?;
        writeln!(writer, "\t\t<name>{name}</name>")?;
        writeln!(writer, "\t\t<styleUrl>#direct-point</styleUrl>")?;
        writeln!(writer, "\t\t<Point>")?;
        writeln!(
            writer,
            "\t\t\t<coordinates>{},{}</coordinates>",
            point.longitude(),
            point.latitude()
        )?;
        writeln!(writer, "\t\t</Point>")?;
        writeln!(writer, "\t</Placemark>")?;
    }

    writeln!(writer, "\t<Placemark>")?;
    writeln!(
        writer,
        "\t\t<name>Reverse azimuth {:.6}</name>",
        result.reverse_azimuth
    )?;
    writeln!(writer, "\t\t<styleUrl>#direct-point</styleUrl>")?;
    writeln!(writer, "\t\t<LineString>")?;
    writeln!(writer, "\t\t\t<tessellate>1</tessellate>")?;
    writeln!(writer, "\t\t\t<coordinates>")?;
    writeln!(writer, "\t\t\t\t{},{}", start.longitude(), start.latitude())?;
    writeln!(
        writer,
        "\t\t\t\t{},{}",
        destination.longitude(),
        destination.latitude()
    )?;
    writeln!(writer, "\t\t\t</coordinates>")?;
    writeln!(writer, "\t\t</LineString>")?;
    writeln!(writer, "\t</Placemark>")?;

    writeln!(writer, "</Document>")?;
    writeln!(writer, "</kml>")?;

    Ok(())
}

fn get_style_kml() -> &'static str {
    // Color is ABGR, 00 = clear
    r#"	<Style id="direct-point">
		<IconStyle>
			<color>ffd18802</color>
			<scale>1</scale>
		</IconStyle>
		<LineStyle>
			<color>ff0000ff</color>
			<width>3</width>
		</LineStyle>
	</Style>"#
}
