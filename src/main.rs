use clap::{Arg, ArgAction, ArgMatches, Command};
use env_logger::Builder;
use geojson_shapes::{read_files, write_file, AxisOrder, ConversionOptions, LayerData};
use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};

fn init_logger(matches: &ArgMatches) {
    let mut builder = Builder::new();
    let filters = match (matches.get_one::<String>("loglevel"), env::var("RUST_LOG")) {
        (Some(level), _) => level.clone(),
        (None, Ok(rust_log)) => rust_log,
        (None, Err(_)) => "info".to_string(),
    };
    builder.parse_filters(&filters);
    builder.init();
}

fn options_from_args(matches: &ArgMatches) -> Result<ConversionOptions, Box<dyn Error>> {
    let mut options = match matches.get_one::<String>("config") {
        Some(path) => ConversionOptions::from_path(Path::new(path))?,
        None => ConversionOptions::default(),
    };
    if matches.get_flag("no-flip") {
        options.axis_order = AxisOrder::Native;
    }
    if matches.get_flag("detect-rectangles") {
        options.detect_rectangles = true;
    }
    Ok(options)
}

fn print_summary(layers: &[LayerData]) {
    for (index, layer) in layers.iter().enumerate() {
        let kinds: Vec<&str> = layer.meta.shape_type.iter().map(|k| k.as_str()).collect();
        let columns: Vec<&str> = layer.meta.properties.names().collect();
        println!("Layer {}: {} ({} records)", index, layer.kind(), layer.len());
        if !kinds.is_empty() {
            println!("  shape types: {}", kinds.join(", "));
        }
        if !columns.is_empty() {
            println!("  attributes: {}", columns.join(", "));
        }
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let options = options_from_args(matches)?;
    match matches.subcommand() {
        Some(("read", sub)) => {
            let files: Vec<PathBuf> = sub
                .get_many::<String>("files")
                .into_iter()
                .flatten()
                .map(PathBuf::from)
                .collect();
            match read_files(files.as_slice(), &options)? {
                Some(layers) => print_summary(&layers),
                None => eprintln!("Not a GeoJSON file, nothing read"),
            }
        }
        Some(("roundtrip", sub)) => {
            let (Some(input), Some(output)) = (sub.get_one::<String>("input"), sub.get_one::<String>("output")) else {
                return Err("input and output are required".into());
            };
            let Some(layers) = read_files(&[PathBuf::from(input)], &options)? else {
                return Err(format!("{} is not a GeoJSON file", input).into());
            };
            match write_file(Path::new(output), &layers, &options)? {
                Some(path) => println!("Written {} layers to {}", layers.len(), path.display()),
                None => return Err(format!("{} is not a GeoJSON file", output).into()),
            }
        }
        _ => return Err("unknown subcommand".into()),
    }
    Ok(())
}

fn main() {
    let matches = Command::new("GeoJSON Shapes")
        .version("0.1")
        .author("Jesper Fjellin")
        .about("Converts GeoJSON files to and from shape and points layers")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .global(true)
                .num_args(1)
                .help("JSON file with conversion options"),
        )
        .arg(
            Arg::new("no-flip")
                .long("no-flip")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Keep GeoJSON x/y order instead of swapping to row/column"),
        )
        .arg(
            Arg::new("detect-rectangles")
                .long("detect-rectangles")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Report axis-aligned four-corner polygons as rectangles"),
        )
        .arg(
            Arg::new("loglevel")
                .long("loglevel")
                .global(true)
                .num_args(1)
                .help("Log level (error, warn, info, debug, trace), overrides RUST_LOG"),
        )
        .subcommand(
            Command::new("read")
                .about("Print the layers found in GeoJSON files")
                .arg(
                    Arg::new("files")
                        .num_args(1..)
                        .required(true)
                        .help("Input GeoJSON files"),
                ),
        )
        .subcommand(
            Command::new("roundtrip")
                .about("Read a GeoJSON file and write its layers back out")
                .arg(Arg::new("input").required(true).help("Input GeoJSON file"))
                .arg(Arg::new("output").required(true).help("Output GeoJSON file")),
        )
        .get_matches();

    init_logger(&matches);

    if let Err(e) = run(&matches) {
        eprintln!("Error processing files: {}", e);
        std::process::exit(1);
    }
}
