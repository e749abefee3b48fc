use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use artview_model::{BoundingBox, RegionKey};
use artview_region::CoordsChange;
use artview_transcript::TimeSource;

mod commands;

fn cli() -> Command {
    let artifact_arg = || {
        Arg::new("artifact")
            .long("artifact")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Artifact record as JSON")
    };
    let coord = |name: &'static str| {
        Arg::new(name)
            .long(name)
            .required(true)
            .allow_negative_numbers(true)
            .value_parser(value_parser!(f64))
    };

    Command::new("artview")
        .version(artview_core::VERSION)
        .about("Artifact review view: transcript sync, selection anchoring and region editing")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML view configuration"),
        )
        .subcommand(
            Command::new("transcript")
                .about("Show the transcript line for a playback time or scrubber frame")
                .arg(artifact_arg())
                .arg(
                    Arg::new("time")
                        .long("time")
                        .value_parser(value_parser!(f64))
                        .conflicts_with("frame")
                        .required_unless_present("frame")
                        .help("Playback position in seconds"),
                )
                .arg(
                    Arg::new("frame")
                        .long("frame")
                        .value_parser(value_parser!(u64))
                        .requires("frames")
                        .help("Scrubber frame index"),
                )
                .arg(
                    Arg::new("frames")
                        .long("frames")
                        .value_parser(value_parser!(u64))
                        .help("Number of scrubber frames"),
                ),
        )
        .subcommand(
            Command::new("regions")
                .about("List detected-object regions left to right")
                .arg(artifact_arg()),
        )
        .subcommand(
            Command::new("drag")
                .about("Evaluate a region drag gesture")
                .arg(artifact_arg())
                .arg(
                    Arg::new("id")
                        .long("id")
                        .help("Key of the region being redrawn"),
                )
                .arg(coord("x1"))
                .arg(coord("y1"))
                .arg(coord("x2"))
                .arg(coord("y2")),
        )
        .subcommand(
            Command::new("anchor")
                .about("Anchor a text selection to document offsets")
                .arg(
                    Arg::new("text")
                        .long("text")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Highlighted-text segments as JSON"),
                )
                .arg(
                    Arg::new("anchor")
                        .long("anchor")
                        .required(true)
                        .help("Selection anchor as NODE:OFFSET, NODE counting text nodes from 0"),
                )
                .arg(
                    Arg::new("focus")
                        .long("focus")
                        .required(true)
                        .help("Selection focus as NODE:OFFSET, NODE counting text nodes from 0"),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .action(ArgAction::SetTrue)
                        .help("Print JSON on one line"),
                ),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let config = commands::load_config(config_path(&matches))?;

    match matches.subcommand() {
        Some(("transcript", args)) => {
            let artifact = commands::load_artifact(path(args, "artifact"))?;
            let source = match args.get_one::<f64>("time") {
                Some(seconds) => TimeSource::playback(*seconds),
                None => TimeSource::frame(
                    args.get_one::<u64>("frame").copied().unwrap_or_default(),
                    args.get_one::<u64>("frames").copied().unwrap_or_default(),
                ),
            };
            println!("{}", commands::transcript(&artifact, source));
        }
        Some(("regions", args)) => {
            let artifact = commands::load_artifact(path(args, "artifact"))?;
            print!("{}", commands::regions(&artifact));
        }
        Some(("drag", args)) => {
            let artifact = commands::load_artifact(path(args, "artifact"))?;
            let coord = |name: &str| args.get_one::<f64>(name).copied().unwrap_or_default();
            let change = CoordsChange::new(
                args.get_one::<String>("id").map(|id| RegionKey::new(id.as_str())),
                BoundingBox::new(coord("x1"), coord("y1"), coord("x2"), coord("y2")),
            );
            let outcome = commands::drag(&artifact, &change, &config);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Some(("anchor", args)) => {
            let segments = commands::load_segments(path(args, "text"))?;
            let boundary = |name: &str| {
                commands::parse_boundary(args.get_one::<String>(name).map_or("", String::as_str))
            };
            let outcome = commands::anchor(&segments, boundary("anchor")?, boundary("focus")?, &config)?;
            let json = if args.get_flag("compact") {
                serde_json::to_string(&outcome)?
            } else {
                serde_json::to_string_pretty(&outcome)?
            };
            println!("{json}");
        }
        _ => unreachable!("subcommand_required"),
    }

    Ok(())
}

/// `--config`, given before or after the subcommand
fn config_path(matches: &ArgMatches) -> Option<&Path> {
    matches
        .subcommand()
        .and_then(|(_, args)| args.get_one::<PathBuf>("config"))
        .or_else(|| matches.get_one::<PathBuf>("config"))
        .map(PathBuf::as_path)
}

fn path<'a>(args: &'a ArgMatches, name: &str) -> &'a Path {
    args.get_one::<PathBuf>(name)
        .map_or_else(|| Path::new(""), PathBuf::as_path)
}
