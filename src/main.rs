#![deny(clippy::all)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use itertools::Itertools;
use log::{error, info, LevelFilter};
use structopt::StructOpt;

mod config;
mod decode;
mod error;
mod feature;
mod geo;
mod props;
mod row;
mod text;
mod xlsx;
mod zip_util;

use config::{Config, Language, VerticalUnit};
use error::Result;
use xlsx::Workbook;

#[derive(StructOpt)]
#[structopt(
    name = "obstacle_tool",
    about = "Converts an aeronautical obstacle list workbook to GeoJSON"
)]
struct Args {
    #[structopt(name = "input", parse(from_os_str))]
    input: PathBuf,
    /// Write the GeoJSON here instead of stdout
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    output: Option<PathBuf>,
    #[structopt(short = "s", long = "sheet", default_value = "Alle - All")]
    sheet: String,
    /// Sheet row holding the column names
    #[structopt(long = "header-row", default_value = "3")]
    header_row: u32,
    /// Elevation and height unit (m, ft)
    #[structopt(short = "u", long = "unit", default_value = "m")]
    unit: VerticalUnit,
    /// Label language (de, en)
    #[structopt(short = "l", long = "language", default_value = "en")]
    language: Language,
    /// Text that marks "Day marking" and "Lighted" as set (case-sensitive)
    #[structopt(long = "yes-marker", default_value = "yes")]
    yes_marker: String,
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn run(args: Args) -> Result<()> {
    let config = Config {
        unit: args.unit,
        language: args.language,
        yes_marker: args.yes_marker,
    };

    info!("Opening {}...", args.input.display());
    let mut workbook = Workbook::open(&args.input)?;

    info!("Reading sheet '{}'...", args.sheet);
    let sheet = workbook.sheet(&args.sheet).map_err(|e| {
        info!("Sheets in workbook: {}", workbook.sheet_names().join(", "));
        e
    })?;
    let rows = row::rows(&sheet, args.header_row)?;

    info!("Decoding {} rows...", rows.len());
    let fc = decode::decode_rows(&rows, &config)?;

    match args.output {
        Some(path) => {
            info!("Writing {}...", path.display());
            fc.to_writer(BufWriter::new(File::create(path)?))?;
        }
        None => {
            let stdout = io::stdout();
            fc.to_writer(stdout.lock())?;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::from_args();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
