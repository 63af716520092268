//! Clap argument definitions for the `geoq` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "geoq")]
#[command(about = "Filtered geospatial search against Elasticsearch indices")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Spatial constraint flags for `geoq search`.
#[derive(Args, Debug, Clone, Default)]
pub struct SpatialArgs {
    /// Restrict results to within KM kilometers of a point; coordinates are
    /// lon,lat unless --mercator is set
    #[arg(long, value_name = "X,Y,KM")]
    pub near: Option<String>,

    /// Restrict results to a bounding box in map coordinates
    #[arg(long, value_name = "MINX,MINY,MAXX,MAXY", conflicts_with = "near")]
    pub bbox: Option<String>,

    /// Treat spatial coordinates as Web Mercator (EPSG:3857) meters
    #[arg(long)]
    pub mercator: bool,
}

/// Style flags for `geoq search`.
#[derive(Args, Debug, Clone, Default)]
pub struct StyleArgs {
    /// Classification method for result symbology; without it the field's
    /// default style from the index metadata applies
    #[arg(long, value_enum)]
    pub style: Option<StyleMethod>,

    /// Field driving the symbology [default: first output field]
    #[arg(long)]
    pub style_field: Option<String>,

    /// Ramp start color
    #[arg(long, default_value = "#ffffcc", value_name = "HEX")]
    pub color_start: String,

    /// Ramp end color
    #[arg(long, default_value = "#800026", value_name = "HEX")]
    pub color_end: String,

    /// Number of classes for graduated methods
    #[arg(long, default_value = "5")]
    pub classes: usize,
}

/// Classification methods exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StyleMethod {
    /// Equal-count classes.
    Quantile,
    /// Jenks natural breaks.
    Jenks,
    /// One class per distinct value.
    Categories,
}

/// Arguments for `geoq search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Index to search [default: panel.default_index from configuration]
    pub index: Option<String>,

    /// Output fields; the geometry field is always included
    #[arg(short = 'F', long = "field", value_name = "FIELD")]
    pub fields: Vec<String>,

    /// Thematic filter expression, e.g. 'area>=100' or 'type=a,b'
    /// (repeatable; one filter per field, later entries replace earlier ones)
    #[arg(short = 'f', long = "filter", value_name = "EXPR")]
    pub filters: Vec<String>,

    /// Keep filter entries but leave them out of the request
    #[arg(long)]
    pub no_filters: bool,

    #[command(flatten)]
    /// Spatial constraint flags.
    pub spatial: SpatialArgs,

    #[command(flatten)]
    /// Style flags.
    pub style: StyleArgs,

    /// Raw request body file ('-' for stdin), bypassing the guided builder
    #[arg(long, value_name = "FILE")]
    pub raw: Option<String>,

    /// Print the request body without executing it
    #[arg(long)]
    pub explain: bool,

    /// Write the result layer as GeoJSON to FILE ('-' for stdout)
    #[arg(long, value_name = "FILE")]
    pub geojson: Option<String>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `geoq fields`.
#[derive(Args, Debug, Clone)]
pub struct FieldsCommand {
    /// Index to describe
    pub index: String,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `geoq inspect`.
#[derive(Args, Debug, Clone)]
pub struct InspectCommand {
    /// Index the field belongs to
    pub index: String,

    /// Field to inspect; all filterable fields when omitted
    pub field: Option<String>,
}

/// Arguments for `geoq init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.geoq.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `geoq` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List searchable indices
    Indices {
        #[command(flatten)]
        /// Output formatting flags.
        output: OutputArgs,
    },

    /// List an index's fields and their kinds
    Fields(FieldsCommand),

    /// Show the filter control a field would render
    Inspect(InspectCommand),

    /// Build and execute a search, emitting the result layer
    #[command(after_help = "\
FILTER SYNTAX:
  field=value         Exact match (term)
  field=a,b,c         Membership (terms); keyword fields only
  field>=100          Numeric comparison (range); also <, <=, >
  field=\"a, quoted\"   Values with commas or spaces

SPATIAL:
  --near X,Y,KM                   Within KM kilometers of a point
  --bbox MINX,MINY,MAXX,MAXY      Within a rectangular extent
  --mercator                      Coordinates are EPSG:3857 meters

EXAMPLES:
  geoq search parcels -F area -f 'area>=100'
  geoq search parcels -f 'type=residential,commercial' --near -6.0,37.4,5
  geoq search parcels --raw request.json --explain
  geoq search parcels -F area --style quantile --classes 4 --geojson layer.geojson")]
    Search(SearchCommand),

    /// Initialize geoq configuration in current directory
    Init(InitCommand),

    /// Show configuration and backend status
    Status,
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
