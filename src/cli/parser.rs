use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for geotrack
/// GPS tracker backend: position log + geofence webhook alerts over SQLite
#[derive(Parser)]
#[command(
    name = "geotrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log GPS position reports and fire rate-limited webhook alerts when the device enters a configured region",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Run the HTTP ingest server
    Serve {
        /// Listen address (overrides listen_addr from the config file)
        #[arg(long, value_name = "HOST:PORT")]
        addr: Option<String>,
    },

    /// Ingest a single report from the command line (debugging aid)
    Ingest {
        /// Raw JSON request body
        body: Option<String>,

        /// Read the request body from a file instead
        #[arg(long = "file", value_name = "FILE")]
        file: Option<String>,
    },

    /// List or manage geofence regions
    Regions {
        /// Add a region instead of listing
        #[arg(long = "add", requires = "name")]
        add: bool,

        /// Region name (required with --add)
        #[arg(long = "name")]
        name: Option<String>,

        /// Center latitude
        #[arg(long = "lat", value_name = "LAT")]
        center_lat: Option<String>,

        /// Center longitude
        #[arg(long = "lon", value_name = "LON")]
        center_lon: Option<String>,

        /// Latitude tolerance (half-height of the bounding box)
        #[arg(long = "lat-tol", value_name = "DEG")]
        lat_tolerance: Option<String>,

        /// Longitude tolerance (half-width of the bounding box)
        #[arg(long = "lon-tol", value_name = "DEG")]
        lon_tolerance: Option<String>,

        /// Minimum interval between notifications, as hours:minutes
        #[arg(long = "grace", value_name = "H:M")]
        grace_period: Option<String>,

        /// Remaining notification budget
        #[arg(long = "sends", value_name = "N")]
        remaining_sends: Option<String>,

        /// Delete the region with the given id
        #[arg(long = "del", value_name = "ID")]
        del: Option<i64>,
    },

    /// Print the operational trace or the position log
    Log {
        #[arg(long = "print", help = "Print the operational trace table")]
        print: bool,

        #[arg(long = "positions", help = "Print recent position log entries")]
        positions: bool,

        #[arg(long = "limit", value_name = "N", help = "Limit for --positions")]
        limit: Option<usize>,
    },

    /// Export the position log
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f', help = "Overwrite the output file if it exists")]
        force: bool,
    },
}
