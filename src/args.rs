use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";
pub const DEFAULT_PORT: u16 = 8070;

// https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template
const APPLET_TEMPLATE: &str = "\
{before-help}
{about-with-newline}
{usage-heading} {usage}

{all-args}
{after-help}";

const EX1: &str = r#" launch-dashboard"#;
const EX2: &str = r#" launch-dashboard launches.parquet serve --port 9000"#;
const EX3: &str = r#" launch-dashboard spacex_launch_dash.csv desktop"#;

/// Command-line arguments for the launch dashboard.
#[derive(Parser, Debug, Clone)]
#[command(
    // Read from `Cargo.toml`.
    author, version, about,
    long_about = None,
    next_line_help = true,
    help_template = APPLET_TEMPLATE,
    after_help = format!("EXAMPLES:\n{EX1}\n{EX2}\n{EX3}")
)]
pub struct Arguments {
    /// Launch records file (CSV, JSON or Parquet).
    #[arg(
        value_name = "FILE_PATH",
        env = "LAUNCH_DASHBOARD_DATA",
        default_value = DEFAULT_DATA_FILE,
        help = "Path to the launch records file (CSV/JSON/Parquet)",
        long_help = "Path to the launch records file.\n\
        Required columns: 'Launch Site', 'Payload Mass (kg)', 'class' (0/1)."
    )]
    pub path: PathBuf,

    /// Listener address, shared by the top level and the `serve` subcommand.
    #[command(flatten)]
    pub serve: ServeArgs,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// How the dashboard is presented.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Serve the single-page dashboard over HTTP (default).
    Serve,
    /// Open the dashboard in a native window.
    Desktop,
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(
        long,
        global = true,
        env = "LAUNCH_DASHBOARD_HOST",
        default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST)
    )]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(
        short,
        long,
        global = true,
        env = "LAUNCH_DASHBOARD_PORT",
        default_value_t = DEFAULT_PORT
    )]
    pub port: u16,
}

impl ServeArgs {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Arguments {
    /// Parse from `std::env::args`.
    pub fn build() -> Self {
        Self::parse()
    }

    /// Selected mode; no subcommand means `serve`.
    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or(Mode::Serve)
    }
}
