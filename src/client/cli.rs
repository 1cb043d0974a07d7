use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "testbed-parser", about = "Testbed Configuration Parser")]
pub struct CliOptions {
    #[structopt(short, long, parse(from_os_str))]
    /// Path to the input configuration file (JSON or YAML)
    pub input: PathBuf,

    #[structopt(short, long, parse(from_os_str), default_value = "configuration.json")]
    /// Path the canonical configuration is written to
    pub output: PathBuf,

    #[structopt(short, long)]
    /// Output the canonical configuration to stdout instead of a file
    pub stdout: bool,

    #[structopt(short, long, default_value = "8080")]
    /// Port for server mode (used when no input file exists)
    pub port: u16,
}

pub fn parse_cli_args() -> CliOptions {
    CliOptions::from_args()
}
