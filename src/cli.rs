//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

/// Where the scenario comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioSource {
    /// TOML scenario file.
    Toml(PathBuf),
    /// Co-simulation JSON document.
    Cosim(PathBuf),
    /// Built-in preset name.
    Preset(String),
}

/// Parsed CLI arguments.
#[derive(Debug)]
pub struct CliOptions {
    /// Scenario source (defaults to the `default` preset).
    pub source: ScenarioSource,
    /// Optional CSV output path.
    pub telemetry_out: Option<PathBuf>,
    /// Embed instance and model names in CSV column labels.
    pub qualified_columns: bool,
    /// Suppress per-sample output lines.
    pub quiet: bool,
    /// Start the REST API after the run.
    #[cfg(feature = "api")]
    pub serve: bool,
    /// REST API port.
    #[cfg(feature = "api")]
    pub port: u16,
    /// Launch the terminal plot instead of a batch run.
    #[cfg(feature = "tui")]
    pub tui: bool,
}

/// Outcome of argument parsing.
#[derive(Debug)]
pub enum Command {
    /// Run with the given options.
    Run(CliOptions),
    /// Print usage and exit successfully.
    Help,
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a message describing the first invalid argument.
pub fn parse_args() -> Result<Command, String> {
    parse_args_from(env::args().skip(1).collect())
}

/// Parses an explicit argument list (without the program name).
///
/// # Errors
///
/// Returns a message describing the first invalid argument.
pub fn parse_args_from(args: Vec<String>) -> Result<Command, String> {
    let mut i = 0usize;
    let mut source: Option<ScenarioSource> = None;
    let mut telemetry_out = None;
    let mut qualified_columns = false;
    let mut quiet = false;
    #[cfg(feature = "api")]
    let mut serve = false;
    #[cfg(feature = "api")]
    let mut port = 3000u16;
    #[cfg(feature = "tui")]
    let mut tui = false;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                set_source(&mut source, ScenarioSource::Toml(PathBuf::from(path)))?;
            }
            "--cosim" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --cosim (expected a JSON file path)")?;
                set_source(&mut source, ScenarioSource::Cosim(PathBuf::from(path)))?;
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                set_source(&mut source, ScenarioSource::Preset(name.to_string()))?;
            }
            "--telemetry-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --telemetry-out (expected a file path)",
                )?;
                if telemetry_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--telemetry-out provided more than once".to_string());
                }
            }
            "--qualified-columns" => qualified_columns = true,
            "--quiet" | "-q" => quiet = true,
            #[cfg(feature = "api")]
            "--serve" => serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
            }
            #[cfg(feature = "tui")]
            "--tui" => tui = true,
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(Command::Run(CliOptions {
        source: source.unwrap_or_else(|| ScenarioSource::Preset("default".to_string())),
        telemetry_out,
        qualified_columns,
        quiet,
        #[cfg(feature = "api")]
        serve,
        #[cfg(feature = "api")]
        port,
        #[cfg(feature = "tui")]
        tui,
    }))
}

fn set_source(slot: &mut Option<ScenarioSource>, value: ScenarioSource) -> Result<(), String> {
    if slot.replace(value).is_some() {
        return Err(
            "arguments `--scenario`, `--cosim` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }
    Ok(())
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

/// Prints usage to stderr.
pub fn print_usage() {
    eprintln!("solar-twin: solar panel digital twin simulator");
    eprintln!();
    eprintln!("Usage: solar-twin [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --cosim <path>           Load scenario from a co-simulation JSON document");
    eprintln!("  --preset <name>          Use a built-in preset (default, overcast, long_day, large_array)");
    eprintln!("  --telemetry-out <path>   Export samples to CSV");
    eprintln!("  --qualified-columns      Use instance-qualified CSV column names");
    eprintln!("  --quiet, -q              Only print the run summary");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after simulation");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Replay the run as live terminal charts");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario, --cosim or --preset is given, the default preset is used.");
}
