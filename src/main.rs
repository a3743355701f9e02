//! Solar twin entry point: CLI wiring and config-driven engine construction.

use std::process;

use tracing::{info, warn};

use solar_twin::cli::{self, CliOptions, Command, ScenarioSource};
use solar_twin::config::{ConfigError, ScenarioConfig};
use solar_twin::io::export::export_csv;
use solar_twin::sim::engine::Engine;
use solar_twin::sim::summary::RunSummary;
use solar_twin::telemetry::init_tracing;

fn load_scenario(source: &ScenarioSource) -> Result<ScenarioConfig, ConfigError> {
    match source {
        ScenarioSource::Toml(path) => ScenarioConfig::from_toml_file(path),
        ScenarioSource::Cosim(path) => ScenarioConfig::from_json_file(path),
        ScenarioSource::Preset(name) => ScenarioConfig::from_preset(name),
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    process::exit(1);
}

fn main() {
    init_tracing();

    let cli = match cli::parse_args() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            cli::print_usage();
            return;
        }
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    let scenario = load_scenario(&cli.source).unwrap_or_else(|e| fail(e));

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    for note in scenario.advisories() {
        warn!(field = %note.field, "{}", note.message);
    }

    #[cfg(feature = "tui")]
    if cli.tui {
        let name = match &cli.source {
            ScenarioSource::Preset(name) => name.as_str(),
            _ => "custom",
        };
        solar_twin::tui::run(name, scenario);
        return;
    }

    run_batch(&cli, scenario);
}

fn run_batch(cli: &CliOptions, scenario: ScenarioConfig) {
    let engine = Engine::new(
        scenario.clock(),
        scenario.irradiance_parameters(),
        scenario.panel_parameters(),
    )
    .unwrap_or_else(|e| fail(e));

    let result = engine.run();
    let summary = RunSummary::from_result(&result);
    info!(samples = result.len(), "run complete");

    if !cli.quiet {
        for s in &result {
            println!("{s}");
        }
        println!();
    }
    println!("{summary}");

    if let Some(ref path) = cli.telemetry_out {
        let columns = scenario.column_names(cli.qualified_columns);
        if let Err(e) = export_csv(&result, &columns, path) {
            fail(format!("error: failed to write CSV: {e}"));
        }
        info!(path = %path.display(), "telemetry written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(solar_twin::api::AppState {
            scenario,
            summary,
            result,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new()
            .unwrap_or_else(|e| fail(format!("error: failed to create tokio runtime: {e}")));
        if let Err(e) = rt.block_on(solar_twin::api::serve(state, addr)) {
            fail(format!("error: API server failed: {e}"));
        }
    }
}
