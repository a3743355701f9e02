use std::process::Command;

#[derive(Debug)]
struct Summary {
    samples: f64,
    peak_power_w: f64,
    energy_wh: f64,
}

#[test]
fn scenario_files_run_via_cli_and_produce_distinct_yields() {
    let default = run_and_parse_summary(&["--scenario", "scenarios/default.toml"]);
    let overcast = run_and_parse_summary(&["--scenario", "scenarios/overcast.toml"]);
    let large = run_and_parse_summary(&["--scenario", "scenarios/large_array.toml"]);

    assert_eq!(default.samples, 1441.0);
    assert_eq!(large.samples, 289.0);

    assert!(
        (default.peak_power_w - 160.0).abs() < 0.01,
        "expected 160 W peak for the default day, got {:.3}",
        default.peak_power_w
    );

    assert!(
        overcast.energy_wh < default.energy_wh,
        "expected overcast to yield less: default={:.3}, overcast={:.3}",
        default.energy_wh,
        overcast.energy_wh
    );

    assert!(
        large.energy_wh > 5.0 * default.energy_wh,
        "expected the large array to yield far more: default={:.3}, large={:.3}",
        default.energy_wh,
        large.energy_wh
    );
}

#[test]
fn cosim_document_and_default_preset_agree() {
    let cosim = run_and_parse_summary(&["--cosim", "scenarios/solar_panel_cosim.json"]);
    let preset = run_and_parse_summary(&["--preset", "default"]);

    assert_eq!(cosim.samples, preset.samples);
    assert_eq!(cosim.peak_power_w, preset.peak_power_w);
    assert_eq!(cosim.energy_wh, preset.energy_wh);
}

#[test]
fn unknown_preset_exits_with_failure() {
    let output = Command::new(env!("CARGO_BIN_EXE_solar-twin"))
        .args(["--preset", "midnight_sun"])
        .output()
        .expect("solar-twin process should run");
    assert!(!output.status.success());
}

fn run_and_parse_summary(args: &[&str]) -> Summary {
    let output = Command::new(env!("CARGO_BIN_EXE_solar-twin"))
        .args(args)
        .arg("-q")
        .output()
        .expect("solar-twin process should run");

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    Summary {
        samples: parse_metric(&stdout, "Samples:", ""),
        peak_power_w: parse_metric(&stdout, "Peak power:", "W"),
        energy_wh: parse_metric(&stdout, "Energy yield:", "Wh"),
    }
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing summary line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid summary format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from summary line `{line}`"))
}
