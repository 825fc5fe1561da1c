//! CLI command handlers.

use std::path::Path;
use std::process::ExitCode;

use super::output::{
    print_export_failure, print_export_summary, print_help, print_scan_summary,
    print_shielding_report, print_version,
};
use super::{Args, Command};
use crate::config::MissionConfig;
use crate::ephemeris::TabulatedEphemeris;
use crate::error::ShieldResult;
use crate::flux;
use crate::shielding::ShieldingModel;
use crate::trajectory::TrajectorySeries;

/// Main CLI entry point: dispatch to the handler for the parsed command.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Shield {
            data_file,
            days,
            records_out,
        } => run_shield(&data_file, days, records_out.as_deref()),
        Command::Export {
            config_path,
            spenvis_only,
            oem_only,
        } => run_export(&config_path, spenvis_only, oem_only),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Run the shielding pipeline against a flux table.
#[must_use]
pub fn run_shield(data_file: &Path, days: Option<f64>, records_out: Option<&Path>) -> ExitCode {
    let duration_days = days.unwrap_or(30.0);

    let model = match ShieldingModel::new(duration_days) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (records, summary) = match flux::load(data_file) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    print_scan_summary(data_file, &summary);

    let analysis = model.analyze(&records);
    print_shielding_report(duration_days, &analysis);

    if let Some(path) = records_out {
        if let Err(e) = std::fs::write(path, analysis.records_csv()) {
            eprintln!("Error writing record CSV: {e}");
            return ExitCode::FAILURE;
        }
        println!("Record sequence saved to '{}'", path.display());
    }

    ExitCode::SUCCESS
}

/// Run the trajectory exports for a mission configuration.
///
/// The two exports are independent: a failure in one is reported and
/// the other still runs; the exit code is nonzero if any export failed.
#[must_use]
pub fn run_export(config_path: &Path, spenvis_only: bool, oem_only: bool) -> ExitCode {
    let inputs = match load_export_inputs(config_path) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let (config, series, oracle) = inputs;
    let query = config.trajectory.frame_query();

    let mut failed = false;

    if !oem_only {
        let exporter = config.spenvis.exporter();
        match exporter.export_to_path(&series, &query, &oracle, &config.spenvis.output) {
            Ok(summary) => print_export_summary("SPENVIS", &config.spenvis.output, &summary),
            Err(e) => {
                print_export_failure("SPENVIS", &e);
                failed = true;
            }
        }
    }

    if !spenvis_only {
        let exporter = config.oem.exporter();
        match exporter.export_to_path(&series, &query, &oracle, &config.oem.output) {
            Ok(summary) => print_export_summary("OEM", &config.oem.output, &summary),
            Err(e) => {
                print_export_failure("OEM", &e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Load everything the export command needs from a mission config.
fn load_export_inputs(
    config_path: &Path,
) -> ShieldResult<(MissionConfig, TrajectorySeries, TabulatedEphemeris)> {
    let config = MissionConfig::load(config_path)?;
    let series = TrajectorySeries::load(&config.trajectory.states_file)?;

    let mut oracle = TabulatedEphemeris::new();
    for table in &config.ephemeris {
        let states = TrajectorySeries::load(&table.states_file)?;
        oracle.insert_table(table.target.clone(), table.observer.clone(), states);
    }

    Ok((config, series, oracle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_run_shield_success() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_file(dir.path(), "flux.txt", "header\n0.1 1e9\n1.0 1e4\n");
        let code = run_shield(&data, Some(30.0), None);
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_run_shield_missing_file() {
        let code = run_shield(Path::new("no_such_file.txt"), None, None);
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn test_run_shield_bad_duration() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_file(dir.path(), "flux.txt", "0.1 1e9\n");
        let code = run_shield(&data, Some(-1.0), None);
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn test_run_shield_writes_records_csv() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_file(dir.path(), "flux.txt", "0.1 1e9\n");
        let csv = dir.path().join("records.csv");
        let code = run_shield(&data, Some(30.0), Some(&csv));
        assert_eq!(code, ExitCode::SUCCESS);
        let text = std::fs::read_to_string(&csv).unwrap();
        assert!(text.starts_with("energy_mev,"));
    }

    #[test]
    fn test_run_export_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let states: String = (0..60)
            .map(|i| format!("{} 1000 2000 3000 1 2 3\n", i * 10))
            .collect();
        write_file(dir.path(), "states.txt", &states);
        let table: String = (0..60)
            .map(|i| format!("{} 1e6 2e6 3e6 10 20 30\n", i * 10))
            .collect();
        write_file(dir.path(), "gan_wrt_jup.txt", &table);

        let yaml = format!(
            r"
trajectory:
  states_file: {dir}/states.txt
ephemeris:
  - target: Ganymede
    observer: Jupiter
    states_file: {dir}/gan_wrt_jup.txt
spenvis:
  output: {dir}/upload.txt
oem:
  output: {dir}/orbiter.oem
",
            dir = dir.path().display()
        );
        let config = write_file(dir.path(), "mission.yaml", &yaml);

        let code = run_export(&config, false, false);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(dir.path().join("upload.txt").exists());
        assert!(dir.path().join("orbiter.oem").exists());
    }

    #[test]
    fn test_run_export_missing_config() {
        let code = run_export(Path::new("no_such_mission.yaml"), false, false);
        assert_eq!(code, ExitCode::FAILURE);
    }
}
