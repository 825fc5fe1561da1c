//! SPENVIS coordinate-generator upload format.
//!
//! Fixed text block consumed by SPENVIS -> coordinate generator ->
//! spacecraft trajectories -> upload trajectory file. The banner, field
//! lines, column order, and decimal counts are part of the external
//! contract, not cosmetic; records are `JD(9dp), X(6dp), Y(6dp),
//! Z(6dp)` in km with a comma-space separator.

use std::io::Write;
use std::path::Path;

use crate::ephemeris::Ephemeris;
use crate::error::ShieldResult;
use crate::export::{julian_date, ExportSummary, FrameQuery};
use crate::trajectory::frame::compose;
use crate::trajectory::TrajectorySeries;

const BANNER: &str = "******************************************************************";

/// SPENVIS text exporter with its own downsampling stride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpenvisTextExporter {
    /// Comment line inside the top banner.
    pub banner_comment: String,
    /// `Title:` header field.
    pub title: String,
    /// `Planet:` header field.
    pub planet: String,
    /// Fixed-stride decimation factor; 6 turns a 10 s propagation step
    /// into the ~60 s effective step SPENVIS upload limits expect.
    pub stride: usize,
}

impl Default for SpenvisTextExporter {
    fn default() -> Self {
        Self {
            banner_comment: "Optimized Ganymede Orbiter Trajectory (60s step)".to_string(),
            title: "Ganymede Orbiter Analysis".to_string(),
            planet: "Jupiter".to_string(),
            stride: 6,
        }
    }
}

impl SpenvisTextExporter {
    /// Serialize the trajectory into the SPENVIS upload format.
    ///
    /// Downsamples by the exporter's stride, queries the oracle once per
    /// retained epoch, composes into the reference frame, and writes the
    /// full block to `writer`.
    ///
    /// # Errors
    ///
    /// Oracle and write failures propagate and abort this export only.
    pub fn export<W: Write>(
        &self,
        series: &TrajectorySeries,
        query: &FrameQuery,
        oracle: &dyn Ephemeris,
        writer: &mut W,
    ) -> ShieldResult<ExportSummary> {
        let retained = series.downsample(self.stride)?;

        writeln!(writer, "{BANNER}")?;
        writeln!(writer, "* {}", self.banner_comment)?;
        writeln!(writer, "{BANNER}")?;
        writeln!(writer, "Title: {}", self.title)?;
        writeln!(writer, "Planet: {}", self.planet)?;
        writeln!(writer, "Coordinates: PEI")?;
        writeln!(writer, "Columns: JDCT, X, Y, Z")?;
        writeln!(writer, "Format: CSV")?;
        writeln!(writer, "{BANNER}")?;
        writeln!(writer, "$$BEGIN")?;

        for state in &retained {
            let primary = query.primary_state(oracle, state.epoch_seconds)?;
            let composed = compose(state, &primary);
            let jd = julian_date(state.epoch_seconds);
            writeln!(
                writer,
                "{jd:.9}, {:.6}, {:.6}, {:.6}",
                composed.position_km[0], composed.position_km[1], composed.position_km[2]
            )?;
        }

        writeln!(writer, "$$END")?;

        Ok(ExportSummary {
            source_len: series.len(),
            retained_len: retained.len(),
        })
    }

    /// Export to a file, overwriting any previous contents.
    ///
    /// # Errors
    ///
    /// Same as [`Self::export`], plus file creation failures.
    pub fn export_to_path<P: AsRef<Path>>(
        &self,
        series: &TrajectorySeries,
        query: &FrameQuery,
        oracle: &dyn Ephemeris,
        path: P,
    ) -> ShieldResult<ExportSummary> {
        let mut file = std::fs::File::create(path)?;
        let summary = self.export(series, query, oracle, &mut file)?;
        file.flush()?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{Aberration, TabulatedEphemeris};
    use crate::trajectory::StateVector;

    fn fixture() -> (TrajectorySeries, FrameQuery, TabulatedEphemeris) {
        let states: Vec<StateVector> = (0..12)
            .map(|i| StateVector {
                epoch_seconds: i as f64 * 10.0,
                position_m: [1000.0 + i as f64, 2000.0, 3000.0],
                velocity_mps: [1.0, 2.0, 3.0],
            })
            .collect();
        let series = TrajectorySeries::from_states(states);

        let table: Vec<StateVector> = (0..20)
            .map(|i| {
                StateVector::from_state6(
                    i as f64 * 10.0,
                    [1_000_000.0, 2_000_000.0, 3_000_000.0, 10.0, 20.0, 30.0],
                )
            })
            .collect();
        let mut oracle = TabulatedEphemeris::new();
        oracle.insert_table("Ganymede", "Jupiter", TrajectorySeries::from_states(table));

        let query = FrameQuery {
            primary_body: "Ganymede".to_string(),
            reference_body: "Jupiter".to_string(),
            frame: "J2000".to_string(),
            aberration: Aberration::None,
        };
        (series, query, oracle)
    }

    #[test]
    fn test_header_block_exact() {
        let (series, query, oracle) = fixture();
        let mut buf = Vec::new();
        let exporter = SpenvisTextExporter::default();
        exporter.export(&series, &query, &oracle, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], BANNER);
        assert_eq!(lines[1], "* Optimized Ganymede Orbiter Trajectory (60s step)");
        assert_eq!(lines[2], BANNER);
        assert_eq!(lines[3], "Title: Ganymede Orbiter Analysis");
        assert_eq!(lines[4], "Planet: Jupiter");
        assert_eq!(lines[5], "Coordinates: PEI");
        assert_eq!(lines[6], "Columns: JDCT, X, Y, Z");
        assert_eq!(lines[7], "Format: CSV");
        assert_eq!(lines[8], BANNER);
        assert_eq!(lines[9], "$$BEGIN");
        assert_eq!(*lines.last().unwrap(), "$$END");
    }

    #[test]
    fn test_record_count_and_format() {
        let (series, query, oracle) = fixture();
        let mut buf = Vec::new();
        let exporter = SpenvisTextExporter::default();
        let summary = exporter.export(&series, &query, &oracle, &mut buf).unwrap();

        // ceil(12/6) = 2 retained epochs.
        assert_eq!(summary.source_len, 12);
        assert_eq!(summary.retained_len, 2);

        let text = String::from_utf8(buf).unwrap();
        let records: Vec<&str> = text
            .lines()
            .skip_while(|l| *l != "$$BEGIN")
            .skip(1)
            .take_while(|l| *l != "$$END")
            .collect();
        assert_eq!(records.len(), 2);

        // First record: epoch 0 -> JD 2451545.0, position
        // (1000 + 1e6) m = 1001.0 km etc.
        let fields: Vec<&str> = records[0].split(", ").collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], "2451545.000000000");
        assert_eq!(fields[1], "1001.000000");
        assert_eq!(fields[2], "2002.000000");
        assert_eq!(fields[3], "3003.000000");
    }

    #[test]
    fn test_oracle_failure_aborts_export() {
        let (series, mut query, oracle) = fixture();
        query.primary_body = "Europa".to_string();
        let mut buf = Vec::new();
        let exporter = SpenvisTextExporter::default();
        assert!(exporter.export(&series, &query, &oracle, &mut buf).is_err());
    }

    #[test]
    fn test_export_to_path_overwrites() {
        let (series, query, oracle) = fixture();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spenvis_upload.txt");
        std::fs::write(&path, "stale contents that must disappear").unwrap();

        let exporter = SpenvisTextExporter::default();
        exporter
            .export_to_path(&series, &query, &oracle, &path)
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(BANNER));
        assert!(!text.contains("stale contents"));
    }
}
