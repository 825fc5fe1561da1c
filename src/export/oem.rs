//! CCSDS-OEM-like trajectory export.
//!
//! Consumed by SPENVIS -> JOREM -> trajectory upload, which enforces a
//! stricter size limit than the coordinate generator; hence the coarser
//! default stride. Data lines carry an absolute UTC timestamp at
//! millisecond precision plus position (km, 5dp) and velocity (km/s,
//! 6dp), space separated.

use std::io::Write;
use std::path::Path;

use chrono::Utc;

use crate::ephemeris::Ephemeris;
use crate::error::{ShieldError, ShieldResult};
use crate::export::{epoch_timestamp, ExportSummary, FrameQuery};
use crate::trajectory::frame::compose;
use crate::trajectory::TrajectorySeries;

const META_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// OEM exporter with its own downsampling stride and metadata block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OemExporter {
    /// `ORIGINATOR` header field.
    pub originator: String,
    /// `OBJECT_NAME` metadata field.
    pub object_name: String,
    /// `OBJECT_ID` metadata field.
    pub object_id: String,
    /// `CENTER_NAME` metadata field.
    pub center_name: String,
    /// `REF_FRAME` metadata field.
    pub ref_frame: String,
    /// `TIME_SYSTEM` metadata field.
    pub time_system: String,
    /// Fixed-stride decimation factor; 30 turns a 10 s propagation step
    /// into a ~300 s effective step, safe for JOREM upload limits.
    pub stride: usize,
}

impl Default for OemExporter {
    fn default() -> Self {
        Self {
            originator: "RADSHIELD".to_string(),
            object_name: "GANYMEDE_ORBITER".to_string(),
            object_id: "999".to_string(),
            center_name: "JUPITER".to_string(),
            ref_frame: "EME2000".to_string(),
            time_system: "UTC".to_string(),
            stride: 30,
        }
    }
}

impl OemExporter {
    /// Serialize the trajectory into the OEM format.
    ///
    /// # Errors
    ///
    /// Oracle and write failures propagate and abort this export only;
    /// an empty source series is a configuration error since the
    /// metadata block needs a start and stop epoch.
    pub fn export<W: Write>(
        &self,
        series: &TrajectorySeries,
        query: &FrameQuery,
        oracle: &dyn Ephemeris,
        writer: &mut W,
    ) -> ShieldResult<ExportSummary> {
        let retained = series.downsample(self.stride)?;
        let (Some(first), Some(last)) = (retained.first(), retained.last()) else {
            return Err(ShieldError::config("cannot export an empty trajectory"));
        };

        let creation = Utc::now().format(META_TIMESTAMP_FORMAT);
        writeln!(writer, "CCSDS_OEM_VERS = 2.0")?;
        writeln!(writer, "CREATION_DATE  = {creation}")?;
        writeln!(writer, "ORIGINATOR     = {}", self.originator)?;
        writeln!(writer)?;

        let start = epoch_timestamp(first.epoch_seconds)?.format(META_TIMESTAMP_FORMAT);
        let stop = epoch_timestamp(last.epoch_seconds)?.format(META_TIMESTAMP_FORMAT);
        writeln!(writer, "META_START")?;
        writeln!(writer, "OBJECT_NAME          = {}", self.object_name)?;
        writeln!(writer, "OBJECT_ID            = {}", self.object_id)?;
        writeln!(writer, "CENTER_NAME          = {}", self.center_name)?;
        writeln!(writer, "REF_FRAME            = {}", self.ref_frame)?;
        writeln!(writer, "TIME_SYSTEM          = {}", self.time_system)?;
        writeln!(writer, "START_TIME           = {start}")?;
        writeln!(writer, "STOP_TIME            = {stop}")?;
        writeln!(writer, "META_STOP")?;
        writeln!(writer)?;

        for state in &retained {
            let primary = query.primary_state(oracle, state.epoch_seconds)?;
            let composed = compose(state, &primary);
            let stamp = epoch_timestamp(state.epoch_seconds)?.format(DATA_TIMESTAMP_FORMAT);
            writeln!(
                writer,
                "{stamp} {:.5} {:.5} {:.5} {:.6} {:.6} {:.6}",
                composed.position_km[0],
                composed.position_km[1],
                composed.position_km[2],
                composed.velocity_km_s[0],
                composed.velocity_km_s[1],
                composed.velocity_km_s[2]
            )?;
        }

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
        let states: Vec<StateVector> = (0..90)
            .map(|i| StateVector {
                epoch_seconds: i as f64 * 10.0,
                position_m: [1000.0, 2000.0, 3000.0],
                velocity_mps: [100.0, 200.0, 300.0],
            })
            .collect();
        let series = TrajectorySeries::from_states(states);

        let table: Vec<StateVector> = (0..100)
            .map(|i| {
                StateVector::from_state6(
                    i as f64 * 10.0,
                    [1_000_000.0, 2_000_000.0, 3_000_000.0, 1000.0, 2000.0, 3000.0],
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

    fn export_text() -> (String, ExportSummary) {
        let (series, query, oracle) = fixture();
        let mut buf = Vec::new();
        let exporter = OemExporter::default();
        let summary = exporter.export(&series, &query, &oracle, &mut buf).unwrap();
        (String::from_utf8(buf).unwrap(), summary)
    }

    #[test]
    fn test_header_and_metadata_block() {
        let (text, _) = export_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "CCSDS_OEM_VERS = 2.0");
        assert!(lines[1].starts_with("CREATION_DATE  = "));
        assert_eq!(lines[2], "ORIGINATOR     = RADSHIELD");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "META_START");
        assert_eq!(lines[5], "OBJECT_NAME          = GANYMEDE_ORBITER");
        assert_eq!(lines[6], "OBJECT_ID            = 999");
        assert_eq!(lines[7], "CENTER_NAME          = JUPITER");
        assert_eq!(lines[8], "REF_FRAME            = EME2000");
        assert_eq!(lines[9], "TIME_SYSTEM          = UTC");
        // Zero epoch is the J2000 base date.
        assert_eq!(lines[10], "START_TIME           = 2000-01-01T12:00:00");
        assert!(lines[11].starts_with("STOP_TIME            = 2000-01-01T12:"));
        assert_eq!(lines[12], "META_STOP");
        assert_eq!(lines[13], "");
    }

    #[test]
    fn test_data_lines() {
        let (text, summary) = export_text();

        // ceil(90/30) = 3 retained epochs.
        assert_eq!(summary.retained_len, 3);

        let data: Vec<&str> = text
            .lines()
            .skip_while(|l| *l != "META_STOP")
            .skip(2)
            .collect();
        assert_eq!(data.len(), 3);

        let fields: Vec<&str> = data[0].split(' ').collect();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[0], "2000-01-01T12:00:00.000");
        // (1000 + 1e6) m -> 1001.0 km with 5 decimals.
        assert_eq!(fields[1], "1001.00000");
        assert_eq!(fields[2], "2002.00000");
        assert_eq!(fields[3], "3003.00000");
        // (100 + 1000) m/s -> 1.1 km/s with 6 decimals.
        assert_eq!(fields[4], "1.100000");
        assert_eq!(fields[5], "2.200000");
        assert_eq!(fields[6], "3.300000");

        // Second retained epoch is 300 s after the base date.
        assert_eq!(
            data[1].split(' ').next().unwrap(),
            "2000-01-01T12:05:00.000"
        );
    }

    #[test]
    fn test_empty_series_rejected() {
        let (_, query, oracle) = fixture();
        let empty = TrajectorySeries::default();
        let mut buf = Vec::new();
        let exporter = OemExporter::default();
        assert!(exporter.export(&empty, &query, &oracle, &mut buf).is_err());
    }

    #[test]
    fn test_independent_strides() {
        // The OEM stride is independent of the SPENVIS stride; changing
        // it changes only this export's retained count.
        let (series, query, oracle) = fixture();
        let exporter = OemExporter {
            stride: 45,
            ..OemExporter::default()
        };
        let mut buf = Vec::new();
        let summary = exporter.export(&series, &query, &oracle, &mut buf).unwrap();
        assert_eq!(summary.retained_len, 2);
    }

    #[test]
    fn test_export_to_path_overwrites() {
        let (series, query, oracle) = fixture();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orbiter.oem");
        std::fs::write(&path, "old").unwrap();

        let exporter = OemExporter::default();
        exporter
            .export_to_path(&series, &query, &oracle, &path)
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("CCSDS_OEM_VERS = 2.0"));
    }
}
