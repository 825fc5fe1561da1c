//! Mission configuration with YAML schema and validation.
//!
//! All process-wide knobs (input paths, mission duration, exporter
//! strides, metadata fields) live in one explicit config struct loaded
//! from YAML, rather than as defaulted globals. Defaults reproduce the
//! Ganymede orbiter setup: a 10 s propagation step downsampled by 6 for
//! SPENVIS (~60 s) and by 30 for OEM (~300 s).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ephemeris::Aberration;
use crate::error::{ShieldError, ShieldResult};
use crate::export::oem::OemExporter;
use crate::export::spenvis::SpenvisTextExporter;
use crate::export::FrameQuery;

/// Top-level mission configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct MissionConfig {
    /// Shielding pipeline inputs.
    #[validate(nested)]
    #[serde(default)]
    pub shielding: ShieldingConfig,

    /// Trajectory source and frame recomposition.
    #[serde(default)]
    pub trajectory: TrajectoryConfig,

    /// Tabulated ephemeris sources, one per body pair.
    #[serde(default)]
    pub ephemeris: Vec<EphemerisTableConfig>,

    /// SPENVIS text export settings.
    #[validate(nested)]
    #[serde(default)]
    pub spenvis: SpenvisConfig,

    /// CCSDS-OEM export settings.
    #[validate(nested)]
    #[serde(default)]
    pub oem: OemConfig,
}

impl MissionConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, YAML parsing fails, or
    /// validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> ShieldResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> ShieldResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> MissionConfigBuilder {
        MissionConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> ShieldResult<()> {
        let days = self.shielding.mission_duration_days;
        if !days.is_finite() || days <= 0.0 {
            return Err(ShieldError::InvalidDuration { days });
        }
        Ok(())
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            shielding: ShieldingConfig::default(),
            trajectory: TrajectoryConfig::default(),
            ephemeris: Vec::new(),
            spenvis: SpenvisConfig::default(),
            oem: OemConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct MissionConfigBuilder {
    data_file: Option<PathBuf>,
    mission_duration_days: Option<f64>,
    spenvis_stride: Option<usize>,
    oem_stride: Option<usize>,
}

impl MissionConfigBuilder {
    /// Set the environment data file path.
    #[must_use]
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = Some(path.into());
        self
    }

    /// Set the mission duration in days.
    #[must_use]
    pub const fn mission_duration_days(mut self, days: f64) -> Self {
        self.mission_duration_days = Some(days);
        self
    }

    /// Set the SPENVIS downsampling stride.
    #[must_use]
    pub const fn spenvis_stride(mut self, stride: usize) -> Self {
        self.spenvis_stride = Some(stride);
        self
    }

    /// Set the OEM downsampling stride.
    #[must_use]
    pub const fn oem_stride(mut self, stride: usize) -> Self {
        self.oem_stride = Some(stride);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Rejects a non-positive mission duration.
    pub fn build(self) -> ShieldResult<MissionConfig> {
        let mut config = MissionConfig::default();
        if let Some(path) = self.data_file {
            config.shielding.data_file = path;
        }
        if let Some(days) = self.mission_duration_days {
            config.shielding.mission_duration_days = days;
        }
        if let Some(stride) = self.spenvis_stride {
            config.spenvis.stride = stride;
        }
        if let Some(stride) = self.oem_stride {
            config.oem.stride = stride;
        }
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }
}

/// Shielding pipeline inputs.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShieldingConfig {
    /// Environment flux table path.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Mission duration in days; must be positive (semantic check).
    #[serde(default = "default_duration_days")]
    pub mission_duration_days: f64,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("spenvis_sao.txt")
}

const fn default_duration_days() -> f64 {
    30.0
}

impl Default for ShieldingConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            mission_duration_days: default_duration_days(),
        }
    }
}

/// Trajectory source and frame recomposition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryConfig {
    /// Propagated state-history file (epoch + 6-vector per line).
    #[serde(default = "default_states_file")]
    pub states_file: PathBuf,
    /// Body the propagated states are relative to.
    #[serde(default = "default_primary_body")]
    pub primary_body: String,
    /// Body the exported states should be relative to.
    #[serde(default = "default_reference_body")]
    pub reference_body: String,
    /// Oracle reference frame name.
    #[serde(default = "default_frame")]
    pub frame: String,
}

fn default_states_file() -> PathBuf {
    PathBuf::from("state_history.txt")
}

fn default_primary_body() -> String {
    "Ganymede".to_string()
}

fn default_reference_body() -> String {
    "Jupiter".to_string()
}

fn default_frame() -> String {
    "J2000".to_string()
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            states_file: default_states_file(),
            primary_body: default_primary_body(),
            reference_body: default_reference_body(),
            frame: default_frame(),
        }
    }
}

impl TrajectoryConfig {
    /// Frame-recomposition query for the exporters.
    #[must_use]
    pub fn frame_query(&self) -> FrameQuery {
        FrameQuery {
            primary_body: self.primary_body.clone(),
            reference_body: self.reference_body.clone(),
            frame: self.frame.clone(),
            aberration: Aberration::None,
        }
    }
}

/// One tabulated ephemeris source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemerisTableConfig {
    /// Target body name.
    pub target: String,
    /// Observer body name.
    pub observer: String,
    /// State-history file for the pair.
    pub states_file: PathBuf,
}

/// SPENVIS text export settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SpenvisConfig {
    /// Output file path.
    #[serde(default = "default_spenvis_output")]
    pub output: PathBuf,
    /// Downsampling stride.
    #[validate(range(min = 1))]
    #[serde(default = "default_spenvis_stride")]
    pub stride: usize,
    /// `Title:` header field.
    #[serde(default = "default_spenvis_title")]
    pub title: String,
    /// `Planet:` header field.
    #[serde(default = "default_reference_body")]
    pub planet: String,
    /// Comment line inside the top banner.
    #[serde(default = "default_spenvis_banner")]
    pub banner: String,
}

fn default_spenvis_output() -> PathBuf {
    PathBuf::from("spenvis_upload_optimized.txt")
}

const fn default_spenvis_stride() -> usize {
    6
}

fn default_spenvis_title() -> String {
    "Ganymede Orbiter Analysis".to_string()
}

fn default_spenvis_banner() -> String {
    "Optimized Ganymede Orbiter Trajectory (60s step)".to_string()
}

impl Default for SpenvisConfig {
    fn default() -> Self {
        Self {
            output: default_spenvis_output(),
            stride: default_spenvis_stride(),
            title: default_spenvis_title(),
            planet: default_reference_body(),
            banner: default_spenvis_banner(),
        }
    }
}

impl SpenvisConfig {
    /// Build the exporter for these settings.
    #[must_use]
    pub fn exporter(&self) -> SpenvisTextExporter {
        SpenvisTextExporter {
            banner_comment: self.banner.clone(),
            title: self.title.clone(),
            planet: self.planet.clone(),
            stride: self.stride,
        }
    }
}

/// CCSDS-OEM export settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OemConfig {
    /// Output file path.
    #[serde(default = "default_oem_output")]
    pub output: PathBuf,
    /// Downsampling stride.
    #[validate(range(min = 1))]
    #[serde(default = "default_oem_stride")]
    pub stride: usize,
    /// `OBJECT_NAME` metadata field.
    #[serde(default = "default_object_name")]
    pub object_name: String,
    /// `OBJECT_ID` metadata field.
    #[serde(default = "default_object_id")]
    pub object_id: String,
    /// `CENTER_NAME` metadata field.
    #[serde(default = "default_center_name")]
    pub center_name: String,
    /// `REF_FRAME` metadata field.
    #[serde(default = "default_ref_frame")]
    pub ref_frame: String,
    /// `TIME_SYSTEM` metadata field.
    #[serde(default = "default_time_system")]
    pub time_system: String,
    /// `ORIGINATOR` header field.
    #[serde(default = "default_originator")]
    pub originator: String,
}

fn default_oem_output() -> PathBuf {
    PathBuf::from("ganymede_orbiter_safe.oem")
}

const fn default_oem_stride() -> usize {
    30
}

fn default_object_name() -> String {
    "GANYMEDE_ORBITER".to_string()
}

fn default_object_id() -> String {
    "999".to_string()
}

fn default_center_name() -> String {
    "JUPITER".to_string()
}

fn default_ref_frame() -> String {
    "EME2000".to_string()
}

fn default_time_system() -> String {
    "UTC".to_string()
}

fn default_originator() -> String {
    "RADSHIELD".to_string()
}

impl Default for OemConfig {
    fn default() -> Self {
        Self {
            output: default_oem_output(),
            stride: default_oem_stride(),
            object_name: default_object_name(),
            object_id: default_object_id(),
            center_name: default_center_name(),
            ref_frame: default_ref_frame(),
            time_system: default_time_system(),
            originator: default_originator(),
        }
    }
}

impl OemConfig {
    /// Build the exporter for these settings.
    #[must_use]
    pub fn exporter(&self) -> OemExporter {
        OemExporter {
            originator: self.originator.clone(),
            object_name: self.object_name.clone(),
            object_id: self.object_id.clone(),
            center_name: self.center_name.clone(),
            ref_frame: self.ref_frame.clone(),
            time_system: self.time_system.clone(),
            stride: self.stride,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MissionConfig::default();
        assert_eq!(config.shielding.data_file, PathBuf::from("spenvis_sao.txt"));
        assert!((config.shielding.mission_duration_days - 30.0).abs() < f64::EPSILON);
        assert_eq!(config.spenvis.stride, 6);
        assert_eq!(config.oem.stride, 30);
        assert_eq!(config.trajectory.primary_body, "Ganymede");
        assert_eq!(config.trajectory.reference_body, "Jupiter");
    }

    #[test]
    fn test_config_yaml_parse() {
        let yaml = r"
shielding:
  data_file: env.txt
  mission_duration_days: 14.0
spenvis:
  stride: 12
";
        let config = MissionConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.shielding.data_file, PathBuf::from("env.txt"));
        assert!((config.shielding.mission_duration_days - 14.0).abs() < f64::EPSILON);
        assert_eq!(config.spenvis.stride, 12);
        // Untouched sections keep defaults.
        assert_eq!(config.oem.stride, 30);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let yaml = r"
shielding:
  data_file: env.txt
plotting:
  enabled: true
";
        assert!(MissionConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_config_rejects_zero_stride() {
        let yaml = r"
spenvis:
  stride: 0
";
        assert!(MissionConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_config_rejects_nonpositive_duration() {
        let yaml = r"
shielding:
  mission_duration_days: 0.0
";
        assert!(matches!(
            MissionConfig::from_yaml(yaml),
            Err(ShieldError::InvalidDuration { .. })
        ));

        let yaml = r"
shielding:
  mission_duration_days: -3.5
";
        assert!(matches!(
            MissionConfig::from_yaml(yaml),
            Err(ShieldError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_config_ephemeris_tables() {
        let yaml = r"
ephemeris:
  - target: Ganymede
    observer: Jupiter
    states_file: gan_wrt_jup.txt
";
        let config = MissionConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.ephemeris.len(), 1);
        assert_eq!(config.ephemeris[0].target, "Ganymede");
    }

    #[test]
    fn test_config_builder() {
        let config = MissionConfig::builder()
            .data_file("flux.txt")
            .mission_duration_days(60.0)
            .spenvis_stride(3)
            .oem_stride(10)
            .build()
            .unwrap();

        assert_eq!(config.shielding.data_file, PathBuf::from("flux.txt"));
        assert!((config.shielding.mission_duration_days - 60.0).abs() < f64::EPSILON);
        assert_eq!(config.spenvis.stride, 3);
        assert_eq!(config.oem.stride, 10);
    }

    #[test]
    fn test_config_builder_rejects_bad_duration() {
        let result = MissionConfig::builder().mission_duration_days(-1.0).build();
        assert!(matches!(result, Err(ShieldError::InvalidDuration { .. })));
    }

    #[test]
    fn test_exporter_construction() {
        let config = MissionConfig::default();
        let spenvis = config.spenvis.exporter();
        assert_eq!(spenvis.stride, 6);
        assert_eq!(spenvis.planet, "Jupiter");

        let oem = config.oem.exporter();
        assert_eq!(oem.stride, 30);
        assert_eq!(oem.object_name, "GANYMEDE_ORBITER");

        let query = config.trajectory.frame_query();
        assert_eq!(query.primary_body, "Ganymede");
        assert_eq!(query.frame, "J2000");
    }
}
