//! CLI argument parsing.
//!
//! Hand-rolled parser over any string iterator so parsing logic is
//! testable without touching `std::env`.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the shielding analysis pipeline.
    Shield {
        /// Environment flux table path.
        data_file: PathBuf,
        /// Mission duration override in days.
        days: Option<f64>,
        /// Optional CSV dump path for the full record sequence.
        records_out: Option<PathBuf>,
    },
    /// Run the trajectory exports from a mission config.
    Export {
        /// Mission YAML path.
        config_path: PathBuf,
        /// Run only the SPENVIS export.
        spenvis_only: bool,
        /// Run only the OEM export.
        oem_only: bool,
    },
    /// Show help.
    Help,
    /// Show version.
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "shield" => Self::parse_shield_command(args),
            "export" => Self::parse_export_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    fn parse_shield_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'shield' command requires a data file path");
            return Command::Help;
        }

        let data_file = PathBuf::from(&args[2]);
        let mut days = None;
        let mut records_out = None;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--days" => {
                    if i + 1 < args.len() {
                        if let Ok(value) = args[i + 1].parse() {
                            days = Some(value);
                        }
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--records" => {
                    if i + 1 < args.len() {
                        records_out = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                unknown => {
                    eprintln!("Unknown option for 'shield': {unknown}");
                    i += 1;
                }
            }
        }

        Command::Shield {
            data_file,
            days,
            records_out,
        }
    }

    fn parse_export_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'export' command requires a mission config path");
            return Command::Help;
        }

        let config_path = PathBuf::from(&args[2]);
        let mut spenvis_only = false;
        let mut oem_only = false;

        for arg in &args[3..] {
            match arg.as_str() {
                "--spenvis-only" => spenvis_only = true,
                "--oem-only" => oem_only = true,
                unknown => eprintln!("Unknown option for 'export': {unknown}"),
            }
        }

        Command::Export {
            config_path,
            spenvis_only,
            oem_only,
        }
    }
}
