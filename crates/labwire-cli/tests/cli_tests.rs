//! CLI loading and shipped platform tests.
//!
//! The CLI is a binary crate, so these tests exercise the same path the
//! commands take: read a descriptor file, complete it from the model
//! registry, assemble it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use labwire_hal::{DriverRegistry, HalError};
use labwire_platform::{
    AssemblyError, InstrumentKind, Platform, PlatformDescriptor, QubitId, ResonatorType,
    ReviewNote, Role,
};

fn platforms_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../platforms")
}

/// Equivalent to commands::common::load_descriptor
fn load_descriptor(path: &Path) -> anyhow::Result<PlatformDescriptor> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "json" => Ok(serde_json::from_str(&source)?),
        _ => Ok(serde_yaml_ng::from_str(&source)?),
    }
}

fn prepare(name: &str) -> anyhow::Result<PlatformDescriptor> {
    let descriptor = load_descriptor(&platforms_dir().join(name))?;
    Ok(DriverRegistry::with_builtins().prepare(descriptor)?)
}

fn assemble(name: &str) -> Platform {
    prepare(name).unwrap().assemble().unwrap()
}

// ============================================================================
// Shipped platforms
// ============================================================================

mod shipped {
    use super::*;

    #[test]
    fn test_every_platform_parses() {
        let mut count = 0;
        for entry in fs::read_dir(platforms_dir()).unwrap() {
            let path = entry.unwrap().path();
            if path.extension().and_then(|e| e.to_str()) == Some("yml") {
                load_descriptor(&path).unwrap();
                count += 1;
            }
        }
        assert_eq!(count, 7);
    }

    #[test]
    fn test_d24303_qblox_cluster() {
        let platform = assemble("d24303.yml");

        assert_eq!(platform.qubits().len(), 2);
        let children: Vec<_> = platform.children("cluster").map(|i| i.name()).collect();
        assert_eq!(children, vec!["qcm_rf0", "qrm_rf0"]);
        assert_eq!(
            platform.instrument("qrm_rf0").unwrap().kind(),
            InstrumentKind::Module
        );

        let feedback = platform.resolve(&QubitId::Index(1), Role::Feedback).unwrap();
        assert_eq!(feedback.instrument.name(), "qrm_rf0");
        assert_eq!(feedback.port.name, "i1");

        let idle = platform.qubit(&QubitId::Index(2)).unwrap();
        assert_eq!(idle.assignments().count(), 0);
        assert!(platform.review_notes().is_empty());
    }

    #[test]
    fn test_tii1qs_generic_is_3d() {
        let platform = assemble("tii1qs_generic.yml");
        assert_eq!(platform.resonator_type(), ResonatorType::ThreeD);
        let drive = platform.resolve(&QubitId::Index(0), Role::Drive).unwrap();
        assert_eq!(drive.instrument.name(), "qcm_rf0");
    }

    #[test]
    fn test_tii1q_b1_rfsoc4x2() {
        let platform = assemble("tii1q_b1.yml");

        let board = platform.instrument("tii_rfsoc4x2").unwrap();
        assert_eq!(board.address().to_string(), "192.168.0.72:6000");
        assert_eq!(board.ports().count(), 4);

        let twpa = platform.instrument("twpa_a").unwrap().oscillator().unwrap();
        assert_eq!(twpa.frequency, 6.2e9);
        assert_eq!(twpa.power, -1.0);

        let drive = platform.resolve(&QubitId::Index(0), Role::Drive).unwrap();
        assert_eq!(drive.port.line, 1);
    }

    #[test]
    fn test_qw5q_readout_through_local_oscillator() {
        let platform = assemble("tii_zcu216_qw5q.yml");

        assert_eq!(platform.qubits().len(), 3);
        for id in 0..3 {
            let readout = platform.resolve(&QubitId::Index(id), Role::Readout).unwrap();
            assert_eq!(readout.channel.name(), "L3-25");
            assert_eq!(readout.port.name, "o6");
            assert_eq!(readout.local_oscillator.unwrap().name(), "LO");
        }
        assert_eq!(
            platform.instrument("TWPA").unwrap().kind(),
            InstrumentKind::LocalOscillator
        );
        assert!(platform.review_notes().is_empty());
    }

    #[test]
    fn test_spinq_qubits_six_to_ten() {
        let platform = assemble("spinq10q_610_zcu216.yml");

        let ids: Vec<_> = platform.qubits().keys().cloned().collect();
        assert_eq!(ids, (6..=10).map(QubitId::Index).collect::<Vec<_>>());
        assert_eq!(platform.wiring().count(), 20);

        let flux = platform.resolve(&QubitId::Index(10), Role::Flux).unwrap();
        assert_eq!(flux.port.name, "o0");
    }

    #[test]
    fn test_tii2q2_shared_flux_and_spare_line() {
        let platform = assemble("tii_zcu216b_tii2q2.yml");

        assert_eq!(
            platform.review_notes(),
            &[
                ReviewNote::SharedChannel {
                    channel: "L1-06".into(),
                    role: Role::Flux,
                    qubits: vec!["Q1".into(), "Q2".into()],
                },
                ReviewNote::UnassignedChannel {
                    channel: "L1-05".into(),
                },
            ]
        );
        assert_eq!(platform.pairs().len(), 1);
    }

    #[test]
    fn test_tii2q4_duplicate_flux_line() {
        let result = prepare("tii_zcu216b_tii2q4.yml").unwrap().assemble();
        assert_eq!(
            result,
            Err(AssemblyError::DuplicateChannel {
                name: "L1-07".into()
            })
        );
    }

    #[test]
    fn test_rfsoc_ports_come_from_model() {
        // Without the registry the RFSoC exposes no ports.
        let descriptor = load_descriptor(&platforms_dir().join("tii1q_b1.yml")).unwrap();
        assert!(matches!(
            descriptor.assemble(),
            Err(AssemblyError::UnresolvedPort { .. })
        ));
    }
}

// ============================================================================
// Descriptor loading
// ============================================================================

mod loading {
    use super::*;

    const MINIMAL: &str = r#"
name: bench
instruments:
  - name: board
    model: rfsoc_4x2
    address: "10.0.0.5:6000"
channels:
  - { name: ro, port: board.o0 }
  - { name: fb, port: board.i0 }
roles:
  - { qubit: 0, role: readout, channel: ro }
  - { qubit: 0, role: feedback, channel: fb }
"#;

    #[test]
    fn test_load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.yaml");
        fs::write(&path, MINIMAL).unwrap();

        let descriptor = load_descriptor(&path).unwrap();
        assert_eq!(descriptor.name, "bench");
        assert_eq!(descriptor.roles.len(), 2);
    }

    #[test]
    fn test_load_json_file() {
        let yaml: PlatformDescriptor = serde_yaml_ng::from_str(MINIMAL).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.json");
        fs::write(&path, serde_json::to_string(&yaml).unwrap()).unwrap();

        let json = load_descriptor(&path).unwrap();
        assert_eq!(json, yaml);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_descriptor(&dir.path().join("absent.yml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_load_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yml");
        fs::write(&path, "name: [unclosed").unwrap();
        assert!(load_descriptor(&path).is_err());
    }

    #[test]
    fn test_unknown_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opx.yml");
        fs::write(&path, MINIMAL.replace("rfsoc_4x2", "opx1000")).unwrap();

        let descriptor = load_descriptor(&path).unwrap();
        let err = DriverRegistry::with_builtins()
            .prepare(descriptor)
            .unwrap_err();
        assert_eq!(err, HalError::UnknownModel("opx1000".into()));
    }

    #[test]
    fn test_platform_round_trips_to_json() {
        let descriptor: PlatformDescriptor = serde_yaml_ng::from_str(MINIMAL).unwrap();
        let platform = DriverRegistry::with_builtins()
            .prepare(descriptor)
            .unwrap()
            .assemble()
            .unwrap();

        let json = serde_json::to_value(&platform).unwrap();
        assert_eq!(json["name"], "bench");
        assert_eq!(json["qubits"]["0"]["readout"], "ro");
        assert!(json.get("review").is_none());
    }
}

// ============================================================================
// Clap argument parsing (mirror of the binary's Cli)
// ============================================================================

mod clap_parsing {
    use clap::{Parser, Subcommand};

    #[derive(Parser)]
    #[command(name = "labwire")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Check {
            file: String,
            #[arg(long)]
            no_models: bool,
        },
        Show {
            file: String,
            #[arg(short, long, default_value = "table")]
            format: String,
            #[arg(long)]
            no_models: bool,
        },
        Models,
        Version,
    }

    #[test]
    fn test_show_defaults() {
        let cli = TestCli::try_parse_from(["labwire", "show", "p.yml"]).unwrap();
        match cli.command {
            TestCommands::Show {
                file,
                format,
                no_models,
            } => {
                assert_eq!(file, "p.yml");
                assert_eq!(format, "table");
                assert!(!no_models);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_show_no_models() {
        let cli =
            TestCli::try_parse_from(["labwire", "show", "p.yml", "--no-models", "-f", "json"])
                .unwrap();
        assert!(matches!(
            cli.command,
            TestCommands::Show { no_models: true, ref format, .. } if format == "json"
        ));
    }

    #[test]
    fn test_check_no_models_and_verbosity() {
        let cli = TestCli::try_parse_from(["labwire", "-vv", "check", "p.yml", "--no-models"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, TestCommands::Check { no_models: true, .. }));
    }

    #[test]
    fn test_check_requires_file() {
        assert!(TestCli::try_parse_from(["labwire", "check"]).is_err());
    }

    #[test]
    fn test_models_and_version() {
        assert!(matches!(
            TestCli::try_parse_from(["labwire", "models"]).unwrap().command,
            TestCommands::Models
        ));
        assert!(matches!(
            TestCli::try_parse_from(["labwire", "version"]).unwrap().command,
            TestCommands::Version
        ));
    }
}

// ============================================================================
// Hand-declared ports
// ============================================================================

mod declared_ports {
    use super::*;

    const DECLARED: &str = r#"
name: bench
instruments:
  - name: qcm_rf0
    model: qblox_qcm_rf
    address: "192.168.0.2:10"
    ports:
      - { name: o2, direction: output }
  - name: LO
    address: 192.168.0.35
    oscillator: { frequency: 7.5e9, power: 10 }
channels:
  - { name: drive, port: qcm_rf0.o2, local_oscillator: LO }
roles:
  - { qubit: 0, role: drive, channel: drive }
"#;

    fn descriptor() -> PlatformDescriptor {
        serde_yaml_ng::from_str(DECLARED).unwrap()
    }

    #[test]
    fn test_without_models_keeps_declared_layout() {
        let platform = descriptor().assemble().unwrap();
        let port = platform.instrument("qcm_rf0").unwrap().port("o2").unwrap();
        assert_eq!(port.line, 0);
        assert_eq!(
            platform.instrument("qcm_rf0").unwrap().kind(),
            InstrumentKind::Other
        );
    }

    #[test]
    fn test_with_models_takes_model_line() {
        let prepared = DriverRegistry::with_builtins().prepare(descriptor()).unwrap();
        let platform = prepared.assemble().unwrap();
        let drive = platform.resolve(&QubitId::Index(0), Role::Drive).unwrap();
        assert_eq!(drive.port.line, 1);
        assert_eq!(drive.instrument.kind(), InstrumentKind::Module);
        assert_eq!(
            drive.local_oscillator.map(|lo| lo.kind()),
            Some(InstrumentKind::LocalOscillator)
        );
    }
}
