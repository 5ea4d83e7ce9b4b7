// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use ansi_term::Colour::{Green, Red, Yellow};
use anyhow::Context;
use clap::{Parser, ValueEnum, ValueHint};
use log::{debug, info, trace, warn};

use nijie_core::{nalgebra::Point2, ElbowConfig, InverseKinematics, JointAngles, LinkConfig};

mod config;
mod program;

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Laixer Equipment B.V.")]
#[command(version, propagate_version = true)]
#[command(about = "Two-link arm inverse kinematics", long_about = None)]
struct Args {
    /// Configuration file.
    #[arg(
        short = 'c',
        long = "config",
        alias = "conf",
        value_name = "FILE",
        value_hint = ValueHint::FilePath
    )]
    config: Option<std::path::PathBuf>,
    /// Proximal link length in meters.
    #[arg(long)]
    l1: Option<f64>,
    /// Distal link length in meters.
    #[arg(long)]
    l2: Option<f64>,
    /// Elbow configuration.
    #[arg(short, long, value_enum)]
    elbow: Option<Elbow>,
    /// Show angles in degrees.
    #[arg(long)]
    degrees: bool,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Commands.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Elbow {
    /// Elbow-down.
    Down,
    /// Elbow-up.
    Up,
}

impl From<Elbow> for ElbowConfig {
    fn from(value: Elbow) -> Self {
        match value {
            Elbow::Down => ElbowConfig::Down,
            Elbow::Up => ElbowConfig::Up,
        }
    }
}

#[derive(clap::Subcommand)]
enum Command {
    /// Solve the joint angles for a target.
    Solve {
        /// Target X in meters.
        #[arg(allow_negative_numbers = true)]
        x: f64,
        /// Target Y in meters.
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Solve every target in a program file.
    Program {
        /// JSON array of [x, y] targets.
        #[arg(value_hint = ValueHint::FilePath)]
        file: std::path::PathBuf,
    },
    /// Show the reachable workspace.
    Reach,
}

/// Resolve the link geometry from the configuration file and arguments.
///
/// Arguments take precedence over the configuration file.
fn link_config(args: &Args) -> anyhow::Result<LinkConfig> {
    let mut link = match &args.config {
        Some(path) => config::from_file::<config::Config>(path)?.arm,
        None => LinkConfig::default(),
    };

    if let Some(l1) = args.l1 {
        link.proximal_length = l1;
    }
    if let Some(l2) = args.l2 {
        link.distal_length = l2;
    }
    if let Some(elbow) = args.elbow {
        link.elbow = elbow.into();
    }

    if !link.is_valid() {
        anyhow::bail!("Invalid link geometry: {}", link);
    }

    Ok(link)
}

fn format_angles(angles: &JointAngles, degrees: bool) -> String {
    if degrees {
        format!(
            "θ1 {:>+7.2}° θ2 {:>+7.2}°",
            angles.theta1_degree(),
            angles.theta2_degree()
        )
    } else {
        format!("θ1 {:>+7.4}rad θ2 {:>+7.4}rad", angles.theta1, angles.theta2)
    }
}

fn style_target(target: &Point2<f64>) -> String {
    Yellow
        .paint(format!("[{:+.3}, {:+.3}]", target.x, target.y))
        .to_string()
}

fn solve(link: &LinkConfig, target: Point2<f64>, degrees: bool) -> anyhow::Result<()> {
    let ik = InverseKinematics::from(link);

    let angles = ik
        .solve(&target, link.elbow)
        .with_context(|| format!("Target ({}, {})", target.x, target.y))?;

    debug!("{}", angles);
    info!(
        "{} {} » {}",
        style_target(&target),
        Green.paint("Solved"),
        format_angles(&angles, degrees)
    );

    Ok(())
}

fn run_program(link: &LinkConfig, path: &std::path::Path, degrees: bool) -> anyhow::Result<()> {
    let program = program::Program::load(path)
        .with_context(|| format!("Failed to load program {}", path.display()))?;

    let total = program.len();
    debug!("Loaded {} targets from {}", total, path.display());

    let ik = InverseKinematics::from(link);

    let mut unreachable = 0;
    for (idx, target) in program.enumerate() {
        match ik.solve(&target, link.elbow) {
            Ok(angles) => info!(
                "{:>3} {} {} » {}",
                idx,
                style_target(&target),
                Green.paint("Solved"),
                format_angles(&angles, degrees)
            ),
            Err(e) => {
                unreachable += 1;
                warn!(
                    "{:>3} {} {} » {}",
                    idx,
                    style_target(&target),
                    Red.paint("Unreachable"),
                    e
                );
            }
        }
    }

    if unreachable > 0 {
        anyhow::bail!("{} of {} targets unreachable", unreachable, total);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_config = simplelog::ConfigBuilder::new()
        .set_time_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_location_level(log::LevelFilter::Off)
        .build();

    let log_level = match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    simplelog::TermLogger::init(
        log_level,
        log_config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let link = link_config(&args)?;

    trace!("{}", link);

    match args.command {
        Command::Solve { x, y } => solve(&link, Point2::new(x, y), args.degrees)?,
        Command::Program { ref file } => run_program(&link, file, args.degrees)?,
        Command::Reach => {
            let (inner, outer) = InverseKinematics::from(&link).reach();
            info!("Link geometry: {}", link);
            info!("Workspace annulus: {:.3}m .. {:.3}m", inner, outer);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_solve_negative_target() {
        let args = Args::try_parse_from(["nijie-ik", "--elbow", "up", "solve", "-0.2", "-0.35"])
            .unwrap();

        assert_eq!(args.elbow, Some(Elbow::Up));
        match args.command {
            Command::Solve { x, y } => {
                assert_eq!(x, -0.2);
                assert_eq!(y, -0.35);
            }
            _ => panic!("expected solve command"),
        }
    }

    #[test]
    fn link_override() {
        let args =
            Args::try_parse_from(["nijie-ik", "--l1", "0.4", "--elbow", "up", "reach"]).unwrap();
        let link = link_config(&args).unwrap();

        assert_eq!(link.proximal_length, 0.4);
        assert_eq!(link.distal_length, 0.25);
        assert_eq!(link.elbow, ElbowConfig::Up);
    }

    #[test]
    fn link_default() {
        let args = Args::try_parse_from(["nijie-ik", "reach"]).unwrap();
        assert_eq!(link_config(&args).unwrap(), LinkConfig::default());
    }

    #[test]
    fn link_invalid() {
        let args = Args::try_parse_from(["nijie-ik", "--l2", "0", "reach"]).unwrap();
        assert!(link_config(&args).is_err());
    }

    #[test]
    fn solve_unreachable() {
        let err = solve(&LinkConfig::default(), Point2::new(1.0, 1.0), false).unwrap_err();
        assert!(err
            .root_cause()
            .to_string()
            .contains("outside the reachable workspace"));
    }

    #[test]
    fn solve_reachable() {
        assert!(solve(&LinkConfig::default(), Point2::new(0.4, 0.0), true).is_ok());
    }

    #[test]
    fn angles_formatting() {
        let angles = JointAngles::new(std::f64::consts::FRAC_PI_2, -0.5);

        assert_eq!(format_angles(&angles, true), "θ1  +90.00° θ2  -28.65°");
        assert_eq!(
            format_angles(&angles, false),
            "θ1 +1.5708rad θ2 -0.5000rad"
        );
    }

    fn scratch_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("nijie-ik-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn program_with_unreachable_target() {
        let path = scratch_file("mixed.json", "[[0.4, 0], [1, 1], [0.3, 0.2]]");

        let err = run_program(&LinkConfig::default(), &path, false).unwrap_err();
        assert_eq!(err.to_string(), "1 of 3 targets unreachable");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn program_all_reachable() {
        let path = scratch_file("reachable.json", "[[0.4, 0], [0.55, 0], [-0.2, 0.35]]");

        assert!(run_program(&LinkConfig::default(), &path, true).is_ok());

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn program_missing_file() {
        let path = std::env::temp_dir().join("nijie-ik-nonexistent.json");
        let err = run_program(&LinkConfig::default(), &path, false).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load program"));
    }

    #[test]
    fn link_config_file_with_override() {
        let path = scratch_file("arm.toml", "[arm]\nproximal_length = 0.4\n");
        let config = path.to_str().unwrap().to_owned();

        let args =
            Args::try_parse_from(["nijie-ik", "-c", config.as_str(), "--l2", "0.2", "reach"])
                .unwrap();
        let link = link_config(&args).unwrap();

        assert_eq!(link.proximal_length, 0.4);
        assert_eq!(link.distal_length, 0.2);
        assert_eq!(link.elbow, ElbowConfig::Down);

        std::fs::remove_file(path).unwrap();
    }
}
