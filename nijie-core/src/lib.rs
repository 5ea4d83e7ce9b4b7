// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

//! Kinematics for the planar two-link coaxial-motor arm.
//!
//! The crate solves the joint angles for a target end-effector position. It
//! holds no state and performs no I/O, so every call can be embedded directly
//! in a motor control loop.

pub mod algorithm;
pub mod config;

mod error;

pub use self::algorithm::ik::{inverse_kinematics, ElbowConfig, InverseKinematics, JointAngles};
pub use self::config::LinkConfig;
pub use self::error::{Error, Result};

pub use nalgebra;

/// Nijie kinematic constants.
pub mod consts {
    /// Default length of the proximal link (L1) in meters.
    pub const DEFAULT_PROXIMAL_LENGTH: f64 = 0.3;

    /// Default length of the distal link (L2) in meters.
    pub const DEFAULT_DISTAL_LENGTH: f64 = 0.25;

    /// Rounding band around the unit interval for the elbow cosine.
    ///
    /// A target exactly on the workspace boundary can produce a cosine a few
    /// ulps outside `[-1, 1]`. The band is scaled by `(L1 + L2)² / (2·L1·L2)`
    /// so it holds for very dissimilar link lengths. Values within the band
    /// are clamped, values beyond it are unreachable.
    pub const DOMAIN_TOLERANCE: f64 = 1e-12;
}
