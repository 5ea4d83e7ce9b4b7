use std::fmt;

use nalgebra::Point2;
use serde::Deserialize;

use crate::{consts, Error, LinkConfig, Result};

/// Elbow configuration of the arm.
///
/// A target strictly inside the workspace is reached by two mirror-image
/// poses, reflected about the line from the base to the target. On the
/// workspace boundary both configurations coincide.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElbowConfig {
    /// Elbow-down, positive relative elbow angle.
    #[default]
    Down,
    /// Elbow-up, negative relative elbow angle.
    Up,
}

impl ElbowConfig {
    #[inline]
    fn apply(&self, angle: f64) -> f64 {
        match self {
            ElbowConfig::Down => angle,
            ElbowConfig::Up => -angle,
        }
    }
}

/// Selector as encoded on the wire, 0 is elbow-down and any other value
/// is elbow-up.
impl From<u8> for ElbowConfig {
    fn from(value: u8) -> Self {
        match value {
            0 => ElbowConfig::Down,
            _ => ElbowConfig::Up,
        }
    }
}

impl From<ElbowConfig> for u8 {
    fn from(value: ElbowConfig) -> Self {
        match value {
            ElbowConfig::Down => 0,
            ElbowConfig::Up => 1,
        }
    }
}

impl fmt::Display for ElbowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElbowConfig::Down => write!(f, "elbow-down"),
            ElbowConfig::Up => write!(f, "elbow-up"),
        }
    }
}

/// Joint angle pair driving both motors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAngles {
    /// Proximal joint angle measured from the positive x-axis, in radians.
    pub theta1: f64,
    /// Absolute orientation of the distal link in the base frame, in radians.
    ///
    /// This is not the angle between the links, see [`JointAngles::relative`].
    pub theta2: f64,
}

impl JointAngles {
    pub fn new(theta1: f64, theta2: f64) -> Self {
        Self { theta1, theta2 }
    }

    /// Relative angle between the links at the elbow.
    #[inline]
    pub fn relative(&self) -> f64 {
        self.theta2 - self.theta1
    }

    pub fn theta1_degree(&self) -> f64 {
        self.theta1.to_degrees()
    }

    pub fn theta2_degree(&self) -> f64 {
        self.theta2.to_degrees()
    }
}

impl From<JointAngles> for (f64, f64) {
    fn from(value: JointAngles) -> Self {
        (value.theta1, value.theta2)
    }
}

impl fmt::Display for JointAngles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Theta 1: {:+.3}rad ({:+.1}°) Theta 2: {:+.3}rad ({:+.1}°)",
            self.theta1,
            self.theta1_degree(),
            self.theta2,
            self.theta2_degree()
        )
    }
}

/// Inverse kinematics of the planar two-link arm.
///
/// The first joint sits on the base frame origin. Both links are driven by
/// coaxial motors, so the distal angle is reported in the base frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseKinematics {
    l1: f64,
    l2: f64,
}

impl InverseKinematics {
    /// Construct the solver from the proximal (`l1`) and distal (`l2`) link
    /// lengths in meters.
    ///
    /// Both lengths must be strictly positive. This is not checked here, use
    /// [`LinkConfig::is_valid`] on untrusted geometry.
    pub fn new(l1: f64, l2: f64) -> Self {
        Self { l1, l2 }
    }

    #[inline]
    pub fn proximal_length(&self) -> f64 {
        self.l1
    }

    #[inline]
    pub fn distal_length(&self) -> f64 {
        self.l2
    }

    /// Inner and outer radius of the reachable annulus.
    pub fn reach(&self) -> (f64, f64) {
        ((self.l1 - self.l2).abs(), self.l1 + self.l2)
    }

    /// Cosine of the relative elbow angle, by the law of cosines on the
    /// triangle formed by the base, the elbow and the target.
    ///
    /// Returns `None` when no such triangle exists. A non-finite cosine
    /// fails the bound check as well.
    fn elbow_cosine(&self, target: &Point2<f64>) -> Option<f64> {
        let denominator = 2.0 * self.l1 * self.l2;

        let d = (target.x.powi(2) + target.y.powi(2) - self.l1.powi(2) - self.l2.powi(2))
            / denominator;

        // Rounding in the numerator grows with the squared arm length, not
        // with the denominator.
        let tolerance = consts::DOMAIN_TOLERANCE * (self.l1 + self.l2).powi(2) / denominator;

        if d.is_finite() && d.abs() <= 1.0 + tolerance {
            Some(d.clamp(-1.0, 1.0))
        } else {
            None
        }
    }

    /// Test if the target lies within the workspace.
    ///
    /// This applies the same check as [`InverseKinematics::solve`].
    pub fn is_reachable(&self, target: &Point2<f64>) -> bool {
        self.elbow_cosine(target).is_some()
    }

    /// Solve the joint angles placing the end effector on the target.
    ///
    /// Returns [`Error::TargetUnreachable`] if the target is outside the
    /// workspace. Unreachable targets are never approximated.
    pub fn solve(&self, target: &Point2<f64>, config: ElbowConfig) -> Result<JointAngles> {
        let d = self.elbow_cosine(target).ok_or(Error::TargetUnreachable)?;

        let theta2_rel = config.apply(d.acos());

        let k1 = self.l1 + self.l2 * theta2_rel.cos();
        let k2 = self.l2 * theta2_rel.sin();

        let theta1 = target.y.atan2(target.x) - k2.atan2(k1);

        Ok(JointAngles::new(theta1, theta1 + theta2_rel))
    }
}

impl Default for InverseKinematics {
    fn default() -> Self {
        Self::new(
            consts::DEFAULT_PROXIMAL_LENGTH,
            consts::DEFAULT_DISTAL_LENGTH,
        )
    }
}

impl From<&LinkConfig> for InverseKinematics {
    fn from(value: &LinkConfig) -> Self {
        Self::new(value.proximal_length, value.distal_length)
    }
}

/// Solve the joint angles `(theta1, theta2)` for target `(x, y)`.
///
/// `theta2` is the absolute orientation of the distal link.
pub fn inverse_kinematics(
    x: f64,
    y: f64,
    l1: f64,
    l2: f64,
    config: ElbowConfig,
) -> Result<(f64, f64)> {
    InverseKinematics::new(l1, l2)
        .solve(&Point2::new(x, y), config)
        .map(Into::into)
}
