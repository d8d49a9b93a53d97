//! Continuous 2-D field geometry.
//!
//! `Vec2` uses `f32` (single precision) like the rest of the core.  The pitch
//! is at most a few hundred units across, so `f32` keeps ~1e-5 relative
//! precision while halving snapshot size vs. `f64`.
//!
//! # Orientation
//!
//! ```text
//!  (0, height) ┌──────────────────────────┐ (width, height)
//!              │                          │
//!   Home goal  │            ·             │  Away goal
//!   (x = 0)    │          centre          │  (x = width)
//!              │                          │
//!       (0, 0) └──────────────────────────┘ (width, 0)
//! ```
//!
//! `Team::Home` defends x = 0 and attacks x = width; `Team::Away` the reverse.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use crate::{ConfigError, ConfigResult, Team};

// ── Vec2 ──────────────────────────────────────────────────────────────────────

/// A point or displacement on the field.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn distance_squared(self, other: Vec2) -> f32 {
        (other - self).length_squared()
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or `Vec2::ZERO` for a zero-length
    /// (or non-finite) input.  Never returns NaN.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Vec2::new(self.x / len, self.y / len)
        } else {
            Vec2::ZERO
        }
    }

    /// Unit vector pointing from `self` toward `target` (zero if coincident).
    #[inline]
    pub fn direction_to(self, target: Vec2) -> Vec2 {
        (target - self).normalized()
    }

    /// Same direction, magnitude capped at `max`.
    pub fn clamp_length(self, max: f32) -> Vec2 {
        let len = self.length();
        if len > max && len > 0.0 {
            self * (max / len)
        } else {
            self
        }
    }

    /// Linear interpolation: `self + (other - self) * t`.
    #[inline]
    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        self + (other - self) * t
    }

    /// Counter-clockwise rotation by `angle` radians.
    pub fn rotated(self, angle: f32) -> Vec2 {
        let (s, c) = angle.sin_cos();
        Vec2::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Field ─────────────────────────────────────────────────────────────────────

/// The immutable playing area `[0, width] × [0, height]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    width:  f32,
    height: f32,
}

impl Field {
    /// Construct a field.  Both dimensions must be finite and strictly positive.
    pub fn new(width: f32, height: f32) -> ConfigResult<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ConfigError::InvalidField { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// `true` if `p` lies inside the closed rectangle.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Nearest point of the field to `p`.
    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }

    /// x coordinate of the goal line `team` defends.
    #[inline]
    pub fn own_goal_x(&self, team: Team) -> f32 {
        match team {
            Team::Home => 0.0,
            Team::Away => self.width,
        }
    }

    /// Centre of the goal line `team` defends.
    #[inline]
    pub fn own_goal(&self, team: Team) -> Vec2 {
        Vec2::new(self.own_goal_x(team), self.height * 0.5)
    }

    /// Centre of the goal line `team` attacks.
    #[inline]
    pub fn attacking_goal(&self, team: Team) -> Vec2 {
        self.own_goal(team.opponent())
    }

    /// `+1.0` if `team` attacks toward increasing x, `-1.0` otherwise.
    #[inline]
    pub fn attack_direction(&self, team: Team) -> f32 {
        match team {
            Team::Home => 1.0,
            Team::Away => -1.0,
        }
    }
}

// ── BoundaryPolicy ────────────────────────────────────────────────────────────

/// What happens to a free ball that would leave the field.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum BoundaryPolicy {
    /// Stop at the edge; the velocity component normal to that edge is zeroed.
    Clamp,
    /// Mirror off the edge; the normal velocity component is inverted and
    /// scaled by `restitution` (in `[0, 1]`).
    Reflect { restitution: f32 },
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        BoundaryPolicy::Reflect { restitution: 0.8 }
    }
}

impl BoundaryPolicy {
    /// Resolve a proposed ball `position` / `velocity` against `field`.
    ///
    /// The returned position is always inside the field.
    pub fn resolve(self, field: &Field, position: Vec2, velocity: Vec2) -> (Vec2, Vec2) {
        let (x, vx) = resolve_axis(self, position.x, velocity.x, field.width);
        let (y, vy) = resolve_axis(self, position.y, velocity.y, field.height);
        (Vec2::new(x, y), Vec2::new(vx, vy))
    }
}

fn resolve_axis(policy: BoundaryPolicy, p: f32, v: f32, max: f32) -> (f32, f32) {
    if (0.0..=max).contains(&p) {
        return (p, v);
    }
    match policy {
        BoundaryPolicy::Clamp => (p.clamp(0.0, max), 0.0),
        BoundaryPolicy::Reflect { restitution } => {
            let mirrored = if p < 0.0 { -p } else { 2.0 * max - p };
            // A single mirror can still overshoot when |step| > field size.
            (mirrored.clamp(0.0, max), -v * restitution)
        }
    }
}
