//! Grid positions, continuous vectors, and the six axis directions.
//!
//! Angles follow the voxel-world convention: yaw 0 faces south (+z) and
//! increases clockwise seen from above; pitch 90 looks straight down.

use core::fmt;
use core::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// One of the six axis-aligned unit directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Negative y.
    Down,
    /// Positive y.
    Up,
    /// Negative z.
    North,
    /// Positive z.
    South,
    /// Negative x.
    West,
    /// Positive x.
    East,
}

impl Direction {
    /// All six directions, vertical first.
    pub const ALL: [Self; 6] = [
        Self::Down,
        Self::Up,
        Self::North,
        Self::South,
        Self::West,
        Self::East,
    ];

    /// The direction pointing the other way along the same axis.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Unit step along x.
    pub const fn step_x(self) -> i32 {
        match self {
            Self::West => -1,
            Self::East => 1,
            _ => 0,
        }
    }

    /// Unit step along y.
    pub const fn step_y(self) -> i32 {
        match self {
            Self::Down => -1,
            Self::Up => 1,
            _ => 0,
        }
    }

    /// Unit step along z.
    pub const fn step_z(self) -> i32 {
        match self {
            Self::North => -1,
            Self::South => 1,
            _ => 0,
        }
    }

    /// Whether this direction lies on the y axis.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Down | Self::Up)
    }

    /// Horizontal rotation angle in degrees. Vertical directions map to 0.
    pub const fn to_yaw(self) -> f32 {
        match self {
            Self::South | Self::Down | Self::Up => 0.0,
            Self::West => 90.0,
            Self::North => 180.0,
            Self::East => 270.0,
        }
    }

    /// Pitch angle in degrees: looking down is 90, up is -90.
    pub const fn to_pitch(self) -> f32 {
        match self {
            Self::Down => 90.0,
            Self::Up => -90.0,
            _ => 0.0,
        }
    }

    /// The unit vector for this direction.
    pub fn unit(self) -> Vec3 {
        Vec3::new(
            f64::from(self.step_x()),
            f64::from(self.step_y()),
            f64::from(self.step_z()),
        )
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Down => "down",
            Self::Up => "up",
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
        };
        f.write_str(name)
    }
}

/// Integer block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    /// East-west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// North-south coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Create a block position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The adjacent position one step along `direction`.
    pub const fn relative(self, direction: Direction) -> Self {
        self.offset(direction, 1)
    }

    /// The position `distance` steps along `direction`.
    ///
    /// Saturates at the `i32` range instead of wrapping.
    pub const fn offset(self, direction: Direction, distance: i32) -> Self {
        Self {
            x: self.x.saturating_add(direction.step_x().saturating_mul(distance)),
            y: self.y.saturating_add(direction.step_y().saturating_mul(distance)),
            z: self.z.saturating_add(direction.step_z().saturating_mul(distance)),
        }
    }

    /// The position directly below.
    pub const fn below(self) -> Self {
        self.relative(Direction::Down)
    }

    /// Minimum corner of the block as a continuous vector.
    pub fn corner(self) -> Vec3 {
        Vec3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// Centre of the block.
    pub fn center(self) -> Vec3 {
        self.corner() + Vec3::splat(0.5)
    }

    /// The block containing a continuous point.
    #[allow(clippy::cast_possible_truncation)]
    pub fn containing(point: Vec3) -> Self {
        // Saturating float-to-int casts; far-out points clamp to the edge.
        Self::new(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        )
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Continuous 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vector.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A vector with all three components set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Whether every component is within `epsilon` of `other`'s.
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }

    /// Unit view vector for a yaw/pitch pair in degrees.
    pub fn from_rotation(yaw: f32, pitch: f32) -> Self {
        let pitch = f64::from(pitch).to_radians();
        let yaw = -f64::from(yaw).to_radians();
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        let (sin_pitch, cos_pitch) = pitch.sin_cos();
        Self::new(sin_yaw * cos_pitch, -sin_pitch, cos_yaw * cos_pitch)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
