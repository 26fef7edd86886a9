use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Below this length the `Y × forward` cross product is treated as degenerate.
const DEGENERATE_CROSS: f32 = 1e-4;

/// The traced output of one interpretation pass.
///
/// Branch segments and geometry markers appear in the order the turtle produced them.
/// Mesh builders consume this to instance wedge geometry along branches and ornaments
/// at markers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    /// Every `F` move, start to end.
    pub branches: Vec<Branch>,

    /// Every non-control symbol, tagged with where the turtle stood.
    pub geometry: Vec<Geometry>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty() && self.geometry.is_empty()
    }

    /// Axis-aligned `(min, max)` corners enclosing every branch endpoint and marker.
    ///
    /// Returns `None` for an empty skeleton.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let points = self
            .branches
            .iter()
            .flat_map(|b| [b.start, b.end])
            .chain(self.geometry.iter().map(|g| g.position));

        points.fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((min, max)) => Some((min.min(p), max.max(p))),
        })
    }
}

/// A straight segment traced by the turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub start: Vec3,
    pub end: Vec3,
}

impl Branch {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Unnormalized vector from `start` to `end`.
    pub fn direction(&self) -> Vec3 {
        self.end - self.start
    }

    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    /// Orthonormal basis aligned with the segment, used to orient instanced branch meshes.
    ///
    /// `forward` follows the segment. `left` is `Y × forward`; when the segment is
    /// (nearly) parallel to `Y` the basis is built from `Z` instead.
    pub fn frame(&self) -> BranchFrame {
        let forward = self.direction().normalize_or_zero();
        let mut left = Vec3::Y.cross(forward);
        let up;

        if left.length() < DEGENERATE_CROSS {
            up = forward.cross(Vec3::Z);
            left = up.cross(forward);
        } else {
            up = forward.cross(left);
        }

        BranchFrame {
            left: left.normalize_or_zero(),
            up: up.normalize_or_zero(),
            forward,
        }
    }
}

/// Local basis of a [`Branch`], see [`Branch::frame`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchFrame {
    pub left: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

/// A marker left by a symbol with no turtle meaning.
///
/// The symbol selects which decoration (leaf, flower, ...) a mesh builder places here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub position: Vec3,
    pub symbol: char,
}
