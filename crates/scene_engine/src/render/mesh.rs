//! Primitive mesh library interface
//!
//! The scene only draws the basic primitive shapes. Geometry generation and
//! buffer management belong to whatever implements [`MeshLibrary`].

use std::fmt;

use bitflags::bitflags;

/// Primitive shapes available to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Unit plane in XZ
    Plane,
    /// Unit cube
    Box,
    /// Capped cylinder
    Cylinder,
    /// Cone with its base on XZ
    Cone,
    /// Triangular prism
    Prism,
    /// Four-sided pyramid
    Pyramid,
    /// UV sphere
    Sphere,
    /// Cylinder narrowing towards the top
    TaperedCylinder,
    /// Torus around Y
    Torus,
}

impl MeshKind {
    /// Every kind, in loading order
    pub const ALL: [Self; 9] = [
        Self::Plane,
        Self::Box,
        Self::Cylinder,
        Self::Cone,
        Self::Prism,
        Self::Pyramid,
        Self::Sphere,
        Self::TaperedCylinder,
        Self::Torus,
    ];

    /// Human readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plane => "plane",
            Self::Box => "box",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
            Self::Prism => "prism",
            Self::Pyramid => "pyramid4",
            Self::Sphere => "sphere",
            Self::TaperedCylinder => "tapered cylinder",
            Self::Torus => "torus",
        }
    }
}

impl fmt::Display for MeshKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of loaded mesh kinds
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MeshSet: u16 {
        /// Plane
        const PLANE = 1 << 0;
        /// Box
        const BOX = 1 << 1;
        /// Cylinder
        const CYLINDER = 1 << 2;
        /// Cone
        const CONE = 1 << 3;
        /// Prism
        const PRISM = 1 << 4;
        /// Pyramid
        const PYRAMID = 1 << 5;
        /// Sphere
        const SPHERE = 1 << 6;
        /// Tapered cylinder
        const TAPERED_CYLINDER = 1 << 7;
        /// Torus
        const TORUS = 1 << 8;
    }
}

impl MeshSet {
    /// Flag for a single kind
    pub const fn from_kind(kind: MeshKind) -> Self {
        match kind {
            MeshKind::Plane => Self::PLANE,
            MeshKind::Box => Self::BOX,
            MeshKind::Cylinder => Self::CYLINDER,
            MeshKind::Cone => Self::CONE,
            MeshKind::Prism => Self::PRISM,
            MeshKind::Pyramid => Self::PYRAMID,
            MeshKind::Sphere => Self::SPHERE,
            MeshKind::TaperedCylinder => Self::TAPERED_CYLINDER,
            MeshKind::Torus => Self::TORUS,
        }
    }

    /// True if `kind` is in the set
    pub const fn has(self, kind: MeshKind) -> bool {
        self.contains(Self::from_kind(kind))
    }

    /// Kinds in the set, in loading order
    pub fn kinds(self) -> impl Iterator<Item = MeshKind> {
        MeshKind::ALL.into_iter().filter(move |kind| self.has(*kind))
    }
}

impl From<MeshKind> for MeshSet {
    fn from(kind: MeshKind) -> Self {
        Self::from_kind(kind)
    }
}

/// Facility that owns primitive geometry and issues draw calls
pub trait MeshLibrary {
    /// Create the GPU geometry for `kind`
    fn load_mesh(&mut self, kind: MeshKind);

    /// Draw `kind` with the shader state currently applied
    fn draw_mesh(&mut self, kind: MeshKind);
}

impl<M: MeshLibrary + ?Sized> MeshLibrary for &mut M {
    fn load_mesh(&mut self, kind: MeshKind) {
        (**self).load_mesh(kind);
    }

    fn draw_mesh(&mut self, kind: MeshKind) {
        (**self).draw_mesh(kind);
    }
}
