//! CPU-side mesh data and procedural sphere generation.

use bytemuck::{Pod, Zeroable};
use std::f32::consts::{PI, TAU};

/// Vertex format shared by every mesh in the scene.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    /// Linear RGBA, multiplied with the draw color.
    pub color: [f32; 4],
}

impl Vertex {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    /// Get the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        use wgpu::{VertexAttribute, VertexFormat};

        const ATTRIBUTES: &[VertexAttribute] = &[
            VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: VertexFormat::Float32x3,
            },
            VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: VertexFormat::Float32x3,
            },
            VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: VertexFormat::Float32x2,
            },
            VertexAttribute {
                offset: 32,
                shader_location: 3,
                format: VertexFormat::Float32x4,
            },
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRIBUTES,
        }
    }
}

/// Primitive assembly of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    TriangleList,
    TriangleStrip,
    LineStrip,
}

impl Topology {
    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
            Topology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
            Topology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
        }
    }

    /// Strip topologies need an explicit index format for primitive restart.
    pub fn strip_index_format(self) -> Option<wgpu::IndexFormat> {
        match self {
            Topology::TriangleList => None,
            Topology::TriangleStrip | Topology::LineStrip => Some(wgpu::IndexFormat::Uint32),
        }
    }
}

/// Indexed geometry ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl MeshData {
    /// A strip whose indices simply walk the vertices in order.
    pub fn strip(vertices: Vec<Vertex>, topology: Topology) -> Self {
        let indices = (0..vertices.len() as u32).collect();
        Self {
            vertices,
            indices,
            topology,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// Which side of a sphere faces the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SphereOrientation {
    /// Counter-clockwise when seen from outside, normals point outward.
    Outside,
    /// Counter-clockwise when seen from the center, normals point inward.
    Inside,
}

/// Generate a unit UV sphere with poles on ±Y.
///
/// Latitude row `i` runs from the north pole (`v = 0`) to the south pole
/// (`v = 1`); longitude column `j` wraps once around with a duplicated seam
/// column so `u` spans `[0, 1]`. Yields `(stacks + 1)·(slices + 1)` vertices
/// and `6·slices·stacks` indices.
pub fn uv_sphere(slices: u32, stacks: u32, orientation: SphereOrientation) -> MeshData {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let normal_sign = match orientation {
        SphereOrientation::Outside => 1.0,
        SphereOrientation::Inside => -1.0,
    };

    let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
    for i in 0..=stacks {
        let phi = PI * i as f32 / stacks as f32;
        for j in 0..=slices {
            let theta = TAU * j as f32 / slices as f32;
            let position = [phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin()];
            vertices.push(Vertex {
                position,
                normal: position.map(|c| c * normal_sign),
                uv: [j as f32 / slices as f32, i as f32 / stacks as f32],
                color: Vertex::WHITE,
            });
        }
    }

    let row = slices + 1;
    let mut indices = Vec::with_capacity((6 * slices * stacks) as usize);
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * row + j;
            let b = (i + 1) * row + j;
            let c = (i + 1) * row + j + 1;
            let d = i * row + j + 1;
            match orientation {
                SphereOrientation::Outside => indices.extend_from_slice(&[a, c, b, a, d, c]),
                SphereOrientation::Inside => indices.extend_from_slice(&[a, b, c, a, c, d]),
            }
        }
    }

    MeshData {
        vertices,
        indices,
        topology: Topology::TriangleList,
    }
}
