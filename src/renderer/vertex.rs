//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for the box, floor, and outlines
pub mod colors {
    /// Clear color outside the world rectangle
    pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Boundary band between the world edge and the playable box
    pub const WORLD_FLOOR: [f32; 4] = [0.31, 0.31, 0.31, 1.0];
    pub const CHECKER_A: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const CHECKER_B: [f32; 4] = [0.78, 0.78, 0.78, 1.0];
    pub const OUTLINE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
