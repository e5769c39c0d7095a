//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
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

/// Colors for game elements (sRGB, straight alpha)
pub mod colors {
    /// `#1e3c72`
    pub const BACKGROUND_TOP: [f32; 4] = [0.118, 0.235, 0.447, 1.0];
    /// `#2a5298`
    pub const BACKGROUND_BOTTOM: [f32; 4] = [0.165, 0.322, 0.596, 1.0];
    /// `#4ecdc4`
    pub const PLAYER: [f32; 4] = [0.306, 0.804, 0.769, 1.0];
    /// `#ff6b6b`
    pub const ENEMY: [f32; 4] = [1.0, 0.42, 0.42, 1.0];
    /// `#ffd700`
    pub const POWER_UP_SLOW: [f32; 4] = [1.0, 0.843, 0.0, 1.0];
    /// `#ff69b4`
    pub const POWER_UP_DESTROY: [f32; 4] = [1.0, 0.412, 0.706, 1.0];
    pub const SYMBOL: [f32; 4] = [1.0, 1.0, 1.0, 0.9];

    /// Same color at a different opacity
    pub const fn with_alpha(c: [f32; 4], a: f32) -> [f32; 4] {
        [c[0], c[1], c[2], a]
    }
}
