//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Texture coordinate used for solid fills (center of the white texture)
pub const SOLID_TEX_COORD: [f32; 2] = [0.5, 0.5];

/// Colored, texturable vertex; z is always 0
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [u8; 4]) -> Self {
        Self {
            position: [x, y, 0.0],
            color,
            tex_coord: SOLID_TEX_COORD,
        }
    }

    pub fn xy(&self) -> Vec2 {
        Vec2::new(self.position[0], self.position[1])
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Unorm8x4,
            2 => Float32x2
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Colors for game elements (RGBA, 0-255)
pub mod colors {
    /// Unpack 0xRRGGBBAA
    pub const fn hex(rgba: u32) -> [u8; 4] {
        [
            (rgba >> 24) as u8,
            (rgba >> 16) as u8,
            (rgba >> 8) as u8,
            rgba as u8,
        ]
    }

    pub const BACKGROUND: [u8; 4] = hex(0x193b59ff);
    pub const FOREGROUND: [u8; 4] = hex(0xf2d2b6ff);
    pub const WALL_SHADOW: [u8; 4] = hex(0xf2ad94ff);
    pub const LEFT: [u8; 4] = hex(0x95ce44ff);
    pub const LEFT_SHADOW: [u8; 4] = hex(0x6d9d2aff);
    pub const RIGHT: [u8; 4] = hex(0xb7ebf1ff);
    pub const RIGHT_SHADOW: [u8; 4] = hex(0x99e3ebff);
    /// Translucent overlay drawn over the court at game over
    pub const SHADE: [u8; 4] = hex(0x00000040);
}
