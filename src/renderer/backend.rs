//! Rendering backend seam
//!
//! The scene builder produces vertices and a transform; a backend uploads
//! and draws them. Backend failures are reported through the log, never
//! back into the game.

use std::fmt;

use glam::{Mat4, UVec2};

use super::scene::build_frame;
use super::transform::CourtTransform;
use super::vertex::Vertex;
use crate::sim::GameState;

/// Backend failure while presenting a frame
#[derive(Debug)]
pub enum RenderError {
    /// Surface could not provide a frame (lost, outdated, timeout)
    Surface(wgpu::SurfaceError),
    /// Draw issued before any vertices were uploaded
    NothingUploaded,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(err) => write!(f, "surface error: {err}"),
            Self::NothingUploaded => write!(f, "draw called before vertex upload"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(err) => Some(err),
            Self::NothingUploaded => None,
        }
    }
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        Self::Surface(err)
    }
}

/// Something that can draw a colored triangle list
pub trait RenderBackend {
    /// Replace the vertex buffer contents for the next draw
    fn upload_vertices(&mut self, vertices: &[Vertex]) -> Result<(), RenderError>;

    /// Draw the first `triangle_count` uploaded triangles with the given
    /// object-to-clip matrix
    fn draw(&mut self, triangle_count: u32, court_to_clip: &Mat4) -> Result<(), RenderError>;
}

/// CPU-only backend that keeps the last frame it was given
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    pub vertices: Vec<Vertex>,
    pub last_draw: Option<(u32, Mat4)>,
    pub frames_drawn: u64,
    uploaded: bool,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderBackend for HeadlessBackend {
    fn upload_vertices(&mut self, vertices: &[Vertex]) -> Result<(), RenderError> {
        self.vertices.clear();
        self.vertices.extend_from_slice(vertices);
        self.uploaded = true;
        Ok(())
    }

    fn draw(&mut self, triangle_count: u32, court_to_clip: &Mat4) -> Result<(), RenderError> {
        if !self.uploaded {
            return Err(RenderError::NothingUploaded);
        }
        self.last_draw = Some((triangle_count, *court_to_clip));
        self.frames_drawn += 1;
        Ok(())
    }
}

/// Draw the current state through `backend`.
///
/// Returns the frame's transform so callers can map pointer positions back
/// into the court. Backend errors are logged and otherwise ignored.
pub fn draw<B: RenderBackend + ?Sized>(
    state: &GameState,
    drawable_size: UVec2,
    backend: &mut B,
) -> CourtTransform {
    let frame = build_frame(state, drawable_size);

    let result = backend
        .upload_vertices(&frame.vertices)
        .and_then(|()| backend.draw(frame.triangle_count(), &frame.transform.court_to_clip));
    match result {
        Ok(()) => {}
        Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
            log::error!("Out of GPU memory while drawing frame");
        }
        Err(e) => log::warn!("Render error: {e}"),
    }

    frame.transform
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend whose surface is always lost
    struct LostSurface;

    impl RenderBackend for LostSurface {
        fn upload_vertices(&mut self, _: &[Vertex]) -> Result<(), RenderError> {
            Ok(())
        }

        fn draw(&mut self, _: u32, _: &Mat4) -> Result<(), RenderError> {
            Err(wgpu::SurfaceError::Lost.into())
        }
    }

    #[test]
    fn test_draw_uploads_and_submits() {
        let state = GameState::new();
        let mut backend = HeadlessBackend::new();
        let size = UVec2::new(1280, 720);

        let transform = draw(&state, size, &mut backend);

        let (triangles, matrix) = backend.last_draw.unwrap();
        assert_eq!(triangles as usize * 3, backend.vertices.len());
        assert_eq!(matrix, transform.court_to_clip);
        assert_eq!(backend.frames_drawn, 1);
    }

    #[test]
    fn test_backend_errors_do_not_escape() {
        let state = GameState::new();
        let transform = draw(&state, UVec2::new(640, 480), &mut LostSurface);
        assert!(transform.scale > 0.0);
    }

    #[test]
    fn test_headless_rejects_draw_without_upload() {
        let mut backend = HeadlessBackend::new();
        assert!(matches!(
            backend.draw(0, &Mat4::IDENTITY),
            Err(RenderError::NothingUploaded)
        ));
    }
}
