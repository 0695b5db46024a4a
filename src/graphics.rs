use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;
use crate::raster::{FrameView, Rgba};
use crate::surface::Surface;

const PAGE_BACKGROUND: Rgba = Rgba::WHITE;

/// Window-backed frame buffer the surface is drawn into.
pub struct GraphicsRenderer {
    pixels: Pixels,
    width: u32,
    height: u32,
}

impl GraphicsRenderer {
    pub fn new(window: &Window, width: u32, height: u32) -> Result<Self, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, window);
        let pixels = Pixels::new(width, height, surface_texture)?;

        Ok(Self { pixels, width, height })
    }

    /// The buffer keeps its size; only the scaled window surface changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Err(err) = self.pixels.resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }
    }

    /// Maps a physical window position to frame buffer pixels. Positions
    /// outside the buffer keep their (possibly negative) coordinates.
    pub fn window_to_canvas(&self, x: f64, y: f64) -> (i32, i32) {
        match self.pixels.window_pos_to_pixel((x as f32, y as f32)) {
            Ok((px, py)) => (px as i32, py as i32),
            Err((px, py)) => (px as i32, py as i32),
        }
    }

    pub fn render(&mut self, surface: &Surface) {
        let mut frame = FrameView::new(self.pixels.frame_mut(), self.width, self.height);
        frame.clear(PAGE_BACKGROUND);
        surface.render(&mut frame);
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}
