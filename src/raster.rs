//! RGBA8 drawing primitives shared by the window frame buffer and
//! off-screen images.

use crate::grid::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba([r, g, b, 255])
    }

    /// Color with alpha given as a fraction in `0.0..=1.0`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Rgba([r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8])
    }
}

/// The 2D drawing context the surface renders into.
pub trait Canvas {
    /// Overwrites the rectangle with an opaque color.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Source-over blends `color` (using its alpha) onto the rectangle.
    fn blend_rect(&mut self, rect: Rect, color: Rgba);

    /// Copies `image` with its top-left corner at `(x, y)`.
    fn put_image(&mut self, image: &Image, x: i32, y: i32);

    /// Reads back a region. Pixels outside the canvas come back transparent.
    fn get_image(&self, rect: Rect) -> Image;
}

/// Anything backed by a tightly packed RGBA8 buffer.
pub trait RgbaBuffer {
    fn dimensions(&self) -> (u32, u32);
    fn bytes(&self) -> &[u8];
    fn bytes_mut(&mut self) -> &mut [u8];

    fn pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        let (width, height) = self.dimensions();
        if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
            return None;
        }
        let index = ((y as u32 * width + x as u32) * 4) as usize;
        if index + 3 < self.bytes().len() {
            Some(index)
        } else {
            None
        }
    }

    fn for_each_in(&mut self, rect: Rect, mut f: impl FnMut(&mut [u8])) {
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                if let Some(index) = self.pixel_index(x, y) {
                    f(&mut self.bytes_mut()[index..index + 4]);
                }
            }
        }
    }
}

fn blend_channel(dst: u8, src: u8, alpha: u8) -> u8 {
    let alpha = alpha as u16;
    ((dst as u16 * (255 - alpha) + src as u16 * alpha + 127) / 255) as u8
}

impl<T: RgbaBuffer> Canvas for T {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let [r, g, b, _] = color.0;
        self.for_each_in(rect, |pixel| pixel.copy_from_slice(&[r, g, b, 255]));
    }

    fn blend_rect(&mut self, rect: Rect, color: Rgba) {
        let [r, g, b, a] = color.0;
        self.for_each_in(rect, |pixel| {
            pixel[0] = blend_channel(pixel[0], r, a);
            pixel[1] = blend_channel(pixel[1], g, a);
            pixel[2] = blend_channel(pixel[2], b, a);
            pixel[3] = blend_channel(pixel[3], 255, a);
        });
    }

    fn put_image(&mut self, image: &Image, x: i32, y: i32) {
        for iy in 0..image.height as i32 {
            for ix in 0..image.width as i32 {
                let src = image.pixel_index(ix, iy);
                let dst = self.pixel_index(x + ix, y + iy);
                let (Some(src), Some(dst)) = (src, dst) else {
                    continue;
                };
                self.bytes_mut()[dst..dst + 4].copy_from_slice(&image.data[src..src + 4]);
            }
        }
    }

    fn get_image(&self, rect: Rect) -> Image {
        let mut image = Image::new(rect.width.max(0) as u32, rect.height.max(0) as u32);
        for iy in 0..rect.height {
            for ix in 0..rect.width {
                let src = self.pixel_index(rect.x + ix, rect.y + iy);
                let dst = image.pixel_index(ix, iy);
                let (Some(src), Some(dst)) = (src, dst) else {
                    continue;
                };
                image.data[dst..dst + 4].copy_from_slice(&self.bytes()[src..src + 4]);
            }
        }
        image
    }
}

/// Owned off-screen pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let index = self.pixel_index(x as i32, y as i32)?;
        let mut pixel = [0u8; 4];
        pixel.copy_from_slice(&self.data[index..index + 4]);
        Some(Rgba(pixel))
    }
}

impl RgbaBuffer for Image {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// Borrowed view over a frame buffer such as `Pixels::frame_mut`.
pub struct FrameView<'a> {
    width: u32,
    height: u32,
    frame: &'a mut [u8],
}

impl<'a> FrameView<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self { width, height, frame }
    }

    pub fn clear(&mut self, color: Rgba) {
        let [r, g, b, _] = color.0;
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[r, g, b, 255]);
        }
    }
}

impl RgbaBuffer for FrameView<'_> {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn bytes(&self) -> &[u8] {
        &*self.frame
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut *self.frame
    }
}
