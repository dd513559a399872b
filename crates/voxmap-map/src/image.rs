//! Output pixel buffer and tile blitting.

use voxmap_chunk::{CHUNK_SIZE, TILE_BYTES};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// Top-left origin, row-major, 8 bits per channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapImage {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl MapImage {
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            data: vec![0; width * height * format.bytes_per_pixel()],
        }
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.format.bytes_per_pixel()
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let o = self.offset(x, y);
        [self.data[o], self.data[o + 1], self.data[o + 2]]
    }

    /// Write an opaque pixel.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let o = self.offset(x, y);
        self.data[o..o + 3].copy_from_slice(&rgb);
        if self.format == PixelFormat::Rgba {
            self.data[o + 3] = 0xff;
        }
    }

    /// Copy a 16x16 RGBA tile with its top-left corner at `(px, py)`, each
    /// source pixel covering `zoom` output pixels per axis. Parts outside the
    /// image are clipped.
    pub fn blit(&mut self, tile: &[u8; TILE_BYTES], px: i32, py: i32, zoom: f64) {
        let span = (CHUNK_SIZE as f64 * zoom) as i32;
        if span <= 0 {
            return;
        }
        let (w, h) = (self.width as i32, self.height as i32);
        if px >= w || py >= h || px + span <= 0 || py + span <= 0 {
            return;
        }
        let row_bytes = CHUNK_SIZE * 4;
        if zoom == 1.0 && self.format == PixelFormat::Rgba && px >= 0 && px + span <= w {
            for sy in 0..CHUNK_SIZE {
                let y = py + sy as i32;
                if y < 0 {
                    continue;
                }
                if y >= h {
                    break;
                }
                let o = self.offset(px as usize, y as usize);
                self.data[o..o + row_bytes]
                    .copy_from_slice(&tile[sy * row_bytes..(sy + 1) * row_bytes]);
            }
            return;
        }
        for dy in 0..span {
            let y = py + dy;
            if y < 0 {
                continue;
            }
            if y >= h {
                break;
            }
            let sy = ((f64::from(dy) / zoom) as usize).min(CHUNK_SIZE - 1);
            for dx in 0..span {
                let x = px + dx;
                if x < 0 {
                    continue;
                }
                if x >= w {
                    break;
                }
                let sx = ((f64::from(dx) / zoom) as usize).min(CHUNK_SIZE - 1);
                let s = (sy * CHUNK_SIZE + sx) * 4;
                self.put_pixel(x as usize, y as usize, [tile[s], tile[s + 1], tile[s + 2]]);
            }
        }
    }
}
