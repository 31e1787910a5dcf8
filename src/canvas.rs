//! 1-bit label bitmap and its wire serialization.
//!
//! The printhead is 32 dots tall, so a [`Canvas`] has a fixed height of 32
//! rows and grows only in width. Each column is held as a `u32` with bit `y`
//! set when pixel `(x, y)` is black.

use std::fmt;

use log::debug;

use crate::error::{Error, Result};
use crate::{BYTES_PER_COLUMN, HEIGHT, MAX_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Canvas {
    columns: Vec<u32>,
}

impl Canvas {
    /// Create a blank (all white) canvas.
    ///
    /// Fails with [`Error::InvalidDimension`] unless `height` is 32 and
    /// `width` is at most [`MAX_WIDTH`].
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if height != HEIGHT || width > MAX_WIDTH {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Canvas {
            columns: vec![0; width as usize],
        })
    }

    /// Create a blank canvas of the device height.
    pub fn blank(width: u32) -> Result<Self> {
        Self::new(width, HEIGHT)
    }

    /// Build a canvas from a row-major 8-bit grayscale buffer.
    ///
    /// A pixel is black when its value is at or below `threshold`. Images
    /// taller than the printhead are cropped around their vertical centre,
    /// shorter ones are rejected since there is no resizing.
    pub fn from_luma(width: u32, height: u32, luma: &[u8], threshold: u8) -> Result<Self> {
        let expected = width as usize * height as usize;
        if luma.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: luma.len(),
            });
        }
        if height < HEIGHT {
            return Err(Error::InvalidDimension { width, height });
        }

        let top = height / 2 - HEIGHT / 2;
        let mut canvas = Self::blank(width).map_err(|_| Error::InvalidDimension { width, height })?;
        for (x, column) in canvas.columns.iter_mut().enumerate() {
            for y in 0..HEIGHT {
                let index = (top + y) as usize * width as usize + x;
                if luma[index] <= threshold {
                    *column |= 1 << y;
                }
            }
        }
        debug!(
            "converted {}x{} luma image, cropped from row {}",
            width, height, top
        );
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.columns.len() as u32
    }

    pub fn height(&self) -> u32 {
        HEIGHT
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Result<bool> {
        self.check_bounds(x, y)?;
        Ok(self.columns[x as usize] & (1 << y) != 0)
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, value: bool) -> Result<()> {
        self.check_bounds(x, y)?;
        let column = &mut self.columns[x as usize];
        if value {
            *column |= 1 << y;
        } else {
            *column &= !(1 << y);
        }
        Ok(())
    }

    /// Widen the image by repeating every column `factor` times.
    ///
    /// Unstretched images print visibly narrow, so callers are expected to
    /// stretch (usually by 2) before printing.
    pub fn stretch(&self, factor: u32) -> Result<Canvas> {
        if factor < 1 {
            return Err(Error::InvalidArgument(format!(
                "stretch factor must be at least 1, got {}",
                factor
            )));
        }
        let width = self.width() as u64 * factor as u64;
        if width > MAX_WIDTH as u64 {
            return Err(Error::InvalidDimension {
                width: width.min(u32::MAX as u64) as u32,
                height: HEIGHT,
            });
        }

        let columns = self
            .columns
            .iter()
            .flat_map(|&column| std::iter::repeat(column).take(factor as usize))
            .collect();
        Ok(Canvas { columns })
    }

    /// Return a copy with black and white swapped.
    pub fn invert(&self) -> Canvas {
        Canvas {
            columns: self.columns.iter().map(|column| !column).collect(),
        }
    }

    /// Return a copy with blank columns added to the left and right.
    pub fn fill(&self, left: u32, right: u32) -> Result<Canvas> {
        let width = self.width() as u64 + left as u64 + right as u64;
        if width > MAX_WIDTH as u64 {
            return Err(Error::InvalidDimension {
                width: width.min(u32::MAX as u64) as u32,
                height: HEIGHT,
            });
        }

        let mut columns = Vec::with_capacity(width as usize);
        columns.resize(left as usize, 0);
        columns.extend_from_slice(&self.columns);
        columns.resize(width as usize, 0);
        Ok(Canvas { columns })
    }

    /// Centre the image by padding both sides until it is at least `until`
    /// columns wide. An odd difference rounds up, so the result may be one
    /// column wider than requested.
    pub fn pad(&self, until: u32) -> Result<Canvas> {
        if self.width() >= until {
            return Ok(self.clone());
        }
        let side = (until - self.width() + 1) / 2;
        self.fill(side, side)
    }

    /// Drop blank columns from both ends.
    pub fn trim(&self) -> Canvas {
        let start = self.columns.iter().position(|&c| c != 0);
        let end = self.columns.iter().rposition(|&c| c != 0);
        match (start, end) {
            (Some(start), Some(end)) => Canvas {
                columns: self.columns[start..=end].to_vec(),
            },
            _ => Canvas::default(),
        }
    }

    /// Paint every pixel white, keeping the width.
    pub fn clear(&mut self) {
        self.columns.iter_mut().for_each(|column| *column = 0);
    }

    /// Serialize into the printer's image format.
    ///
    /// Columns are emitted left to right, 4 bytes each. Pixel `y` of a column
    /// lives in byte `3 - y / 8` at bit `7 - y % 8`: the top pixel is the most
    /// significant bit of the fourth byte and the bottom pixel is bit 0 of
    /// the first byte.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.columns.len() * BYTES_PER_COLUMN);
        for column in &self.columns {
            buf.extend_from_slice(&column.reverse_bits().to_le_bytes());
        }
        buf
    }

    /// Render the canvas with unicode block characters inside a box frame.
    ///
    /// With `quad` each character covers 2x2 pixels, otherwise one pixel.
    pub fn preview(&self, quad: bool) -> String {
        let step = if quad { 2 } else { 1 };
        let cells = (self.width() + step - 1) / step;
        let mut lines = Vec::new();

        if cells > 0 {
            lines.push(format!("┌{}┐", "─".repeat(cells as usize)));
        }
        for y in (0..HEIGHT).step_by(step as usize) {
            let mut line = String::from("│");
            for x in (0..self.width()).step_by(step as usize) {
                let c = if quad {
                    let corners = self.pixel_or_blank(x, y) as usize
                        | (self.pixel_or_blank(x + 1, y) as usize) << 1
                        | (self.pixel_or_blank(x, y + 1) as usize) << 2
                        | (self.pixel_or_blank(x + 1, y + 1) as usize) << 3;
                    QUADRANTS[corners]
                } else if self.pixel_or_blank(x, y) {
                    '█'
                } else {
                    ' '
                };
                line.push(c);
            }
            line.push('│');
            lines.push(line);
        }
        if cells > 0 {
            lines.push(format!("└{}┘", "─".repeat(cells as usize)));
        }
        lines.join("\n")
    }

    fn pixel_or_blank(&self, x: u32, y: u32) -> bool {
        self.get_pixel(x, y).unwrap_or(false)
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width() || y >= HEIGHT {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: HEIGHT,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preview(true))
    }
}

// Indexed by a 4-bit mask: top left, top right, bottom left, bottom right.
const QUADRANTS: [char; 16] = [
    ' ', '▘', '▝', '▀', '▖', '▌', '▞', '▛', '▗', '▚', '▐', '▜', '▄', '▙', '▟', '█',
];
