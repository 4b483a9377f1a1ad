use core::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
    Pixel,
};

pub const FRAME_WIDTH: usize = 128;
pub const FRAME_HEIGHT: usize = 64;
pub const PAGE_HEIGHT: usize = 8;
pub const PAGES: usize = FRAME_HEIGHT / PAGE_HEIGHT;
pub const FRAME_BYTES: usize = FRAME_WIDTH * PAGES;

/// Packed 1 bit per pixel frame in the panel's native page layout.
///
/// Byte `x + page * 128` holds column `x` of rows `page * 8 .. page * 8 + 8`,
/// with bit `n` set for row `page * 8 + n`. The buffer goes to the panel
/// unchanged, so this layout must not change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    buf: [u8; FRAME_BYTES],
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// An all-dark frame.
    pub const fn new() -> Self {
        Self { buf: [0; FRAME_BYTES] }
    }

    pub fn clear(&mut self) {
        self.buf = [0; FRAME_BYTES];
    }

    fn index(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= FRAME_WIDTH as i32 || y >= FRAME_HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((x + (y / PAGE_HEIGHT) * FRAME_WIDTH, 1 << (y % PAGE_HEIGHT)))
    }

    /// Off-screen coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((i, bit)) = Self::index(x, y) {
            if on {
                self.buf[i] |= bit;
            } else {
                self.buf[i] &= !bit;
            }
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::index(x, y).is_some_and(|(i, bit)| self.buf[i] & bit != 0)
    }

    /// Lights every pixel of column `x` between `y1` and `y2`, inclusive, in either order.
    pub fn vline(&mut self, x: i32, y1: i32, y2: i32) {
        let (top, bottom) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        for y in top..=bottom {
            self.set_pixel(x, y, true);
        }
    }

    /// Overwrites one whole byte (8 rows) of column `x` in `page`.
    pub fn set_page_byte(&mut self, x: usize, page: usize, byte: u8) {
        if x < FRAME_WIDTH && page < PAGES {
            self.buf[x + page * FRAME_WIDTH] = byte;
        }
    }

    /// The 128 bytes of one page, in column order.
    ///
    /// # Panics
    /// If `page >= PAGES`.
    pub fn page(&self, page: usize) -> &[u8] {
        &self.buf[page * FRAME_WIDTH..(page + 1) * FRAME_WIDTH]
    }

    /// The whole buffer exactly as the panel expects it.
    pub fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.buf
    }

    /// Every lit pixel, for mirroring the frame onto another draw target.
    pub fn lit_pixels(&self) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
        (0..FRAME_HEIGHT as i32).flat_map(move |y| {
            (0..FRAME_WIDTH as i32).filter_map(move |x| {
                self.pixel(x, y)
                    .then(|| Pixel(embedded_graphics::geometry::Point::new(x, y), BinaryColor::On))
            })
        })
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(FRAME_WIDTH as u32, FRAME_HEIGHT as u32)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
    };

    #[test]
    fn single_pixel_packs_into_page_byte() {
        let mut frame = Frame::new();
        frame.set_pixel(5, 10, true);

        let bytes = frame.as_bytes();
        assert_eq!(bytes[133], 1 << 2);
        let lit = bytes.iter().filter(|&&b| b != 0).count();
        assert_eq!(lit, 1);
        assert!(frame.pixel(5, 10));
    }

    #[test]
    fn out_of_range_pixels_are_ignored() {
        let mut frame = Frame::new();
        frame.set_pixel(-1, 0, true);
        frame.set_pixel(128, 0, true);
        frame.set_pixel(0, 64, true);
        assert_eq!(frame, Frame::new());
        assert!(!frame.pixel(200, 5));
    }

    #[test]
    fn vline_spans_pages_either_direction() {
        let mut frame = Frame::new();
        frame.vline(3, 9, 6);
        assert_eq!(frame.page(0)[3], 0b1100_0000);
        assert_eq!(frame.page(1)[3], 0b0000_0011);
    }

    #[test]
    fn clearing_a_pixel() {
        let mut frame = Frame::new();
        frame.set_page_byte(7, 2, 0xFF);
        frame.set_pixel(7, 20, false);
        assert_eq!(frame.page(2)[7], 0xEF);
    }

    #[test]
    fn draws_through_embedded_graphics() {
        let mut frame = Frame::new();
        Rectangle::new(Point::new(0, 0), Size::new(2, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.page(0)[0], 0xFF);
        assert_eq!(frame.page(0)[1], 0xFF);
        assert_eq!(frame.page(0)[2], 0x00);
        assert_eq!(frame.lit_pixels().count(), 16);
    }
}
