//! Styled character grid that the game view draws into.
//!
//! Coordinates are terminal cells, `x` to the right and `y` down. Every
//! write is clipped to the buffer, so drawing code never has to check
//! bounds against small terminals.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::BLACK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().into_cell(' ')
    }
}

/// Row-major grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut fb = Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        };
        fb.resize(width, height);
        fb
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change the dimensions, reusing the allocation where possible.
    ///
    /// Cell contents are unspecified afterwards; callers clear and redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells, or `None` past the bottom edge.
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        let range = self.row_range(y)?;
        Some(&self.cells[range])
    }

    fn row_mut(&mut self, y: u16) -> Option<&mut [Cell]> {
        let range = self.row_range(y)?;
        Some(&mut self.cells[range])
    }

    fn row_range(&self, y: u16) -> Option<std::ops::Range<usize>> {
        (y < self.height).then(|| {
            let start = y as usize * self.width as usize;
            start..start + self.width as usize
        })
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.row(y)?.get(x as usize).copied()
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.row_mut(y).and_then(|row| row.get_mut(x as usize)) {
            *slot = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, style.into_cell(ch));
    }

    /// Write `s` left to right from `(x, y)`, dropping what runs off the edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        self.put_chars(x, y, s.chars(), style);
    }

    /// Write a decimal number without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) {
        let mut digits = [0u8; 10];
        let len = encode_u32(value, &mut digits);
        self.put_chars(x, y, digits[..len].iter().map(|&d| d as char), style);
    }

    fn put_chars(&mut self, x: u16, y: u16, chars: impl Iterator<Item = char>, style: CellStyle) {
        let Some(row) = self.row_mut(y) else {
            return;
        };
        let Some(tail) = row.get_mut(x as usize..) else {
            return;
        };
        for (slot, ch) in tail.iter_mut().zip(chars) {
            *slot = style.into_cell(ch);
        }
    }

    /// Fill a `w` by `h` rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        let cell = style.into_cell(ch);
        let y_end = y.saturating_add(h).min(self.height);
        for row_y in y..y_end {
            if let Some(row) = self.row_mut(row_y) {
                let start = (x as usize).min(row.len());
                let end = (x as usize + w as usize).min(row.len());
                row[start..end].fill(cell);
            }
        }
    }
}

/// Number of decimal digits needed to print `value`.
pub fn u32_width(value: u32) -> u16 {
    let mut digits = [0u8; 10];
    encode_u32(value, &mut digits) as u16
}

fn encode_u32(mut value: u32, out: &mut [u8; 10]) -> usize {
    let mut len = 0usize;
    loop {
        out[len] = b'0' + (value % 10) as u8;
        value /= 10;
        len += 1;
        if value == 0 {
            break;
        }
    }
    out[..len].reverse();
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        fb.row(y).unwrap().iter().map(|c| c.ch).collect()
    }

    #[test]
    fn put_u32_writes_digits() {
        let mut fb = FrameBuffer::new(12, 1);
        fb.put_u32(1, 0, 2048, CellStyle::default());
        assert_eq!(row_text(&fb, 0), " 2048       ");

        fb.put_u32(0, 0, 0, CellStyle::default());
        assert_eq!(fb.get(0, 0).unwrap().ch, '0');
    }

    #[test]
    fn u32_width_counts_digits() {
        assert_eq!(u32_width(0), 1);
        assert_eq!(u32_width(8), 1);
        assert_eq!(u32_width(128), 3);
        assert_eq!(u32_width(131072), 6);
        assert_eq!(u32_width(u32::MAX), 10);
    }

    #[test]
    fn writes_outside_bounds_are_dropped() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(1, 0, "abcdef", CellStyle::default());
        assert_eq!(row_text(&fb, 0), " ab");

        fb.put_str(7, 0, "x", CellStyle::default());
        fb.put_str(0, 4, "x", CellStyle::default());
        fb.set(10, 10, Cell::default());
        assert_eq!(fb.get(10, 10), None);
        assert_eq!(row_text(&fb, 0), " ab");
    }

    #[test]
    fn fill_rect_clips_to_edges() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.fill_rect(2, 1, 10, 10, '#', CellStyle::default());
        assert_eq!(row_text(&fb, 0), "    ");
        assert_eq!(row_text(&fb, 1), "  ##");
        assert_eq!(row_text(&fb, 2), "  ##");
    }

    #[test]
    fn resize_keeps_requested_dimensions() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.resize(6, 3);
        assert_eq!((fb.width(), fb.height()), (6, 3));
        assert_eq!(fb.cells().len(), 18);
        assert_eq!(fb.row(2).map(<[Cell]>::len), Some(6));
        assert_eq!(fb.row(3), None);
    }
}
