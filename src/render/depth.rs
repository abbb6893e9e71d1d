//! Integer z-buffer.

/// Per-pixel depth record used to resolve occlusion.
///
/// Every cell starts at `i32::MIN`, meaning nothing has been drawn there.
/// Larger depth values win: a fragment is kept only if its depth is strictly
/// greater than what is stored, so on ties the first writer wins.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    depths: Vec<i32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![i32::MIN; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resets every cell to "nothing drawn yet".
    pub fn clear(&mut self) {
        self.depths.fill(i32::MIN);
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Returns the stored depth at (x, y), or None if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<i32> {
        self.offset(x, y).map(|idx| self.depths[idx])
    }

    /// Depth test: if `depth` is strictly greater than the stored value,
    /// stores it and returns true. Out-of-bounds pixels always fail.
    #[inline]
    pub fn test_and_set(&mut self, x: i32, y: i32, depth: i32) -> bool {
        match self.offset(x, y) {
            Some(idx) if depth > self.depths[idx] => {
                self.depths[idx] = depth;
                true
            }
            _ => false,
        }
    }
}
