/// Owned colour and raw depth buffers of a synthetic frame.
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub color: Vec<[u8; 3]>,
    pub depth: Vec<u16>,
}

impl Frame {
    /// Fronto-parallel plane at a constant raw depth.
    pub fn plane(width: usize, height: usize, raw_depth: u16, color: [u8; 3]) -> Self {
        assert!(width > 0 && height > 0, "image dimensions must be positive");
        Self {
            width,
            height,
            color: vec![color; width * height],
            depth: vec![raw_depth; width * height],
        }
    }

    /// Paint an axis-aligned rectangle `[x0, x1) × [y0, y1)`.
    pub fn fill_rect(
        &mut self,
        (x0, y0): (usize, usize),
        (x1, y1): (usize, usize),
        raw_depth: u16,
        color: [u8; 3],
    ) {
        assert!(x0 <= x1 && x1 <= self.width && y0 <= y1 && y1 <= self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let i = y * self.width + x;
                self.depth[i] = raw_depth;
                self.color[i] = color;
            }
        }
    }
}

/// Grey wall with a box-shaped object standing in front of it.
pub fn box_on_wall(width: usize, height: usize) -> (Frame, BoxBounds) {
    let mut frame = Frame::plane(width, height, 2000, [180, 180, 180]);
    let bounds = BoxBounds {
        x0: width * 3 / 8,
        y0: height / 3,
        x1: width * 5 / 8,
        y1: height * 2 / 3,
    };
    frame.fill_rect(
        (bounds.x0, bounds.y0),
        (bounds.x1, bounds.y1),
        1200,
        [200, 40, 30],
    );
    (frame, bounds)
}

#[derive(Clone, Copy, Debug)]
pub struct BoxBounds {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl BoxBounds {
    /// Inside the box, at least `margin` pixels from its border.
    pub fn contains_inner(&self, x: usize, y: usize, margin: usize) -> bool {
        x >= self.x0 + margin && x + margin < self.x1 && y >= self.y0 + margin && y + margin < self.y1
    }

    /// Outside the box, at least `margin` pixels from its border.
    pub fn is_far_outside(&self, x: usize, y: usize, margin: usize) -> bool {
        x + margin < self.x0 || x >= self.x1 + margin || y + margin < self.y0 || y >= self.y1 + margin
    }
}
