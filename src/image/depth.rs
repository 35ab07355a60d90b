/// Borrowed 16-bit depth image in sensor units; `0` marks a missing reading.
#[derive(Clone, Debug)]
pub struct ImageDepthU16<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [u16],
}

impl<'a> ImageDepthU16<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.data[y * self.stride + x]
    }
}

impl<'a> crate::image::traits::ImageView for ImageDepthU16<'a> {
    type Pixel = u16;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u16] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u16]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}
