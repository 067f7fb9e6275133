/// Size and pixel density of the element hosting the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSize {
    /// CSS pixels.
    pub width: u32,
    /// CSS pixels.
    pub height: u32,
    pub pixel_ratio: f64,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// A collapsed or hidden element reports zero on one axis.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Backing-store size in device pixels, never below 1x1.
    pub fn physical_size(&self) -> (u32, u32) {
        let ratio = if self.pixel_ratio > 0.0 { self.pixel_ratio } else { 1.0 };
        let w = (self.width as f64 * ratio) as u32;
        let h = (self.height as f64 * ratio) as u32;
        (w.max(1), h.max(1))
    }
}
