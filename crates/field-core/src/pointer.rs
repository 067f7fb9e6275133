/// Latest pointer position relative to the window centre, in CSS pixels.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerOffset {
    pub dx: f32,
    pub dy: f32,
}

impl PointerOffset {
    /// Offset of a client-space pointer position from the centre of a window
    /// of `inner_width` x `inner_height`. Not clamped: drags past the edges
    /// produce offsets larger than half the window.
    #[inline]
    pub fn from_client(client_x: f32, client_y: f32, inner_width: f32, inner_height: f32) -> Self {
        Self {
            dx: client_x - inner_width / 2.0,
            dy: client_y - inner_height / 2.0,
        }
    }
}
