use ::skrifa::outline::OutlinePen;

/// Pen that scales every coordinate before forwarding it.
///
/// Hinted outlines are drawn at the real pixel size and scaled up by 64 so
/// that, like unhinted outlines, they come out in 26.6 units.
pub(crate) struct ScalingPen<'a, P> {
    inner: &'a mut P,
    scale: f32,
}

impl<'a, P: OutlinePen> ScalingPen<'a, P> {
    pub fn new(inner: &'a mut P, scale: f32) -> Self {
        Self { inner, scale }
    }

    fn scale<const N: usize>(&self, coords: [f32; N]) -> [f32; N] {
        coords.map(|x| x * self.scale)
    }
}

impl<P: OutlinePen> OutlinePen for ScalingPen<'_, P> {
    fn move_to(&mut self, x: f32, y: f32) {
        let [x, y] = self.scale([x, y]);
        self.inner.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let [x, y] = self.scale([x, y]);
        self.inner.line_to(x, y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let [cx0, cy0, x, y] = self.scale([cx0, cy0, x, y]);
        self.inner.quad_to(cx0, cy0, x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let [cx0, cy0, cx1, cy1, x, y] = self.scale([cx0, cy0, cx1, cy1, x, y]);
        self.inner.curve_to(cx0, cy0, cx1, cy1, x, y);
    }

    fn close(&mut self) {
        self.inner.close();
    }
}
