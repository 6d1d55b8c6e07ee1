#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    // Affine 2D: [a, b, c, d, e, f] for matrix [[a c e],[b d f],[0 0 1]]
    pub m: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub fn identity() -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Compose two transforms: self ∘ other (apply `other`, then `self`).
    pub fn concat(self, other: Self) -> Self {
        let [a1, b1, c1, d1, e1, f1] = self.m;
        let [a2, b2, c2, d2, e2, f2] = other.m;
        let a = a1 * a2 + c1 * b2;
        let b = b1 * a2 + d1 * b2;
        let c = a1 * c2 + c1 * d2;
        let d = b1 * c2 + d1 * d2;
        let e = a1 * e2 + c1 * f2 + e1;
        let f = b1 * e2 + d1 * f2 + f1;
        Self {
            m: [a, b, c, d, e, f],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            m: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    pub fn translate(tx: f32, ty: f32) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, tx, ty],
        }
    }

    pub fn apply(&self, p: [f32; 2]) -> [f32; 2] {
        let [a, b, c, d, e, f] = self.m;
        [a * p[0] + c * p[1] + e, b * p[0] + d * p[1] + f]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorLinPremul {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Alias for the premultiplied linear color type, for a friendlier name in APIs.
pub type Color = ColorLinPremul;

// Constructors for ColorLinPremul are defined in color.rs to keep scene.rs focused

/// Axis-aligned rectangle in y-down coordinates.
///
/// Doubles as the host's `getBoundingClientRect()` result, so `x`/`y` are the
/// left/top edges.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    /// True when the rect has no area (zero, negative or NaN extent).
    pub fn is_empty(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    /// Intersection of two rects; an empty rect when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        Rect {
            x: x0,
            y: y0,
            w: (x1 - x0).max(0.0),
            h: (y1 - y0).max(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipRect(pub Rect);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
}

/// Drop shadow cast by a filled path.
///
/// Offset and blur are in device pixels and are not affected by the current
/// transform, matching how 2D canvas contexts treat shadow parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowSpec {
    pub offset: [f32; 2],
    pub blur_radius: f32,
    pub color: ColorLinPremul,
}

// --- Path geometry ---

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo([f32; 2]),
    LineTo([f32; 2]),
    QuadTo([f32; 2], [f32; 2]),
    CubicTo([f32; 2], [f32; 2], [f32; 2]),
    Close,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub cmds: Vec<PathCmd>,
    pub fill_rule: FillRule,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Path {
    pub fn new() -> Self {
        Self {
            cmds: Vec::new(),
            fill_rule: FillRule::NonZero,
        }
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.cmds.push(PathCmd::MoveTo([x, y]));
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.cmds.push(PathCmd::LineTo([x, y]));
        self
    }

    pub fn cubic_to(&mut self, c1: [f32; 2], c2: [f32; 2], p: [f32; 2]) -> &mut Self {
        self.cmds.push(PathCmd::CubicTo(c1, c2, p));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.cmds.push(PathCmd::Close);
        self
    }

    /// End point of the last segment, or the start of the last subpath after `Close`.
    pub fn current_point(&self) -> Option<[f32; 2]> {
        let mut start = None;
        let mut current = None;
        for cmd in &self.cmds {
            match cmd {
                PathCmd::MoveTo(p) => {
                    start = Some(*p);
                    current = Some(*p);
                }
                PathCmd::LineTo(p) | PathCmd::QuadTo(_, p) | PathCmd::CubicTo(_, _, p) => {
                    current = Some(*p)
                }
                PathCmd::Close => current = start,
            }
        }
        current
    }

    /// Canvas-style `arcTo`: a straight line from the current point to the first
    /// tangent point, then a circular arc of `radius` that turns towards `p2`.
    ///
    /// The arc is emitted as a single cubic Bézier. Collinear points or a zero
    /// radius degrade to a line to `p1`.
    pub fn arc_to(&mut self, p1: [f32; 2], p2: [f32; 2], radius: f32) -> &mut Self {
        let Some(p0) = self.current_point() else {
            return self.move_to(p1[0], p1[1]);
        };

        let u = normalize([p0[0] - p1[0], p0[1] - p1[1]]);
        let v = normalize([p2[0] - p1[0], p2[1] - p1[1]]);
        let (Some(u), Some(v)) = (u, v) else {
            return self.line_to(p1[0], p1[1]);
        };

        let cos = (u[0] * v[0] + u[1] * v[1]).clamp(-1.0, 1.0);
        let theta = cos.acos();
        if radius <= 0.0 || theta < 1e-4 || (std::f32::consts::PI - theta) < 1e-4 {
            return self.line_to(p1[0], p1[1]);
        }

        let tangent = radius / (theta * 0.5).tan();
        let t0 = [p1[0] + u[0] * tangent, p1[1] + u[1] * tangent];
        let t1 = [p1[0] + v[0] * tangent, p1[1] + v[1] * tangent];
        let sweep = std::f32::consts::PI - theta;
        let k = 4.0 / 3.0 * (sweep * 0.25).tan() * radius;

        self.line_to(t0[0], t0[1]);
        self.cubic_to(
            [t0[0] - u[0] * k, t0[1] - u[1] * k],
            [t1[0] - v[0] * k, t1[1] - v[1] * k],
            t1,
        )
    }

    /// Bounding box of all control and end points.
    pub fn bounds(&self) -> Option<Rect> {
        let mut min = [f32::INFINITY; 2];
        let mut max = [f32::NEG_INFINITY; 2];
        let mut grow = |p: &[f32; 2]| {
            min[0] = min[0].min(p[0]);
            min[1] = min[1].min(p[1]);
            max[0] = max[0].max(p[0]);
            max[1] = max[1].max(p[1]);
        };
        for cmd in &self.cmds {
            match cmd {
                PathCmd::MoveTo(p) | PathCmd::LineTo(p) => grow(p),
                PathCmd::QuadTo(c, p) => {
                    grow(c);
                    grow(p);
                }
                PathCmd::CubicTo(c1, c2, p) => {
                    grow(c1);
                    grow(c2);
                    grow(p);
                }
                PathCmd::Close => {}
            }
        }
        if min[0] > max[0] {
            return None;
        }
        Some(Rect {
            x: min[0],
            y: min[1],
            w: max[0] - min[0],
            h: max[1] - min[1],
        })
    }
}

fn normalize(v: [f32; 2]) -> Option<[f32; 2]> {
    let len = (v[0] * v[0] + v[1] * v[1]).sqrt();
    if len > f32::EPSILON {
        Some([v[0] / len, v[1] / len])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn rect_edges_and_intersection() {
        let a = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(a.right(), 110.0);
        assert_eq!(a.bottom(), 70.0);
        assert_eq!(a.center_x(), 60.0);

        let b = Rect::new(50.0, 0.0, 100.0, 40.0);
        assert_eq!(a.intersect(&b), Rect::new(50.0, 20.0, 60.0, 20.0));
        assert!(a.intersect(&Rect::new(500.0, 0.0, 1.0, 1.0)).is_empty());
        assert!(Rect::default().is_empty());
    }

    #[test]
    fn arc_to_right_angle_corner_lands_on_tangents() {
        let mut path = Path::new();
        path.move_to(8.0, 0.0).arc_to([100.0, 0.0], [100.0, 8.0], 8.0);

        // Line to first tangent point, then an arc ending on the second one.
        assert_eq!(path.cmds[1], PathCmd::LineTo([92.0, 0.0]));
        match &path.cmds[2] {
            PathCmd::CubicTo(c1, c2, end) => {
                assert!(approx(end[0], 100.0) && approx(end[1], 8.0));
                // Quarter circle handle length is ~0.5523 * r.
                assert!(approx(c1[0] - 92.0, 0.5523 * 8.0));
                assert!(approx(8.0 - c2[1], 0.5523 * 8.0));
            }
            other => panic!("expected cubic, got {other:?}"),
        }
        let cp = path.current_point().unwrap();
        assert!(approx(cp[0], 100.0) && approx(cp[1], 8.0));
    }

    #[test]
    fn arc_to_collinear_degrades_to_line() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0).arc_to([10.0, 0.0], [20.0, 0.0], 4.0);
        assert_eq!(path.cmds.last(), Some(&PathCmd::LineTo([10.0, 0.0])));
    }

    #[test]
    fn current_point_returns_to_subpath_start_after_close() {
        let mut path = Path::new();
        path.move_to(1.0, 2.0).line_to(5.0, 2.0).line_to(5.0, 6.0).close();
        assert_eq!(path.current_point(), Some([1.0, 2.0]));
        assert_eq!(path.bounds(), Some(Rect::new(1.0, 2.0, 4.0, 4.0)));
    }

    #[test]
    fn transform_concat_applies_right_first() {
        let t = Transform2D::scale(2.0, 2.0).concat(Transform2D::translate(3.0, 4.0));
        assert_eq!(t.apply([1.0, 1.0]), [8.0, 10.0]);
    }
}
