//! CPU raster backend: replays a [`DisplayList`] onto a `tiny_skia::Pixmap`.
//!
//! Clips are axis-aligned rects intersected into a single hard-edged mask so
//! that two fills split along a clip edge meet on an exact pixel row.

use std::path::Path as FsPath;

use image::{RgbaImage, imageops};
use tiny_skia::{Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};

use crate::display_list::{Command, DisplayList};
use crate::error::RasterError;
use crate::scene::{ClipRect, ColorLinPremul, FillRule, Path, PathCmd, Rect, ShadowSpec, Transform2D};

/// Replay `list` onto `pixmap`. Commands draw in order with source-over blending.
pub fn rasterize(list: &DisplayList, pixmap: &mut Pixmap) -> Result<(), RasterError> {
    let (w, h) = (pixmap.width(), pixmap.height());
    let mut clips: Vec<Rect> = Vec::new();
    let mut mask: Option<Mask> = None;
    let mut transform_depth = 0usize;

    for cmd in &list.commands {
        match cmd {
            Command::Clear(color) => {
                let [r, g, b, a] = color.to_srgba_u8();
                pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
            }
            Command::FillPath { path, color, transform } => {
                let Some(sk_path) = to_sk_path(path) else {
                    log::trace!("skipping empty fill path");
                    continue;
                };
                pixmap.fill_path(
                    &sk_path,
                    &solid_paint(*color),
                    to_sk_fill_rule(path.fill_rule),
                    to_sk_transform(*transform),
                    mask.as_ref(),
                );
            }
            Command::StrokePath { path, stroke, color, transform } => {
                let Some(sk_path) = to_sk_path(path) else {
                    continue;
                };
                let sk_stroke = tiny_skia::Stroke {
                    width: stroke.width,
                    ..Default::default()
                };
                pixmap.stroke_path(
                    &sk_path,
                    &solid_paint(*color),
                    &sk_stroke,
                    to_sk_transform(*transform),
                    mask.as_ref(),
                );
            }
            Command::PathShadow { path, spec, transform } => {
                let Some(sk_path) = to_sk_path(path) else {
                    continue;
                };
                draw_shadow(pixmap, &sk_path, path.fill_rule, spec, *transform, mask.as_ref())?;
            }
            Command::PushClip { clip, transform } => {
                let device = device_clip(clip, *transform);
                let merged = match clips.last() {
                    Some(outer) => outer.intersect(&device),
                    None => device,
                };
                clips.push(merged);
                mask = Some(build_mask(w, h, merged)?);
            }
            Command::PopClip => {
                clips.pop().ok_or(RasterError::Unbalanced("clip"))?;
                mask = match clips.last() {
                    Some(r) => Some(build_mask(w, h, *r)?),
                    None => None,
                };
            }
            Command::PushTransform(_) => transform_depth += 1,
            Command::PopTransform => {
                transform_depth = transform_depth
                    .checked_sub(1)
                    .ok_or(RasterError::Unbalanced("transform"))?;
            }
        }
    }
    Ok(())
}

/// Write the pixmap as a straight-alpha PNG.
pub fn encode_png(pixmap: &Pixmap, path: &FsPath) -> Result<(), RasterError> {
    let (w, h) = (pixmap.width(), pixmap.height());
    let mut rgba = Vec::with_capacity((w * h * 4) as usize);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let img = RgbaImage::from_raw(w, h, rgba).ok_or(RasterError::Allocation(w, h))?;
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

fn solid_paint(color: ColorLinPremul) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn to_sk_transform(t: Transform2D) -> Transform {
    let [a, b, c, d, e, f] = t.m;
    Transform::from_row(a, b, c, d, e, f)
}

fn to_sk_fill_rule(rule: FillRule) -> tiny_skia::FillRule {
    match rule {
        FillRule::NonZero => tiny_skia::FillRule::Winding,
        FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
    }
}

fn to_sk_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for cmd in &path.cmds {
        match cmd {
            PathCmd::MoveTo([x, y]) => pb.move_to(*x, *y),
            PathCmd::LineTo([x, y]) => pb.line_to(*x, *y),
            PathCmd::QuadTo([cx, cy], [x, y]) => pb.quad_to(*cx, *cy, *x, *y),
            PathCmd::CubicTo([c1x, c1y], [c2x, c2y], [x, y]) => {
                pb.cubic_to(*c1x, *c1y, *c2x, *c2y, *x, *y)
            }
            PathCmd::Close => pb.close(),
        }
    }
    pb.finish()
}

/// Map a clip rect into device space. Only scale/translate transforms keep it axis-aligned,
/// which is all the widgets use; rotated clips fall back to their bounding box.
fn device_clip(clip: &ClipRect, transform: Transform2D) -> Rect {
    let r = clip.0;
    let corners = [
        transform.apply([r.x, r.y]),
        transform.apply([r.right(), r.y]),
        transform.apply([r.x, r.bottom()]),
        transform.apply([r.right(), r.bottom()]),
    ];
    let x0 = corners.iter().map(|p| p[0]).fold(f32::INFINITY, f32::min);
    let y0 = corners.iter().map(|p| p[1]).fold(f32::INFINITY, f32::min);
    let x1 = corners.iter().map(|p| p[0]).fold(f32::NEG_INFINITY, f32::max);
    let y1 = corners.iter().map(|p| p[1]).fold(f32::NEG_INFINITY, f32::max);
    Rect { x: x0, y: y0, w: x1 - x0, h: y1 - y0 }
}

fn build_mask(w: u32, h: u32, clip: Rect) -> Result<Mask, RasterError> {
    let mut mask = Mask::new(w, h).ok_or(RasterError::Allocation(w, h))?;
    // Hard pixel edges: snap to whole device pixels, no anti-aliasing.
    let x0 = clip.x.round().max(0.0);
    let y0 = clip.y.round().max(0.0);
    let x1 = clip.right().round().min(w as f32);
    let y1 = clip.bottom().round().min(h as f32);
    if let Some(rect) = tiny_skia::Rect::from_ltrb(x0, y0, x1, y1) {
        let path = PathBuilder::from_rect(rect);
        mask.fill_path(&path, tiny_skia::FillRule::Winding, false, Transform::identity());
    }
    Ok(mask)
}

fn draw_shadow(
    pixmap: &mut Pixmap,
    path: &tiny_skia::Path,
    rule: FillRule,
    spec: &ShadowSpec,
    transform: Transform2D,
    mask: Option<&Mask>,
) -> Result<(), RasterError> {
    let (w, h) = (pixmap.width(), pixmap.height());
    let mut layer = Pixmap::new(w, h).ok_or(RasterError::Allocation(w, h))?;
    let ts = to_sk_transform(transform).post_translate(spec.offset[0], spec.offset[1]);
    layer.fill_path(path, &solid_paint(spec.color), to_sk_fill_rule(rule), ts, None);

    // Canvas shadowBlur maps to a gaussian with sigma = blur / 2.
    let sigma = spec.blur_radius * 0.5;
    if sigma > 0.0 {
        // Channels are premultiplied, which is what a blur wants anyway.
        let img = RgbaImage::from_raw(w, h, layer.data().to_vec())
            .ok_or(RasterError::Allocation(w, h))?;
        let blurred = imageops::fast_blur(&img, sigma);
        layer.data_mut().copy_from_slice(blurred.as_raw());
    }

    pixmap.draw_pixmap(0, 0, layer.as_ref(), &PixmapPaint::default(), Transform::identity(), mask);
    Ok(())
}
