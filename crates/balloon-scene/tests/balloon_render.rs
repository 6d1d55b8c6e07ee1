mod common;

use std::time::Instant;

use anyhow::{Context, Result};
use balloon_scene::{BalloonStyle, SettlePolicy, TargetId, TipEdge, TooltipDialog};
use common::{BODY_GREY, HEADER_GREY, MockHost, assert_rgb_near};
use engine_core::Rect;

fn open_dialog(host: &MockHost, target: u64) -> TooltipDialog {
    let mut dialog = TooltipDialog::new(
        BalloonStyle::default(),
        SettlePolicy::none(),
        host.device_pixel_ratio,
    );
    dialog.open(Some(TargetId(target)), host, Instant::now());
    dialog
}

#[test]
fn header_and_body_meet_on_one_row() -> Result<()> {
    for dpr in [1.0, 2.0] {
        // Centered at x = 84 against the left edge, so the tip sits at 30%.
        let host = MockHost::new(dpr).with_target(1, Rect::new(74.0, 100.0, 20.0, 24.0));
        let dialog = open_dialog(&host, 1);
        let geometry = dialog.geometry().context("dialog should be positioned")?;
        assert_eq!(geometry.tip_edge, TipEdge::North);
        assert!((geometry.arrow_fraction - 0.3).abs() < 1e-4);

        let ratio = dialog.pixel_ratio();
        let surface = dialog.surface();
        assert_eq!(
            surface.backing_size(),
            ((280.0 * ratio) as u32, (146.0 * ratio) as u32)
        );

        // tip (12) + header (40)
        let seam = (52.0 * ratio) as u32;
        let first = (16.0 * ratio) as u32;
        let last = (264.0 * ratio) as u32;
        for x in first..last {
            let above = surface.pixel_rgba(x, seam - 1).context("row above seam")?;
            assert_rgb_near(above, HEADER_GREY, (x, seam - 1));
            let below = surface.pixel_rgba(x, seam).context("seam row")?;
            assert_rgb_near(below, BODY_GREY, (x, seam));
        }
    }
    Ok(())
}

#[test]
fn north_tip_is_drawn_at_the_arrow() -> Result<()> {
    let host = MockHost::new(2.0).with_target(1, Rect::new(74.0, 100.0, 20.0, 24.0));
    let dialog = open_dialog(&host, 1);
    let surface = dialog.surface();

    let inside = surface.pixel_rgba(84 * 2, 8 * 2).context("tip pixel")?;
    assert_rgb_near(inside, HEADER_GREY, (168, 16));

    let beside = surface.pixel_rgba(20 * 2, 0).context("corner pixel")?;
    assert_eq!(beside[3], 0, "expected transparency away from the tip, got {beside:?}");
    Ok(())
}

#[test]
fn south_balloon_hangs_above_target() -> Result<()> {
    let host = MockHost::new(1.0).with_target(7, Rect::new(400.0, 700.0, 80.0, 24.0));
    let dialog = open_dialog(&host, 7);
    let geometry = dialog.geometry().context("dialog should be positioned")?;
    assert_eq!(geometry.tip_edge, TipEdge::South);
    assert_eq!(geometry.top, 700.0 - 146.0);
    assert_eq!(geometry.arrow_fraction, 0.5);

    let position = dialog.inline_position().context("inline position")?;
    assert_eq!(position.padding.top, 2.0);
    assert_eq!(position.padding.bottom, 12.0);

    let surface = dialog.surface();
    assert_rgb_near(surface.pixel_rgba(140, 39).context("header")?, HEADER_GREY, (140, 39));
    assert_rgb_near(surface.pixel_rgba(140, 40).context("body")?, BODY_GREY, (140, 40));
    // Inside the tip, below the body's bottom edge at 133.
    assert_rgb_near(surface.pixel_rgba(140, 140).context("tip")?, BODY_GREY, (140, 140));
    Ok(())
}

#[test]
fn left_edge_target_keeps_arrow_on_target() -> Result<()> {
    let mut host = MockHost::new(1.0).with_target(3, Rect::new(30.0, 200.0, 40.0, 20.0));
    host.viewport = Rect::new(16.0, 0.0, 1000.0, 768.0);
    let dialog = open_dialog(&host, 3);

    let geometry = dialog.geometry().context("dialog should be positioned")?;
    assert_eq!(geometry.left, 16.0);
    assert!((geometry.arrow_page_x() - 50.0).abs() < 1e-3);
    assert!((geometry.arrow_fraction - 34.0 / 280.0).abs() < 1e-5);
    Ok(())
}

#[test]
fn surface_exports_png() -> Result<()> {
    let host = MockHost::new(1.0).with_target(1, Rect::new(400.0, 100.0, 80.0, 24.0));
    let dialog = open_dialog(&host, 1);

    let path = std::env::temp_dir().join(format!("balloon-render-{}.png", std::process::id()));
    dialog.surface().save_png(&path)?;
    let bytes = std::fs::read(&path)?;
    std::fs::remove_file(&path)?;
    assert_eq!(&bytes[1..4], b"PNG");
    Ok(())
}
