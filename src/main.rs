use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use balloon_config::BalloonConfig;
use balloon_scene::{LayoutHost, PopoverDialog, PopoverEvent, TargetId};
use engine_core::Rect;

/// Fixed page layout with one button to point at.
struct DemoHost {
    device_pixel_ratio: f32,
}

const BUTTON: TargetId = TargetId(1);

impl LayoutHost for DemoHost {
    fn viewport_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn target_rect(&self, target: TargetId) -> Option<Rect> {
        (target == BUTTON).then(|| Rect::new(24.0, 40.0, 96.0, 32.0))
    }

    fn content_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, 280.0, 146.0)
    }

    fn header_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, 280.0, 40.0)
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    fn primary_color(&self) -> Option<String> {
        Some("#1976d2".to_string())
    }
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let config = BalloonConfig::load();
    let host = DemoHost {
        device_pixel_ratio: config.demo.device_pixel_ratio,
    };
    let mut popover = PopoverDialog::from_config(&config, &host)?;

    let start = Instant::now();
    let outcome = popover
        .connect(Some(BUTTON), &host, start)
        .context("popover did not open")?;
    // Let the settle passes run as a host event loop would.
    popover.tick(&host, start + Duration::from_millis(200));

    let dialog = popover.dialog();
    let geometry = dialog.geometry().context("popover was not positioned")?;
    println!(
        "balloon at ({}, {}), {}x{}, tip {:?} at {:.1}% (pixel ratio {})",
        geometry.left,
        geometry.top,
        geometry.width,
        geometry.height,
        geometry.tip_edge,
        geometry.arrow_fraction * 100.0,
        dialog.pixel_ratio()
    );

    dialog
        .surface()
        .save_png(&config.demo.output)
        .with_context(|| format!("writing {}", config.demo.output.display()))?;
    println!("wrote {}", config.demo.output.display());

    popover.set_input_value("Team lunch");
    popover.accept();
    for event in popover.take_events() {
        if let PopoverEvent::Resolved(resolved) = event {
            log::info!("popover resolved: {resolved:?}");
        }
    }
    println!("outcome: {:?}", outcome.recv()?);
    Ok(())
}
