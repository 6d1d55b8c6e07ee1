/// Example program to print the loaded configuration
///
/// Run with: cargo run -p balloon-config --example print_config

fn main() {
    let config = balloon_config::BalloonConfig::load();

    println!("=== Balloon Configuration ===\n");

    println!("Tooltip Style:");
    println!("  Radius: {}", config.tooltip.radius);
    println!("  Tip: {} x {}", config.tooltip.tip_base, config.tooltip.tip_height);
    println!("  Header Color: {}", config.tooltip.header_color);
    println!("  Body Color: {}", config.tooltip.body_color);
    println!("  Shadow Color: {}", config.tooltip.shadow_color);
    println!("  Stroke Border: {}", config.tooltip.stroke_border);
    println!();

    println!("Settle Retries:");
    println!("  Delays (ms): {:?}", config.settle.delays_ms);
    println!();

    println!("Popover:");
    println!("  Header Text: {}", config.popover.header_text);
    println!("  Input Label: {}", config.popover.input_label);
    println!("  Hide Delete: {}", config.popover.hide_delete);
    println!();

    println!("Demo:");
    println!("  Output: {}", config.demo.output.display());
    println!("  Device Pixel Ratio: {}", config.demo.device_pixel_ratio);
}
