use std::{env, fs};

use anyhow::Context;
use text_svg_tools::{generate_text_svg, FontSizing, SvgTextOptions};

/// Usage: `cargo run --example render_avatar -- "Jane Doe" [seed] [output.svg]`
fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG; defaults to Info.
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut args = env::args().skip(1);
    let text = args.next().unwrap_or_else(|| "Hello World".to_string());
    let seed = args.next();
    let output_path = args.next().unwrap_or_else(|| "avatar.svg".to_string());

    let mut options = SvgTextOptions::new(text).with_font_sizing(FontSizing::fit());
    if let Some(seed) = seed {
        options = options.with_seed(seed);
    }

    log::info!("Rendering avatar for {:?}...", options.text);
    let svg = generate_text_svg(&options).context("SVG generation failed")?;

    fs::write(&output_path, &svg)
        .with_context(|| format!("Unable to write SVG file: {}", output_path))?;
    log::info!("Avatar saved to {} ({} bytes)", output_path, svg.len());
    Ok(())
}
