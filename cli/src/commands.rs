use std::path::Path;
use std::time::Duration;

use shimmer_core::colors::to_hex;
use shimmer_core::{AnimationState, Easing, ShimmerConfigExt};
use shimmer_types::{Gravity, LayoutDirection, ShimmerConfig};
use tokio::time::MissedTickBehavior;

use crate::CliContext;

pub fn set_text(ctx: &mut CliContext, words: &[String]) {
    // `\n` typed at the prompt starts a new line
    let text = words.join(" ").replace("\\n", "\n");
    ctx.view.set_text(text);
    println!("text set ({} chars)", ctx.view.text().chars().count());
}

pub fn set_size(ctx: &mut CliContext, width: u32, height: u32) -> Result<(), String> {
    ctx.frame.resize(width, height).map_err(|e| e.to_string())?;
    println!("view size {width}x{height}");
    Ok(())
}

pub fn set_font_size(ctx: &mut CliContext, size: f32) -> Result<(), String> {
    if !(size > 0.0) {
        return Err(format!("font size must be positive, got {size}"));
    }
    ctx.view.set_font_size(size);
    Ok(())
}

pub fn set_gravity(ctx: &mut CliContext, input: &str) -> Result<(), String> {
    let gravity = Gravity::from_input(input).ok_or_else(|| format!("unknown gravity: {input}"))?;
    ctx.view.set_gravity(gravity);
    println!("gravity {:?}/{:?}", gravity.horizontal, gravity.vertical);
    Ok(())
}

pub fn set_direction(ctx: &mut CliContext, input: &str) -> Result<(), String> {
    let direction = match input.to_ascii_lowercase().as_str() {
        "ltr" => LayoutDirection::Ltr,
        "rtl" => LayoutDirection::Rtl,
        _ => return Err(format!("unknown layout direction: {input}")),
    };
    ctx.view.set_layout_direction(direction);
    Ok(())
}

pub fn set_easing(ctx: &mut CliContext, input: &str) -> Result<(), String> {
    let easing = Easing::from_input(input).ok_or_else(|| format!("unknown easing: {input}"))?;
    ctx.view.set_easing(easing);
    println!("easing {easing:?} (applies from next start)");
    Ok(())
}

pub fn start(ctx: &mut CliContext, period_ms: Option<u64>) -> Result<(), String> {
    let result = match period_ms {
        Some(ms) => ctx
            .view
            .start_shimmer_with_period(Duration::from_millis(ms)),
        None => ctx.view.start_shimmer(),
    };
    result.map_err(|e| e.to_string())?;
    println!("shimmer started");
    Ok(())
}

pub fn stop(ctx: &mut CliContext) {
    ctx.view.stop_shimmer();
    println!("shimmer stopped");
}

pub fn set_trace_color(ctx: &mut CliContext, reference: &str) -> Result<(), String> {
    ctx.view
        .set_trace_color_ref(reference)
        .map_err(|e| e.to_string())
}

pub fn set_shimmer_color(ctx: &mut CliContext, reference: &str) -> Result<(), String> {
    ctx.view
        .set_shimmer_color_ref(reference)
        .map_err(|e| e.to_string())
}

/// Render the current state to a single PNG
pub fn render(ctx: &mut CliContext, out: &Path) -> Result<(), String> {
    ctx.view.tick();
    ctx.view.render(&mut ctx.frame);
    ctx.frame.save_png(out).map_err(|e| e.to_string())?;
    println!("wrote {}", out.display());
    Ok(())
}

/// Drive the sweep from a frame clock and write each frame as a PNG
pub async fn play(
    ctx: &mut CliContext,
    frames: u32,
    fps: u32,
    out_dir: &Path,
) -> Result<(), String> {
    std::fs::create_dir_all(out_dir).map_err(|e| e.to_string())?;
    if !ctx.view.is_shimmering() {
        ctx.view.start_shimmer().map_err(|e| e.to_string())?;
    }

    let mut interval = tokio::time::interval(Duration::from_secs(1) / fps.max(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut written = 0;
    for i in 0..frames {
        interval.tick().await;
        if !ctx.view.tick() {
            continue;
        }
        ctx.view.render(&mut ctx.frame);
        let path = out_dir.join(format!("frame_{i:04}.png"));
        ctx.frame.save_png(&path).map_err(|e| e.to_string())?;
        written += 1;
    }

    tracing::info!(frames = written, dir = %out_dir.display(), "playback finished");
    println!("wrote {written} frames to {}", out_dir.display());
    Ok(())
}

pub fn show_status(ctx: &mut CliContext) {
    let view = &mut ctx.view;
    view.tick();
    let config = view.config();
    let state = match view.animation_state() {
        AnimationState::Idle => "idle".to_string(),
        AnimationState::Running(run) => format!("running ({}ms period)", run.period.as_millis()),
    };
    let bounds = view.bounds();

    println!("{:<16} {:?}", "text", view.text());
    println!(
        "{:<16} {}x{}",
        "view",
        ctx.frame.width(),
        ctx.frame.height()
    );
    println!("{:<16} {}", "font size", config.font_size);
    println!(
        "{:<16} {:?}/{:?} {:?}",
        "gravity", config.gravity.horizontal, config.gravity.vertical, config.layout_direction
    );
    println!("{:<16} {}", "animation", state);
    println!("{:<16} {:.1}", "progress", view.progress());
    println!(
        "{:<16} ({:.1}, {:.1}) - ({:.1}, {:.1}), {} line(s)",
        "bounds",
        bounds.left,
        bounds.top,
        bounds.right,
        bounds.bottom,
        view.silhouette().lines().len()
    );
    println!("{:<16} {}", "trace color", to_hex(config.trace_color));
    println!("{:<16} {}", "shimmer color", to_hex(config.shimmer_color));
}

pub fn show_config(ctx: &CliContext) {
    match ShimmerConfig::file_path() {
        Ok(path) => println!("config file: {}", path.display()),
        Err(e) => println!("config file: unavailable ({e})"),
    }
    println!("{:#?}", ctx.view.config());
}

pub fn save_config(ctx: &CliContext) -> Result<(), String> {
    ctx.view.config().store().map_err(|e| e.to_string())?;
    println!("config saved");
    Ok(())
}
