//! Full-viewport particle canvas.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::page::Page;
use crate::particles::{Frame, Particle, ParticleEffect, Sprite};

const EMOJI_FONT: &str = "'Apple Color Emoji', 'Segoe UI Emoji', 'Noto Color Emoji', sans-serif";

/// Keeps the backing store the size of the viewport.
pub fn fit_to_viewport(canvas: &HtmlCanvasElement, width: f64, height: f64) {
    let (w, h) = (width.max(1.0) as u32, height.max(1.0) as u32);
    if canvas.width() != w {
        canvas.set_width(w);
    }
    if canvas.height() != h {
        canvas.set_height(h);
    }
}

pub fn render<A, R>(ctx: &CanvasRenderingContext2d, page: &Page<A, R>, now: f64, w: f64, h: f64) {
    ctx.clear_rect(0.0, 0.0, w, h);
    // z-order: stars at the back, then confetti, emojis, balloons
    draw_effect(ctx, &page.stars, now, w, h);
    draw_effect(ctx, &page.confetti, now, w, h);
    draw_effect(ctx, &page.emojis, now, w, h);
    draw_effect(ctx, &page.balloons, now, w, h);
}

fn draw_effect<P: Particle>(ctx: &CanvasRenderingContext2d, fx: &ParticleEffect<P>, now: f64, w: f64, h: f64) {
    for live in fx.particles() {
        let frame = live.frame(now);
        if frame.opacity <= 0.0 || frame.scale <= 0.0 {
            continue;
        }
        draw_sprite(ctx, &live.particle.sprite(), &frame, w, h);
    }
}

fn draw_sprite(ctx: &CanvasRenderingContext2d, sprite: &Sprite, f: &Frame, w: f64, h: f64) {
    ctx.save();
    ctx.set_global_alpha(f.opacity.clamp(0.0, 1.0));
    let _ = ctx.translate(f.x_vw / 100.0 * w, f.y_vh / 100.0 * h + f.dy_px);
    let _ = ctx.rotate(f.rotation_deg.to_radians());
    let _ = ctx.scale(f.scale, f.scale);
    match *sprite {
        Sprite::Glyph { text, size_px } => glyph(ctx, text, size_px),
        Sprite::TintedGlyph { text, size_px, color } => {
            ctx.set_fill_style_str(color);
            glyph(ctx, text, size_px);
        }
        Sprite::Rect { width_px, height_px, color } => {
            ctx.set_fill_style_str(color);
            ctx.fill_rect(-width_px / 2.0, -height_px / 2.0, width_px, height_px);
        }
        Sprite::Circle { diameter_px, color } => {
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            let _ = ctx.arc(0.0, 0.0, diameter_px / 2.0, 0.0, std::f64::consts::TAU);
            ctx.fill();
        }
    }
    ctx.restore();
}

fn glyph(ctx: &CanvasRenderingContext2d, text: &str, size_px: f64) {
    ctx.set_font(&format!("{size_px:.0}px {EMOJI_FONT}"));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(text, 0.0, 0.0).ok();
}
