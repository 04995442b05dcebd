use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys as web;

use wheel_core::{Segment, SegmentGeometry};

use crate::constants::*;
use crate::layout::{canvas_radians, fit_label, pointer_tilt_deg, segment_color, WheelLayout};

/// Everything one frame needs to paint.
pub struct WheelScene<'a> {
    pub segments: &'a [Segment],
    pub geometry: &'a SegmentGeometry,
    pub rotation: f64,
    pub kick: f64,
}

pub fn draw(
    ctx: &web::CanvasRenderingContext2d,
    width: f64,
    height: f64,
    scene: &WheelScene<'_>,
) -> Result<(), JsValue> {
    let layout = WheelLayout::fit(width, height);
    ctx.set_fill_style_str(BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, width, height);

    draw_wedges(ctx, &layout, scene)?;
    draw_labels(ctx, &layout, scene)?;
    draw_hub(ctx, &layout)?;
    draw_pointer(ctx, &layout, scene.kick)
}

fn draw_wedges(
    ctx: &web::CanvasRenderingContext2d,
    layout: &WheelLayout,
    scene: &WheelScene<'_>,
) -> Result<(), JsValue> {
    let c = layout.center;
    let count = scene.geometry.count();
    for i in 0..count {
        let a0 = canvas_radians(scene.geometry.start_angle(i), scene.rotation);
        let a1 = canvas_radians(scene.geometry.end_angle(i), scene.rotation);
        ctx.begin_path();
        ctx.move_to(c.x, c.y);
        ctx.arc(c.x, c.y, layout.radius, a0, a1)?;
        ctx.close_path();
        ctx.set_fill_style_str(segment_color(i, count));
        ctx.fill();
    }

    ctx.begin_path();
    ctx.arc(c.x, c.y, layout.radius, 0.0, TAU)?;
    ctx.set_line_width(layout.rim_width());
    ctx.set_stroke_style_str(RIM_COLOR);
    ctx.stroke();
    Ok(())
}

fn draw_labels(
    ctx: &web::CanvasRenderingContext2d,
    layout: &WheelLayout,
    scene: &WheelScene<'_>,
) -> Result<(), JsValue> {
    let c = layout.center;
    ctx.set_fill_style_str(LABEL_COLOR);
    ctx.set_font(&format!("600 {}px system-ui, sans-serif", layout.label_font_px()));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    for (i, seg) in scene.segments.iter().enumerate() {
        let text = if seg.label.is_empty() { &seg.id } else { &seg.label };
        // labels run along the radius, reading outward
        ctx.save();
        ctx.translate(c.x, c.y)?;
        ctx.rotate(canvas_radians(scene.geometry.center_angle(i), scene.rotation))?;
        ctx.fill_text(&fit_label(text), layout.label_radius(), 0.0)?;
        ctx.restore();
    }
    Ok(())
}

fn draw_hub(ctx: &web::CanvasRenderingContext2d, layout: &WheelLayout) -> Result<(), JsValue> {
    let c = layout.center;
    ctx.begin_path();
    ctx.arc(c.x, c.y, layout.hub_radius(), 0.0, TAU)?;
    ctx.set_fill_style_str(HUB_COLOR);
    ctx.fill();
    ctx.set_line_width(layout.rim_width());
    ctx.set_stroke_style_str(RIM_COLOR);
    ctx.stroke();
    Ok(())
}

/// Downward triangle at 12 o'clock, hinged at its base and tilted by the
/// current peg kick.
fn draw_pointer(
    ctx: &web::CanvasRenderingContext2d,
    layout: &WheelLayout,
    kick: f64,
) -> Result<(), JsValue> {
    let tip = layout.pointer_tip();
    let len = layout.pointer_length();
    let half = layout.pointer_half_width();
    ctx.save();
    ctx.translate(tip.x, tip.y - len)?;
    ctx.rotate(pointer_tilt_deg(kick).to_radians())?;
    ctx.begin_path();
    ctx.move_to(-half, 0.0);
    ctx.line_to(half, 0.0);
    ctx.line_to(0.0, len);
    ctx.close_path();
    ctx.set_fill_style_str(POINTER_COLOR);
    ctx.fill();
    ctx.set_line_width(layout.rim_width() * 0.6);
    ctx.set_stroke_style_str(POINTER_OUTLINE_COLOR);
    ctx.stroke();
    ctx.restore();
    Ok(())
}
