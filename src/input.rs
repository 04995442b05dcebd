use glam::Vec2;
use web_sys as web;

/// How a press ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureEnd {
    /// Released without leaving the slop radius.
    Tap,
    /// The pointer moved far enough to count as a drag.
    Drag,
    /// Nothing was pressed.
    None,
}

/// Tap-versus-drag tracking for one primary pointer.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerGesture {
    origin: Option<Vec2>,
    dragging: bool,
}

impl PointerGesture {
    pub fn press(&mut self, pos: Vec2) {
        self.origin = Some(pos);
        self.dragging = false;
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.origin.is_some()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Feed a move; returns true once the press has become a drag.
    /// A drag never turns back into a tap.
    pub fn track(&mut self, pos: Vec2, slop: f32) -> bool {
        let Some(origin) = self.origin else {
            return false;
        };
        if !self.dragging && exceeds_slop(origin, pos, slop) {
            self.dragging = true;
        }
        self.dragging
    }

    pub fn release(&mut self) -> GestureEnd {
        let end = match (self.origin, self.dragging) {
            (None, _) => GestureEnd::None,
            (Some(_), true) => GestureEnd::Drag,
            (Some(_), false) => GestureEnd::Tap,
        };
        *self = Self::default();
        end
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

#[inline]
pub fn exceeds_slop(origin: Vec2, pos: Vec2, slop: f32) -> bool {
    origin.distance_squared(pos) > slop * slop
}

#[inline]
pub fn is_spin_key(key: &str) -> bool {
    // "Spacebar" is what older Edge reports
    matches!(key, " " | "Spacebar" | "Enter")
}

// ---------------- Pointer helpers ----------------
/// Pointer position in canvas backing-store pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    css_to_canvas_px(
        Vec2::new(x_css, y_css),
        Vec2::new(rect.width() as f32, rect.height() as f32),
        Vec2::new(canvas.width() as f32, canvas.height() as f32),
    )
}

/// Scale a CSS-pixel offset into the backing store, which may be larger
/// than the element on high-DPI screens.
#[inline]
pub fn css_to_canvas_px(css: Vec2, css_size: Vec2, backing_size: Vec2) -> Vec2 {
    if css_size.x <= 0.0 || css_size.y <= 0.0 {
        return css;
    }
    css / css_size * backing_size
}
