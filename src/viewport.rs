use crate::config::EditorConfig;
use crate::geometry::{Point, Rect, Vector};
use serde::Serialize;

/// Zoom and pan of the canvas.
///
/// Canvas coordinates map to screen coordinates by scaling first and translating
/// second: `screen = canvas * zoom + pan`. `pan` is therefore stored in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    zoom: f64,
    pan: Vector,
    #[serde(skip)]
    min_zoom: f64,
    #[serde(skip)]
    max_zoom: f64,
    #[serde(skip)]
    step: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl Viewport {
    /// A viewport at zoom 1 and no pan, with the zoom range and step of `config`.
    ///
    /// The config is expected to be validated; an inverted range is swapped rather than
    /// allowed to panic in `clamp`.
    pub fn from_config(config: &EditorConfig) -> Self {
        let (min_zoom, max_zoom) = if config.min_zoom <= config.max_zoom {
            (config.min_zoom, config.max_zoom)
        } else {
            (config.max_zoom, config.min_zoom)
        };
        Self {
            zoom: 1.0_f64.clamp(min_zoom, max_zoom),
            pan: Vector::ZERO,
            min_zoom,
            max_zoom,
            step: config.zoom_step,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Vector {
        self.pan
    }

    pub fn zoom_range(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    pub fn to_screen(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.zoom + self.pan.x,
            canvas.y * self.zoom + self.pan.y,
        )
    }

    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    /// Converts a screen-space displacement into canvas units.
    pub fn to_canvas_delta(&self, delta: Vector) -> Vector {
        delta / self.zoom
    }

    /// Adds a screen-space delta to the pan offset as-is.
    pub fn pan_by(&mut self, delta: Vector) {
        if delta.is_finite() {
            self.pan += delta;
        }
    }

    pub fn set_pan(&mut self, pan: Vector) {
        if pan.is_finite() {
            self.pan = pan;
        }
    }

    /// Sets the zoom level, clamped to the configured range. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    pub fn zoom_in(&mut self) {
        self.step_zoom(1.0);
    }

    pub fn zoom_out(&mut self) {
        self.step_zoom(-1.0);
    }

    /// Steps the zoom by one increment, snapping to the step grid so repeated
    /// presses land on exact levels instead of accumulating float error.
    fn step_zoom(&mut self, direction: f64) {
        let steps = ((self.zoom + direction * self.step) / self.step).round();
        self.set_zoom(steps * self.step);
    }

    /// Restores zoom 1 and removes the pan offset.
    pub fn reset(&mut self) {
        self.set_zoom(1.0);
        self.pan = Vector::ZERO;
    }

    /// Multiplies the zoom by `factor` while keeping the canvas point under `anchor` fixed.
    pub fn zoom_at(&mut self, factor: f64, anchor: Point) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let pinned = self.to_canvas(anchor);
        self.set_zoom(self.zoom * factor);
        self.pan = Vector::new(
            anchor.x - pinned.x * self.zoom,
            anchor.y - pinned.y * self.zoom,
        );
    }

    /// Zooms and pans so that `bounds` (canvas space) fits inside a screen area of
    /// `width` x `height` with `padding` pixels on every side, centred.
    pub fn fit_to(&mut self, bounds: Rect, width: f64, height: f64, padding: f64) {
        let available_w = (width - 2.0 * padding).max(1.0);
        let available_h = (height - 2.0 * padding).max(1.0);
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            self.set_zoom(1.0);
        } else {
            self.set_zoom((available_w / bounds.width).min(available_h / bounds.height));
        }
        let center = bounds.center();
        self.pan = Vector::new(
            width / 2.0 - center.x * self.zoom,
            height / 2.0 - center.y * self.zoom,
        );
    }
}
