//! Viewport sizing
//!
//! The canvas always fills the browser window.

/// Pixel dimensions for a CSS viewport size, never smaller than 1x1
pub fn canvas_pixels(inner_width: f64, inner_height: f64) -> (u32, u32) {
    let clamp = |v: f64| if v.is_finite() { v.max(1.0) as u32 } else { 1 };
    (clamp(inner_width), clamp(inner_height))
}

/// Current window size in pixels
#[cfg(target_arch = "wasm32")]
pub fn viewport_size(window: &web_sys::Window) -> (u32, u32) {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    canvas_pixels(read(window.inner_width()), read(window.inner_height()))
}

/// Headless runs use a fixed arcade-sized playfield
#[cfg(not(target_arch = "wasm32"))]
pub fn viewport_size() -> (u32, u32) {
    (1300, 800)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_pixels() {
        assert_eq!(canvas_pixels(1300.0, 800.5), (1300, 800));
        assert_eq!(canvas_pixels(0.0, -5.0), (1, 1));
        assert_eq!(canvas_pixels(f64::NAN, 10.0), (1, 10));
    }
}
