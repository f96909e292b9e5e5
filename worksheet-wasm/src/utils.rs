use wasm_bindgen::JsValue;
use web_sys::{MouseEvent, TouchEvent, TouchList};
use worksheet_core::{Design, InputEvent, Navigator, ParseDesignError, Phase};

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s)
        .decode_utf8()
        .unwrap_or_else(|_| s.into())
        .to_string()
}

/// Start state from `?design=fox&page=2`. The page is clamped; an unknown or
/// missing design means the first one.
pub fn start_navigator(search: &str) -> (Navigator, Option<ParseDesignError>) {
    let (design, err) = match get_query_param(search, "design").map(|d| d.parse::<Design>()) {
        Some(Ok(d)) => (d, None),
        Some(Err(e)) => (Design::default(), Some(e)),
        None => (Design::default(), None),
    };
    let page = get_query_param(search, "page")
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or(1);
    (Navigator::at(design, page), err)
}

/// Canvas backing store for a CSS box at the device pixel ratio.
pub fn backing_size(css_w: f64, css_h: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let target_w = (css_w * dpr).round().clamp(1.0, 10000.0) as u32;
    let target_h = (css_h * dpr).round().clamp(1.0, 10000.0) as u32;
    (target_w, target_h)
}

pub fn mouse_input(phase: Phase, e: &MouseEvent) -> InputEvent {
    InputEvent::mouse(phase, e.client_x() as f64, e.client_y() as f64)
}

/// Active touches in viewport coordinates. Empty once the last finger lifts.
pub fn touch_input(phase: Phase, e: &TouchEvent) -> InputEvent {
    InputEvent::touch(phase, touch_points(&e.touches()))
}

fn touch_points(list: &TouchList) -> Vec<(f64, f64)> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| (t.client_x() as f64, t.client_y() as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_are_decoded() {
        let search = "?design=fox&page=2&note=a%20b";
        assert_eq!(get_query_param(search, "design").as_deref(), Some("fox"));
        assert_eq!(get_query_param(search, "page").as_deref(), Some("2"));
        assert_eq!(get_query_param(search, "note").as_deref(), Some("a b"));
        assert_eq!(get_query_param(search, "zoom"), None);
    }

    #[test]
    fn bare_key_has_empty_value() {
        assert_eq!(get_query_param("design", "design").as_deref(), Some(""));
        assert_eq!(get_query_param("", "design"), None);
    }

    #[test]
    fn start_state_follows_the_query() {
        let (nav, err) = start_navigator("?design=fox&page=2");
        assert!(err.is_none());
        assert_eq!((nav.design(), nav.page()), (Design::Fox, 2));

        let (nav, _) = start_navigator("?design=panda&page=9");
        assert_eq!((nav.design(), nav.page()), (Design::Panda, 2));
    }

    #[test]
    fn page_alone_applies_to_the_first_design() {
        let (nav, err) = start_navigator("?page=3");
        assert!(err.is_none());
        assert_eq!((nav.design(), nav.page()), (Design::PawPrint, 3));

        let (nav, err) = start_navigator("?design=owl&page=2");
        assert!(err.is_some());
        assert_eq!((nav.design(), nav.page()), (Design::PawPrint, 2));

        let (nav, _) = start_navigator("");
        assert_eq!((nav.design(), nav.page()), (Design::PawPrint, 1));
    }

    #[test]
    fn backing_store_scales_with_pixel_ratio() {
        assert_eq!(backing_size(182.4, 64.0, 2.0), (365, 128));
        assert_eq!(backing_size(100.0, 50.0, 1.0), (100, 50));
        // Missing ratio behaves like 1, and a collapsed box keeps one pixel.
        assert_eq!(backing_size(100.0, 50.0, 0.0), (100, 50));
        assert_eq!(backing_size(0.0, 0.0, 3.0), (1, 1));
    }
}
