use std::cell::RefCell;
use std::rc::Rc;

use sheet_core::{InkOverlay, PAGE_H_MM, PAGE_W_MM, PadRect, build_page_svg, palette};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Blob, Document, Element, Event, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    MouseEvent, TouchEvent, Url, Window,
};
use worksheet_core::{Design, Navigator, Phase, Point, RasterInk};

mod canvas;
mod state;
mod utils;

use canvas::WebInk;
use state::{Controls, Listener, Pad, PadSurface, STATE, State};
use utils::{log, mouse_input, start_navigator, touch_input};

/// 96 dpi, so the page shows at its printed size.
const SCREEN_PX_PER_MM: f64 = 96.0 / 25.4;
const EXPORT_PX_PER_MM: f64 = 4.0;

const TIP: &str = "Tip: Click the Printer icon to save as PDF! (Designed for A4)";

const STYLE: &str = r#"
@page { size: A4; margin: 0; }
body { margin: 0; background: #f3f4f6; font-family: "Noto Sans SC", "PingFang SC", "Microsoft YaHei", sans-serif; }
.ws-nav { position: sticky; top: 0; z-index: 50; display: flex; flex-wrap: wrap; gap: 12px; justify-content: space-between; align-items: center; padding: 12px 16px; background: #fff; box-shadow: 0 2px 6px rgba(0,0,0,.1); }
.ws-group { display: flex; gap: 8px; align-items: center; }
.ws-nav button { border: 0; border-radius: 9999px; padding: 8px 16px; font-weight: bold; cursor: pointer; background: #e5e7eb; color: #6b7280; }
.ws-nav button:disabled { opacity: .3; cursor: default; }
.ws-label { font: 14px monospace; color: #9ca3af; }
.ws-tip { margin: 16px; text-align: center; font-size: 14px; color: #9ca3af; }
.ws-view { padding: 0 32px 32px; }
.ws-page { position: relative; width: 210mm; max-width: 100%; margin: 0 auto; background: #fff; box-shadow: 0 10px 25px rgba(0,0,0,.15); }
.ws-page svg { display: block; width: 100%; height: auto; }
.ws-pad { position: absolute; cursor: crosshair; }
.ws-pad canvas { display: block; width: 100%; height: 100%; touch-action: none; }
.ws-clear { position: absolute; top: 6px; right: 6px; border: 0; border-radius: 4px; padding: 2px 8px; background: rgba(255,255,255,.8); color: #4b5563; box-shadow: 0 1px 3px rgba(0,0,0,.2); cursor: pointer; }
@media print {
  body { background: #fff; }
  .ws-nav, .ws-tip, .ws-clear { display: none !important; }
  .ws-view { padding: 0; }
  .ws-page { width: 210mm; max-width: none; box-shadow: none; }
}
"#;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let body = document.body().ok_or("no body")?;

    let style = document.create_element("style")?;
    style.set_text_content(Some(STYLE));
    document.head().ok_or("no head")?.append_child(&style)?;

    let nav = initial_navigator(&window);

    let bar = document.create_element("div")?;
    bar.set_class_name("ws-nav");
    let designs_group = group(&document)?;
    let mut designs = Vec::with_capacity(Design::ALL.len());
    for design in Design::ALL {
        let label = format!("{} {}", design.emoji(), design.nav_label());
        let btn = button(&document, &label)?;
        designs_group.append_child(&btn)?;
        designs.push((design, btn));
    }
    bar.append_child(&designs_group)?;

    let pager = group(&document)?;
    let prev = button(&document, "\u{2190}")?;
    prev.set_title("Previous Page");
    let label = document.create_element("span")?.dyn_into::<HtmlElement>()?;
    label.set_class_name("ws-label");
    let next = button(&document, "\u{2192}")?;
    next.set_title("Next Page");
    let print = button(&document, "\u{1F5A8}\u{FE0F} Print")?;
    let export = button(&document, "Export PNG")?;
    pager.append_child(&prev)?;
    pager.append_child(&label)?;
    pager.append_child(&next)?;
    pager.append_child(&print)?;
    pager.append_child(&export)?;
    bar.append_child(&pager)?;
    body.append_child(&bar)?;

    let tip = document.create_element("p")?;
    tip.set_class_name("ws-tip");
    tip.set_text_content(Some(TIP));
    body.append_child(&tip)?;

    let view = document.create_element("div")?.dyn_into::<HtmlElement>()?;
    view.set_class_name("ws-view");
    body.append_child(&view)?;

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        nav,
        controls: Controls {
            designs,
            label,
            prev,
            next,
        },
        view,
        pads: Vec::new(),
    }));

    attach_controls(&state, &print, &export)?;
    show_page(&state)?;
    STATE.with(|s| s.replace(Some(state)));
    log("worksheet ready");
    Ok(())
}

fn initial_navigator(window: &Window) -> Navigator {
    let search = window.location().search().unwrap_or_default();
    let (nav, err) = start_navigator(&search);
    if let Some(e) = err {
        log(&format!("{e}; starting with the first design"));
    }
    nav
}

fn group(document: &Document) -> Result<Element, JsValue> {
    let el = document.create_element("div")?;
    el.set_class_name("ws-group");
    Ok(el)
}

fn button(document: &Document, text: &str) -> Result<HtmlButtonElement, JsValue> {
    let btn = document
        .create_element("button")?
        .dyn_into::<HtmlButtonElement>()?;
    btn.set_text_content(Some(text));
    Ok(btn)
}

fn on_click(btn: &HtmlButtonElement, mut f: impl FnMut() + 'static) {
    let cb = Closure::wrap(Box::new(move || f()) as Box<dyn FnMut()>);
    btn.set_onclick(Some(cb.as_ref().unchecked_ref()));
    cb.forget();
}

/// Apply a navigation step and redraw.
fn navigate(state: &Rc<RefCell<State>>, step: impl FnOnce(&mut Navigator)) {
    step(&mut state.borrow_mut().nav);
    if let Err(e) = show_page(state) {
        log(&format!("page failed to show: {e:?}"));
    }
}

fn attach_controls(
    state: &Rc<RefCell<State>>,
    print: &HtmlButtonElement,
    export: &HtmlButtonElement,
) -> Result<(), JsValue> {
    let s = state.borrow();
    for (design, btn) in &s.controls.designs {
        let st = state.clone();
        let design = *design;
        on_click(btn, move || navigate(&st, |nav| nav.select_design(design)));
    }
    {
        let st = state.clone();
        on_click(&s.controls.prev, move || navigate(&st, Navigator::previous_page));
    }
    {
        let st = state.clone();
        on_click(&s.controls.next, move || navigate(&st, Navigator::next_page));
    }
    {
        let window = s.window.clone();
        on_click(print, move || {
            if let Err(e) = window.print() {
                log(&format!("print failed: {e:?}"));
            }
        });
    }
    {
        let st = state.clone();
        on_click(export, move || {
            if let Err(e) = export_png(&st.borrow()) {
                log(&format!("export failed: {e:?}"));
            }
        });
    }
    Ok(())
}

/// Replace the page on screen with the navigator's current page. The old
/// pads and their ink go with it.
fn show_page(state: &Rc<RefCell<State>>) -> Result<(), JsValue> {
    let mut s = state.borrow_mut();
    let page = s
        .nav
        .current_page_content()
        .ok_or("page out of range")?;
    s.pads.clear();

    let sheet = build_page_svg(&page, SCREEN_PX_PER_MM, &[]);
    let markup = sheet
        .svg
        .find("<svg")
        .map_or(sheet.svg.as_str(), |i| &sheet.svg[i..]);

    let page_el = s.document.create_element("div")?;
    page_el.set_class_name("ws-page");
    page_el.set_inner_html(markup);
    s.view.set_inner_html("");
    s.view.append_child(&page_el)?;

    let dpr = s.window.device_pixel_ratio();
    let mut pads = Vec::with_capacity(sheet.pads.len());
    for rect in &sheet.pads {
        pads.push(mount_pad(&s.document, &page_el, rect, dpr)?);
    }
    s.pads = pads;
    update_controls(&s);
    log(&format!(
        "{} page {} ({} pads)",
        page.design,
        page.number,
        s.pads.len()
    ));
    Ok(())
}

fn update_controls(s: &State) {
    let accent = palette::palette(s.nav.design().theme()).accent;
    for (design, btn) in &s.controls.designs {
        let res = if *design == s.nav.design() {
            btn.set_attribute(
                "style",
                &format!("background:{accent};color:#fff;box-shadow:0 2px 6px rgba(0,0,0,.2)"),
            )
        } else {
            btn.remove_attribute("style")
        };
        if let Err(e) = res {
            log(&format!("button style: {e:?}"));
        }
    }
    s.controls.label.set_text_content(Some(&s.nav.label()));
    s.controls.prev.set_disabled(!s.nav.has_previous());
    s.controls.next.set_disabled(!s.nav.has_next());
}

#[derive(Clone, Copy)]
enum Device {
    Mouse,
    Touch,
}

const POINTER_EVENTS: [(&str, Device, Phase); 8] = [
    ("mousedown", Device::Mouse, Phase::Start),
    ("mousemove", Device::Mouse, Phase::Move),
    ("mouseup", Device::Mouse, Phase::End),
    ("mouseleave", Device::Mouse, Phase::Leave),
    ("touchstart", Device::Touch, Phase::Start),
    ("touchmove", Device::Touch, Phase::Move),
    ("touchend", Device::Touch, Phase::End),
    ("touchcancel", Device::Touch, Phase::Cancel),
];

/// Overlay a drawing canvas on the pad area of the page.
fn mount_pad(
    document: &Document,
    page_el: &Element,
    rect: &PadRect,
    dpr: f64,
) -> Result<Pad, JsValue> {
    let wrap = document.create_element("div")?;
    wrap.set_class_name("ws-pad");
    wrap.set_attribute(
        "style",
        &format!(
            "left:{:.4}%;top:{:.4}%;width:{:.4}%;height:{:.4}%",
            rect.x / PAGE_W_MM * 100.0,
            rect.y / PAGE_H_MM * 100.0,
            rect.w / PAGE_W_MM * 100.0,
            rect.h / PAGE_H_MM * 100.0,
        ),
    )?;
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    wrap.append_child(&canvas)?;
    let clear = button(document, "Clear")?;
    clear.set_class_name("ws-clear");
    clear.set_title("Clear Drawing");
    wrap.append_child(&clear)?;
    page_el.append_child(&wrap)?;

    // Sized once from the laid-out box; later resizes stretch it.
    let r = canvas.get_bounding_client_rect();
    let w = r.width().round().max(1.0) as u32;
    let h = r.height().round().max(1.0) as u32;

    let surface = Rc::new(RefCell::new(PadSurface::new()));
    match RasterInk::new(w, h) {
        Some(raster) => {
            surface
                .borrow_mut()
                .mount((WebInk::new(&canvas, w, h, dpr)?, raster));
        }
        None => log("pad raster alloc failed; drawing disabled"),
    }

    let mut listeners = Vec::with_capacity(POINTER_EVENTS.len());
    for (name, device, phase) in POINTER_EVENTS {
        let s = surface.clone();
        let cv = canvas.clone();
        listeners.push(Listener::new(&canvas, name, move |e: Event| {
            let input = match device {
                Device::Mouse => mouse_input(phase, e.unchecked_ref::<MouseEvent>()),
                Device::Touch => {
                    // Keep the page from scrolling under the pen.
                    if phase == Phase::Move {
                        e.prevent_default();
                    }
                    touch_input(phase, e.unchecked_ref::<TouchEvent>())
                }
            };
            let mut surface = s.borrow_mut();
            let r = cv.get_bounding_client_rect();
            surface.set_origin(Point::new(r.left(), r.top()));
            surface.handle(&input);
        })?);
    }
    {
        let s = surface.clone();
        listeners.push(Listener::new(&clear, "click", move |_| {
            s.borrow_mut().clear()
        })?);
    }

    Ok(Pad {
        surface,
        _listeners: listeners,
    })
}

/// Render the current page with its pad ink to PNG and download it.
fn export_png(state: &State) -> Result<(), JsValue> {
    let page = state
        .nav
        .current_page_content()
        .ok_or("page out of range")?;

    let mut overlays = Vec::new();
    for (i, pad) in state.pads.iter().enumerate() {
        let surface = pad.surface.borrow();
        if let Some((_, raster)) = surface.canvas()
            && !raster.is_blank()
        {
            let overlay = InkOverlay::from_raster(i, raster)
                .map_err(|e| JsValue::from_str(&format!("ink: {e}")))?;
            overlays.push(overlay);
        }
    }
    let sheet = build_page_svg(&page, EXPORT_PX_PER_MM, &overlays);

    // Render SVG to RGBA using embedded font
    let fontdb = export_fonts();
    if fontdb.is_empty() {
        log("warning: no embedded font in this build; exported text will be missing");
    }
    let mut opt = usvg::Options::default();
    opt.fontdb = std::sync::Arc::new(fontdb);
    let tree = usvg::Tree::from_str(&sheet.svg, &opt)
        .map_err(|e| JsValue::from_str(&format!("SVG parse error: {e:?}")))?;
    let mut pixmap = tiny_skia::Pixmap::new(sheet.width_px, sheet.height_px)
        .ok_or(JsValue::from_str("pixmap alloc failed"))?;
    let mut pm = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pm);

    let bytes = sheet_core::encode_rgba_to_png_bytes(pixmap.width(), pixmap.height(), pixmap.data())
        .map_err(|e| JsValue::from_str(&format!("encode: {e}")))?;
    let filename = format!("{}-page-{}.png", page.design, page.number);
    download(&state.document, &filename, &bytes)?;
    log(&format!("exported {filename} ({} inked pads)", overlays.len()));
    Ok(())
}

/// The browser has no system fonts to offer, so this is the embedded face or
/// nothing.
fn export_fonts() -> usvg::fontdb::Database {
    let mut fontdb = usvg::fontdb::Database::new();
    if !fonts::has_embedded_font() {
        return fontdb;
    }
    fontdb.load_font_data(fonts::FONT_BYTES.to_vec());
    let family_name = fontdb
        .faces()
        .next()
        .and_then(|face| face.families.first().map(|(n, _)| n.clone()));
    if let Some(name) = family_name {
        fontdb.set_sans_serif_family(name);
    }
    fontdb
}

fn download(document: &Document, filename: &str, bytes: &[u8]) -> Result<(), JsValue> {
    let array = js_sys::Array::new();
    let u8 = js_sys::Uint8Array::from(bytes);
    array.push(&u8);
    let blob = Blob::new_with_u8_array_sequence(&array)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let a = document.create_element("a")?.dyn_into::<HtmlElement>()?;
    a.set_attribute("href", &url)?;
    a.set_attribute("download", filename)?;
    a.click();
    Url::revoke_object_url(&url)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_fonts_are_empty_only_without_an_embedded_face() {
        let fontdb = export_fonts();
        assert_eq!(fontdb.is_empty(), !fonts::has_embedded_font());
    }
}
