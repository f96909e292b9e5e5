use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlButtonElement, HtmlElement, Window};
use worksheet_core::{Design, DrawingSurface, Navigator, RasterInk};

use crate::canvas::WebInk;

/// Screen ink plus a raster copy kept for PNG export.
pub type PadSurface = DrawingSurface<(WebInk, RasterInk)>;

/// A DOM event listener, removed from its target on drop.
pub struct Listener {
    target: EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        name: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())?;
        Ok(Listener {
            target: target.clone(),
            name,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.name, self.callback.as_ref().unchecked_ref());
    }
}

/// A mounted drawing pad. Its listeners live as long as it does.
pub struct Pad {
    pub surface: Rc<RefCell<PadSurface>>,
    pub _listeners: Vec<Listener>,
}

pub struct Controls {
    pub designs: Vec<(Design, HtmlButtonElement)>,
    pub label: HtmlElement,
    pub prev: HtmlButtonElement,
    pub next: HtmlButtonElement,
}

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub nav: Navigator,
    pub controls: Controls,
    /// Holds the current page.
    pub view: HtmlElement,
    /// Pads of the page on screen, in document order.
    pub pads: Vec<Pad>,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}
