//! Browser glue: mounts the page, wires input events and runs the frame loop.
//!
//! The page state lives in a thread-local `App`; every listener and the
//! animation-frame callback borrow it briefly and hand the event to `Page`.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, window};

use crate::config::Config;
use crate::page::Page;
use crate::particles::{Balloon, ConfettiPiece, FloatingEmoji, Particle, Star};

mod audio;
mod canvas;
mod dom;
mod motion;

use audio::HtmlAudioSink;

pub(crate) struct App {
    page: Page<HtmlAudioSink, SmallRng>,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    dom: dom::PageDom,
    _listeners: Vec<EventListener>,
}

impl App {
    fn start(&mut self) {
        let (width, _) = viewport();
        if self.page.start(performance_now(), width) {
            let layers = [Star::NAME, ConfettiPiece::NAME, FloatingEmoji::NAME, Balloon::NAME].join(", ");
            let columns = self.page.media.layout().map(|l| l.columns).unwrap_or(0) as u32;
            console::log!("celebration started, layers:", layers, "grid columns:", columns);
        }
    }

    fn frame(&mut self, now: f64) {
        let (w, h) = viewport();
        self.page.tick(now);
        canvas::fit_to_viewport(&self.canvas, w, h);
        canvas::render(&self.ctx, &self.page, now, w, h);
        if let Err(err) = self.dom.sync(&self.page, now) {
            console::warn!("overlay update failed", err);
        }
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Runs `f` against the mounted app. Silently skipped before mount or when the
/// app is already borrowed further up the stack.
pub(crate) fn with_app(f: impl FnOnce(&mut App)) {
    APP.with(|cell| {
        if let Ok(mut guard) = cell.try_borrow_mut() {
            if let Some(app) = guard.as_mut() {
                f(app);
            }
        }
    });
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn viewport() -> (f64, f64) {
    let Some(win) = window() else {
        return (1024.0, 768.0);
    };
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1024.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(768.0);
    (w, h)
}

pub fn mount(config: Config) -> Result<(), JsValue> {
    if APP.with(|a| a.borrow().is_some()) {
        console::warn!("celebration page already mounted");
        return Ok(());
    }
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    // Create / reuse the particle canvas
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("bb-particles") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("bb-particles");
        c.set_attribute("style", "position:fixed; inset:0; width:100vw; height:100vh; pointer-events:none; z-index:10;")?;
        body.append_child(&c)?;
        c
    };
    let (w, h) = viewport();
    canvas::fit_to_viewport(&canvas, w, h);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let audio = HtmlAudioSink::new(&config.audio_src)?;
    body.append_child(audio.element())?;
    let dom = dom::PageDom::build(&doc, &config)?;
    let page = Page::new(config, audio, SmallRng::from_entropy());

    let keydown = EventListener::new(&win, "keydown", |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = event.key();
        with_app(|app| {
            if app.page.media.handle_key(&key) {
                event.prevent_default();
            }
        });
    });

    APP.with(|a| {
        a.replace(Some(App { page, canvas, ctx, dom, _listeners: vec![keydown] }));
    });
    console::log!("celebration page mounted");
    start_frame_loop();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_app(|app| app.frame(ts));
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
