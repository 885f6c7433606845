//! DOM overlays: start screen, message panel, mute button, media grid, lightbox.
//!
//! Everything is built once at mount. `PageDom::sync` runs every frame and only
//! touches the document where page state changed (or a cell is mid-entrance).

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, HtmlVideoElement};

use super::motion::{self, Pose};
use super::with_app;
use crate::anim::{Easing, oscillate};
use crate::config::Config;
use crate::media::{MediaEntry, MediaKind};
use crate::page::Page;

const OVERLAY_EMOJIS: [&str; 4] = ["🎈", "🎂", "🎁", "🎊"];

const GLASS: &str = "background:rgba(255,255,255,0.35); backdrop-filter:blur(16px); border:1px solid rgba(255,255,255,0.5); box-shadow:0 20px 50px rgba(0,0,0,0.18);";
const ROUND_BUTTON: &str = "position:absolute; z-index:110; width:60px; height:60px; border-radius:50%; background:rgba(255,255,255,0.1); border:1px solid rgba(255,255,255,0.2); color:#fff; font-size:28px; cursor:pointer; display:flex; align-items:center; justify-content:center;";

fn element(doc: &Document, tag: &str, style: &str) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = doc.create_element(tag)?.dyn_into()?;
    el.set_attribute("style", style)?;
    Ok(el)
}

fn set_style(el: &HtmlElement, prop: &str, value: &str) {
    let _ = el.style().set_property(prop, value);
}

fn set_pose(el: &HtmlElement, pose: Pose) {
    set_style(el, "transform", &pose.transform());
    set_style(el, "opacity", &format!("{:.3}", pose.opacity));
}

/// `<img>` or looping muted `<video>` for one catalog item.
fn media_element(doc: &Document, entry: &MediaEntry, fit: &str, alt: &str) -> Result<Element, JsValue> {
    match entry.source.kind {
        MediaKind::Photo => {
            let img: HtmlImageElement = doc.create_element("img")?.dyn_into()?;
            img.set_src(&entry.source.src);
            img.set_alt(alt);
            img.set_draggable(false);
            img.set_attribute("loading", "lazy")?;
            img.set_attribute("style", fit)?;
            Ok(img.into())
        }
        MediaKind::Video => {
            let video: HtmlVideoElement = doc.create_element("video")?.dyn_into()?;
            video.set_src(&entry.source.src);
            video.set_autoplay(true);
            video.set_muted(true);
            video.set_loop(true);
            video.set_attribute("playsinline", "")?;
            video.set_attribute("style", fit)?;
            Ok(video.into())
        }
    }
}

struct CellDom {
    root: HtmlElement,
    hint: HtmlElement,
    entry_id: u64,
    animating: bool,
    hovered: bool,
    hinted: bool,
    _listeners: [EventListener; 3],
}

/// Start screen pieces that move while it waits for the gesture.
struct StartOverlay {
    root: HtmlElement,
    title: HtmlElement,
    tagline: HtmlElement,
    emojis: Vec<HtmlElement>,
}

struct LightboxDom {
    root: HtmlElement,
    counter: HtmlElement,
    stage: HtmlElement,
    _listeners: [EventListener; 4],
}

pub struct PageDom {
    doc: Document,
    start: Option<StartOverlay>,
    started_at: Option<f64>,
    message: HtmlElement,
    message_heading: HtmlElement,
    mute: HtmlElement,
    mute_shown: bool,
    grid: HtmlElement,
    cells: Vec<CellDom>,
    lightbox: LightboxDom,
    shown_message: bool,
    shown_muted: Option<bool>,
    shown_focus: Option<(usize, u64)>,
    focus_changed_at: Option<f64>,
    grid_columns: usize,
    _listeners: Vec<EventListener>,
}

impl PageDom {
    pub fn build(doc: &Document, config: &Config) -> Result<Self, JsValue> {
        let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
        body.set_attribute(
            "style",
            "margin:0; min-height:100vh; overflow:hidden; font-family:'Poppins', system-ui, sans-serif; background:linear-gradient(135deg,#f9a8d4 0%,#fecdd3 50%,#fef9c3 100%);",
        )?;

        // --- Start screen ---
        let overlay = element(
            doc,
            "div",
            "position:fixed; inset:0; z-index:50; display:flex; flex-direction:column; align-items:center; justify-content:center; padding:16px; text-align:center;",
        )?;
        let title = element(doc, "h1", "display:inline-block; font-size:clamp(2.25rem,7vw,4.5rem); font-weight:700; margin:0 0 16px; color:#db2777; line-height:1.15;")?;
        title.set_text_content(Some(&config.headline));
        let tagline = element(doc, "div", "display:inline-block; font-size:clamp(1.25rem,3vw,1.9rem); font-weight:600; color:rgba(0,0,0,0.7); margin-bottom:32px;")?;
        tagline.set_text_content(Some(&format!("✨ {} ✨", config.tagline)));
        let start = element(
            doc,
            "button",
            "padding:18px 40px; font-size:1.25rem; font-weight:700; color:#fff; border:none; border-radius:16px; cursor:pointer; background:linear-gradient(90deg,#ec4899,#facc15,#fdba74); box-shadow:0 20px 40px rgba(236,72,153,0.35);",
        )?;
        start.set_text_content(Some(&format!("▶ {}", config.start_label)));
        let emoji_row = element(doc, "div", "display:flex; justify-content:center; gap:24px; font-size:clamp(1.9rem,5vw,3rem); margin-top:24px;")?;
        let mut overlay_emojis = Vec::with_capacity(OVERLAY_EMOJIS.len());
        for e in OVERLAY_EMOJIS {
            let span = element(doc, "span", "display:inline-block;")?;
            span.set_text_content(Some(e));
            emoji_row.append_child(&span)?;
            overlay_emojis.push(span);
        }
        let title_row = element(doc, "div", "")?;
        title_row.append_child(&title)?;
        let tagline_row = element(doc, "div", "")?;
        tagline_row.append_child(&tagline)?;
        overlay.append_child(&title_row)?;
        overlay.append_child(&tagline_row)?;
        overlay.append_child(&start)?;
        overlay.append_child(&emoji_row)?;

        // --- Message panel (hidden until the page says so) ---
        let message = element(
            doc,
            "div",
            &format!("position:fixed; left:50%; top:24px; z-index:30; width:min(92vw,48rem); box-sizing:border-box; padding:16px 24px; border-radius:16px; text-align:center; opacity:0; transform:translate(-50%,-100px); transition:transform .8s ease-out, opacity .8s ease-out; pointer-events:none; {GLASS}"),
        )?;
        let heading = element(doc, "h2", "display:inline-block; margin:0 0 8px; font-size:clamp(1.1rem,4vw,3rem); font-weight:700; color:#db2777;")?;
        heading.set_text_content(Some(&config.message_title));
        let body_text = element(doc, "p", "margin:0; font-size:clamp(.9rem,2vw,1.25rem); color:rgba(0,0,0,0.7); font-weight:500;")?;
        body_text.set_text_content(Some(&config.message_body));
        message.append_child(&heading)?;
        message.append_child(&body_text)?;

        // --- Mute toggle ---
        let mute = element(
            doc,
            "button",
            &format!("position:fixed; right:28px; bottom:28px; z-index:30; width:56px; height:56px; border-radius:50%; font-size:24px; cursor:pointer; display:none; align-items:center; justify-content:center; opacity:0; transform:scale(0); {GLASS}"),
        )?;

        // --- Media grid ---
        let grid = element(
            doc,
            "div",
            "position:fixed; left:50%; top:0; transform:translateX(-50%); z-index:20; display:grid; justify-content:center; align-content:start; max-height:100vh; overflow-y:auto; scroll-behavior:smooth; box-sizing:border-box;",
        )?;

        let lightbox = build_lightbox(doc)?;

        body.append_child(&grid)?;
        body.append_child(&message)?;
        body.append_child(&mute)?;
        body.append_child(&overlay)?;
        body.append_child(&lightbox.root)?;

        let listeners = vec![
            EventListener::new(&start, "click", |_| {
                with_app(|app| app.start());
            }),
            EventListener::new(&mute, "click", |_| {
                with_app(|app| {
                    app.page.toggle_mute();
                });
            }),
        ];

        Ok(Self {
            doc: doc.clone(),
            start: Some(StartOverlay { root: overlay, title, tagline, emojis: overlay_emojis }),
            started_at: None,
            message,
            message_heading: heading,
            mute,
            mute_shown: false,
            grid,
            cells: Vec::new(),
            lightbox,
            shown_message: false,
            shown_muted: None,
            shown_focus: None,
            focus_changed_at: None,
            grid_columns: 0,
            _listeners: listeners,
        })
    }

    pub fn sync<A, R>(&mut self, page: &Page<A, R>, now: f64) -> Result<(), JsValue> {
        if page.is_started() {
            let since = now - *self.started_at.get_or_insert(now);
            if since >= motion::OVERLAY_EXIT_MS {
                if let Some(start) = self.start.take() {
                    start.root.remove();
                }
            } else if let Some(start) = &self.start {
                set_style(&start.root, "pointer-events", "none");
                set_pose(&start.root, motion::overlay_exit(since));
            }
            if !self.mute_shown {
                set_style(&self.mute, "display", "flex");
                set_pose(&self.mute, motion::mute_button(since));
                self.mute_shown = motion::mute_button_done(since);
            }
        } else if let Some(start) = &self.start {
            set_style(&start.title, "transform", &motion::headline(now).transform());
            set_style(&start.tagline, "transform", &motion::tagline(now).transform());
            for (i, span) in start.emojis.iter().enumerate() {
                let period = 2000.0 + i as f64 * 300.0;
                let t = now - i as f64 * 100.0;
                let y = oscillate(&[-10.0, 10.0, -10.0], period, t, Easing::EaseInOut);
                let r = oscillate(&[-5.0, 5.0, -5.0], period, t, Easing::EaseInOut);
                set_style(span, "transform", &format!("translateY({y:.1}px) rotate({r:.1}deg)"));
            }
        }

        if page.message_visible() != self.shown_message {
            self.shown_message = page.message_visible();
            let (transform, opacity) =
                if self.shown_message { ("translate(-50%,0)", "1") } else { ("translate(-50%,-100px)", "0") };
            set_style(&self.message, "transform", transform);
            set_style(&self.message, "opacity", opacity);
        }
        if self.shown_message {
            set_style(&self.message_heading, "transform", &motion::message_heading(now).transform());
        }

        if self.shown_muted != Some(page.is_muted()) {
            self.shown_muted = Some(page.is_muted());
            self.mute.set_text_content(Some(if page.is_muted() { "🔇" } else { "🔊" }));
        }

        self.sync_grid(page, now)?;
        self.sync_lightbox(page, now)
    }

    fn sync_grid<A, R>(&mut self, page: &Page<A, R>, now: f64) -> Result<(), JsValue> {
        let grid = &page.media;
        if grid.is_empty() && !self.cells.is_empty() {
            self.cells.clear();
            self.grid.set_inner_html("");
        }
        if let Some(layout) = grid.layout() {
            if layout.columns != self.grid_columns {
                self.grid_columns = layout.columns;
                set_style(&self.grid, "grid-template-columns", &format!("repeat({}, {}px)", layout.columns, layout.cell_px));
                set_style(&self.grid, "gap", &format!("{}px", layout.gap_px));
                set_style(&self.grid, "padding", &format!("{}px", layout.padding_px));
            }
        }

        let cell_px = grid.layout().map(|l| l.cell_px).unwrap_or(200.0);
        for (index, placed) in grid.entries().iter().enumerate().skip(self.cells.len()) {
            let cell = build_cell(&self.doc, index, &placed.entry, cell_px)?;
            self.grid.append_child(&cell.root)?;
            self.cells.push(cell);
        }

        for (index, (cell, placed)) in self.cells.iter_mut().zip(grid.entries()).enumerate() {
            debug_assert_eq!(cell.entry_id, placed.entry.id);
            let hovered = grid.hovered() == Some(index);
            if cell.animating || hovered != cell.hovered {
                let f = placed.frame(now);
                let (lift, extra_scale, extra_rot) = if hovered && placed.entrance_done(now) { (-8.0, 1.12, 3.0) } else { (0.0, 1.0, 0.0) };
                set_style(
                    &cell.root,
                    "transform",
                    &format!("translateY({lift}px) scale({:.4}) rotate({:.2}deg)", f.scale * extra_scale, f.rotation_deg + extra_rot),
                );
                set_style(&cell.root, "opacity", &format!("{:.3}", f.opacity));
                set_style(&cell.root, "z-index", if hovered { "30" } else { "20" });
                cell.animating = !placed.entrance_done(now);
                cell.hovered = hovered;
            }
            let hint = grid.shows_hint(index);
            if hint != cell.hinted {
                cell.hinted = hint;
                set_style(&cell.hint, "opacity", if hint { "1" } else { "0" });
            }
        }
        Ok(())
    }

    fn sync_lightbox<A, R>(&mut self, page: &Page<A, R>, now: f64) -> Result<(), JsValue> {
        let grid = &page.media;
        let focus = grid.lightbox().focused().zip(grid.focused_entry().map(|e| e.id));
        if focus != self.shown_focus {
            self.shown_focus = focus;
            self.show_focus(page, now)?;
        }
        if let Some(at) = self.focus_changed_at {
            let since = now - at;
            set_pose(&self.lightbox.stage, motion::lightbox_media(since));
            if since >= motion::LIGHTBOX_ENTER_MS {
                self.focus_changed_at = None;
            }
        }
        Ok(())
    }

    fn show_focus<A, R>(&mut self, page: &Page<A, R>, now: f64) -> Result<(), JsValue> {
        let grid = &page.media;
        match (self.shown_focus, grid.focused_entry()) {
            (Some((index, _)), Some(entry)) => {
                self.focus_changed_at = Some(now);
                set_style(&self.lightbox.root, "display", "flex");
                self.lightbox.counter.set_text_content(grid.lightbox().counter(grid.len()).as_deref());
                self.lightbox.stage.set_inner_html("");
                let media = media_element(
                    &self.doc,
                    entry,
                    "display:block; max-width:90vw; max-height:80vh; object-fit:contain;",
                    &format!("Memory {}", index + 1),
                )?;
                self.lightbox.stage.append_child(&media)?;
            }
            _ => {
                self.focus_changed_at = None;
                set_style(&self.lightbox.root, "display", "none");
                self.lightbox.stage.set_inner_html("");
            }
        }
        Ok(())
    }
}

fn build_cell(doc: &Document, index: usize, entry: &MediaEntry, cell_px: f64) -> Result<CellDom, JsValue> {
    let root = element(
        doc,
        "div",
        &format!("position:relative; width:{cell_px}px; height:{cell_px}px; cursor:pointer; opacity:0; transform:scale(0); transition:none;"),
    )?;
    let frame = element(
        doc,
        "div",
        "width:100%; height:100%; border:4px solid #fff; border-radius:12px; overflow:hidden; background:#fff; box-shadow:0 10px 25px rgba(0,0,0,0.2); box-sizing:border-box; position:relative;",
    )?;
    let media = media_element(doc, entry, "width:100%; height:100%; object-fit:cover; display:block;", &format!("Memory {}", index + 1))?;
    let hint = element(
        doc,
        "div",
        "position:absolute; inset:0; display:flex; align-items:flex-end; justify-content:center; padding-bottom:8px; background:linear-gradient(to top, rgba(0,0,0,0.6), rgba(0,0,0,0.2), transparent); opacity:0; transition:opacity .2s; pointer-events:none;",
    )?;
    let label = element(doc, "span", "color:#fff; font-size:11px; font-weight:600; background:rgba(0,0,0,0.4); padding:4px 8px; border-radius:999px;")?;
    label.set_text_content(Some("🔍 Tap to view"));
    hint.append_child(&label)?;
    frame.append_child(&media)?;
    frame.append_child(&hint)?;
    root.append_child(&frame)?;

    let listeners = [
        EventListener::new(&root, "click", move |_| {
            with_app(|app| {
                app.page.media.click(index);
            });
        }),
        EventListener::new(&root, "mouseenter", move |_| {
            with_app(|app| app.page.media.set_hovered(Some(index)));
        }),
        EventListener::new(&root, "mouseleave", move |_| {
            with_app(|app| {
                if app.page.media.hovered() == Some(index) {
                    app.page.media.set_hovered(None);
                }
            });
        }),
    ];
    Ok(CellDom { root, hint, entry_id: entry.id, animating: true, hovered: false, hinted: false, _listeners: listeners })
}

fn build_lightbox(doc: &Document) -> Result<LightboxDom, JsValue> {
    let root = element(doc, "div", "position:fixed; inset:0; z-index:100; display:none; align-items:center; justify-content:center;")?;
    let backdrop = element(doc, "div", "position:absolute; inset:0; background:rgba(0,0,0,0.95); backdrop-filter:blur(40px); cursor:pointer;")?;
    let prev = element(doc, "button", &format!("{ROUND_BUTTON} left:24px;"))?;
    prev.set_text_content(Some("‹"));
    let next = element(doc, "button", &format!("{ROUND_BUTTON} right:24px;"))?;
    next.set_text_content(Some("›"));
    let close = element(doc, "button", &format!("{ROUND_BUTTON} top:24px; right:24px;"))?;
    close.set_text_content(Some("✕"));
    let counter = element(
        doc,
        "div",
        "position:absolute; top:24px; left:24px; z-index:110; padding:10px 20px; border-radius:999px; background:rgba(255,255,255,0.1); border:1px solid rgba(255,255,255,0.2); color:#fff; font-weight:600;",
    )?;
    let stage = element(
        doc,
        "div",
        "position:relative; z-index:105; max-width:90vw; max-height:80vh; border:4px solid rgba(255,255,255,0.3); border-radius:16px; overflow:hidden; background:rgba(255,255,255,0.05);",
    )?;
    root.append_child(&backdrop)?;
    root.append_child(&prev)?;
    root.append_child(&next)?;
    root.append_child(&close)?;
    root.append_child(&counter)?;
    root.append_child(&stage)?;

    let listeners = [
        EventListener::new(&backdrop, "click", |_| with_app(|app| app.page.media.close())),
        EventListener::new(&prev, "click", |e| {
            e.stop_propagation();
            with_app(|app| app.page.media.previous());
        }),
        EventListener::new(&next, "click", |e| {
            e.stop_propagation();
            with_app(|app| app.page.media.next());
        }),
        EventListener::new(&close, "click", |e| {
            e.stop_propagation();
            with_app(|app| app.page.media.close());
        }),
    ];
    Ok(LightboxDom { root, counter, stage, _listeners: listeners })
}
