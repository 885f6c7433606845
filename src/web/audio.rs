use gloo::console;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

use crate::page::AudioSink;

/// `<audio>` element backing the page's music.
pub struct HtmlAudioSink {
    el: HtmlAudioElement,
}

impl HtmlAudioSink {
    pub fn new(src: &str) -> Result<Self, JsValue> {
        let el = HtmlAudioElement::new_with_src(src)?;
        el.set_loop(true);
        el.set_muted(true);
        Ok(Self { el })
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.el
    }
}

impl AudioSink for HtmlAudioSink {
    fn set_muted(&mut self, muted: bool) {
        self.el.set_muted(muted);
    }

    fn is_muted(&self) -> bool {
        self.el.muted()
    }

    fn play(&mut self) {
        match self.el.play() {
            Ok(promise) => {
                // Rejected under autoplay restrictions; the mute button still works.
                let on_reject = Closure::once(move |err: JsValue| {
                    console::log!("autoplay blocked, waiting for user interaction", err);
                });
                let _ = promise.catch(&on_reject);
                on_reject.forget();
            }
            Err(err) => console::warn!("audio playback failed", err),
        }
    }
}
