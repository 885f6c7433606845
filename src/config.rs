//! Page configuration. `Default` reproduces the stock birthday page; with the
//! `serde_json` feature a (partial) JSON document can override any field.

use crate::media::MediaSource;
use crate::media::layout::{Breakpoint, default_breakpoints};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Start overlay headline.
    pub headline: String,
    pub tagline: String,
    pub start_label: String,
    pub message_title: String,
    pub message_body: String,
    /// Delay between start and the message panel appearing.
    pub message_delay_ms: f64,
    /// Looping background track.
    pub audio_src: String,
    pub media: Vec<MediaSource>,
    pub breakpoints: Vec<Breakpoint>,
}

pub const DEFAULT_PHOTOS: [&str; 8] = [
    "assets/one.jpg",
    "assets/two.jpg",
    "assets/three.jpg",
    "assets/four.jpg",
    "assets/five.jpg",
    "assets/six.jpg",
    "assets/seven.jpg",
    "assets/eight.jpg",
];

pub const DEFAULT_VIDEOS: [&str; 4] =
    ["assets/vid_1.mp4", "assets/vid_2.mp4", "assets/vid_3.mp4", "assets/vid_4.mp4"];

impl Default for Config {
    fn default() -> Self {
        let media = DEFAULT_PHOTOS
            .iter()
            .map(|s| MediaSource::photo(*s))
            .chain(DEFAULT_VIDEOS.iter().map(|s| MediaSource::video(*s)))
            .collect();
        Self {
            headline: "Happy Birthday Kavin 🎉".into(),
            tagline: "Tap to celebrate!".into(),
            start_label: "Let’s Celebrate!".into(),
            message_title: "🎉 Wishing You the Best Day Ever! 🎂".into(),
            message_body: "May your day be filled with joy, laughter, and magic moments! ✨".into(),
            message_delay_ms: 2000.0,
            audio_src: "assets/birthday.mp3".into(),
            media,
            breakpoints: default_breakpoints(),
        }
    }
}

#[cfg(feature = "serde_json")]
impl Config {
    /// Parses a JSON override; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;

    #[test]
    fn default_catalog_has_photos_then_videos() {
        let c = Config::default();
        assert_eq!(c.media.len(), 12);
        assert!(c.media[..8].iter().all(|m| m.kind == MediaKind::Photo));
        assert!(c.media[8..].iter().all(|m| m.kind == MediaKind::Video));
        assert_eq!(c.message_delay_ms, 2000.0);
        assert_eq!(c.breakpoints.len(), 3);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let c = Config::from_json(
            r#"{ "headline": "Happy Birthday Ada", "media": [{ "src": "a.jpg", "kind": "photo" }] }"#,
        )
        .unwrap();
        assert_eq!(c.headline, "Happy Birthday Ada");
        assert_eq!(c.media, vec![MediaSource::photo("a.jpg")]);
        assert_eq!(c.audio_src, Config::default().audio_src);
        assert_eq!(c.breakpoints, default_breakpoints());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn malformed_json_is_rejected() {
        assert!(Config::from_json("{ \"media\": 3 }").is_err());
        assert!(Config::from_json("not json").is_err());
    }
}
