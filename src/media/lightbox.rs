//! Focused view over the media list with wrap-around navigation.

/// Keys the lightbox reacts to while open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxKey {
    Previous,
    Next,
    Close,
}

impl LightboxKey {
    /// Maps a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(LightboxKey::Previous),
            "ArrowRight" => Some(LightboxKey::Next),
            "Escape" => Some(LightboxKey::Close),
            _ => None,
        }
    }
}

pub fn wrap_next(index: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((index % len + 1) % len)
}

pub fn wrap_previous(index: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((index % len + len - 1) % len)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lightbox {
    focused: Option<usize>,
}

impl Lightbox {
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn is_open(&self) -> bool {
        self.focused.is_some()
    }

    pub fn open(&mut self, index: usize) {
        self.focused = Some(index);
    }

    pub fn close(&mut self) {
        self.focused = None;
    }

    /// No-op while closed or when the list is empty.
    pub fn next(&mut self, len: usize) {
        if let Some(i) = self.focused {
            self.focused = wrap_next(i, len).or(self.focused);
        }
    }

    pub fn previous(&mut self, len: usize) {
        if let Some(i) = self.focused {
            self.focused = wrap_previous(i, len).or(self.focused);
        }
    }

    /// Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: LightboxKey, len: usize) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            LightboxKey::Previous => self.previous(len),
            LightboxKey::Next => self.next(len),
            LightboxKey::Close => self.close(),
        }
        true
    }

    /// 1-based counter text, e.g. "3 / 12".
    pub fn counter(&self, len: usize) -> Option<String> {
        self.focused.map(|i| format!("{} / {}", i + 1, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_then_previous_round_trips() {
        for len in 1..8 {
            for i in 0..len {
                let n = wrap_next(i, len).unwrap();
                assert_eq!(wrap_previous(n, len), Some(i), "len {len} index {i}");
            }
        }
    }

    #[test]
    fn wraps_at_both_ends() {
        assert_eq!(wrap_next(11, 12), Some(0));
        assert_eq!(wrap_previous(0, 12), Some(11));
        assert_eq!(wrap_next(0, 1), Some(0));
        assert_eq!(wrap_previous(0, 1), Some(0));
    }

    #[test]
    fn empty_list_is_a_no_op() {
        assert_eq!(wrap_next(0, 0), None);
        assert_eq!(wrap_previous(3, 0), None);
        let mut lb = Lightbox::default();
        lb.open(2);
        lb.next(0);
        lb.previous(0);
        assert_eq!(lb.focused(), Some(2));
    }

    #[test]
    fn keys_only_act_while_open() {
        let mut lb = Lightbox::default();
        assert!(!lb.handle_key(LightboxKey::Next, 4));
        assert_eq!(lb.focused(), None);
        lb.open(3);
        assert!(lb.handle_key(LightboxKey::Next, 4));
        assert_eq!(lb.focused(), Some(0));
        assert!(lb.handle_key(LightboxKey::Previous, 4));
        assert_eq!(lb.focused(), Some(3));
        assert_eq!(lb.counter(4).as_deref(), Some("4 / 4"));
        assert!(lb.handle_key(LightboxKey::Close, 4));
        assert!(!lb.is_open());
    }

    #[test]
    fn key_names() {
        assert_eq!(LightboxKey::from_key("ArrowLeft"), Some(LightboxKey::Previous));
        assert_eq!(LightboxKey::from_key("ArrowRight"), Some(LightboxKey::Next));
        assert_eq!(LightboxKey::from_key("Escape"), Some(LightboxKey::Close));
        assert_eq!(LightboxKey::from_key("Enter"), None);
    }
}
