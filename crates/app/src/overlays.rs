//! Overlay visibility and the keyboard surface.
//!
//! Overlays are independent flags. Escape closes exactly one of them, picked
//! by [`ESCAPE_PRIORITY`]; the accessibility menu and credits are left alone.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Help,
    History,
    ShareMenu,
    AccessibilityMenu,
    Credits,
}

impl Overlay {
    pub const ALL: [Overlay; 5] = [
        Overlay::Help,
        Overlay::History,
        Overlay::ShareMenu,
        Overlay::AccessibilityMenu,
        Overlay::Credits,
    ];

    fn index(self) -> usize {
        match self {
            Overlay::Help => 0,
            Overlay::History => 1,
            Overlay::ShareMenu => 2,
            Overlay::AccessibilityMenu => 3,
            Overlay::Credits => 4,
        }
    }
}

/// Order in which Escape dismisses overlays.
pub const ESCAPE_PRIORITY: [Overlay; 3] = [Overlay::Help, Overlay::History, Overlay::ShareMenu];

/// Keys the app reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Slash,
    H,
    E,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    /// Ctrl on Linux/Windows, Cmd on macOS
    pub command: bool,
}

impl KeyPress {
    pub fn command(key: Key) -> Self {
        Self { key, command: true }
    }

    pub fn plain(key: Key) -> Self {
        Self {
            key,
            command: false,
        }
    }
}

/// What the shortcuts need to know about the rest of the app.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcutContext {
    /// Prompt is non-empty after trimming
    pub prompt_ready: bool,
    pub is_loading: bool,
    pub is_enhancing: bool,
}

/// Outcome of a key press the caller may need to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Submit,
    Enhance,
    Toggled(Overlay),
    Dismissed(Overlay),
}

#[derive(Debug, Clone, Default)]
pub struct OverlayCoordinator {
    open: [bool; 5],
}

impl OverlayCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, overlay: Overlay) -> bool {
        self.open[overlay.index()]
    }

    pub fn set(&mut self, overlay: Overlay, open: bool) {
        self.open[overlay.index()] = open;
    }

    pub fn open(&mut self, overlay: Overlay) {
        self.set(overlay, true);
    }

    pub fn close(&mut self, overlay: Overlay) {
        self.set(overlay, false);
    }

    /// Flip an overlay; returns its new state.
    pub fn toggle(&mut self, overlay: Overlay) -> bool {
        let now_open = !self.is_open(overlay);
        self.set(overlay, now_open);
        now_open
    }

    pub fn open_overlays(&self) -> Vec<Overlay> {
        Overlay::ALL
            .into_iter()
            .filter(|o| self.is_open(*o))
            .collect()
    }

    /// Close the highest-priority open overlay, if any.
    pub fn dismiss_topmost(&mut self) -> Option<Overlay> {
        let target = ESCAPE_PRIORITY.into_iter().find(|o| self.is_open(*o))?;
        self.close(target);
        Some(target)
    }

    /// Apply a key press. Overlay toggles happen here; submit and enhance are
    /// returned for the caller to start, and only when their preconditions hold.
    pub fn handle_key(&mut self, press: KeyPress, ctx: ShortcutContext) -> Option<ShortcutAction> {
        if press.key == Key::Escape {
            return self.dismiss_topmost().map(ShortcutAction::Dismissed);
        }
        if !press.command {
            return None;
        }
        match press.key {
            Key::Enter if ctx.prompt_ready && !ctx.is_loading => Some(ShortcutAction::Submit),
            Key::E if ctx.prompt_ready && !ctx.is_enhancing => Some(ShortcutAction::Enhance),
            Key::Slash => {
                self.toggle(Overlay::Help);
                Some(ShortcutAction::Toggled(Overlay::Help))
            }
            Key::H => {
                self.toggle(Overlay::History);
                Some(ShortcutAction::Toggled(Overlay::History))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready() -> ShortcutContext {
        ShortcutContext {
            prompt_ready: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_escape_closes_only_help() {
        let mut overlays = OverlayCoordinator::new();
        overlays.open(Overlay::Help);
        overlays.open(Overlay::History);

        let action = overlays.handle_key(KeyPress::plain(Key::Escape), ready());
        assert_eq!(action, Some(ShortcutAction::Dismissed(Overlay::Help)));
        assert!(!overlays.is_open(Overlay::Help));
        assert!(overlays.is_open(Overlay::History));
    }

    #[test]
    fn test_escape_priority_chain() {
        let mut overlays = OverlayCoordinator::new();
        overlays.open(Overlay::ShareMenu);
        overlays.open(Overlay::History);
        assert_eq!(overlays.dismiss_topmost(), Some(Overlay::History));
        assert_eq!(overlays.dismiss_topmost(), Some(Overlay::ShareMenu));
        assert_eq!(overlays.dismiss_topmost(), None);
    }

    #[test]
    fn test_escape_ignores_accessibility_and_credits() {
        let mut overlays = OverlayCoordinator::new();
        overlays.open(Overlay::AccessibilityMenu);
        overlays.open(Overlay::Credits);
        assert_eq!(overlays.handle_key(KeyPress::plain(Key::Escape), ready()), None);
        assert_eq!(
            overlays.open_overlays(),
            vec![Overlay::AccessibilityMenu, Overlay::Credits]
        );
    }

    #[test]
    fn test_opening_does_not_close_others() {
        let mut overlays = OverlayCoordinator::new();
        overlays.open(Overlay::Credits);
        overlays.toggle(Overlay::Help);
        assert!(overlays.is_open(Overlay::Credits));
        assert!(overlays.is_open(Overlay::Help));
    }

    #[test]
    fn test_toggle_shortcuts() {
        let mut overlays = OverlayCoordinator::new();
        let ctx = ShortcutContext::default();
        assert_eq!(
            overlays.handle_key(KeyPress::command(Key::Slash), ctx),
            Some(ShortcutAction::Toggled(Overlay::Help))
        );
        assert!(overlays.is_open(Overlay::Help));
        overlays.handle_key(KeyPress::command(Key::Slash), ctx);
        assert!(!overlays.is_open(Overlay::Help));

        overlays.handle_key(KeyPress::command(Key::H), ctx);
        assert!(overlays.is_open(Overlay::History));
        assert_eq!(overlays.handle_key(KeyPress::plain(Key::H), ctx), None);
    }

    #[test]
    fn test_submit_and_enhance_preconditions() {
        let mut overlays = OverlayCoordinator::new();
        let enter = KeyPress::command(Key::Enter);
        let e = KeyPress::command(Key::E);

        assert_eq!(overlays.handle_key(enter, ready()), Some(ShortcutAction::Submit));
        assert_eq!(overlays.handle_key(e, ready()), Some(ShortcutAction::Enhance));
        assert_eq!(overlays.handle_key(enter, ShortcutContext::default()), None);

        let loading = ShortcutContext {
            is_loading: true,
            ..ready()
        };
        assert_eq!(overlays.handle_key(enter, loading), None);
        assert_eq!(overlays.handle_key(e, loading), Some(ShortcutAction::Enhance));

        let enhancing = ShortcutContext {
            is_enhancing: true,
            ..ready()
        };
        assert_eq!(overlays.handle_key(e, enhancing), None);
    }
}
