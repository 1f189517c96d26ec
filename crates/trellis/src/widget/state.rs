//! Interaction state machine shared by every widget.
//!
//! Raw pointer and keyboard signals are folded into one of eight named
//! [`WidgetState`]s. The table in [`WidgetState::next`] is the single source
//! of truth for which signal moves a widget from one state to another; the
//! dispatcher then invokes the hook for the state being entered.
//!
//! ```text
//!             enter                down
//!   IdleUp ─────────▶ Hover ─────────────▶ Pressed ──── up ───▶ Hover (+ release)
//!     ▲  │ drag-enter   │ move               │  │ move
//!     │  ▼              ▼                    │  ▼
//!     │ IdleDown      Move ◀── move          │ HoverPressed ── up ──▶ Hover (+ release)
//!     │                                      │  │
//!     │                               leave  ▼  ▼ leave
//!     └──────────────── up ─────────────── PressedOut ── enter ──▶ Pressed
//! ```
//!
//! Key-up from any state enters [`WidgetState::KeyUp`] and immediately falls
//! back to [`WidgetState::IdleUp`].

use std::fmt;

use trellis_render::{Point, PrimitiveId};

/// The interaction state a widget currently occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidgetState {
    /// Pointer is elsewhere and no button is held.
    #[default]
    IdleUp,
    /// Pointer is elsewhere while a button is held (a drag crossed the widget).
    IdleDown,
    /// Button went down over the widget.
    Pressed,
    /// Pointer is over the widget with no button held.
    Hover,
    /// Pointer is moving over the widget while pressed.
    HoverPressed,
    /// Pointer left the widget while pressed.
    PressedOut,
    /// Pointer is moving over the widget with no button held.
    Move,
    /// A key was released while the widget had focus.
    KeyUp,
}

impl WidgetState {
    /// All states, in declaration order.
    pub const ALL: [WidgetState; 8] = [
        WidgetState::IdleUp,
        WidgetState::IdleDown,
        WidgetState::Pressed,
        WidgetState::Hover,
        WidgetState::HoverPressed,
        WidgetState::PressedOut,
        WidgetState::Move,
        WidgetState::KeyUp,
    ];

    /// The state a signal leads to, or `None` if the signal is ignored here.
    ///
    /// This function is total: every `(state, signal)` pair has an answer and
    /// nothing here can fail.
    pub fn next(self, signal: &SignalKind) -> Option<WidgetState> {
        use SignalKind as S;
        use WidgetState::*;

        if let S::KeyUp(_) = signal {
            return Some(KeyUp);
        }

        let next = match (self, signal) {
            (IdleUp, S::PointerEnter) => Hover,
            (IdleUp, S::PointerDown) => Pressed,
            (IdleUp, S::DragEnter) => IdleDown,

            (IdleDown, S::PointerLeave) => IdleUp,
            (IdleDown, S::PointerUp) => Hover,

            (Hover, S::PointerLeave) => IdleUp,
            (Hover, S::PointerDown) => Pressed,
            (Hover, S::PointerMove) => Move,

            (Move, S::PointerMove) => Move,
            (Move, S::PointerLeave) => IdleUp,
            (Move, S::PointerDown) => Pressed,

            (Pressed, S::PointerUp) => Hover,
            (Pressed, S::PointerLeave) => PressedOut,
            (Pressed, S::PointerMove) => HoverPressed,

            (HoverPressed, S::PointerMove) => HoverPressed,
            (HoverPressed, S::PointerUp) => Hover,
            (HoverPressed, S::PointerLeave) => PressedOut,

            (PressedOut, S::PointerUp) => IdleUp,
            (PressedOut, S::PointerEnter | S::DragEnter) => Pressed,

            _ => return None,
        };
        Some(next)
    }

    /// Whether leaving this state via `signal` completes a press.
    ///
    /// Only a pointer-up while [`Pressed`](Self::Pressed) or
    /// [`HoverPressed`](Self::HoverPressed) counts. Releasing outside the
    /// widget (from [`PressedOut`](Self::PressedOut)) does not.
    pub fn releases_on(self, signal: &SignalKind) -> bool {
        matches!(self, WidgetState::Pressed | WidgetState::HoverPressed)
            && matches!(signal, SignalKind::PointerUp)
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetState::IdleUp => "idle-up",
            WidgetState::IdleDown => "idle-down",
            WidgetState::Pressed => "pressed",
            WidgetState::Hover => "hover",
            WidgetState::HoverPressed => "hover-pressed",
            WidgetState::PressedOut => "pressed-out",
            WidgetState::Move => "move",
            WidgetState::KeyUp => "key-up",
        }
    }
}

impl fmt::Display for WidgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys a widget can receive on key-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    Space,
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Any printable character.
    Character(char),
}

/// The kind of a raw input signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Pointer entered a hit region.
    PointerEnter,
    /// Pointer left a hit region.
    PointerLeave,
    /// Pointer button pressed over a hit region.
    PointerDown,
    /// Pointer button released.
    PointerUp,
    /// Pointer moved within a hit region.
    PointerMove,
    /// Pointer entered a hit region with a button already held elsewhere.
    DragEnter,
    /// A key was released while the widget had focus.
    KeyUp(Key),
}

impl SignalKind {
    /// Whether this is a pointer signal.
    pub fn is_pointer(&self) -> bool {
        !matches!(self, SignalKind::KeyUp(_))
    }
}

/// A raw input signal delivered to a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSignal {
    /// What happened.
    pub kind: SignalKind,
    /// The hit region the signal arrived on, if known.
    pub target: Option<PrimitiveId>,
    /// Pointer position in window coordinates.
    pub position: Point,
}

impl InputSignal {
    /// Create a signal with no target and a zero position.
    pub fn new(kind: SignalKind) -> Self {
        Self {
            kind,
            target: None,
            position: Point::ZERO,
        }
    }

    /// Shorthand for a key-up signal.
    pub fn key_up(key: Key) -> Self {
        Self::new(SignalKind::KeyUp(key))
    }

    /// Set the hit region the signal arrived on.
    pub fn with_target(mut self, target: PrimitiveId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the pointer position.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// The key, for key-up signals.
    pub fn key(&self) -> Option<Key> {
        match self.kind {
            SignalKind::KeyUp(key) => Some(key),
            _ => None,
        }
    }
}

impl From<SignalKind> for InputSignal {
    fn from(kind: SignalKind) -> Self {
        Self::new(kind)
    }
}

/// A state change, passed to every hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// State before the signal.
    pub from: WidgetState,
    /// State after the signal.
    pub to: WidgetState,
    /// The signal that caused the change.
    pub cause: InputSignal,
}
