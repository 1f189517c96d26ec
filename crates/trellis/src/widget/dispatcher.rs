//! Signal dispatch through the interaction state machine.
//!
//! [`dispatch`] is the only place a widget's interaction state changes. It
//! looks up the next state in [`WidgetState::next`], records the previous
//! state, runs the entry hook for the new state, runs
//! [`press_release_state`](super::Widget::press_release_state) when a press
//! completes, and finally emits [`WidgetBase::state_changed`](super::WidgetBase::state_changed).

use trellis_core::logging::targets;

use super::{InputSignal, Transition, Widget, WidgetState};

/// Feed one signal through a widget's state machine.
///
/// Returns the transition the signal caused, or `None` if the current state
/// ignores it. A key-up produces two transitions (into
/// [`WidgetState::KeyUp`], then back to [`WidgetState::IdleUp`]); the first is
/// returned.
pub fn dispatch(widget: &mut dyn Widget, signal: InputSignal) -> Option<Transition> {
    let id = widget.id();
    let from = widget.state();
    let Some(to) = from.next(&signal.kind) else {
        tracing::trace!(target: targets::STATE, widget = %id, state = %from, signal = ?signal.kind, "signal ignored");
        return None;
    };

    let transition = Transition {
        from,
        to,
        cause: signal,
    };
    apply(widget, &transition);

    if from.releases_on(&signal.kind) {
        tracing::trace!(target: targets::STATE, widget = %id, "press released");
        widget.press_release_state(&transition);
    }
    widget.widget_base().state_changed.emit(transition);

    if to == WidgetState::KeyUp {
        let settle = Transition {
            from: WidgetState::KeyUp,
            to: WidgetState::IdleUp,
            cause: signal,
        };
        apply(widget, &settle);
        widget.widget_base().state_changed.emit(settle);
    }

    Some(transition)
}

fn apply(widget: &mut dyn Widget, transition: &Transition) {
    tracing::trace!(
        target: targets::STATE,
        widget = %widget.id(),
        from = %transition.from,
        to = %transition.to,
        "state transition"
    );
    widget.widget_base_mut().enter_state(transition.to);
    match transition.to {
        WidgetState::IdleUp => widget.idle_up_state(transition),
        WidgetState::IdleDown => widget.idle_down_state(transition),
        WidgetState::Pressed => widget.pressed_state(transition),
        WidgetState::Hover => widget.hover_state(transition),
        WidgetState::HoverPressed => widget.hover_pressed_state(transition),
        WidgetState::PressedOut => widget.pressed_out_state(transition),
        WidgetState::Move => widget.move_state(transition),
        WidgetState::KeyUp => widget.key_up_state(transition),
    }
}
