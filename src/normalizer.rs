use crate::{
    binding::{Binding, BindingTable, DeviceKind},
    event::RawEvent,
    pad_state::DeviceState,
    scaling::apply_deadzone,
};

/// Apply one raw event to the device state through the binding table.
///
/// Events that match no binding are ignored.
pub fn normalize(
    event: &RawEvent,
    bindings: &BindingTable,
    state: &mut DeviceState,
    deadzone: i16,
) {
    match *event {
        RawEvent::KeyDown(code) | RawEvent::KeyUp(code) => {
            let pressed = i32::from(matches!(event, RawEvent::KeyDown(_)));
            for (button, binding) in bindings.iter(DeviceKind::Keyboard) {
                if binding == Binding::Key(code) {
                    state.set(button, pressed);
                }
            }
        }
        RawEvent::JoyAxis { axis, value } => {
            let v = apply_deadzone(value, deadzone);
            let magnitude = i32::from(v).abs();
            for (button, binding) in bindings.iter(DeviceKind::Joypad) {
                if let Binding::Axis { axis: a, invert } = binding {
                    // A centered axis releases both halves.
                    if a == axis && (v == 0 || invert == (v < 0)) {
                        state.set(button, magnitude);
                    }
                }
            }
        }
        RawEvent::JoyButtonDown(index) | RawEvent::JoyButtonUp(index) => {
            let pressed = i32::from(matches!(event, RawEvent::JoyButtonDown(_)));
            for (button, binding) in bindings.iter(DeviceKind::Joypad) {
                if binding == Binding::Button(index) {
                    state.set(button, pressed);
                }
            }
        }
        RawEvent::JoyHat(value) => {
            for (button, binding) in bindings.iter(DeviceKind::Joypad) {
                if let Binding::Hat(mask) = binding {
                    state.set(button, i32::from(value & mask != 0));
                }
            }
        }
        RawEvent::MouseDown { x, y } => state.touch_down(x, y),
        RawEvent::MouseMove { x, y } => state.touch_move(x, y),
        RawEvent::MouseUp => state.touch_up(),
        RawEvent::Quit => {}
    }
}
