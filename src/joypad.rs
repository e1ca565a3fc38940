//! gilrs adapter: turns gamepad events into [`RawEvent`]s.
//!
//! Axes and buttons get stable small indices so stored bindings survive reconnects. The D-pad
//! is reported as a hat.

use gilrs::{Axis, Button, EventType};

use crate::{constants::hat_bits, event::RawEvent};

pub fn axis_index(axis: Axis) -> Option<u8> {
    match axis {
        Axis::LeftStickX => Some(0),
        Axis::LeftStickY => Some(1),
        Axis::LeftZ => Some(2),
        Axis::RightStickX => Some(3),
        Axis::RightStickY => Some(4),
        Axis::RightZ => Some(5),
        Axis::DPadX => Some(6),
        Axis::DPadY => Some(7),
        _ => None,
    }
}

pub fn button_index(button: Button) -> Option<u8> {
    match button {
        Button::South => Some(0),
        Button::East => Some(1),
        Button::West => Some(2),
        Button::North => Some(3),
        Button::LeftTrigger => Some(4),
        Button::RightTrigger => Some(5),
        Button::LeftTrigger2 => Some(6),
        Button::RightTrigger2 => Some(7),
        Button::Select => Some(8),
        Button::Start => Some(9),
        Button::Mode => Some(10),
        Button::LeftThumb => Some(11),
        Button::RightThumb => Some(12),
        Button::C => Some(13),
        Button::Z => Some(14),
        _ => None,
    }
}

fn hat_bit(button: Button) -> Option<u8> {
    match button {
        Button::DPadUp => Some(hat_bits::UP),
        Button::DPadRight => Some(hat_bits::RIGHT),
        Button::DPadDown => Some(hat_bits::DOWN),
        Button::DPadLeft => Some(hat_bits::LEFT),
        _ => None,
    }
}

/// gilrs reports axes in `[-1, 1]`.
#[inline]
pub fn axis_value(value: f32) -> i16 {
    (value.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

/// Per-gamepad translation state.
#[derive(Debug, Default)]
pub struct JoypadTranslator {
    hat: u8,
}

impl JoypadTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: EventType) -> Option<RawEvent> {
        match event {
            EventType::AxisChanged(axis, value, _) => Self::axis_event(axis, value),
            EventType::ButtonPressed(button, _) => self.button_event(button, true),
            EventType::ButtonReleased(button, _) => self.button_event(button, false),
            EventType::Disconnected => {
                self.hat = 0;
                None
            }
            _ => None,
        }
    }

    pub fn axis_event(axis: Axis, value: f32) -> Option<RawEvent> {
        axis_index(axis).map(|axis| RawEvent::JoyAxis {
            axis,
            value: axis_value(value),
        })
    }

    pub fn button_event(&mut self, button: Button, pressed: bool) -> Option<RawEvent> {
        if let Some(bit) = hat_bit(button) {
            if pressed {
                self.hat |= bit;
            } else {
                self.hat &= !bit;
            }
            return Some(RawEvent::JoyHat(self.hat));
        }
        button_index(button).map(|index| {
            if pressed {
                RawEvent::JoyButtonDown(index)
            } else {
                RawEvent::JoyButtonUp(index)
            }
        })
    }
}
