use crate::{
    binding::{ButtonRole, LogicalButton, StickDirection},
    constants::STICK_FULL_SCALE,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touch {
    pub active: bool,
    pub x: u16,
    pub y: u16,
}

/// Canonical console-side input state.
///
/// `buttons` is active-low: a cleared bit means pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceState {
    pub stick_x: i16,
    pub stick_y: i16,
    pub buttons: u32,
    pub touch: Touch,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceState {
    pub fn new() -> Self {
        Self {
            stick_x: 0,
            stick_y: 0,
            buttons: u32::MAX,
            touch: Touch::default(),
        }
    }

    /// Drive one logical button.
    ///
    /// Mask buttons are pressed by any non-zero `value`. Stick directions treat 0 and 1 as a
    /// digital release/press at full scale and use any other value as the magnitude itself.
    pub fn set(&mut self, button: LogicalButton, value: i32) {
        match button.role() {
            ButtonRole::Mask(mask) => {
                if value != 0 {
                    self.buttons &= !mask;
                } else {
                    self.buttons |= mask;
                }
            }
            ButtonRole::Stick(dir) => {
                let magnitude = if value == 0 || value == 1 {
                    STICK_FULL_SCALE * value
                } else {
                    value
                };
                match dir {
                    StickDirection::Up => self.stick_y = to_component(magnitude),
                    StickDirection::Down => self.stick_y = to_component(-magnitude),
                    StickDirection::Left => self.stick_x = to_component(-magnitude),
                    StickDirection::Right => self.stick_x = to_component(magnitude),
                }
            }
        }
    }

    pub fn is_pressed(&self, button: LogicalButton) -> bool {
        match button.role() {
            ButtonRole::Mask(mask) => self.buttons & mask == 0,
            ButtonRole::Stick(StickDirection::Up) => self.stick_y > 0,
            ButtonRole::Stick(StickDirection::Down) => self.stick_y < 0,
            ButtonRole::Stick(StickDirection::Left) => self.stick_x < 0,
            ButtonRole::Stick(StickDirection::Right) => self.stick_x > 0,
        }
    }

    pub fn touch_down(&mut self, x: u16, y: u16) {
        self.touch = Touch { active: true, x, y };
    }

    pub fn touch_move(&mut self, x: u16, y: u16) {
        if self.touch.active {
            self.touch.x = x;
            self.touch.y = y;
        }
    }

    pub fn touch_up(&mut self) {
        self.touch = Touch::default();
    }
}

#[inline]
fn to_component(v: i32) -> i16 {
    v.clamp(-STICK_FULL_SCALE, STICK_FULL_SCALE) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::hid_bits;

    #[test]
    fn starts_neutral() {
        let st = DeviceState::new();
        assert_eq!((st.stick_x, st.stick_y), (0, 0));
        assert_eq!(st.buttons, u32::MAX);
        assert!(!st.touch.active);
    }

    #[test]
    fn mask_button_clears_bit_while_pressed() {
        let mut st = DeviceState::new();
        st.set(LogicalButton::B, 1);
        assert_eq!(st.buttons, !hid_bits::B);
        assert!(st.is_pressed(LogicalButton::B));
        st.set(LogicalButton::B, 0);
        assert_eq!(st.buttons, u32::MAX);
    }

    #[test]
    fn analog_magnitude_presses_mask_button() {
        let mut st = DeviceState::new();
        st.set(LogicalButton::ZL, 12000);
        assert!(st.is_pressed(LogicalButton::ZL));
    }

    #[test]
    fn digital_stick_uses_full_scale() {
        let mut st = DeviceState::new();
        st.set(LogicalButton::CircleUp, 1);
        assert_eq!(st.stick_y, 32767);
        st.set(LogicalButton::CircleDown, 1);
        assert_eq!(st.stick_y, -32767);
        st.set(LogicalButton::CircleLeft, 1);
        assert_eq!(st.stick_x, -32767);
        st.set(LogicalButton::CircleLeft, 0);
        assert_eq!(st.stick_x, 0);
    }

    #[test]
    fn analog_stick_feeds_through() {
        let mut st = DeviceState::new();
        st.set(LogicalButton::CircleRight, 16384);
        assert_eq!(st.stick_x, 16384);
        st.set(LogicalButton::CircleDown, 5000);
        assert_eq!(st.stick_y, -5000);
    }

    #[test]
    fn touch_move_requires_active_touch() {
        let mut st = DeviceState::new();
        st.touch_move(10, 10);
        assert_eq!(st.touch, Touch::default());

        st.touch_down(5, 6);
        st.touch_move(7, 8);
        assert_eq!(
            st.touch,
            Touch {
                active: true,
                x: 7,
                y: 8
            }
        );

        st.touch_up();
        assert_eq!(st.touch, Touch::default());
    }
}
