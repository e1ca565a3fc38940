use byteorder::{ByteOrder, LittleEndian};

use crate::{
    constants::{CPAD_NEUTRAL, TOUCH_ACTIVE, TOUCH_IDLE},
    pad_state::DeviceState,
    scaling::{scale_stick, scale_touch},
};

pub const FRAME_LEN: usize = 12;

/// Size of the surface touch coordinates are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub width: u16,
    pub height: u16,
}

/// The three little-endian words of one datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub buttons: u32,
    pub touch: u32,
    pub stick: u32,
}

impl Frame {
    pub fn from_state(st: &DeviceState, window: Extent) -> Self {
        let touch = if st.touch.active {
            let x = scale_touch(st.touch.x, window.width) & 0xFFF;
            let y = scale_touch(st.touch.y, window.height) & 0xFFF;
            x | (y << 12) | TOUCH_ACTIVE
        } else {
            TOUCH_IDLE
        };

        let stick = if st.stick_x == 0 && st.stick_y == 0 {
            CPAD_NEUTRAL
        } else {
            scale_stick(st.stick_x) | (scale_stick(st.stick_y) << 12)
        };

        Self {
            buttons: !st.buttons,
            touch,
            stick,
        }
    }

    pub fn to_bytes(&self) -> [u8; FRAME_LEN] {
        let mut buf = [0u8; FRAME_LEN];
        LittleEndian::write_u32(&mut buf[0..4], self.buttons);
        LittleEndian::write_u32(&mut buf[4..8], self.touch);
        LittleEndian::write_u32(&mut buf[8..12], self.stick);
        buf
    }
}

/// Encode the device state into the outbound payload.
pub fn encode(st: &DeviceState, window: Extent) -> [u8; FRAME_LEN] {
    Frame::from_state(st, window).to_bytes()
}
