// Network
pub const TARGET_PORT: u16 = 4950;

// Circle pad fixed point
pub const CPAD_BOUND: i32 = 0x5D0;
pub const CPAD_CENTER: i32 = 0x800;
pub const CPAD_NEUTRAL: u32 = 0x0080_0800;

// Touch panel fixed point
pub const TOUCH_RANGE: u32 = 4096;
pub const TOUCH_ACTIVE: u32 = 1 << 24;
pub const TOUCH_IDLE: u32 = 0x0200_0000;

// Full-scale stick magnitude for digital presses
pub const STICK_FULL_SCALE: i32 = 32767;

// Analog thresholds
pub const JOY_DEADZONE: i16 = 1700;
pub const CAPTURE_DEADZONE_FACTOR: i32 = 4;

// Default window / touch surface
pub const DEFAULT_WINDOW_WIDTH: u16 = 640;
pub const DEFAULT_WINDOW_HEIGHT: u16 = 480;

// HID button masks
pub mod hid_bits {
    pub const A: u32 = 1 << 0;
    pub const B: u32 = 1 << 1;
    pub const SELECT: u32 = 1 << 2;
    pub const START: u32 = 1 << 3;
    pub const DRIGHT: u32 = 1 << 4;
    pub const DLEFT: u32 = 1 << 5;
    pub const DUP: u32 = 1 << 6;
    pub const DDOWN: u32 = 1 << 7;
    pub const R: u32 = 1 << 8;
    pub const L: u32 = 1 << 9;
    pub const X: u32 = 1 << 10;
    pub const Y: u32 = 1 << 11;
    pub const ZL: u32 = 1 << 14;
    pub const ZR: u32 = 1 << 15;
    pub const CSTICK_RIGHT: u32 = 1 << 24;
    pub const CSTICK_LEFT: u32 = 1 << 25;
    pub const CSTICK_UP: u32 = 1 << 26;
    pub const CSTICK_DOWN: u32 = 1 << 27;
}

// Joypad hat bits
pub mod hat_bits {
    pub const UP: u8 = 0x01;
    pub const RIGHT: u8 = 0x02;
    pub const DOWN: u8 = 0x04;
    pub const LEFT: u8 = 0x08;
}
