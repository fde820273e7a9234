//! Semantic key identifiers.
//!
//! A [`Key`] names a *logical* key the way Windows reports it through its
//! Virtual-Key codes: `VK_A` is always [`Key::A`], whatever the physical
//! layout of the keyboard. Keys the translation table does not know keep their
//! raw code in [`Key::Unknown`] so that two different unmapped keys never
//! collapse into one entry of the pressed-key set.

use std::fmt;

use serde::{Serialize, Serializer};

/// Logical key reported by a low-level keyboard hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Digit row
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    // Editing and control
    Backspace,
    Tab,
    Clear,
    Enter,
    Pause,
    CapsLock,
    Escape,
    Space,
    PageUp,
    PageDown,
    End,
    Home,
    Left,
    Up,
    Right,
    Down,
    Select,
    Print,
    Execute,
    PrintScreen,
    Insert,
    Delete,
    Help,
    Apps,
    Sleep,

    // Modifiers. The side-less variants are what `keybd_event` style
    // injectors report; physical keyboards report the sided ones.
    Shift,
    Control,
    Alt,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftWin,
    RightWin,

    // Numeric keypad
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    Multiply,
    Add,
    Separator,
    Subtract,
    Decimal,
    Divide,
    NumLock,
    ScrollLock,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,

    // Browser and media
    BrowserBack,
    BrowserForward,
    BrowserRefresh,
    BrowserStop,
    BrowserSearch,
    BrowserFavorites,
    BrowserHome,
    VolumeMute,
    VolumeDown,
    VolumeUp,
    MediaNextTrack,
    MediaPrevTrack,
    MediaStop,
    MediaPlayPause,
    LaunchMail,
    LaunchMediaSelect,
    LaunchApp1,
    LaunchApp2,

    // OEM punctuation (US layout legends)
    Semicolon,
    Equal,
    Comma,
    Minus,
    Period,
    Slash,
    Backquote,
    BracketLeft,
    Backslash,
    BracketRight,
    Quote,
    Oem8,
    Oem102,

    /// A Virtual-Key code with no entry in the translation table.
    Unknown(u32),
}

impl Key {
    /// Returns the display name of a mapped key, or `None` for [`Key::Unknown`].
    pub fn name(self) -> Option<&'static str> {
        use Key::*;
        let name = match self {
            A => "A",
            B => "B",
            C => "C",
            D => "D",
            E => "E",
            F => "F",
            G => "G",
            H => "H",
            I => "I",
            J => "J",
            K => "K",
            L => "L",
            M => "M",
            N => "N",
            O => "O",
            P => "P",
            Q => "Q",
            R => "R",
            S => "S",
            T => "T",
            U => "U",
            V => "V",
            W => "W",
            X => "X",
            Y => "Y",
            Z => "Z",
            Digit0 => "0",
            Digit1 => "1",
            Digit2 => "2",
            Digit3 => "3",
            Digit4 => "4",
            Digit5 => "5",
            Digit6 => "6",
            Digit7 => "7",
            Digit8 => "8",
            Digit9 => "9",
            Backspace => "Backspace",
            Tab => "Tab",
            Clear => "Clear",
            Enter => "Enter",
            Pause => "Pause",
            CapsLock => "CapsLock",
            Escape => "Escape",
            Space => "Space",
            PageUp => "PageUp",
            PageDown => "PageDown",
            End => "End",
            Home => "Home",
            Left => "Left",
            Up => "Up",
            Right => "Right",
            Down => "Down",
            Select => "Select",
            Print => "Print",
            Execute => "Execute",
            PrintScreen => "PrintScreen",
            Insert => "Insert",
            Delete => "Delete",
            Help => "Help",
            Apps => "Apps",
            Sleep => "Sleep",
            Shift => "Shift",
            Control => "Control",
            Alt => "Alt",
            LeftShift => "LShift",
            RightShift => "RShift",
            LeftControl => "LControl",
            RightControl => "RControl",
            LeftAlt => "LAlt",
            RightAlt => "RAlt",
            LeftWin => "LWin",
            RightWin => "RWin",
            Numpad0 => "Numpad0",
            Numpad1 => "Numpad1",
            Numpad2 => "Numpad2",
            Numpad3 => "Numpad3",
            Numpad4 => "Numpad4",
            Numpad5 => "Numpad5",
            Numpad6 => "Numpad6",
            Numpad7 => "Numpad7",
            Numpad8 => "Numpad8",
            Numpad9 => "Numpad9",
            Multiply => "Multiply",
            Add => "Add",
            Separator => "Separator",
            Subtract => "Subtract",
            Decimal => "Decimal",
            Divide => "Divide",
            NumLock => "NumLock",
            ScrollLock => "ScrollLock",
            F1 => "F1",
            F2 => "F2",
            F3 => "F3",
            F4 => "F4",
            F5 => "F5",
            F6 => "F6",
            F7 => "F7",
            F8 => "F8",
            F9 => "F9",
            F10 => "F10",
            F11 => "F11",
            F12 => "F12",
            F13 => "F13",
            F14 => "F14",
            F15 => "F15",
            F16 => "F16",
            F17 => "F17",
            F18 => "F18",
            F19 => "F19",
            F20 => "F20",
            F21 => "F21",
            F22 => "F22",
            F23 => "F23",
            F24 => "F24",
            BrowserBack => "BrowserBack",
            BrowserForward => "BrowserForward",
            BrowserRefresh => "BrowserRefresh",
            BrowserStop => "BrowserStop",
            BrowserSearch => "BrowserSearch",
            BrowserFavorites => "BrowserFavorites",
            BrowserHome => "BrowserHome",
            VolumeMute => "VolumeMute",
            VolumeDown => "VolumeDown",
            VolumeUp => "VolumeUp",
            MediaNextTrack => "MediaNextTrack",
            MediaPrevTrack => "MediaPrevTrack",
            MediaStop => "MediaStop",
            MediaPlayPause => "MediaPlayPause",
            LaunchMail => "LaunchMail",
            LaunchMediaSelect => "LaunchMediaSelect",
            LaunchApp1 => "LaunchApp1",
            LaunchApp2 => "LaunchApp2",
            Semicolon => "Semicolon",
            Equal => "Equal",
            Comma => "Comma",
            Minus => "Minus",
            Period => "Period",
            Slash => "Slash",
            Backquote => "Backquote",
            BracketLeft => "BracketLeft",
            Backslash => "Backslash",
            BracketRight => "BracketRight",
            Quote => "Quote",
            Oem8 => "Oem8",
            Oem102 => "Oem102",
            Unknown(_) => return None,
        };
        Some(name)
    }

    /// Returns `true` for any of the Control keys.
    pub fn is_control(self) -> bool {
        matches!(self, Key::Control | Key::LeftControl | Key::RightControl)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Unknown(code) => write!(f, "VK_0x{code:02X}"),
            key => f.write_str(key.name().unwrap_or_default()),
        }
    }
}

// Keys travel as their display name so JSON consumers see `"LShift"` rather
// than an enum tag.
impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
