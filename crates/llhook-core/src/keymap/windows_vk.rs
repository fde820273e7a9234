//! Windows Virtual-Key (VK) code to [`Key`] translation table.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h).
//!
//! `VK_TO_KEY_TABLE` is a compile-time array of 256 [`Key`] values indexed by
//! VK code. Position 0x41 holds `Key::A` because `VK_A` is 0x41. Codes without
//! a named key hold `Key::Unknown(code)`. Every captured key event goes
//! through this table, so the lookup is a single index operation.

use super::key::Key;

/// Translates a Windows Virtual-Key code to a [`Key`].
///
/// Never fails: codes outside the table (or unassigned in it) come back as
/// [`Key::Unknown`] carrying the original code.
pub fn vk_to_key(vk: u32) -> Key {
    VK_TO_KEY_TABLE
        .get(vk as usize)
        .copied()
        .unwrap_or(Key::Unknown(vk))
}

/// Complete VK → Key mapping table indexed by VK code (0x00–0xFF).
/// Reference: https://learn.microsoft.com/windows/win32/inputdev/virtual-key-codes
const VK_TO_KEY_TABLE: [Key; 256] = {
    use Key::*;
    let mut t = [Unknown(0); 256];
    let mut vk = 0;
    while vk < 256 {
        t[vk] = Unknown(vk as u32);
        vk += 1;
    }

    // ── Alphabet keys (VK_A=0x41 … VK_Z=0x5A) ────────────────────────────────
    t[0x41] = A;
    t[0x42] = B;
    t[0x43] = C;
    t[0x44] = D;
    t[0x45] = E;
    t[0x46] = F;
    t[0x47] = G;
    t[0x48] = H;
    t[0x49] = I;
    t[0x4A] = J;
    t[0x4B] = K;
    t[0x4C] = L;
    t[0x4D] = M;
    t[0x4E] = N;
    t[0x4F] = O;
    t[0x50] = P;
    t[0x51] = Q;
    t[0x52] = R;
    t[0x53] = S;
    t[0x54] = T;
    t[0x55] = U;
    t[0x56] = V;
    t[0x57] = W;
    t[0x58] = X;
    t[0x59] = Y;
    t[0x5A] = Z;

    // ── Digit row (VK_0=0x30 … VK_9=0x39) ───────────────────────────────────
    t[0x30] = Digit0;
    t[0x31] = Digit1;
    t[0x32] = Digit2;
    t[0x33] = Digit3;
    t[0x34] = Digit4;
    t[0x35] = Digit5;
    t[0x36] = Digit6;
    t[0x37] = Digit7;
    t[0x38] = Digit8;
    t[0x39] = Digit9;

    // ── Editing and control ──────────────────────────────────────────────────
    t[0x08] = Backspace;    // VK_BACK
    t[0x09] = Tab;          // VK_TAB
    t[0x0C] = Clear;        // VK_CLEAR
    t[0x0D] = Enter;        // VK_RETURN
    t[0x13] = Pause;        // VK_PAUSE
    t[0x14] = CapsLock;     // VK_CAPITAL
    t[0x1B] = Escape;       // VK_ESCAPE
    t[0x20] = Space;        // VK_SPACE
    t[0x21] = PageUp;       // VK_PRIOR
    t[0x22] = PageDown;     // VK_NEXT
    t[0x23] = End;          // VK_END
    t[0x24] = Home;         // VK_HOME
    t[0x25] = Left;
    t[0x26] = Up;
    t[0x27] = Right;
    t[0x28] = Down;
    t[0x29] = Select;       // VK_SELECT
    t[0x2A] = Print;        // VK_PRINT
    t[0x2B] = Execute;      // VK_EXECUTE
    t[0x2C] = PrintScreen;  // VK_SNAPSHOT
    t[0x2D] = Insert;       // VK_INSERT
    t[0x2E] = Delete;       // VK_DELETE
    t[0x2F] = Help;         // VK_HELP
    t[0x5D] = Apps;         // VK_APPS
    t[0x5F] = Sleep;        // VK_SLEEP

    // ── Modifier keys ─────────────────────────────────────────────────────────
    t[0x10] = Shift;        // VK_SHIFT
    t[0x11] = Control;      // VK_CONTROL
    t[0x12] = Alt;          // VK_MENU
    t[0xA0] = LeftShift;    // VK_LSHIFT
    t[0xA1] = RightShift;   // VK_RSHIFT
    t[0xA2] = LeftControl;  // VK_LCONTROL
    t[0xA3] = RightControl; // VK_RCONTROL
    t[0xA4] = LeftAlt;      // VK_LMENU
    t[0xA5] = RightAlt;     // VK_RMENU
    t[0x5B] = LeftWin;      // VK_LWIN
    t[0x5C] = RightWin;     // VK_RWIN

    // ── Numpad (VK_NUMPAD0=0x60 … VK_NUMPAD9=0x69) ───────────────────────────
    t[0x60] = Numpad0;
    t[0x61] = Numpad1;
    t[0x62] = Numpad2;
    t[0x63] = Numpad3;
    t[0x64] = Numpad4;
    t[0x65] = Numpad5;
    t[0x66] = Numpad6;
    t[0x67] = Numpad7;
    t[0x68] = Numpad8;
    t[0x69] = Numpad9;
    t[0x6A] = Multiply;
    t[0x6B] = Add;
    t[0x6C] = Separator;
    t[0x6D] = Subtract;
    t[0x6E] = Decimal;
    t[0x6F] = Divide;
    t[0x90] = NumLock;
    t[0x91] = ScrollLock;

    // ── Function keys (VK_F1=0x70 … VK_F24=0x87) ─────────────────────────────
    t[0x70] = F1;
    t[0x71] = F2;
    t[0x72] = F3;
    t[0x73] = F4;
    t[0x74] = F5;
    t[0x75] = F6;
    t[0x76] = F7;
    t[0x77] = F8;
    t[0x78] = F9;
    t[0x79] = F10;
    t[0x7A] = F11;
    t[0x7B] = F12;
    t[0x7C] = F13;
    t[0x7D] = F14;
    t[0x7E] = F15;
    t[0x7F] = F16;
    t[0x80] = F17;
    t[0x81] = F18;
    t[0x82] = F19;
    t[0x83] = F20;
    t[0x84] = F21;
    t[0x85] = F22;
    t[0x86] = F23;
    t[0x87] = F24;

    // ── Browser and media (0xA6 … 0xB7) ──────────────────────────────────────
    t[0xA6] = BrowserBack;
    t[0xA7] = BrowserForward;
    t[0xA8] = BrowserRefresh;
    t[0xA9] = BrowserStop;
    t[0xAA] = BrowserSearch;
    t[0xAB] = BrowserFavorites;
    t[0xAC] = BrowserHome;
    t[0xAD] = VolumeMute;
    t[0xAE] = VolumeDown;
    t[0xAF] = VolumeUp;
    t[0xB0] = MediaNextTrack;
    t[0xB1] = MediaPrevTrack;
    t[0xB2] = MediaStop;
    t[0xB3] = MediaPlayPause;
    t[0xB4] = LaunchMail;
    t[0xB5] = LaunchMediaSelect;
    t[0xB6] = LaunchApp1;
    t[0xB7] = LaunchApp2;

    // ── Punctuation / symbols ─────────────────────────────────────────────────
    t[0xBA] = Semicolon;    // VK_OEM_1      (; :)
    t[0xBB] = Equal;        // VK_OEM_PLUS   (= +)
    t[0xBC] = Comma;        // VK_OEM_COMMA  (, <)
    t[0xBD] = Minus;        // VK_OEM_MINUS  (- _)
    t[0xBE] = Period;       // VK_OEM_PERIOD (. >)
    t[0xBF] = Slash;        // VK_OEM_2      (/ ?)
    t[0xC0] = Backquote;    // VK_OEM_3      (` ~)
    t[0xDB] = BracketLeft;  // VK_OEM_4      ([ {)
    t[0xDC] = Backslash;    // VK_OEM_5      (\ |)
    t[0xDD] = BracketRight; // VK_OEM_6      (] })
    t[0xDE] = Quote;        // VK_OEM_7      (' ")
    t[0xDF] = Oem8;         // VK_OEM_8
    t[0xE2] = Oem102;       // VK_OEM_102    (< > on ISO keyboards)

    t
};
