//! Text style flags.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of text style flags.
///
/// Flags combine with `|`:
///
/// ```
/// use horizon_lattice_text::text::TextStyle;
///
/// let style = TextStyle::BOLD | TextStyle::UNDERLINE;
/// assert!(style.contains(TextStyle::BOLD));
/// assert!(!style.contains(TextStyle::ITALIC));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextStyle(u8);

impl TextStyle {
    /// No decoration, regular weight, upright.
    pub const REGULAR: Self = Self(0);
    /// Bold glyphs.
    pub const BOLD: Self = Self(1 << 0);
    /// Sheared glyphs.
    pub const ITALIC: Self = Self(1 << 1);
    /// A line under the text.
    pub const UNDERLINE: Self = Self(1 << 2);
    /// A line through the text.
    pub const STRIKE_THROUGH: Self = Self(1 << 3);

    const ALL: u8 = 0b1111;

    /// Create a style from raw bits, ignoring unknown ones.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    /// Get the raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check if no flag is set.
    pub const fn is_regular(self) -> bool {
        self.0 == 0
    }

    /// Set the flags in `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clear the flags in `other`.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for TextStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TextStyle {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for TextStyle {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_regular() {
            return f.write_str("TextStyle(REGULAR)");
        }
        let names = [
            (Self::BOLD, "BOLD"),
            (Self::ITALIC, "ITALIC"),
            (Self::UNDERLINE, "UNDERLINE"),
            (Self::STRIKE_THROUGH, "STRIKE_THROUGH"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "TextStyle({})", set.join(" | "))
    }
}
