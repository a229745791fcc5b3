use alloc::format;
use alloc::string::String;
use core::fmt;

/// English ordinal number: `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ordinal(pub u32);

impl Ordinal {
    pub const fn suffix(self) -> &'static str {
        if matches!(self.0 % 100, 11..=13) {
            return "th";
        }
        match self.0 % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.suffix())
    }
}

/// Attempt counter label shown under the grid, e.g. `2nd try`.
pub fn try_label(attempt: u32) -> String {
    format!("{} try", Ordinal(attempt))
}
