pub const SEP_RIGHT: &str = "\u{e0b0}";
pub const SEARCH: &str = "\u{f002}";
pub const USER: &str = "\u{f007}";
pub const ACTIVE: &str = "\u{25b8}";
pub const ERROR: &str = "\u{f071}";

pub const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

#[must_use]
pub fn spinner(frame: u64) -> &'static str {
    SPINNER[(frame % SPINNER.len() as u64) as usize]
}
