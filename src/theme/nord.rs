use super::palette::Palette;
use ratatui::style::Color;

// Polar Night, Snow Storm, Frost and Aurora mapped onto the shared slots.
pub const NORD: Palette = Palette {
    base: Color::Rgb(46, 52, 64),
    mantle: Color::Rgb(59, 66, 82),
    crust: Color::Rgb(36, 41, 51),
    text: Color::Rgb(236, 239, 244),
    subtext0: Color::Rgb(216, 222, 233),
    subtext1: Color::Rgb(229, 233, 240),
    surface0: Color::Rgb(59, 66, 82),
    surface1: Color::Rgb(67, 76, 94),
    surface2: Color::Rgb(76, 86, 106),
    overlay0: Color::Rgb(97, 110, 136),
    overlay1: Color::Rgb(129, 161, 193),
    overlay2: Color::Rgb(143, 188, 187),
    blue: Color::Rgb(136, 192, 208),
    lavender: Color::Rgb(129, 161, 193),
    sapphire: Color::Rgb(94, 129, 172),
    sky: Color::Rgb(143, 188, 187),
    teal: Color::Rgb(143, 188, 187),
    green: Color::Rgb(163, 190, 140),
    yellow: Color::Rgb(235, 203, 139),
    peach: Color::Rgb(208, 135, 112),
    maroon: Color::Rgb(191, 97, 106),
    red: Color::Rgb(191, 97, 106),
    mauve: Color::Rgb(180, 142, 173),
    pink: Color::Rgb(180, 142, 173),
    flamingo: Color::Rgb(208, 135, 112),
    rosewater: Color::Rgb(216, 222, 233),
};
