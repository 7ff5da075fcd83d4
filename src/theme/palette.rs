use ratatui::style::Color;

/// Named colors shared by every theme; field names follow Catppuccin.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub base: Color,
    pub mantle: Color,
    pub crust: Color,
    pub text: Color,
    pub subtext0: Color,
    pub subtext1: Color,
    pub surface0: Color,
    pub surface1: Color,
    pub surface2: Color,
    pub overlay0: Color,
    pub overlay1: Color,
    pub overlay2: Color,
    pub blue: Color,
    pub lavender: Color,
    pub sapphire: Color,
    pub sky: Color,
    pub teal: Color,
    pub green: Color,
    pub yellow: Color,
    pub peach: Color,
    pub maroon: Color,
    pub red: Color,
    pub mauve: Color,
    pub pink: Color,
    pub flamingo: Color,
    pub rosewater: Color,
}

/// Scales the channels of an `Rgb` color by `factor` (0.0 = black).
/// Other `Color` variants pass through.
pub fn dim_color(c: Color, factor: f32) -> Color {
    if let Color::Rgb(r, g, b) = c {
        let scale = |v: u8| (f32::from(v) * factor.clamp(0.0, 1.0)) as u8;
        Color::Rgb(scale(r), scale(g), scale(b))
    } else {
        c
    }
}
