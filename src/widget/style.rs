//! Per-region appearance as a pure function of selection and visibility.

use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(0x3b, 0x82, 0xf6);
pub const HOVER: Color = Color::Rgb(0x60, 0xa5, 0xfa);
pub const MUTED: Color = Color::Rgb(0x2a, 0x43, 0x65);
pub const BORDER: Color = Color::Rgb(0x1a, 0x20, 0x2c);
pub const BACKGROUND: Color = Color::Rgb(17, 24, 39);

/// How a region looks in one interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub fill: Color,
    /// `None` means no border is drawn.
    pub stroke: Option<Color>,
    /// Hidden regions are not drawn at all.
    pub opaque: bool,
    /// Whether the region reacts to hover and click.
    pub interactive: bool,
}

/// Appearance in each of the three interaction states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStyle {
    pub default: Appearance,
    pub hover: Appearance,
    pub pressed: Appearance,
}

/// Interaction state of a region for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Idle,
    Hovered,
    Pressed,
}

impl RegionStyle {
    pub fn for_interaction(&self, interaction: Interaction) -> Appearance {
        match interaction {
            Interaction::Idle => self.default,
            Interaction::Hovered => self.hover,
            Interaction::Pressed => self.pressed,
        }
    }
}

pub fn region_style(is_selected: bool, show_unselected: bool) -> RegionStyle {
    let visible = is_selected || show_unselected;
    let stroke = show_unselected.then_some(BORDER);

    let default_fill = if is_selected {
        ACCENT
    } else if show_unselected {
        MUTED
    } else {
        BACKGROUND
    };

    let default = Appearance {
        fill: default_fill,
        stroke,
        opaque: visible,
        interactive: visible,
    };
    let hover = Appearance {
        fill: if visible { HOVER } else { BACKGROUND },
        ..default
    };
    let pressed = Appearance {
        fill: ACCENT,
        ..default
    };

    RegionStyle {
        default,
        hover,
        pressed,
    }
}
