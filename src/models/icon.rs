use serde::{Deserialize, Serialize};

/// Icons the presentation layer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoodIcon {
    Sun,
    Cloud,
    CloudRain,
    Flame,
    Leaf,
    Sparkles,
    Zap,
    Heart,
    Star,
    Moon,
    Smile,
    Frown,
    Coffee,
    Music,
    Circle,
}

impl MoodIcon {
    pub const ALL: [MoodIcon; 15] = [
        MoodIcon::Sun,
        MoodIcon::Cloud,
        MoodIcon::CloudRain,
        MoodIcon::Flame,
        MoodIcon::Leaf,
        MoodIcon::Sparkles,
        MoodIcon::Zap,
        MoodIcon::Heart,
        MoodIcon::Star,
        MoodIcon::Moon,
        MoodIcon::Smile,
        MoodIcon::Frown,
        MoodIcon::Coffee,
        MoodIcon::Music,
        MoodIcon::Circle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MoodIcon::Sun => "Sun",
            MoodIcon::Cloud => "Cloud",
            MoodIcon::CloudRain => "CloudRain",
            MoodIcon::Flame => "Flame",
            MoodIcon::Leaf => "Leaf",
            MoodIcon::Sparkles => "Sparkles",
            MoodIcon::Zap => "Zap",
            MoodIcon::Heart => "Heart",
            MoodIcon::Star => "Star",
            MoodIcon::Moon => "Moon",
            MoodIcon::Smile => "Smile",
            MoodIcon::Frown => "Frown",
            MoodIcon::Coffee => "Coffee",
            MoodIcon::Music => "Music",
            MoodIcon::Circle => "Circle",
        }
    }
}

/// Result of looking up an icon name in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconHandle {
    Registered(MoodIcon),
    /// The name is unknown (or empty); draw the default glyph.
    Fallback,
}

impl IconHandle {
    pub const DEFAULT_ICON: MoodIcon = MoodIcon::Circle;

    pub fn icon(self) -> MoodIcon {
        match self {
            IconHandle::Registered(icon) => icon,
            IconHandle::Fallback => Self::DEFAULT_ICON,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, IconHandle::Fallback)
    }
}

/// Looks an icon name up in the registry. Names are matched exactly.
///
/// This is the only place where an unknown icon is mapped to the default.
pub fn resolve_icon(name: &str) -> IconHandle {
    MoodIcon::ALL
        .into_iter()
        .find(|icon| icon.name() == name)
        .map_or(IconHandle::Fallback, IconHandle::Registered)
}
