//! Emotion / zone classifier.
//!
//! A mood log carries two 1-7 ratings: `impact` (how strong or lasting the
//! event felt) and `pleasantness`. Every `(impact, pleasantness)` cell maps
//! to a hand-authored emotion label and a color-coded zone. The grid is not
//! derivable from a formula, so it lives here verbatim and every other
//! module reads it through [`classify`] or the presentation helpers.

use serde::{Deserialize, Serialize};
use std::fmt;

use self::Zone::{Blue, Brown, DarkRed, Green, LightRed, Yellow};

/// Gray used when an emotion or zone is not in the tables.
pub const NEUTRAL_COLOR: &str = "#6b7280";

/// Icon used when an emotion is not in the table.
pub const NEUTRAL_ICON: &str = "😐";

/// Label returned for ratings outside the grid.
pub const UNKNOWN_EMOTION: &str = "Unknown";

pub const MIN_RATING: i32 = 1;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "mood_zone")]
pub enum Zone {
    Green,
    Yellow,
    Brown,
    #[sqlx(rename = "Light Red")]
    #[serde(rename = "Light Red", alias = "LightRed")]
    LightRed,
    #[sqlx(rename = "Dark Red")]
    #[serde(rename = "Dark Red", alias = "DarkRed")]
    DarkRed,
    Blue,
}

impl Zone {
    /// Canonical order. Statistics iterate zones in this order.
    pub const ALL: [Zone; 6] = [
        Zone::Green,
        Zone::Yellow,
        Zone::Brown,
        Zone::LightRed,
        Zone::DarkRed,
        Zone::Blue,
    ];

    /// Display / storage label, e.g. `"Light Red"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Green => "Green",
            Zone::Yellow => "Yellow",
            Zone::Brown => "Brown",
            Zone::LightRed => "Light Red",
            Zone::DarkRed => "Dark Red",
            Zone::Blue => "Blue",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Zone::Green => "#22c55e",
            Zone::Yellow => "#eab308",
            Zone::Brown => "#92400e",
            Zone::LightRed => "#f87171",
            Zone::DarkRed => "#b91c1c",
            Zone::Blue => "#3b82f6",
        }
    }

    /// Accepts both the display label (`"Dark Red"`) and the identifier
    /// form (`"DarkRed"`).
    pub fn from_name(name: &str) -> Option<Zone> {
        match name {
            "Green" => Some(Zone::Green),
            "Yellow" => Some(Zone::Yellow),
            "Brown" => Some(Zone::Brown),
            "Light Red" | "LightRed" => Some(Zone::LightRed),
            "Dark Red" | "DarkRed" => Some(Zone::DarkRed),
            "Blue" => Some(Zone::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cell of the grid, with its presentation attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmotionCell {
    pub name: &'static str,
    pub zone: Zone,
    pub color: &'static str,
    pub icon: &'static str,
}

const fn cell(name: &'static str, zone: Zone, color: &'static str, icon: &'static str) -> EmotionCell {
    EmotionCell {
        name,
        zone,
        color,
        icon,
    }
}

/// Row = impact - 1, column = pleasantness - 1.
pub static EMOTION_GRID: [[EmotionCell; 7]; 7] = [
    [
        cell("Depressed", LightRed, "#fca5a5", "😞"),
        cell("Discouraged", LightRed, "#f87171", "😔"),
        cell("Exhausted", Brown, "#a16207", "😩"),
        cell("Uneasy", Yellow, "#fde047", "😕"),
        cell("Relaxed", Green, "#86efac", "😌"),
        cell("Comfortable", Green, "#4ade80", "🙂"),
        cell("Serene", Green, "#22c55e", "🧘"),
    ],
    [
        cell("Lonely", LightRed, "#fecaca", "🥺"),
        cell("Miserable", LightRed, "#ef4444", "😢"),
        cell("Tired", Brown, "#92400e", "😴"),
        cell("Bored", Yellow, "#facc15", "😑"),
        cell("Thoughtful", Green, "#6ee7b7", "🤔"),
        cell("Hopeful", Green, "#34d399", "🤞"),
        cell("Carefree", Green, "#10b981", "😎"),
    ],
    [
        cell("Frightened", LightRed, "#fb7185", "😨"),
        cell("Worried", LightRed, "#f43f5e", "😟"),
        cell("Concerned", Brown, "#b45309", "🫤"),
        cell("Complacent", Yellow, "#eab308", "😶"),
        cell("Focused", Green, "#059669", "🎯"),
        cell("Peaceful", Green, "#16a34a", "🕊️"),
        cell("Touched", Green, "#15803d", "🥹"),
    ],
    [
        cell("Disgusted", DarkRed, "#991b1b", "🤢"),
        cell("Angry", DarkRed, "#b91c1c", "😠"),
        cell("Disappointed", Brown, "#78350f", "😒"),
        cell("Satisfied", Yellow, "#ca8a04", "😊"),
        cell("Optimistic", Blue, "#93c5fd", "🌤️"),
        cell("Joyful", Blue, "#60a5fa", "😄"),
        cell("Grateful", Blue, "#3b82f6", "🙏"),
    ],
    [
        cell("Fuming", DarkRed, "#7f1d1d", "😤"),
        cell("Frustrated", DarkRed, "#dc2626", "😣"),
        cell("Irritated", Brown, "#854d0e", "🙄"),
        cell("Energized", Yellow, "#fbbf24", "⚡"),
        cell("Cheerful", Blue, "#38bdf8", "😁"),
        cell("Proud", Blue, "#2563eb", "🏆"),
        cell("Blissful", Blue, "#1d4ed8", "🥰"),
    ],
    [
        cell("Furious", DarkRed, "#450a0a", "😡"),
        cell("Nervous", DarkRed, "#e11d48", "😬"),
        cell("Restless", Brown, "#713f12", "😖"),
        cell("Lively", Yellow, "#f59e0b", "💃"),
        cell("Enthusiastic", Blue, "#0ea5e9", "🤩"),
        cell("Motivated", Blue, "#0284c7", "💪"),
        cell("Thrilled", Blue, "#0369a1", "🎉"),
    ],
    [
        cell("Enraged", DarkRed, "#3f0a0a", "🤬"),
        cell("Panicked", DarkRed, "#be123c", "😱"),
        cell("Shocked", Brown, "#5c2d0c", "😲"),
        cell("Hyper", Yellow, "#d97706", "🤪"),
        cell("Surprised", Blue, "#7dd3fc", "😮"),
        cell("Inspired", Blue, "#1e40af", "✨"),
        cell("Exhilarated", Blue, "#1e3a8a", "🚀"),
    ],
];

/// Derived pair stored on every mood log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub emotion: &'static str,
    pub zone: Zone,
}

impl Classification {
    pub const FALLBACK: Classification = Classification {
        emotion: UNKNOWN_EMOTION,
        zone: Zone::Yellow,
    };

    pub fn is_known(&self) -> bool {
        self.emotion != UNKNOWN_EMOTION
    }
}

/// Grid cell for a rating pair, `None` when either rating is off the grid.
pub fn lookup(impact: i32, pleasantness: i32) -> Option<&'static EmotionCell> {
    let row = usize::try_from(impact.checked_sub(MIN_RATING)?).ok()?;
    let col = usize::try_from(pleasantness.checked_sub(MIN_RATING)?).ok()?;
    EMOTION_GRID.get(row)?.get(col)
}

/// Map a rating pair to its emotion and zone.
///
/// Ratings outside 1-7 yield [`Classification::FALLBACK`] (`"Unknown"`,
/// Yellow) instead of an error so rendering code never has to branch.
pub fn classify(impact: i32, pleasantness: i32) -> Classification {
    lookup(impact, pleasantness)
        .map(|cell| Classification {
            emotion: cell.name,
            zone: cell.zone,
        })
        .unwrap_or(Classification::FALLBACK)
}

/// All 49 cells with their coordinates, impact-major.
pub fn catalog() -> impl Iterator<Item = (i32, i32, &'static EmotionCell)> {
    EMOTION_GRID.iter().zip(MIN_RATING..).flat_map(|(row, impact)| {
        row.iter()
            .zip(MIN_RATING..)
            .map(move |(cell, pleasantness)| (impact, pleasantness, cell))
    })
}

fn find_emotion(name: &str) -> Option<&'static EmotionCell> {
    EMOTION_GRID.iter().flatten().find(|cell| cell.name == name)
}

pub fn emotion_color(name: &str) -> &'static str {
    find_emotion(name).map_or(NEUTRAL_COLOR, |cell| cell.color)
}

pub fn zone_color(name: &str) -> &'static str {
    Zone::from_name(name).map_or(NEUTRAL_COLOR, Zone::color)
}

pub fn emotion_icon(name: &str) -> &'static str {
    find_emotion(name).map_or(NEUTRAL_ICON, |cell| cell.icon)
}
