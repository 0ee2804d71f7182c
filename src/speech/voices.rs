//! Fixed in-process voice catalog.
//!
//! The synthesis backend accepts a voice id with every request; the set of
//! usable voices is a small fixed list, not a remote catalog lookup.

use serde::Serialize;

/// One selectable voice: backend id plus display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Voice {
    pub id: &'static str,
    pub name: &'static str,
}

/// The three voices offered to the user.
pub const VOICES: [Voice; 3] = [
    Voice {
        id: "EXAVITQu4vr4xnSDxMaL",
        name: "Sarah",
    },
    Voice {
        id: "TX3LPaxmHKxFdv7VOQHJ",
        name: "Liam",
    },
    Voice {
        id: "pFZP5JQG7iQjIQuC4Bku",
        name: "Lily",
    },
];

/// Display name for a voice id, or `None` for ids outside the catalog.
pub fn voice_name(id: &str) -> Option<&'static str> {
    VOICES.iter().find(|v| v.id == id).map(|v| v.name)
}

/// Whether `id` belongs to the catalog.
pub fn is_known_voice(id: &str) -> bool {
    voice_name(id).is_some()
}
