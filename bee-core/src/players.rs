use indexmap::IndexMap;

/// Marker colours used to tell players apart in multiplayer games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerColor {
    Red,
    Blue,
    Yellow,
    Green,
}

pub const PLAYER_PALETTE: [PlayerColor; 4] = [
    PlayerColor::Red,
    PlayerColor::Blue,
    PlayerColor::Yellow,
    PlayerColor::Green,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerScoreEntry {
    pub name: String,
    pub score: i32,
    pub color: PlayerColor,
}

/// Stable colour per player, assigned in first-seen order and cycling
/// through the palette once it runs out.
#[derive(Debug, Clone, Default)]
pub struct PlayerPalette {
    seen: Vec<String>,
}

impl PlayerPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn observe(&mut self, name: &str) {
        if !self.seen.iter().any(|seen| seen == name) {
            self.seen.push(name.to_string());
        }
    }

    pub fn color_of(&self, name: &str) -> Option<PlayerColor> {
        self.seen
            .iter()
            .position(|seen| seen == name)
            .map(|index| PLAYER_PALETTE[index % PLAYER_PALETTE.len()])
    }

    /// Score table in first-seen order. Players that were seen but have no
    /// score entry are left out.
    pub fn entries(&self, scores: &IndexMap<String, i32>) -> Vec<PlayerScoreEntry> {
        self.seen
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                scores.get(name).map(|score| PlayerScoreEntry {
                    name: name.clone(),
                    score: *score,
                    color: PLAYER_PALETTE[index % PLAYER_PALETTE.len()],
                })
            })
            .collect()
    }
}
