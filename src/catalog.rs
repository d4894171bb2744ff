use std::collections::HashMap;
use std::time::Duration;

/// Playback duration used when a definition carries none
pub const DEFAULT_EMOTE_DURATION_SECS: u64 = 6;

/// A single emote known to the bot
#[derive(Debug, Clone)]
pub struct EmoteDefinition {
    pub display_name: String,
    pub emote_id: String,
    pub duration_secs: Option<u64>,
}

impl EmoteDefinition {
    pub fn new(display_name: impl Into<String>, emote_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            emote_id: emote_id.into(),
            duration_secs: None,
        }
    }

    pub fn with_duration(mut self, secs: u64) -> Self {
        self.duration_secs = Some(secs);
        self
    }
}

/// Immutable lookup table over the emotes the bot can play
///
/// Tokens resolve by numeric shortcut (`"1"`..`"N"`, following catalog
/// order) or by case-insensitive display name. Resolution is pure; a miss
/// means "not an emote command", never an error.
#[derive(Debug, Clone)]
pub struct EmoteCatalog {
    entries: Vec<EmoteDefinition>,
    by_name: HashMap<String, usize>,
    durations: HashMap<String, u64>,
}

impl EmoteCatalog {
    pub fn new(entries: Vec<EmoteDefinition>) -> Self {
        let mut by_name = HashMap::new();
        let mut durations = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            by_name.insert(entry.display_name.to_lowercase(), index);
            if let Some(secs) = entry.duration_secs {
                durations.insert(entry.emote_id.clone(), secs);
            }
        }

        Self {
            entries,
            by_name,
            durations,
        }
    }

    /// Resolve a token to an emote id, numeric shortcut first
    pub fn resolve(&self, token: &str) -> Option<&str> {
        let token = token.trim();

        if let Ok(shortcut) = token.parse::<usize>() {
            if (1..=self.entries.len()).contains(&shortcut) {
                return Some(self.entries[shortcut - 1].emote_id.as_str());
            }
        }

        self.by_name
            .get(&token.to_lowercase())
            .map(|&index| self.entries[index].emote_id.as_str())
    }

    /// Playback duration for an emote id, defaulting when unconfigured
    pub fn duration_of(&self, emote_id: &str) -> Duration {
        Duration::from_secs(
            self.durations
                .get(emote_id)
                .copied()
                .unwrap_or(DEFAULT_EMOTE_DURATION_SECS),
        )
    }

    pub fn entries(&self) -> &[EmoteDefinition] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The free-emote catalog the bot ships with
    pub fn standard() -> Self {
        Self::new(vec![
            EmoteDefinition::new("Sit", "idle-loop-sitfloor").with_duration(12),
            EmoteDefinition::new("Enthused", "idle-enthusiastic").with_duration(11),
            EmoteDefinition::new("Yes", "emote-yes").with_duration(3),
            EmoteDefinition::new("The Wave", "emote-wave").with_duration(3),
            EmoteDefinition::new("Tired", "emote-tired").with_duration(4),
            EmoteDefinition::new("Snowball Fight!", "emote-snowball").with_duration(5),
            EmoteDefinition::new("Snow Angel", "emote-snowangel").with_duration(5),
            EmoteDefinition::new("Shy", "emote-shy").with_duration(4),
            EmoteDefinition::new("Sad", "emote-sad").with_duration(4),
            EmoteDefinition::new("No", "emote-no").with_duration(4),
            EmoteDefinition::new("Model", "emote-model").with_duration(6),
            EmoteDefinition::new("Laugh", "emote-laughing").with_duration(3),
            EmoteDefinition::new("Kiss", "emote-kiss").with_duration(3),
            EmoteDefinition::new("Sweating", "emote-hot").with_duration(3),
            EmoteDefinition::new("Hello", "emote-hello").with_duration(3),
            EmoteDefinition::new("Greedy Emote", "emote-greedy").with_duration(4),
            EmoteDefinition::new("Face Palm", "emote-exasperatedb").with_duration(4),
            EmoteDefinition::new("Curtsy", "emote-curtsy").with_duration(4),
            EmoteDefinition::new("Confusion", "emote-confused").with_duration(5),
            EmoteDefinition::new("Charging", "emote-charging").with_duration(6),
            EmoteDefinition::new("Bow", "emote-bow").with_duration(3),
            EmoteDefinition::new("Thumbs Up", "emoji-thumbsup").with_duration(4),
            EmoteDefinition::new("Tummy Ache", "emoji-gagging").with_duration(5),
        ])
    }
}
