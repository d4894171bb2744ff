use rand::seq::IndexedRandom;

use crate::shared::BotError;

/// The fixed rizz and roast phrase sets
///
/// Injected at construction so tests can substitute alternate sets; both
/// must be non-empty.
#[derive(Debug, Clone)]
pub struct PhraseBook {
    rizz: Vec<String>,
    roast: Vec<String>,
}

impl PhraseBook {
    pub fn new(rizz: Vec<String>, roast: Vec<String>) -> Result<Self, BotError> {
        if rizz.is_empty() {
            return Err(BotError::Config(
                "rizz phrase set must not be empty".to_string(),
            ));
        }
        if roast.is_empty() {
            return Err(BotError::Config(
                "roast phrase set must not be empty".to_string(),
            ));
        }

        Ok(Self { rizz, roast })
    }

    pub fn rizz(&self) -> &[String] {
        &self.rizz
    }

    pub fn roast(&self) -> &[String] {
        &self.roast
    }

    /// The phrase sets the bot ships with
    pub fn standard() -> Self {
        Self {
            rizz: lines(&[
                "You must be a magician because whenever I look at you, everyone else disappears.",
                "Are you French? Because *Eiffel* for you.",
                "If you were a vegetable, you’d be a cutecumber.",
                "Do you have a map? I just got lost in your eyes.",
                "Are you Wi-Fi? Because I’m feeling a connection.",
                "Do you believe in love at first sight—or should I walk by again?",
                "Are you made of copper and tellurium? Because you’re Cu-Te.",
                "Are you a parking ticket? Because you’ve got FINE written all over you.",
                "Do you have a name—or can I call you mine?",
                "You must be tired, because you’ve been running through my mind all day.",
                "Are you a black hole? Because you just sucked me into your orbit.",
                "Are you a time traveler? Because I see you in my future.",
                "You’re like a software update. Whenever you appear, my heart restarts.",
                "Do you have a sunburn, or are you always this hot?",
                "Are you a loan? Because you have my interest skyrocketing!",
                "You must be a wifi signal, because I’m feeling a strong connection.",
                "If looks could kill, you’d be a weapon of mass distraction.",
                "Are you a battery? Because you light up my world.",
                "Are you gravity? Because I’m falling for you.",
                "Are you a shooting star? Because every time I see you, I make a wish.",
            ]),
            roast: lines(&[
                "If I wanted to kill myself I’d climb your ego and jump to your IQ.",
                "You bring everyone so much joy… when you leave the room.",
                "Your secrets are safe with me. I never even listen when you tell me them.",
                "You’re proof that even evolution takes a break sometimes.",
                "Some drink from the fountain of knowledge; you only gargled.",
                "You have something on your chin… no, the third one down.",
            ]),
        }
    }
}

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// Selects a random line and formats it as an @-mention
pub struct LinePicker {
    phrases: PhraseBook,
}

impl LinePicker {
    pub fn new(phrases: PhraseBook) -> Self {
        Self { phrases }
    }

    pub fn rizz_line(&self, target: &str) -> String {
        Self::pick(target, &self.phrases.rizz)
    }

    pub fn roast_line(&self, target: &str) -> String {
        Self::pick(target, &self.phrases.roast)
    }

    fn pick(target: &str, set: &[String]) -> String {
        match set.choose(&mut rand::rng()) {
            Some(line) => format!("@{} {}", target, line),
            None => format!("@{}", target),
        }
    }
}
