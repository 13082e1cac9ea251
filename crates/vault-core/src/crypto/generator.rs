//! Random password generation and strength scoring

use std::collections::HashSet;

use crate::crypto::random::RandomSource;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBERS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Options for password generation
#[derive(Debug, Clone, Copy)]
pub struct GeneratorOptions {
    /// Length of the password to generate
    pub length: usize,
    /// Include uppercase letters
    pub include_uppercase: bool,
    /// Include lowercase letters
    pub include_lowercase: bool,
    /// Include digits
    pub include_numbers: bool,
    /// Include symbols
    pub include_symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 16,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
        }
    }
}

/// Generate a random password
///
/// Each selected character class is represented by at least one
/// character; remaining positions sample the combined pool. A final
/// Fisher-Yates shuffle removes the positional bias the guaranteed
/// characters would otherwise have. With no class selected, falls back
/// to lowercase + numbers.
pub fn generate_password(options: &GeneratorOptions, rng: &mut dyn RandomSource) -> String {
    let mut classes: Vec<&[u8]> = Vec::new();
    if options.include_lowercase {
        classes.push(LOWERCASE);
    }
    if options.include_uppercase {
        classes.push(UPPERCASE);
    }
    if options.include_numbers {
        classes.push(NUMBERS);
    }
    if options.include_symbols {
        classes.push(SYMBOLS);
    }
    if classes.is_empty() {
        classes.push(LOWERCASE);
        classes.push(NUMBERS);
    }

    let pool: Vec<u8> = classes.concat();

    let mut password: Vec<u8> = Vec::with_capacity(options.length);
    for class in &classes {
        if password.len() >= options.length {
            break;
        }
        password.push(class[rng.random_index(class.len())]);
    }
    while password.len() < options.length {
        password.push(pool[rng.random_index(pool.len())]);
    }

    for i in (1..password.len()).rev() {
        let j = rng.random_index(i + 1);
        password.swap(i, j);
    }

    password.into_iter().map(char::from).collect()
}

/// Strength label tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Excellent,
}

impl StrengthLabel {
    /// Get the label as a display string
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Good => "Good",
            StrengthLabel::Excellent => "Excellent",
        }
    }
}

/// Password strength score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthReport {
    /// Additive score, clamped to 0-100
    pub score: u8,
    /// Tier the score falls in
    pub label: StrengthLabel,
}

/// Score a password with an additive heuristic
///
/// Length tier (>=12: +25, >=8: +15, >=6: +10), +15 for each of
/// lowercase/uppercase/digit presence, +20 for a symbol, +10 when the
/// unique-character ratio is at least 0.7; clamped to 100.
pub fn score_strength(password: &str) -> StrengthReport {
    let mut score: u32 = 0;
    let length = password.chars().count();

    if length >= 12 {
        score += 25;
    } else if length >= 8 {
        score += 15;
    } else if length >= 6 {
        score += 10;
    }

    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 15;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 15;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 15;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 20;
    }

    if length > 0 {
        let unique: HashSet<char> = password.chars().collect();
        if unique.len() as f64 / length as f64 >= 0.7 {
            score += 10;
        }
    }

    let score = score.min(100) as u8;
    let label = if score >= 80 {
        StrengthLabel::Excellent
    } else if score >= 60 {
        StrengthLabel::Good
    } else if score >= 40 {
        StrengthLabel::Fair
    } else {
        StrengthLabel::Weak
    };

    StrengthReport { score, label }
}
