//! Text normalization for speech synthesis — emoji, symbol, and slang
//! cleanup so downstream TTS pronounces cleanly.
//!
//! Pure functions, no I/O. Rules run in a fixed order and a single pass;
//! later rules may re-match text produced by earlier ones, so the result is
//! not idempotent across repeated passes. Callers that need it truncate with
//! [`truncate_for_speech`].

use regex::Regex;
use std::sync::LazyLock;

// Compiled regexes — allocated once, reused across calls.
static RE_EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "[\u{1F600}-\u{1F64F}\
          \u{1F300}-\u{1F5FF}\
          \u{1F680}-\u{1F6FF}\
          \u{1F1E0}-\u{1F1FF}\
          \u{2702}-\u{27B0}\
          \u{24C2}-\u{1F251}]+",
    )
    .unwrap()
});
static RE_EMOJI_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(heart|star|smile|smiley|emoji|face)\b").unwrap());
static RE_HESITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[hm]{2,}\b").unwrap());
static RE_SYMBOLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_~`@#\$%\^\&\+=\|<>\{\}]").unwrap());

/// All-caps common words that TTS engines spell out letter by letter.
/// Exact-case on purpose — "ok" and "Ok" already read fine.
static CAPS_WORDS: LazyLock<Vec<(Regex, &str)>> = LazyLock::new(|| {
    [
        ("ON", "on"),
        ("OFF", "off"),
        ("OK", "okay"),
        ("YES", "yes"),
        ("NO", "no"),
        ("HI", "hi"),
        ("BYE", "bye"),
        ("HELLO", "hello"),
        ("THANKS", "thanks"),
        ("PLEASE", "please"),
        ("SORRY", "sorry"),
    ]
    .into_iter()
    .map(|(word, repl)| (Regex::new(&format!(r"\b{word}\b")).unwrap(), repl))
    .collect()
});

/// Slang and abbreviations expanded to full words, case-insensitive.
static SLANG_WORDS: LazyLock<Vec<(Regex, &str)>> = LazyLock::new(|| {
    [
        ("cuz", "because"),
        ("def", "definitely"),
        ("prob", "probably"),
        ("defo", "definitely"),
        ("gr8", "great"),
        ("thx", "thanks"),
        ("pls", "please"),
        ("u", "you"),
        ("r", "are"),
        ("2", "to"),
        ("4", "for"),
        ("btw", "by the way"),
        ("imo", "in my opinion"),
        ("omg", "oh my goodness"),
        ("lol", "laughing"),
        ("brb", "be right back"),
        ("afk", "away from keyboard"),
        ("tbh", "to be honest"),
        ("idk", "I do not know"),
        ("smh", "shaking my head"),
        ("ftw", "for the win"),
        ("irl", "in real life"),
        ("nvm", "never mind"),
        ("fam", "family"),
        ("bae", "darling"),
        ("wyd", "what are you doing"),
        ("hmu", "hit me up"),
        ("np", "no problem"),
        ("ofc", "of course"),
        ("rn", "right now"),
        ("ttyl", "talk to you later"),
        ("wya", "where are you"),
        ("ymmv", "your mileage may vary"),
    ]
    .into_iter()
    .map(|(word, repl)| (Regex::new(&format!(r"(?i)\b{word}\b")).unwrap(), repl))
    .collect()
});

/// Character cap applied on the speech path before synthesis.
pub const SPEECH_CHAR_CAP: usize = 200;

/// Normalize arbitrary text for speech synthesis.
///
/// Order matters: emoji stripping, hesitation collapse, symbol removal,
/// all-caps expansion, slang expansion, trim.
pub fn normalize(text: &str) -> String {
    let mut c = text.to_string();

    // Emoji codepoints, then spoken-word emoji artifacts ("heart", "face"...)
    c = RE_EMOJI.replace_all(&c, "").into_owned();
    c = RE_EMOJI_WORDS.replace_all(&c, "").into_owned();
    // "hmmm" / "mmm" hesitations → canonical "hmm"
    c = RE_HESITATION.replace_all(&c, "hmm").into_owned();
    // Symbols TTS would read aloud
    c = RE_SYMBOLS.replace_all(&c, "").into_owned();
    // Capital words read letter by letter ("ON" → "O N")
    for (re, repl) in CAPS_WORDS.iter() {
        c = re.replace_all(&c, *repl).into_owned();
    }
    // Slang and abbreviations
    for (re, repl) in SLANG_WORDS.iter() {
        c = re.replace_all(&c, *repl).into_owned();
    }

    c.trim().to_string()
}

/// Truncate to `cap` characters, appending `...` when anything was cut.
///
/// Counts chars, not bytes, so multi-byte text never splits mid-codepoint.
pub fn truncate_for_speech(text: &str, cap: usize) -> String {
    match text.char_indices().nth(cap) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
