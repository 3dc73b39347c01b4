//! Languages offered by the translation picker, as (display name, widget code).

/// The picker's language list. The first entry, with an empty code, lets the
/// widget auto-detect.
pub const WIDGET_LANGUAGES: &[(&str, &str)] = &[
    ("Auto detect", ""),
    ("English", "en"),
    ("Spanish", "es"),
    ("French", "fr"),
    ("German", "de"),
    ("Portuguese", "pt"),
    ("Italian", "it"),
    ("Dutch", "nl"),
    ("Polish", "pl"),
    ("Russian", "ru"),
    ("Ukrainian", "uk"),
    ("Arabic", "ar"),
    ("Hebrew", "iw"),
    ("Hindi", "hi"),
    ("Urdu", "ur"),
    ("Bengali", "bn"),
    ("Gujarati", "gu"),
    ("Punjabi", "pa"),
    ("Marathi", "mr"),
    ("Tamil", "ta"),
    ("Telugu", "te"),
    ("Kannada", "kn"),
    ("Malayalam", "ml"),
    ("Chinese (Simplified)", "zh-CN"),
    ("Chinese (Traditional)", "zh-TW"),
    ("Japanese", "ja"),
    ("Korean", "ko"),
    ("Turkish", "tr"),
    ("Vietnamese", "vi"),
    ("Thai", "th"),
    ("Indonesian", "id"),
    ("Malay", "ms"),
    ("Greek", "el"),
    ("Czech", "cs"),
    ("Slovak", "sk"),
    ("Hungarian", "hu"),
    ("Romanian", "ro"),
    ("Bulgarian", "bg"),
    ("Swedish", "sv"),
    ("Norwegian", "no"),
    ("Danish", "da"),
    ("Finnish", "fi"),
    ("Filipino", "tl"),
    ("Afrikaans", "af"),
    ("Amharic", "am"),
    ("Azerbaijani", "az"),
    ("Basque", "eu"),
    ("Belarusian", "be"),
    ("Catalan", "ca"),
    ("Croatian", "hr"),
    ("Estonian", "et"),
    ("Georgian", "ka"),
    ("Hausa", "ha"),
    ("Icelandic", "is"),
    ("Irish", "ga"),
    ("Latvian", "lv"),
    ("Lithuanian", "lt"),
    ("Macedonian", "mk"),
    ("Maltese", "mt"),
    ("Mongolian", "mn"),
    ("Nepali", "ne"),
    ("Persian", "fa"),
    ("Serbian", "sr"),
    ("Sinhala", "si"),
    ("Slovenian", "sl"),
    ("Swahili", "sw"),
    ("Tajik", "tg"),
    ("Tatar", "tt"),
    ("Uzbek", "uz"),
    ("Yoruba", "yo"),
    ("Zulu", "zu"),
];

/// Entries whose name contains `query`, ignoring case. An empty query matches
/// everything.
pub fn filter_languages(query: &str) -> impl Iterator<Item = (&'static str, &'static str)> {
    let query = query.to_lowercase();
    WIDGET_LANGUAGES
        .iter()
        .copied()
        .filter(move |(name, _)| name.to_lowercase().contains(&query))
}
