//! Static translation tables for the site copy.
//!
//! A missing key (or a whole missing language) is not an error: the binder
//! simply leaves the page's original text in place.

use std::collections::HashMap;

// ==================== English Strings ====================

/// English site copy (canonical)
pub const ENGLISH_STRINGS: &[(&str, &str)] = &[
    ("nav.home", "Home"),
    ("nav.about", "About"),
    ("nav.services", "Services"),
    ("nav.job", "Job Placement"),
    ("nav.blog", "Blog"),
    ("nav.contact", "Contact"),
    ("hero.title1", "Professional Healthcare Services"),
    ("hero.title2", "24x7 Available"),
    (
        "hero.subtitle",
        "Trusted healthcare and job placement services in Punjab. Expert nursing care, elderly support, and professional staffing solutions.",
    ),
    ("cta.contact", "Contact US"),
    ("cta.whatsapp", "💬 WhatsApp Chat"),
    ("blog.title", "Blog & Updates"),
    (
        "blog.subtitle",
        "Weekly posts on care, staffing, and community updates. New website—starting with a few helpful reads.",
    ),
];

// ==================== Hindi Strings ====================

pub const HINDI_STRINGS: &[(&str, &str)] = &[
    ("nav.home", "होम"),
    ("nav.about", "हमारे बारे में"),
    ("nav.services", "सेवाएँ"),
    ("nav.job", "जॉब प्लेसमेंट"),
    ("nav.blog", "ब्लॉग"),
    ("nav.contact", "संपर्क"),
    ("hero.title1", "व्यावसायिक स्वास्थ्य सेवा"),
    ("hero.title2", "24x7 उपलब्ध"),
    (
        "hero.subtitle",
        "पंजाब में विश्वसनीय स्वास्थ्य और जॉब प्लेसमेंट सेवाएँ। विशेषज्ञ नर्सिंग केयर, बुजुर्ग सहायता और स्टाफिंग समाधान।",
    ),
    ("cta.contact", "संपर्क करें"),
    ("cta.whatsapp", "💬 व्हाट्सऐप चैट"),
    ("blog.title", "ब्लॉग और अपडेट्स"),
    (
        "blog.subtitle",
        "देखभाल, स्टाफिंग और समुदाय पर साप्ताहिक पोस्ट। नई वेबसाइट—कुछ उपयोगी लेखों के साथ शुरुआत।",
    ),
];

// ==================== Punjabi Strings ====================

pub const PUNJABI_STRINGS: &[(&str, &str)] = &[
    ("nav.home", "ਹੋਮ"),
    ("nav.about", "ਸਾਡੇ ਬਾਰੇ"),
    ("nav.services", "ਸੇਵਾਵਾਂ"),
    ("nav.job", "ਨੌਕਰੀ ਪਲੇਸਮੈਂਟ"),
    ("nav.blog", "ਬਲੌਗ"),
    ("nav.contact", "ਸੰਪਰਕ"),
    ("hero.title1", "ਪੇਸ਼ਾਵਰ ਹੈਲਥਕੇਅਰ ਸੇਵਾਵਾਂ"),
    ("hero.title2", "24x7 ਉਪਲਬਧ"),
    (
        "hero.subtitle",
        "ਪੰਜਾਬ ਵਿੱਚ ਭਰੋਸੇਯੋਗ ਹੈਲਥਕੇਅਰ ਅਤੇ ਨੌਕਰੀ ਪਲੇਸਮੈਂਟ ਸੇਵਾਵਾਂ। ਮਾਹਿਰ ਨਰਸਿੰਗ ਕੇਅਰ, ਬਜ਼ੁਰਗਾਂ ਲਈ ਸਹਾਇਤਾ ਅਤੇ ਸਟਾਫਿੰਗ ਹੱਲ।",
    ),
    ("cta.contact", "ਸੰਪਰਕ ਕਰੋ"),
    ("cta.whatsapp", "💬 ਵਟਸਐਪ ਚੈਟ"),
    ("blog.title", "ਬਲੌਗ ਅਤੇ ਅਪਡੇਟਸ"),
    (
        "blog.subtitle",
        "ਦੇਖਭਾਲ, ਸਟਾਫਿੰਗ ਅਤੇ ਕਮੀਉਨਿਟੀ ਬਾਰੇ ਹਫਤਾਵਾਰੀ ਲੇਖ। ਨਵੀਂ ਵੈੱਬਸਾਈਟ—ਕੁਝ ਮਦਦਗਾਰ ਪੜ੍ਹਾਈ ਨਾਲ ਸ਼ੁਰੂਆਤ।",
    ),
];

/// Mapping of (language code, key) to display string.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    tables: HashMap<String, HashMap<String, String>>,
}

impl Dictionary {
    /// An empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// The site's built-in English, Hindi and Punjabi copy.
    pub fn builtin() -> Self {
        Self::new()
            .with_table("en", ENGLISH_STRINGS)
            .with_table("hi", HINDI_STRINGS)
            .with_table("pa", PUNJABI_STRINGS)
    }

    /// Add (or extend) the table for `language`.
    pub fn with_table(mut self, language: &str, entries: &[(&str, &str)]) -> Self {
        for (key, value) in entries {
            self.insert(language, key, value);
        }
        self
    }

    pub fn insert(&mut self, language: &str, key: &str, value: &str) {
        self.tables
            .entry(language.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Localized string for `key` in `language`, if one is defined.
    pub fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.tables
            .get(language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    /// Language codes with a table, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Keys defined for `language`, sorted. Empty for an unknown language.
    pub fn keys(&self, language: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .tables
            .get(language)
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }
}
