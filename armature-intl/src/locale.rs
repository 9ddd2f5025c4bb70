//! Locale Negotiation and Accept-Language Parsing
//!
//! Turns a raw `Accept-Language` header into ranked candidates and picks the
//! first supported locale, matching exactly first and then by base language.

use std::cmp::Ordering;

/// Commonly supported locale tags, usable as a default supported set.
pub const COMMON_LOCALES: &[&str] = &[
    // English
    "en-US", "en-GB", "en-AU", "en-CA", "en-IN",
    // Southeast Asia
    "id-ID", "ms-MY",
    // Chinese
    "zh-CN", "zh-TW", "zh-HK",
    // East / Southeast Asia
    "ja-JP", "ko-KR", "th-TH", "vi-VN",
    // Europe
    "fr-FR", "fr-CA", "es-ES", "es-MX", "pt-PT", "pt-BR", "de-DE", "it-IT", "nl-NL", "ru-RU",
    "tr-TR",
    // Middle East / South Asia
    "ar-SA", "he-IL", "hi-IN", "bn-BD", "ta-IN", "ur-PK",
];

/// One comma-separated segment of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceEntry {
    /// Candidate tag, trimmed and lowercased
    pub code: String,
    /// Quality in `[0, 1]`
    pub quality: f32,
    /// The `;q=` value could not be parsed and was ranked as `0.0`
    pub malformed: bool,
}

impl PreferenceEntry {
    fn parse(segment: &str) -> Self {
        let mut parts = segment.trim().split(";q=");
        let code = parts.next().unwrap_or_default().trim().to_lowercase();
        let raw_quality = parts.next().map(str::trim);

        let (quality, malformed) = match raw_quality {
            None | Some("") => (1.0, false),
            Some(raw) => match raw.parse::<f32>() {
                Ok(q) if q.is_finite() => (q.clamp(0.0, 1.0), false),
                _ => (0.0, true),
            },
        };

        Self {
            code,
            quality,
            malformed,
        }
    }

    /// Base language: everything before the first `-`.
    pub fn base(&self) -> &str {
        self.code
            .split_once('-')
            .map_or(self.code.as_str(), |(base, _)| base)
    }
}

/// Parse an `Accept-Language` header into candidates ranked by quality.
///
/// The sort is stable, so entries of equal quality keep header order.
/// Every comma-separated segment yields an entry, empty ones included.
/// Malformed quality values rank last but remain candidates.
///
/// # Example
///
/// ```
/// use armature_intl::parse_preferences;
///
/// let entries = parse_preferences("fr-FR;q=0.7, EN-us;q=0.9, de");
/// let codes: Vec<_> = entries.iter().map(|e| e.code.as_str()).collect();
/// assert_eq!(codes, ["de", "en-us", "fr-fr"]);
/// ```
pub fn parse_preferences(header: &str) -> Vec<PreferenceEntry> {
    let mut entries: Vec<PreferenceEntry> = header
        .split(',')
        .map(PreferenceEntry::parse)
        .collect();

    for entry in entries.iter().filter(|e| e.malformed) {
        tracing::debug!(code = %entry.code, "malformed quality value in Accept-Language, ranking last");
    }

    entries.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    entries
}

/// Locale negotiator over a fixed supported set.
///
/// Built once per configuration; [`Negotiator::select`] is pure.
#[derive(Debug, Clone)]
pub struct Negotiator {
    supported: Vec<String>,
    fallback: String,
}

impl Negotiator {
    /// Create a negotiator. `supported` order decides base-language ties.
    pub fn new<S: AsRef<str>>(supported: &[S], fallback: impl Into<String>) -> Self {
        Self {
            supported: supported.iter().map(|s| s.as_ref().to_string()).collect(),
            fallback: fallback.into(),
        }
    }

    /// Supported tags in declared order.
    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    /// Tag returned when nothing matches.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Select the best supported locale for a header.
    ///
    /// Returns the supported tag in its configured casing, or the fallback.
    pub fn select(&self, header: Option<&str>) -> &str {
        match header {
            Some(h) if !h.is_empty() => self.select_from(&parse_preferences(h)),
            _ => &self.fallback,
        }
    }

    /// Select from already-ranked candidates.
    pub fn select_from(&self, candidates: &[PreferenceEntry]) -> &str {
        match_index(&self.supported, candidates)
            .map_or(self.fallback.as_str(), |i| self.supported[i].as_str())
    }
}

/// Index of the first supported tag matching a candidate, exact match
/// before base language.
fn match_index<S: AsRef<str>>(supported: &[S], candidates: &[PreferenceEntry]) -> Option<usize> {
    for candidate in candidates {
        let exact = supported
            .iter()
            .position(|s| s.as_ref().eq_ignore_ascii_case(&candidate.code));
        if exact.is_some() {
            return exact;
        }

        // An empty base matches every tag
        let base = candidate.base();
        let partial = supported.iter().position(|s| {
            s.as_ref()
                .get(..base.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(base))
        });
        if partial.is_some() {
            return partial;
        }
    }
    None
}

/// Negotiate a locale in one call.
///
/// # Example
///
/// ```
/// use armature_intl::negotiate_locale;
///
/// let supported = ["en-US", "id", "fr-FR"];
/// assert_eq!(negotiate_locale(Some("fr-CA"), &supported, "en-US"), "fr-FR");
/// assert_eq!(negotiate_locale(None, &supported, "en-US"), "en-US");
/// ```
pub fn negotiate_locale<'a, S: AsRef<str>>(
    header: Option<&str>,
    supported: &'a [S],
    fallback: &'a str,
) -> &'a str {
    let header = match header {
        Some(h) if !h.is_empty() => h,
        _ => return fallback,
    };

    match match_index(supported, &parse_preferences(header)) {
        Some(i) => supported[i].as_ref(),
        None => fallback,
    }
}
