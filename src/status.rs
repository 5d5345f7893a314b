use std::fmt;
use std::ops::RangeInclusive;

/// Labels for the status codes worth calling out by name.
const STATUS_LABELS: [(u16, &str); 14] = [
    (200, "✅ OK"),
    (301, "➡️  Redirection permanente"),
    (302, "↪️  Redirection temporaire"),
    (400, "🧨 Mauvaise requête"),
    (401, "🔒 Non autorisé"),
    (403, "⛔ Accès interdit 🔒 (site ok mais bloqué par cloudflare)"),
    (404, "🔍 Introuvable"),
    (408, "⏳ Timeout"),
    (429, "🚫 Trop de requêtes"),
    (451, "🛑 Problème légal RIP"),
    (500, "💀 Erreur interne serveur"),
    (502, "🚧 Bad Gateway"),
    (503, "🔧 Service indisponible"),
    (504, "⏱️ Gateway timeout"),
];

/// Checked in order, first match wins.
const RANGE_FALLBACKS: [(RangeInclusive<u16>, &str); 4] = [
    (200..=299, "✅ Réussi (non mappé)"),
    (300..=399, "🔁 Redirection (non mappée)"),
    (400..=499, "⚠️ Erreur client (non mappée)"),
    (500..=u16::MAX, "💥 Erreur serveur (non mappée)"),
];

const UNKNOWN_LABEL: &str = "❓ Code inconnu";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Classification {
    /// The code has its own entry in the label table.
    Mapped(&'static str),
    /// No entry, labelled by its class (2xx, 3xx, 4xx, 5xx and above).
    RangeFallback(&'static str),
    Unknown,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Mapped(label) | Classification::RangeFallback(label) => *label,
            Classification::Unknown => UNKNOWN_LABEL,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify(code: u16) -> Classification {
    if let Some((_, label)) = STATUS_LABELS.iter().find(|(known, _)| *known == code) {
        return Classification::Mapped(*label);
    }

    RANGE_FALLBACKS
        .iter()
        .find(|(range, _)| range.contains(&code))
        .map(|(_, label)| Classification::RangeFallback(*label))
        .unwrap_or(Classification::Unknown)
}
