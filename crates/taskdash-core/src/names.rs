//! Resource-name canonicalization
//!
//! The task sheets spell the same person many ways ("Ajay", "Ajay kumar",
//! "MS Manoj Singh", ...). A fixed alias table resolves each raw spelling to
//! one canonical name so that cross-month grouping attributes work to the
//! right person.
//!
//! The table is process-wide static configuration: built once on first use,
//! immutable, with no runtime mutation path. Keys are case-sensitive and
//! matched exactly after whitespace trimming.
//!
//! One data source (the Sprint sheet) occasionally jams several
//! space-separated names into a single assignee field. For that source the
//! ingest layer reduces the value to its first token *before* alias lookup;
//! the option exists here so the order of operations is owned by one place.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Raw spelling → canonical name. Exact table from the tracking sheets.
const ALIASES: &[(&str, &str)] = &[
    ("V", "Thota"),
    ("SaradhiMuneendra", "Saradhi"),
    ("SaradhiMuneendra Gundabattina", "Saradhi"),
    ("Saradhi Muneendra Gundabattina", "Saradhi"),
    ("Palaniyappan", "Palan"),
    ("Achyut Deshpande", "Achyut"),
    ("Ajay kumar", "Ajay Kumar"),
    ("Ajay", "Ajay Kumar"),
    ("Sai", "Sai Sampath Chinthavatla"),
    ("Amitabh", "Amitabh Sharma"),
    ("Sneha", "Sneha Guthe"),
    ("MS Manoj Singh", "Manoj Singh"),
    ("Somesh", "Somesh Fengade"),
    ("Gopal", "Gopalswamy Ramalingam"),
    ("Naveen Adusumilli", "Naveen"),
    ("Manoj Singh Rawat", "Manoj Singh"),
    ("Manoj", "Manoj Singh"),
    ("Varad", "Varad Bhalsing"),
    ("Varad Balasaheb Bhalsing", "Varad Bhalsing"),
    ("Mahesh Katti", "Mahesh"),
];

/// The immutable alias table, built once at first use
pub fn alias_table() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| ALIASES.iter().copied().collect())
}

/// How a raw name value is reduced before alias lookup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanonicalizeOptions {
    /// Keep only the first space-separated token before lookup.
    /// Applied by the Sprint ingest path only.
    pub first_token: bool,
}

/// Canonicalize a raw name value.
///
/// Trims surrounding whitespace, optionally reduces to the first token, then
/// substitutes via the alias table. Unmapped names pass through unchanged;
/// `None` and blank values yield `None`.
pub fn canonicalize(raw: Option<&str>, options: CanonicalizeOptions) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let reduced = if options.first_token {
        trimmed.split_whitespace().next().unwrap_or(trimmed)
    } else {
        trimmed
    };

    Some(match alias_table().get(reduced) {
        Some(canonical) => (*canonical).to_string(),
        None => reduced.to_string(),
    })
}

/// Canonicalize without first-token reduction (the Loop path and all
/// cross-month resource views)
pub fn canonical_name(raw: Option<&str>) -> Option<String> {
    canonicalize(raw, CanonicalizeOptions::default())
}
