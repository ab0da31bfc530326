use serde::{Deserialize, Deserializer};

/// Normalizes a free-text field by stripping surrounding whitespace and
/// recomposing it into Unicode Normalization Form C.
///
/// ```
/// use contact_backend::normalization::normalize_text;
/// assert_eq!(normalize_text(" Dupont "), "Dupont");
/// ```
pub fn normalize_text(value: impl AsRef<str>) -> String {
    use unicode_normalization::UnicodeNormalization;

    value.as_ref().trim().nfc().collect()
}

/// Deserializes an optional `String` after running it through
/// `normalize_text`. A value that is empty once normalized is treated as
/// absent, so blank form fields and missing fields validate the same way.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let o: Option<String> = Deserialize::deserialize(deserializer)?;

    Ok(o.map(normalize_text).filter(|s| !s.is_empty()))
}
