// Human-readable labels for metric keys

/// Convert a metric key into a display label.
///
/// Underscores become spaces and the first letter of every word is upper-cased,
/// e.g. `"avg_checkout_time"` becomes `"Avg Checkout Time"`. A word starts at any
/// ASCII alphanumeric character that does not follow another one, so
/// `"items-per-patron"` becomes `"Items-Per-Patron"`. The rest of each word is left as is.
pub fn humanize(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut in_word = false;

    for c in key.chars().map(|c| if c == '_' { ' ' } else { c }) {
        let is_word_char = c.is_ascii_alphanumeric();
        if is_word_char && !in_word {
            label.push(c.to_ascii_uppercase());
        } else {
            label.push(c);
        }
        in_word = is_word_char;
    }

    label
}
