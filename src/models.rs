//! 模型列表文本编解码
//!
//! The persisted micro-format is newline-separated entries of either
//! `value` or `value|label`. Parsing and serialization are pure and never
//! fail; malformed lines simply yield fewer entries.

/// One selectable model option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    pub value: String,
    pub label: String,
}

/// Parse a model-list blob into ordered entries.
///
/// Lines are trimmed, blank lines dropped, and each remaining line split on
/// the first `|` into value and label. A missing or empty label falls back
/// to the value; entries whose value is empty after trimming are dropped.
pub fn parse_model_names(text: &str) -> impl Iterator<Item = ModelEntry> + '_ {
    text.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (value, label) = match line.split_once('|') {
            Some((value, label)) => (value.trim(), label.trim()),
            None => (line, ""),
        };
        if value.is_empty() {
            return None;
        }
        Some(ModelEntry {
            value: value.to_string(),
            label: if label.is_empty() { value } else { label }.to_string(),
        })
    })
}

/// Serialize `(value, label)` pairs back into the model-list format.
///
/// Rows with an empty value are dropped; a label equal to the value (or
/// empty) collapses to the bare value. No trailing newline.
pub fn serialize_models<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    rows.into_iter()
        .filter_map(|(value, label)| {
            let value = value.trim();
            let label = label.trim();
            if value.is_empty() {
                return None;
            }
            if label.is_empty() || label == value {
                Some(value.to_string())
            } else {
                Some(format!("{value}|{label}"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
