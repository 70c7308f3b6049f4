use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ShiftCategory
{
    Morning,
    Afternoon,
    Evening,
    Unknown,
}

// Checked in order, the first hit wins.
const VOCABULARY: [(ShiftCategory, &[&str]); 3] = [
    (ShiftCategory::Morning, &["sáng", "morning"]),
    (ShiftCategory::Afternoon, &["chiều", "afternoon"]),
    (ShiftCategory::Evening, &["tối", "đêm", "evening", "night"]),
];

/// Classifies a shift by name for colouring. Matching is a case-insensitive
/// substring search, so "Ca Sáng" and "MORNING shift" are both mornings.
pub fn shift_color_category(shift_name: &str) -> ShiftCategory
{
    let name = shift_name.to_lowercase();
    VOCABULARY
        .iter()
        .find(|(_, words)| words.iter().any(|word| name.contains(word)))
        .map_or(ShiftCategory::Unknown, |(category, _)| *category)
}
