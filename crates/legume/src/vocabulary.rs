//! Built-in candidate vocabulary.

use rotation_kernel::SplitMix32;

/// Default number of candidates drawn from the vocabulary.
pub const DEFAULT_CANDIDATE_COUNT: usize = 6;

/// `(emoji, name)` pairs, in a fixed order that seeded draws depend on.
pub const VEGETABLES: [(&str, &str); 16] = [
    ("🥦", "Broccoli"),
    ("🥕", "Carrot"),
    ("🧅", "Onion"),
    ("🌶️", "Pepper"),
    ("🍆", "Eggplant"),
    ("🥔", "Potato"),
    ("🍄", "Mushroom"),
    ("🧄", "Garlic"),
    ("🥬", "Lettuce"),
    ("🥒", "Cucumber"),
    ("🥑", "Avocado"),
    ("🌽", "Corn"),
    ("🫘", "Beans"),
    ("🫚", "Ginger"),
    ("🫛", "Pea"),
    ("🫜", "Radish"),
];

/// The first `count` vocabulary entries after a seeded pseudo-shuffle,
/// formatted as `"<emoji> <name>"`.
pub fn default_candidates(seed: u32, count: usize) -> Vec<String> {
    SplitMix32::new(seed)
        .shuffled(&VEGETABLES)
        .into_iter()
        .take(count)
        .map(|(emoji, name)| format!("{emoji} {name}"))
        .collect()
}

/// The emoji that stands for a seed.
pub fn emblem(seed: u32) -> &'static str {
    let index = SplitMix32::new(seed).random_index(VEGETABLES.len());
    VEGETABLES[index].0
}

pub fn heading(seed: u32) -> String {
    format!("{} Légume", emblem(seed))
}
