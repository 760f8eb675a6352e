//! Display emoji for crop names

/// Shown for crops outside the known table
pub const FALLBACK_EMOJI: &str = "🌱";

/// Emoji for a crop name, case-insensitive
pub fn crop_emoji(name: &str) -> &'static str {
    match name.to_lowercase().as_str() {
        "rice" => "🌾",
        "maize" => "🌽",
        "chickpea" | "kidneybeans" | "pigeonpeas" | "mothbeans" | "blackgram" | "lentil" => "🫘",
        "mungbean" => "🫛",
        "pomegranate" | "apple" => "🍎",
        "banana" => "🍌",
        "mango" => "🥭",
        "grapes" => "🍇",
        "watermelon" => "🍉",
        "muskmelon" => "🍈",
        "orange" => "🍊",
        "papaya" => "🫐",
        "coconut" => "🥥",
        "cotton" => "☁️",
        "jute" => "🌿",
        "coffee" => "☕",
        _ => FALLBACK_EMOJI,
    }
}
