use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MASK: &str = "••••••••";

/// Truncate text to a display width, appending "..." when cut.
///
/// # Examples
/// ```
/// use keycloud_core::utils::text::truncate_text;
/// assert_eq!(truncate_text("Hello World!", 8), "Hello...");
/// ```
pub fn truncate_text(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    const ELLIPSIS: &str = "...";
    let ellipsis_width = ELLIPSIS.width();

    if max_width <= ellipsis_width {
        return ELLIPSIS[..max_width].to_string();
    }

    let target_width = max_width - ellipsis_width;
    let mut result = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }

    result.push_str(ELLIPSIS);
    result
}

/// Fixed-width mask for a secret; the length of the secret is not revealed.
pub fn mask_secret(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { MASK }
}
