use crate::error::ColorError;

/// Convert `#rgb` / `#rrggbb` (leading `#` optional) into normalized RGB.
pub fn hex_to_rgb(hex: &str) -> Result<[f32; 3], ColorError> {
    let digits = hex.trim().trim_start_matches('#');
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(ColorError::Length(hex.to_string())),
    };
    // from_str_radix would also accept a leading sign
    if !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::Digit(hex.to_string()));
    }
    let int =
        u32::from_str_radix(&expanded, 16).map_err(|_| ColorError::Digit(hex.to_string()))?;
    let r = ((int >> 16) & 255) as f32 / 255.0;
    let g = ((int >> 8) & 255) as f32 / 255.0;
    let b = (int & 255) as f32 / 255.0;
    Ok([r, g, b])
}

/// Parse every entry of a palette, falling back to `fallback` when empty.
pub fn parse_palette<S: AsRef<str>>(
    palette: &[S],
    fallback: &[&str],
) -> Result<Vec<[f32; 3]>, (usize, ColorError)> {
    if palette.is_empty() {
        return fallback
            .iter()
            .enumerate()
            .map(|(i, c)| hex_to_rgb(c).map_err(|e| (i, e)))
            .collect();
    }
    palette
        .iter()
        .enumerate()
        .map(|(i, c)| hex_to_rgb(c.as_ref()).map_err(|e| (i, e)))
        .collect()
}
