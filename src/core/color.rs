use serde::{Deserialize, Serialize};

/// A pixel color as the user chose it.
///
/// The canonical form is the trimmed string the user supplied (usually a hex
/// literal such as `#ff6b6b`). Colors are never rejected for being malformed;
/// renderers call [`Color::rgba`] and fall back when it returns `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parses a color value, rejecting only empty input
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Builds a color from a known non-empty literal such as a palette constant
    pub(crate) fn from_literal(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex colors compare case-insensitively (`#FF6B6B` == `#ff6b6b`)
    pub fn same_as(&self, other: &Color) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Decodes `#rgb`, `#rrggbb` or `#rrggbbaa` into RGBA bytes
    pub fn rgba(&self) -> Option<[u8; 4]> {
        let hex = self.0.strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let mut out = [255u8; 4];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    out[i] = v * 17;
                }
                Some(out)
            }
            6 => Some([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            ]),
            8 => Some([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            ]),
            _ => None,
        }
    }

    /// RGBA bytes, or `fallback` when the color cannot be decoded
    pub fn rgba_or(&self, fallback: [u8; 4]) -> [u8; 4] {
        self.rgba().unwrap_or(fallback)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Color::parse(&value).ok_or_else(|| "color must not be empty".to_string())
    }
}

impl TryFrom<&str> for Color {
    type Error = String;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        Color::parse(value).ok_or_else(|| "color must not be empty".to_string())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_rejects_empty() {
        assert_eq!(Color::parse("  #123456 ").unwrap().as_str(), "#123456");
        assert!(Color::parse("").is_none());
        assert!(Color::parse("   ").is_none());
    }

    #[test]
    fn test_rgba_decoding() {
        let c = Color::parse("#FF6B6B").unwrap();
        assert_eq!(c.rgba(), Some([0xff, 0x6b, 0x6b, 0xff]));

        let short = Color::parse("#0f8").unwrap();
        assert_eq!(short.rgba(), Some([0x00, 0xff, 0x88, 0xff]));

        let alpha = Color::parse("#10ac8480").unwrap();
        assert_eq!(alpha.rgba(), Some([0x10, 0xac, 0x84, 0x80]));
    }

    #[test]
    fn test_malformed_colors_are_kept_but_not_decoded() {
        let c = Color::parse("rebeccapurple").unwrap();
        assert_eq!(c.rgba(), None);
        assert_eq!(c.rgba_or([1, 2, 3, 4]), [1, 2, 3, 4]);
        assert!(Color::parse("#12345").unwrap().rgba().is_none());
    }

    #[test]
    fn test_case_insensitive_comparison() {
        let a = Color::parse("#FF6B6B").unwrap();
        let b = Color::parse("#ff6b6b").unwrap();
        assert!(a.same_as(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_rejects_empty() {
        let ok: Color = serde_json::from_str("\"#abcdef\"").unwrap();
        assert_eq!(ok.as_str(), "#abcdef");
        assert!(serde_json::from_str::<Color>("\"\"").is_err());
    }
}
