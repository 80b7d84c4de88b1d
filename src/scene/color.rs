use serde::{Deserialize, Serialize};

/// Linear RGB color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_hex(&self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Copy with `delta` added to the green channel, saturating at 1.0
    pub fn tinted_green(&self, delta: f32) -> Self {
        Self {
            g: (self.g + delta).clamp(0.0, 1.0),
            ..*self
        }
    }

    pub fn scale(&self, s: f32) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s)
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    /// Parse `#rrggbb`, `0xrrggbb` or bare hex digits
    fn try_from(s: String) -> Result<Self, Self::Error> {
        let digits = s
            .trim()
            .trim_start_matches('#')
            .trim_start_matches("0x")
            .trim_start_matches("0X");

        if digits.is_empty() || digits.len() > 6 {
            return Err(format!("Invalid color '{}': expected up to 6 hex digits", s));
        }

        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|e| format!("Invalid color '{}': {}", s, e))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        format!("#{:06x}", c.to_hex())
    }
}
