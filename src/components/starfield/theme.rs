//! Star colors and palettes.

use rand::Rng;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Parse `#rgb` or `#rrggbb`. The leading `#` is optional.
	pub fn from_hex(hex: &str) -> Option<Self> {
		let digits = hex.trim().trim_start_matches('#');
		if !digits.is_ascii() {
			return None;
		}
		let channel = |s: &str| u8::from_str_radix(s, 16).ok();
		match digits.len() {
			6 => Some(Self::rgb(
				channel(&digits[0..2])?,
				channel(&digits[2..4])?,
				channel(&digits[4..6])?,
			)),
			3 => {
				let mut out = [0u8; 3];
				for (slot, c) in out.iter_mut().zip(digits.chars()) {
					let v = c.to_digit(16)? as u8;
					*slot = v * 16 + v;
				}
				Some(Self::rgb(out[0], out[1], out[2]))
			}
			_ => None,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// The small fixed set of colors stars are drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct StarPalette {
	pub colors: Vec<Color>,
}

impl StarPalette {
	/// Soft greens (default)
	pub fn meadow() -> Self {
		Self {
			colors: vec![
				Color::rgb(139, 195, 74),  // Leaf
				Color::rgb(80, 200, 120),  // Emerald
				Color::rgb(156, 175, 136), // Sage
				Color::rgb(184, 230, 184), // Mint
			],
		}
	}

	/// Build from CSS hex strings, skipping anything unparseable.
	/// Falls back to [`StarPalette::meadow`] when nothing survives.
	pub fn from_hex_list<S: AsRef<str>>(list: &[S]) -> Self {
		let colors: Vec<Color> = list.iter().filter_map(|s| Color::from_hex(s.as_ref())).collect();
		if colors.is_empty() {
			Self::meadow()
		} else {
			Self { colors }
		}
	}

	/// Same hues pushed towards white, for `prefers-contrast: more`.
	pub fn high_contrast(&self) -> Self {
		Self {
			colors: self.colors.iter().map(|c| c.lighten(0.5)).collect(),
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}

	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
		self.get(rng.gen_range(0..self.colors.len()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_long_and_short_hex() {
		assert_eq!(Color::from_hex("#8bc34a"), Some(Color::rgb(0x8b, 0xc3, 0x4a)));
		assert_eq!(Color::from_hex("fff"), Some(Color::rgb(255, 255, 255)));
		assert_eq!(Color::from_hex("#12345"), None);
		assert_eq!(Color::from_hex("#zzzzzz"), None);
	}

	#[test]
	fn css_output_switches_on_alpha() {
		let c = Color::rgb(80, 200, 120);
		assert_eq!(c.to_css(), "#50c878");
		assert_eq!(Color { a: 0.5, ..c }.to_css(), "rgba(80, 200, 120, 0.5)");
	}

	#[test]
	fn bad_palette_falls_back_to_meadow() {
		let p = StarPalette::from_hex_list(&["nope", ""]);
		assert_eq!(p, StarPalette::meadow());
		let p = StarPalette::from_hex_list(&["#000000", "bogus"]);
		assert_eq!(p.colors, vec![Color::rgb(0, 0, 0)]);
	}

	#[test]
	fn high_contrast_is_lighter() {
		let base = StarPalette::meadow();
		let hc = base.high_contrast();
		for (a, b) in base.colors.iter().zip(&hc.colors) {
			assert!(b.r >= a.r && b.g >= a.g && b.b >= a.b);
		}
	}
}
