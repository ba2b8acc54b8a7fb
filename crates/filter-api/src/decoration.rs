use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

/// 24-bit colour used by decorations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
	/// Parse `#rrggbb` or `rrggbb`.
	#[must_use]
	pub fn from_hex(value: &str) -> Option<Self> {
		let hex = value.strip_prefix('#').unwrap_or(value);
		if hex.len() != 6 || !hex.is_ascii() {
			return None;
		}
		let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
		let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
		let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;
		Some(Self(red, green, blue))
	}
}

/// Icon rendered alongside a result entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Icon {
	glyph: char,
	color: Option<Rgb>,
}

impl Icon {
	/// Create a new icon with an optional foreground colour.
	#[must_use]
	pub fn new(glyph: char, color: Option<Rgb>) -> Self {
		Self { glyph, color }
	}

	/// Create an icon from a glyph and hexadecimal colour code.
	#[must_use]
	pub fn from_hex(glyph: char, hex: &str) -> Self {
		Self {
			glyph,
			color: Rgb::from_hex(hex),
		}
	}

	#[must_use]
	pub fn glyph(&self) -> char {
		self.glyph
	}

	#[must_use]
	pub fn color(&self) -> Option<Rgb> {
		self.color
	}
}

/// Resolves decorations for files backing result entries.
///
/// Resolution can be expensive (icon themes, file probing), so the result
/// model only calls this for rows that are actually read.
pub trait DecorationProvider: Send + Sync {
	fn icon_for(&self, path: &Path) -> Option<Icon>;
}

/// Maps file extensions to icons, falling back to a generic file glyph.
#[derive(Clone, Debug)]
pub struct ExtensionIcons {
	by_extension: HashMap<String, Icon>,
	fallback: Option<Icon>,
}

impl ExtensionIcons {
	#[must_use]
	pub fn empty() -> Self {
		Self {
			by_extension: HashMap::new(),
			fallback: None,
		}
	}

	/// Associate an icon with a (case-insensitive) extension.
	#[must_use]
	pub fn with(mut self, extension: &str, icon: Icon) -> Self {
		self.by_extension
			.insert(extension.to_ascii_lowercase(), icon);
		self
	}

	#[must_use]
	pub fn with_fallback(mut self, icon: Icon) -> Self {
		self.fallback = Some(icon);
		self
	}
}

impl Default for ExtensionIcons {
	fn default() -> Self {
		Self::empty()
			.with("rs", Icon::from_hex('R', "#dea584"))
			.with("toml", Icon::from_hex('T', "#9c4221"))
			.with("md", Icon::from_hex('M', "#519aba"))
			.with("json", Icon::from_hex('J', "#cbcb41"))
			.with("py", Icon::from_hex('P', "#3572a5"))
			.with("c", Icon::from_hex('C', "#599eff"))
			.with("h", Icon::from_hex('H', "#a074c4"))
			.with("cpp", Icon::from_hex('C', "#f34b7d"))
			.with_fallback(Icon::new('*', None))
	}
}

impl DecorationProvider for ExtensionIcons {
	fn icon_for(&self, path: &Path) -> Option<Icon> {
		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(|ext| self.by_extension.get(&ext.to_ascii_lowercase()))
			.copied()
			.or(self.fallback)
	}
}
