//! Font loading and fontdue-backed text measurement.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use inkbox_layout::{DEFAULT_FONT_FAMILY, FontDescriptor, MeasureError, TextMeasurer};

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNS.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// System font paths for bold variants.
const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System font paths for italic variants.
const FONT_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// System font paths for bold-italic variants.
const FONT_BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf",
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// Errors raised while loading font files.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// The file could not be read.
    #[error("failed to read font file '{}'", .path.display())]
    Io {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file was read but is not a usable font.
    #[error("failed to parse font file '{}': {reason}", .path.display())]
    Parse {
        /// The file that was requested.
        path: PathBuf,
        /// Why fontdue rejected it.
        reason: &'static str,
    },
}

/// Which face of a family to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontVariant {
    /// Upright, normal weight.
    Regular,
    /// Upright, bold.
    Bold,
    /// Italic or oblique, normal weight.
    Italic,
    /// Italic or oblique, bold.
    BoldItalic,
}

impl FontVariant {
    /// The face a descriptor asks for.
    #[must_use]
    pub fn for_descriptor(font: &FontDescriptor) -> Self {
        match (font.is_bold(), font.is_italic()) {
            (true, true) => Self::BoldItalic,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (false, false) => Self::Regular,
        }
    }
}

#[derive(Default)]
struct FontFamily {
    regular: Option<Font>,
    bold: Option<Font>,
    italic: Option<Font>,
    bold_italic: Option<Font>,
}

impl FontFamily {
    fn slot(&mut self, variant: FontVariant) -> &mut Option<Font> {
        match variant {
            FontVariant::Regular => &mut self.regular,
            FontVariant::Bold => &mut self.bold,
            FontVariant::Italic => &mut self.italic,
            FontVariant::BoldItalic => &mut self.bold_italic,
        }
    }

    /// Best available face, falling back through: exact match → partial
    /// match → regular → anything loaded.
    fn select(&self, variant: FontVariant) -> Option<&Font> {
        let preferred = match variant {
            FontVariant::BoldItalic => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.italic.as_ref()),
            FontVariant::Bold => self.bold.as_ref(),
            FontVariant::Italic => self.italic.as_ref(),
            FontVariant::Regular => None,
        };
        preferred
            .or(self.regular.as_ref())
            .or(self.bold.as_ref())
            .or(self.italic.as_ref())
            .or(self.bold_italic.as_ref())
    }
}

/// Fonts registered by family name, with a default family for lookups
/// that match nothing.
///
/// Family names are matched case-insensitively. The first family
/// registered becomes the default unless one is set explicitly.
#[derive(Default)]
pub struct FontLibrary {
    families: HashMap<String, FontFamily>,
    default_family: Option<String>,
}

impl FontLibrary {
    /// Create an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no font has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Registered family names, lowercased.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    /// Register an already parsed font.
    pub fn add_font(&mut self, family: &str, variant: FontVariant, font: Font) {
        let key = family.trim().to_ascii_lowercase();
        if self.default_family.is_none() {
            self.default_family = Some(key.clone());
        }
        *self.families.entry(key).or_default().slot(variant) = Some(font);
    }

    /// Read and register a font file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a font fontdue understands.
    pub fn load_file(
        &mut self,
        family: &str,
        variant: FontVariant,
        path: &Path,
    ) -> Result<(), FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Font::from_bytes(data, FontSettings::default()).map_err(|reason| {
            FontError::Parse {
                path: path.to_path_buf(),
                reason,
            }
        })?;
        log::info!(target: "inkbox::fonts", "loaded {variant:?} face of '{family}' from {}", path.display());
        self.add_font(family, variant, font);
        Ok(())
    }

    /// Use `family` for lookups that match no registered family.
    pub fn set_default_family(&mut self, family: &str) {
        self.default_family = Some(family.trim().to_ascii_lowercase());
    }

    /// Search well-known system locations and register what is found as the
    /// default `sans-serif` family.
    ///
    /// Returns `true` if a regular face was found.
    pub fn load_system_fonts(&mut self) -> bool {
        let searches = [
            (FontVariant::Regular, FONT_SEARCH_PATHS),
            (FontVariant::Bold, FONT_BOLD_SEARCH_PATHS),
            (FontVariant::Italic, FONT_ITALIC_SEARCH_PATHS),
            (FontVariant::BoldItalic, FONT_BOLD_ITALIC_SEARCH_PATHS),
        ];
        let mut found_regular = false;
        for (variant, paths) in searches {
            let loaded = paths
                .iter()
                .any(|path| self.load_file(DEFAULT_FONT_FAMILY, variant, Path::new(path)).is_ok());
            found_regular |= loaded && variant == FontVariant::Regular;
        }

        if found_regular {
            self.set_default_family(DEFAULT_FONT_FAMILY);
        } else {
            log::warn!(
                target: "inkbox::fonts",
                "no system font found; searched {} paths",
                FONT_SEARCH_PATHS.len()
            );
        }
        found_regular
    }

    /// The face to use for `font`: its family if registered, otherwise the
    /// default family.
    #[must_use]
    pub fn resolve(&self, font: &FontDescriptor) -> Option<&Font> {
        let variant = FontVariant::for_descriptor(font);
        let key = font.family.trim().to_ascii_lowercase();
        self.families
            .get(&key)
            .or_else(|| {
                self.default_family
                    .as_ref()
                    .and_then(|default| self.families.get(default))
            })
            .and_then(|family| family.select(variant))
    }
}

/// Text measurement backed by fontdue's per-glyph metrics.
///
/// Uses `Font::metrics()` (not `Font::rasterize()`) to avoid the cost of
/// bitmap generation when only measurements are needed. Advances are
/// summed exactly the way [`crate::RasterSurface`] advances its cursor.
pub struct FontdueMeasurer<'a> {
    library: &'a FontLibrary,
}

impl<'a> FontdueMeasurer<'a> {
    /// Measure with the fonts in `library`.
    #[must_use]
    pub const fn new(library: &'a FontLibrary) -> Self {
        Self { library }
    }

    fn face(&self, font: &FontDescriptor) -> Result<&'a Font, MeasureError> {
        if !font.size.is_finite() || font.size <= 0.0 {
            return Err(MeasureError::InvalidSize(font.size));
        }
        self.library
            .resolve(font)
            .ok_or_else(|| MeasureError::UnknownFont(font.family.clone()))
    }
}

impl TextMeasurer for FontdueMeasurer<'_> {
    fn text_width(&self, text: &str, font: &FontDescriptor) -> Result<f32, MeasureError> {
        let face = self.face(font)?;
        Ok(text
            .chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| face.metrics(ch, font.size).advance_width)
            .sum())
    }

    fn line_height(&self, font: &FontDescriptor) -> Result<f32, MeasureError> {
        // [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
        //
        // "We recommend a used value for 'normal' between 1.0 and 1.2."
        //
        // Prefer the face's own line spacing; fall back to 1.2 em.
        let face = self.face(font)?;
        Ok(face
            .horizontal_line_metrics(font.size)
            .map_or(font.size * 1.2, |metrics| metrics.new_line_size))
    }
}
