//! The resolved generation configuration and its explicit override step.

use serde::Deserialize;

use crate::error::ValidationError;

/// Smallest accepted width or height.
pub const MIN_DIMENSION: u32 = 1;
/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 10_000;

/// Default number of images per run.
pub const DEFAULT_TOTAL_IMAGES: usize = 5;
/// Default width and height.
pub const DEFAULT_DIMENSION: u32 = 100;
/// Default output name template.
pub const DEFAULT_NAME_TEMPLATE: &str = "random-image-{width}-{height}-{serial}";
/// Default output folder.
pub const DEFAULT_TARGET_FOLDER: &str = "./";

/// Output encodings understood by the tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFormat {
    /// `image/jpeg`
    #[default]
    Jpeg,
    /// `image/png`
    Png,
}

impl ImageFormat {
    /// Parse a MIME string, ignoring case. Only exact MIME names match.
    #[must_use]
    pub fn from_mime(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    /// The canonical MIME string.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// File extension used when writing to disk.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// A validated, immutable generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Number of images to produce.
    pub total_images: usize,
    /// Surface width, always within `[MIN_DIMENSION, MAX_DIMENSION]`.
    pub width: u32,
    /// Surface height, always within `[MIN_DIMENSION, MAX_DIMENSION]`.
    pub height: u32,
    /// Output encoding.
    pub format: ImageFormat,
    /// Name template with `{width}`, `{height}`, `{serial}` and `{generator}` placeholders.
    pub name_template: String,
    /// Normalized output destination.
    pub target_folder: String,
    /// When set, the caller must present help and skip generation.
    pub help_requested: bool,
    /// Ordered, duplicate-free generator names. Empty means the whole catalog.
    pub selected_generators: Vec<String>,
    /// Pick one strategy per image instead of layering all of them.
    pub random_single: bool,
    /// Drawing passes per strategy; `None` lets each strategy choose.
    pub iterations: Option<u32>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            total_images: DEFAULT_TOTAL_IMAGES,
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
            format: ImageFormat::default(),
            name_template: DEFAULT_NAME_TEMPLATE.to_string(),
            target_folder: DEFAULT_TARGET_FOLDER.to_string(),
            help_requested: false,
            selected_generators: Vec::new(),
            random_single: true,
            iterations: None,
        }
    }
}

impl Configuration {
    /// Produce a new configuration with `overrides` applied.
    ///
    /// Dimensions and counts are clamped exactly like resolved tokens; an
    /// unrecognized format is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFormat`] if the format override is not
    /// `image/jpeg` or `image/png`.
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        if let Some(width) = overrides.width {
            next.width = clamp_dimension(Some(width));
        }
        if let Some(height) = overrides.height {
            next.height = clamp_dimension(Some(height));
        }
        if let Some(total) = overrides.total_images {
            next.total_images = floor_total(Some(total));
        }
        if let Some(ref format) = overrides.format {
            next.format = parse_format(&format!("format:{format}"), format)?;
        }
        if let Some(ref template) = overrides.name_template {
            next.name_template.clone_from(template);
        }
        if let Some(ref target) = overrides.target_folder {
            next.target_folder = normalize_path(target);
        }
        if let Some(ref generators) = overrides.generators {
            next.selected_generators = dedup_names(generators);
        }
        if let Some(random_single) = overrides.random_single {
            next.random_single = random_single;
        }
        if let Some(iterations) = overrides.iterations {
            next.iterations = iterations;
        }
        Ok(next)
    }

    /// Substitute the template placeholders for one image.
    ///
    /// Unknown placeholders are left untouched.
    #[must_use]
    pub fn resolve_name(&self, serial: usize, generators: &[&str]) -> String {
        self.name_template
            .replace("{width}", &self.width.to_string())
            .replace("{height}", &self.height.to_string())
            .replace("{serial}", &serial.to_string())
            .replace("{generator}", &generators.join("+"))
    }
}

/// Optional field-by-field replacements for a [`Configuration`].
///
/// Used by the interactive surface and by front-end flags; absent fields keep
/// the base value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    /// Width before clamping.
    pub width: Option<i64>,
    /// Height before clamping.
    pub height: Option<i64>,
    /// Image count before flooring at zero.
    pub total_images: Option<i64>,
    /// MIME type, case-insensitive.
    pub format: Option<String>,
    /// Output name template.
    pub name_template: Option<String>,
    /// Output folder before normalization.
    pub target_folder: Option<String>,
    /// Generator selection; an empty list selects the whole catalog.
    pub generators: Option<Vec<String>>,
    /// Random single strategy (`true`) or composite (`false`).
    pub random_single: Option<bool>,
    /// `Some(None)` resets to automatic.
    pub iterations: Option<Option<u32>>,
}

impl ConfigOverrides {
    /// Check if any overrides are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Clamp a parsed dimension into range. A failed parse collapses to the minimum.
pub(crate) fn clamp_dimension(parsed: Option<i64>) -> u32 {
    let value = parsed.unwrap_or(i64::from(MIN_DIMENSION));
    let clamped = value.clamp(i64::from(MIN_DIMENSION), i64::from(MAX_DIMENSION));
    u32::try_from(clamped).unwrap_or(MIN_DIMENSION)
}

/// Floor a parsed image count at zero. A failed parse counts as zero.
pub(crate) fn floor_total(parsed: Option<i64>) -> usize {
    parsed.map_or(0, |n| usize::try_from(n.max(0)).unwrap_or(usize::MAX))
}

pub(crate) fn parse_format(token: &str, value: &str) -> Result<ImageFormat, ValidationError> {
    ImageFormat::from_mime(value).ok_or_else(|| ValidationError::InvalidFormat {
        token: token.to_string(),
        value: value.to_lowercase(),
    })
}

/// Parse a leading decimal integer the lenient way: surrounding whitespace
/// and trailing garbage are ignored, `"12px"` is 12 and `"px"` is `None`.
/// Out-of-range values saturate.
pub(crate) fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Lexically normalize a `/`-separated path: collapse repeated separators,
/// drop `.` segments and fold `..` into its parent. A trailing separator is
/// kept and an empty result becomes `.`.
pub(crate) fn normalize_path(raw: &str) -> String {
    if raw.is_empty() {
        return ".".to_string();
    }
    let absolute = raw.starts_with('/');
    let trailing = raw.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let mut out = segments.join("/");
    if absolute {
        out.insert(0, '/');
    }
    if out.is_empty() {
        out.push('.');
    }
    if trailing && !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// Drop repeated names, keeping first occurrences in order.
pub(crate) fn dedup_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}
