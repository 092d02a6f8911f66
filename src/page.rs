//! Interactive surface: UI control state in, a self-contained HTML page out.
//!
//! The control state mirrors the generator page's form: size inputs, an image
//! count, an "auto" iterations toggle, a name template, and the generator
//! selection radio group (all / specific / random) with one checkbox per
//! catalog entry. Every render starts from an empty result section.

use std::path::Path;

use base64::Engine;
use image::RgbImage;
use serde::Deserialize;

use crate::configuration::{ConfigOverrides, Configuration};
use crate::error::{ImageError, ValidationError};
use crate::orchestrator::GeneratedImage;
use crate::output::encode;

/// Which generators the page draws with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorMode {
    /// Layer every catalog generator.
    All,
    /// Layer the checked generators.
    Specific,
    /// One random generator per image.
    #[default]
    Random,
}

/// Form state as submitted by the generator page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlState {
    /// Width input.
    pub width: Option<i64>,
    /// Height input.
    pub height: Option<i64>,
    /// Number of images.
    pub amount: Option<i64>,
    /// When checked, the iterations input is ignored.
    pub iterations_auto: bool,
    /// Iterations input.
    pub iterations: Option<u32>,
    /// Name template shown under each image.
    pub template: Option<String>,
    /// Generator radio group.
    pub mode: GeneratorMode,
    /// Checked generator boxes, in catalog order.
    pub generators: Vec<String>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            amount: None,
            iterations_auto: true,
            iterations: None,
            template: None,
            mode: GeneratorMode::default(),
            generators: Vec::new(),
        }
    }
}

impl ControlState {
    /// Load control state from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ImageError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ImageError::Config(format!("Failed to read controls {}: {e}", path.display())))?;
        serde_json::from_str(&contents)
            .map_err(|e| ImageError::Config(format!("Failed to parse controls {}: {e}", path.display())))
    }

    /// Translate the form into configuration overrides.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        let (random_single, generators) = match self.mode {
            GeneratorMode::All => (false, Vec::new()),
            GeneratorMode::Specific => (false, self.generators.clone()),
            GeneratorMode::Random => (true, self.generators.clone()),
        };
        ConfigOverrides {
            width: self.width,
            height: self.height,
            total_images: self.amount,
            name_template: self.template.clone(),
            generators: Some(generators),
            random_single: Some(random_single),
            iterations: Some(if self.iterations_auto { None } else { self.iterations }),
            ..ConfigOverrides::default()
        }
    }

    /// Apply the form on top of `base`.
    ///
    /// # Errors
    ///
    /// Propagates [`Configuration::with_overrides`] failures.
    pub fn resolve(&self, base: &Configuration) -> Result<Configuration, ValidationError> {
        base.with_overrides(&self.overrides())
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Render every generated image into an HTML page, embedding the encoded
/// surfaces as data URIs.
///
/// Images are pulled from `images` one at a time and dropped once embedded.
///
/// # Errors
///
/// Returns the first error the sequence yields, or an error if a surface
/// cannot be encoded.
pub fn render_page<I, E>(config: &Configuration, images: I) -> Result<String, ImageError>
where
    I: IntoIterator<Item = Result<GeneratedImage<RgbImage>, E>>,
    ImageError: From<E>,
{
    let mime = config.format.mime();
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Random images</title>\n</head>\n<body>\n\
         <section id=\"sctResult\">\n",
    );

    for image in images {
        let image = image?;
        let bytes = encode(&image.surface, config.format)?;
        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        let name = escape_html(&image.name);
        let generators = escape_html(&image.generators.join(", "));
        html.push_str(&format!(
            "<figure data-serial=\"{serial}\"><img src=\"data:{mime};base64,{data}\" alt=\"{name}\" \
             width=\"{width}\" height=\"{height}\"><figcaption>{name} <small>{generators}</small></figcaption></figure>\n",
            serial = image.serial,
            width = image.surface.width(),
            height = image.surface.height(),
        ));
    }

    let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    html.push_str(&format!("</section>\n<footer>Generated {generated_at}</footer>\n</body>\n</html>\n"));
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::ImageFormat;
    use crate::error::GenerationError;

    #[test]
    fn default_controls_pick_random_single() {
        let config = ControlState::default().resolve(&Configuration::default()).unwrap();
        assert!(config.random_single);
        assert!(config.selected_generators.is_empty());
        assert!(config.iterations.is_none());
    }

    #[test]
    fn all_mode_ignores_checked_boxes() {
        let controls = ControlState {
            mode: GeneratorMode::All,
            generators: vec!["noise".into()],
            ..ControlState::default()
        };
        let config = controls.resolve(&Configuration::default()).unwrap();
        assert!(!config.random_single);
        assert!(config.selected_generators.is_empty());
    }

    #[test]
    fn specific_mode_layers_selection() {
        let controls = ControlState {
            mode: GeneratorMode::Specific,
            generators: vec!["circles".into(), "noise".into()],
            ..ControlState::default()
        };
        let config = controls.resolve(&Configuration::default()).unwrap();
        assert!(!config.random_single);
        assert_eq!(config.selected_generators, vec!["circles".to_string(), "noise".to_string()]);
    }

    #[test]
    fn form_values_are_clamped() {
        let controls = ControlState {
            width: Some(0),
            height: Some(50_000),
            amount: Some(-2),
            iterations_auto: false,
            iterations: Some(8),
            ..ControlState::default()
        };
        let config = controls.resolve(&Configuration::default()).unwrap();
        assert_eq!((config.width, config.height, config.total_images), (1, 10_000, 0));
        assert_eq!(config.iterations, Some(8));
    }

    #[test]
    fn controls_parse_from_json() {
        let controls: ControlState = serde_json::from_str(
            r#"{"width": 64, "height": 32, "amount": 2, "mode": "specific", "generators": ["stripes"]}"#,
        )
        .unwrap();
        assert_eq!(controls.mode, GeneratorMode::Specific);
        assert!(controls.iterations_auto);
        assert_eq!(controls.amount, Some(2));
    }

    #[test]
    fn page_embeds_every_image() {
        let config = Configuration { format: ImageFormat::Png, ..Configuration::default() };
        let images = (0..2).map(|serial| {
            Ok::<_, GenerationError>(GeneratedImage {
                surface: RgbImage::new(2, 2),
                name: format!("img<{serial}>"),
                serial,
                generators: vec!["noise".into()],
            })
        });
        let html = render_page(&config, images).unwrap();
        assert_eq!(html.matches("data:image/png;base64,").count(), 2);
        assert!(html.contains("img&lt;1&gt;"));
        assert!(!html.contains("img<1>"));
        assert!(html.ends_with("</html>\n"));
        assert_eq!(html.matches("</figure>\n").count(), 2);
    }

    #[test]
    fn page_stops_at_first_failed_image() {
        let config = Configuration::default();
        let images = vec![
            Ok(GeneratedImage {
                surface: RgbImage::new(1, 1),
                name: "first".into(),
                serial: 0,
                generators: vec!["noise".into()],
            }),
            Err(GenerationError::UnknownGeneratorName("noise".into())),
        ];
        let err = render_page(&config, images).unwrap_err();
        assert!(matches!(err, ImageError::Generation(GenerationError::UnknownGeneratorName(ref n)) if n == "noise"));
    }
}
