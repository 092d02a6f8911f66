//! Built-in drawing strategies rendering onto [`RgbImage`] surfaces.

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::Configuration;
use crate::ports::{GeneratorCatalog, Strategy};

/// Allocate a black RGB surface.
#[must_use]
pub fn rgb_surface(width: u32, height: u32) -> RgbImage {
    RgbImage::new(width, height)
}

type Constructor = fn(&Configuration, StdRng) -> Box<dyn Strategy<RgbImage>>;

/// Registered strategies, in catalog order.
const BUILTINS: &[(&str, Constructor)] = &[
    ("noise", Noise::boxed),
    ("gradient", Gradient::boxed),
    ("stripes", Stripes::boxed),
    ("checkers", Checkers::boxed),
    ("rectangles", Rectangles::boxed),
    ("circles", Circles::boxed),
];

/// The catalog of built-in strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl GeneratorCatalog for BuiltinCatalog {
    type Surface = RgbImage;

    fn names(&self) -> Vec<String> {
        BUILTINS.iter().map(|(name, _)| (*name).to_string()).collect()
    }

    fn create(
        &self,
        name: &str,
        config: &Configuration,
        seed: u64,
    ) -> Option<Box<dyn Strategy<RgbImage>>> {
        BUILTINS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, construct)| construct(config, StdRng::seed_from_u64(seed)))
    }
}

fn random_color(rng: &mut StdRng) -> Rgb<u8> {
    Rgb([rng.gen(), rng.gen(), rng.gen()])
}

/// Passes to draw: the configured count, or a random one in `auto`.
fn passes(config: &Configuration, rng: &mut StdRng, auto: std::ops::RangeInclusive<u32>) -> u32 {
    config.iterations.unwrap_or_else(|| rng.gen_range(auto))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp(a: u8, b: u8, t: f64) -> u8 {
    let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
    v.round().clamp(0.0, 255.0) as u8
}

/// Fill the half-open rectangle `[x0, x1) × [y0, y1)`, clipped to the surface.
fn fill_rect(surface: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    let x1 = x1.min(surface.width());
    let y1 = y1.min(surface.height());
    for y in y0..y1 {
        for x in x0..x1 {
            surface.put_pixel(x, y, color);
        }
    }
}

fn fill_circle(surface: &mut RgbImage, cx: i64, cy: i64, radius: i64, color: Rgb<u8>) {
    let width = i64::from(surface.width());
    let height = i64::from(surface.height());
    let r2 = radius * radius;
    for y in (cy - radius).max(0)..(cy + radius + 1).min(height) {
        for x in (cx - radius).max(0)..(cx + radius + 1).min(width) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r2 {
                // Bounds were clipped above.
                if let (Ok(px), Ok(py)) = (u32::try_from(x), u32::try_from(y)) {
                    surface.put_pixel(px, py, color);
                }
            }
        }
    }
}

/// Independent random color per pixel.
struct Noise {
    rng: StdRng,
}

impl Noise {
    fn boxed(_: &Configuration, rng: StdRng) -> Box<dyn Strategy<RgbImage>> {
        Box::new(Self { rng })
    }
}

impl Strategy<RgbImage> for Noise {
    fn draw(&mut self, surface: &mut RgbImage) {
        for pixel in surface.pixels_mut() {
            *pixel = random_color(&mut self.rng);
        }
    }
}

/// Linear blend between two colors, horizontal or vertical.
struct Gradient {
    rng: StdRng,
}

impl Gradient {
    fn boxed(_: &Configuration, rng: StdRng) -> Box<dyn Strategy<RgbImage>> {
        Box::new(Self { rng })
    }
}

impl Strategy<RgbImage> for Gradient {
    fn draw(&mut self, surface: &mut RgbImage) {
        let from = random_color(&mut self.rng);
        let to = random_color(&mut self.rng);
        let horizontal: bool = self.rng.gen();
        let span = if horizontal { surface.width() } else { surface.height() };
        let span = f64::from(span.saturating_sub(1).max(1));

        for (x, y, pixel) in surface.enumerate_pixels_mut() {
            let t = f64::from(if horizontal { x } else { y }) / span;
            *pixel = Rgb([lerp(from[0], to[0], t), lerp(from[1], to[1], t), lerp(from[2], to[2], t)]);
        }
    }
}

/// Alternating bands; every other band is left untouched.
struct Stripes {
    rng: StdRng,
    bands: u32,
}

impl Stripes {
    fn boxed(config: &Configuration, mut rng: StdRng) -> Box<dyn Strategy<RgbImage>> {
        let bands = passes(config, &mut rng, 4..=16).max(1);
        Box::new(Self { rng, bands })
    }
}

impl Strategy<RgbImage> for Stripes {
    fn draw(&mut self, surface: &mut RgbImage) {
        let vertical: bool = self.rng.gen();
        let (width, height) = surface.dimensions();
        let span = if vertical { width } else { height };
        let band = span.div_ceil(self.bands.min(span)).max(1);

        let mut offset = 0;
        let mut index = 0u32;
        while offset < span {
            if index % 2 == 0 {
                let color = random_color(&mut self.rng);
                if vertical {
                    fill_rect(surface, offset, 0, offset + band, height, color);
                } else {
                    fill_rect(surface, 0, offset, width, offset + band, color);
                }
            }
            offset += band;
            index += 1;
        }
    }
}

/// Two-color checkerboard with a random cell size.
struct Checkers {
    rng: StdRng,
}

impl Checkers {
    fn boxed(_: &Configuration, rng: StdRng) -> Box<dyn Strategy<RgbImage>> {
        Box::new(Self { rng })
    }
}

impl Strategy<RgbImage> for Checkers {
    fn draw(&mut self, surface: &mut RgbImage) {
        let (width, height) = surface.dimensions();
        let cell = self.rng.gen_range(1..=(width.min(height) / 4).max(1));
        let even = random_color(&mut self.rng);
        let odd = random_color(&mut self.rng);
        for (x, y, pixel) in surface.enumerate_pixels_mut() {
            *pixel = if (x / cell + y / cell) % 2 == 0 { even } else { odd };
        }
    }
}

/// Randomly placed filled rectangles.
struct Rectangles {
    rng: StdRng,
    count: u32,
}

impl Rectangles {
    fn boxed(config: &Configuration, mut rng: StdRng) -> Box<dyn Strategy<RgbImage>> {
        let count = passes(config, &mut rng, 3..=24);
        Box::new(Self { rng, count })
    }
}

impl Strategy<RgbImage> for Rectangles {
    fn draw(&mut self, surface: &mut RgbImage) {
        let (width, height) = surface.dimensions();
        for _ in 0..self.count {
            let x = self.rng.gen_range(0..width);
            let y = self.rng.gen_range(0..height);
            let w = self.rng.gen_range(1..=(width / 2).max(1));
            let h = self.rng.gen_range(1..=(height / 2).max(1));
            let color = random_color(&mut self.rng);
            fill_rect(surface, x, y, x.saturating_add(w), y.saturating_add(h), color);
        }
    }
}

/// Randomly placed filled circles.
struct Circles {
    rng: StdRng,
    count: u32,
}

impl Circles {
    fn boxed(config: &Configuration, mut rng: StdRng) -> Box<dyn Strategy<RgbImage>> {
        let count = passes(config, &mut rng, 5..=30);
        Box::new(Self { rng, count })
    }
}

impl Strategy<RgbImage> for Circles {
    fn draw(&mut self, surface: &mut RgbImage) {
        let (width, height) = surface.dimensions();
        let max_radius = (width.min(height) / 4).max(1);
        for _ in 0..self.count {
            let cx = i64::from(self.rng.gen_range(0..width));
            let cy = i64::from(self.rng.gen_range(0..height));
            let radius = i64::from(self.rng.gen_range(1..=max_radius));
            let color = random_color(&mut self.rng);
            fill_circle(surface, cx, cy, radius, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(name: &str, config: &Configuration, seed: u64) -> RgbImage {
        let mut surface = rgb_surface(config.width, config.height);
        let mut strategy = BuiltinCatalog.create(name, config, seed).unwrap();
        strategy.draw(&mut surface);
        surface
    }

    #[test]
    fn catalog_names_are_stable() {
        assert_eq!(
            BuiltinCatalog.names(),
            vec!["noise", "gradient", "stripes", "checkers", "rectangles", "circles"]
        );
        assert!(BuiltinCatalog.contains("circles"));
        assert!(!BuiltinCatalog.contains("Circles"));
    }

    #[test]
    fn unknown_name_is_not_constructed() {
        assert!(BuiltinCatalog.create("sparkles", &Configuration::default(), 0).is_none());
    }

    #[test]
    fn every_strategy_handles_one_pixel_surfaces() {
        let config = Configuration { width: 1, height: 1, ..Configuration::default() };
        for name in BuiltinCatalog.names() {
            let surface = draw(&name, &config, 3);
            assert_eq!(surface.dimensions(), (1, 1), "{name}");
        }
    }

    #[test]
    fn every_strategy_handles_thin_surfaces() {
        for (width, height) in [(1, 37), (53, 1), (2, 3)] {
            let config = Configuration { width, height, iterations: Some(40), ..Configuration::default() };
            for name in BuiltinCatalog.names() {
                assert_eq!(draw(&name, &config, 9).dimensions(), (width, height), "{name}");
            }
        }
    }

    #[test]
    fn same_seed_draws_same_image() {
        let config = Configuration { width: 32, height: 24, ..Configuration::default() };
        for name in BuiltinCatalog.names() {
            assert_eq!(draw(&name, &config, 42), draw(&name, &config, 42), "{name}");
        }
    }

    #[test]
    fn noise_touches_the_surface() {
        let config = Configuration { width: 16, height: 16, ..Configuration::default() };
        let surface = draw("noise", &config, 5);
        assert!(surface.pixels().any(|p| *p != Rgb([0, 0, 0])));
    }

    #[test]
    fn iterations_override_is_respected() {
        let config = Configuration { iterations: Some(0), width: 20, height: 20, ..Configuration::default() };
        let surface = draw("circles", &config, 11);
        assert!(surface.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}
