//! CLI argument parsing with clap.
//!
//! Flags configure the front end; everything else is collected verbatim as
//! `key:value` tokens for the resolver. Flags may appear before or after the
//! tokens. The built-in help flag is disabled so that `-h`/`--help` reach the
//! resolver like the other help tokens; any other unrecognized hyphenated word
//! is kept as a token and rejected there.

use clap::Parser;

use crate::configuration::ConfigOverrides;

/// Usage text shown for help requests and rejected input.
pub const HELP: &str = "\
Please provide a properly formatted set of arguments:

randimg [FLAGS] [total:]<number of images> [width:<width>] [height:<height>] \
[format:image/jpeg|image/png] [template:<template string>] [output:<path>]

- width/height limit range is 1-10000 pixels; all values will be truncated to nearest min/max
- By default, the generator will produce 5 100x100px JPG images in the work folder.
- By default, the image template is 'random-image-{width}-{height}-{serial}', where each token
  is replaced by the corresponding value. '{generator}' is replaced by the generator name(s).

Flags may appear anywhere among the tokens:
  -g, --generator <NAME>  Use only this generator (repeatable)
  -c, --composite         Layer all selected generators onto every image
      --seed <N>          Seed for reproducible output
      --page <FILE>       Render the images into an HTML page instead of files
      --controls <FILE>   JSON form state for --page
      --list              List the available generators
      --config <FILE>     Config file path override
  -v, --verbose           Verbose output
";

/// Random image generator.
#[derive(Parser, Debug)]
#[command(name = "randimg", version, about, disable_help_flag = true)]
pub struct Cli {
    /// Generator to use; repeat to select several.
    #[arg(short = 'g', long = "generator", value_name = "NAME")]
    pub generators: Vec<String>,

    /// Layer every selected generator onto each image.
    #[arg(short, long)]
    pub composite: bool,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render into an HTML page at this path instead of writing image files.
    #[arg(long)]
    pub page: Option<String>,

    /// JSON form state applied in page mode.
    #[arg(long, requires = "page")]
    pub controls: Option<String>,

    /// List the available generators and exit.
    #[arg(long)]
    pub list: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// `key:value` tokens, a bare image count, or a help token.
    #[arg(allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

impl Cli {
    /// Overrides contributed by command-line flags.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            generators: (!self.generators.is_empty()).then(|| self.generators.clone()),
            random_single: self.composite.then_some(false),
            ..ConfigOverrides::default()
        }
    }
}
