//! Randimg - random image generation CLI.

use std::path::Path;
use std::process;

use clap::Parser;
use tracing::info;

use randimg::cli::{Cli, HELP};
use randimg::config::{self, Config};
use randimg::context::ServiceContext;
use randimg::output::{output_path, save_image};
use randimg::page::{render_page, ControlState};
use randimg::{resolve_arguments, GeneratorCatalog, ImageError};

fn main() {
    let cli = Cli::parse();
    randimg::logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        if matches!(e, ImageError::Validation(_)) {
            eprintln!("{HELP}");
        }
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ImageError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let file_config = Config::load(&config_path).map_err(ImageError::Config)?;

    let ctx = ServiceContext::builtin(cli.seed.or(file_config.defaults.seed));

    if cli.list {
        for name in ctx.catalog.names() {
            println!("{name}");
        }
        return Ok(());
    }

    // Resolve tokens, then layer file defaults and flags on top
    let resolved = resolve_arguments(&cli.tokens)?;
    if resolved.help_requested {
        println!("{HELP}");
        return Ok(());
    }
    let config = resolved
        .with_overrides(&file_config.overrides())?
        .with_overrides(&cli.overrides())?;

    if let Some(ref page) = cli.page {
        let config = match cli.controls {
            Some(ref controls) => ControlState::load(Path::new(controls))?.resolve(&config)?,
            None => config,
        };
        info!(total = config.total_images, page = %page, "rendering page");
        let html = render_page(&config, ctx.run(&config)?)?;
        std::fs::write(page, html)?;
        eprintln!("Page written: {page}");
        return Ok(());
    }

    info!(total = config.total_images, folder = %config.target_folder, "writing images");
    for image in ctx.run(&config)? {
        let image = image?;
        let path = output_path(&config.target_folder, &image.name, config.format);
        save_image(&image.surface, config.format, &path)?;
        eprintln!("Saved: {}", path.display());
    }

    Ok(())
}
