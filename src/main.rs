use clap::Parser;
use tracing::error;

use eidolon::cli::Cli;
use eidolon::document::ShapeDocument;
use eidolon::generator::ExampleGenerator;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let document = ShapeDocument::from_path(&cli.document)?;

    if cli.list {
        for name in document.shape_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(selector) = cli.shape.as_deref() else {
        error!("no shape selected; pass --shape or --list");
        std::process::exit(1);
    };
    let Some(shape) = document.find(selector) else {
        error!(shape = selector, "shape not found in document");
        std::process::exit(1);
    };

    let generator = ExampleGenerator::new();
    match generator.generate(shape, &cli.mime, &cli.options()) {
        Some(text) => {
            println!("{text}");
            Ok(())
        }
        None => {
            error!(mime = %cli.mime, shape = selector, "no example could be generated");
            std::process::exit(1);
        }
    }
}
