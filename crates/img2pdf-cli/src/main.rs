use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use pdf_images::{
    DefaultController, ImageAsset, LayoutOptions, SessionController, SessionStatus,
    default_converter, filter_supported,
};
use std::path::PathBuf;

mod logger;

#[derive(Parser)]
#[command(name = "img2pdf", about = "Convert PNG, JPEG and WebP images into one PDF", version)]
struct Cli {
    /// Input images, one page each, in order
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Output PDF file
    #[arg(short, long, required_unless_present = "plan")]
    output: Option<PathBuf>,

    /// Page size
    #[arg(long, value_enum)]
    page_size: Option<PageSizeArg>,

    /// Page orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// How images are sized on the page
    #[arg(long, value_enum)]
    fit: Option<FitArg>,

    /// Load layout options from a JSON file (flags override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the effective layout options to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Print the placement of every image, don't generate PDF
    #[arg(long)]
    plan: bool,

    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum PageSizeArg {
    A4,
    Letter,
    A3,
    A5,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum FitArg {
    Fit,
    Original,
    Fill,
}

impl From<PageSizeArg> for pdf_images::PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::A4 => Self::A4,
            PageSizeArg::Letter => Self::Letter,
            PageSizeArg::A3 => Self::A3,
            PageSizeArg::A5 => Self::A5,
        }
    }
}

impl From<OrientationArg> for pdf_images::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<FitArg> for pdf_images::FitMode {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::Fit => Self::Fit,
            FitArg::Original => Self::Original,
            FitArg::Fill => Self::Fill,
        }
    }
}

async fn layout_options(cli: &Cli) -> Result<LayoutOptions> {
    let mut options = match &cli.config {
        Some(path) => LayoutOptions::load(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => LayoutOptions::default(),
    };
    if let Some(size) = cli.page_size {
        options.page_size = size.into();
    }
    if let Some(orientation) = cli.orientation {
        options.orientation = orientation.into();
    }
    if let Some(fit) = cli.fit {
        options.fit_mode = fit.into();
    }
    Ok(options)
}

fn print_notices(ctl: &mut DefaultController) {
    for notice in ctl.drain_notices() {
        eprintln!("{}", notice.message());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::from_verbosity(cli.verbose).init()?;

    let options = layout_options(&cli).await?;
    if let Some(path) = &cli.save_config {
        options.save(path).await?;
        println!("Saved options → {}", path.display());
    }

    let assets: Vec<ImageAsset> = cli.inputs.iter().map(ImageAsset::from_path).collect();

    if cli.plan {
        let (supported, rejected) = filter_supported(assets);
        for name in rejected {
            eprintln!("Skipping unsupported file: {name}");
        }
        if supported.is_empty() {
            bail!("no supported images to plan");
        }

        let pages = default_converter().plan(&supported, &options).await?;
        let Some(first) = pages.first() else {
            bail!("no image would produce a page");
        };
        println!(
            "Page: {} {:?} ({:.2} x {:.2} mm), fit: {:?}",
            options.page_size.name(),
            options.orientation,
            first.page_size.0,
            first.page_size.1,
            options.fit_mode
        );
        for (i, page) in pages.iter().enumerate() {
            let g = &page.geometry;
            println!(
                "  {:>3}. {} ({}x{} px): {:.2} x {:.2} mm at ({:.2}, {:.2})",
                i + 1,
                page.source,
                page.pixel_size.0,
                page.pixel_size.1,
                g.width,
                g.height,
                g.x,
                g.y
            );
        }
        return Ok(());
    }

    let Some(output) = cli.output.as_ref() else {
        bail!("an output file is required");
    };

    let mut ctl: DefaultController = SessionController::new(default_converter());
    ctl.set_options(options);
    ctl.add_files(assets);
    print_notices(&mut ctl);

    let status = ctl.convert().await;
    print_notices(&mut ctl);
    if status != SessionStatus::Success {
        bail!("conversion did not complete");
    }

    let bytes = ctl
        .artifact()
        .context("conversion finished without an artifact")?;
    tokio::fs::write(output, bytes)
        .await
        .with_context(|| format!("writing {}", output.display()))?;

    if let Some(conversion) = ctl.last_conversion() {
        for name in &conversion.skipped {
            eprintln!("Skipped {name}: could not be converted to PNG");
        }
        println!(
            "Converted {} image(s) into {} page(s) → {}",
            ctl.session().images.len(),
            conversion.page_count(),
            output.display()
        );
    }

    ctl.reset();
    Ok(())
}
