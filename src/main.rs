use clap::{Parser, Subcommand, ValueEnum};
use copydeck::carousel::{
    ShowcaseModel, ShowcaseMotion, VelocityModel, VelocityMotion, sample_poses,
};
use copydeck::gradient::{DEFAULT_DIRECTION, GradientOptions};
use copydeck::navigation::navigation_for;
use copydeck::store::ContentStore;
use copydeck::{config, output, render};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "copydeck")]
#[command(about = "Marketing site renderer for CMS-managed copy")]
#[command(long_about = "\
Marketing site renderer for CMS-managed copy

Site copy is authored in a headless CMS and exported as two JSON documents:
slug layouts (templates) and pages (templates with values filled in). Every
page id becomes a route, and one page describes the nav bar.

Content structure:

  content/
  ├── config.toml     # Site config (optional, overrides stock defaults)
  ├── slugs.json      # { slugId: { title, url, components } }
  └── pages.json      # { pageId: { title, url, slugLayout, components } }

Navigation page layout (top-level components, in order):
  URL                       simple link
  ComponentList rigid=true  dropdown: Text title, then up to 4 columns
  Heading / Image           logo, not a link

Set RUST_LOG=debug for detailed logs.

Run 'copydeck gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    content: PathBuf,

    /// Directory holding config.toml (defaults to the content directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate pages against their layouts and report navigation gaps
    Check,
    /// List pages in document order
    Pages,
    /// Show the navigation as it will render
    Nav,
    /// Render every route to static HTML
    Render {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Build a CSS gradient value
    Gradient {
        /// Color stop, repeat for each stop
        #[arg(long = "color", required = true)]
        colors: Vec<String>,
        /// Stop position in [0, 1], one per color
        #[arg(long = "percentage")]
        percentages: Vec<f64>,
        /// Opacity in [0, 1] applied to every color
        #[arg(long, default_value_t = 1.0)]
        opacity: f64,
        /// Linear gradient direction
        #[arg(long, default_value = DEFAULT_DIRECTION)]
        direction: String,
        /// Make a radial gradient with this shape, e.g. "circle at center"
        #[arg(long)]
        radial: Option<String>,
    },
    /// Sample carousel poses over time using the configured motion
    Carousel {
        #[arg(long, value_enum, default_value_t = CarouselKind::Showcase)]
        model: CarouselKind,
        /// Seconds to simulate
        #[arg(long, default_value_t = 2.0)]
        duration: f64,
        /// Seconds between samples
        #[arg(long, default_value_t = 0.5)]
        step: f64,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum CarouselKind {
    Showcase,
    Velocity,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config_dir = cli.config.clone().unwrap_or_else(|| cli.content.clone());

    match cli.command {
        Command::Check => {
            let site = config::load_config(&config_dir)?;
            let store = ContentStore::load(&cli.content, &site.content)?;
            println!("==> Checking {}", cli.content.display());
            let navigation = navigation_for(&store, &site.content.navigation_page);
            output::print_check_output(&store, &navigation);
            if !output::collect_issues(&store).is_empty() {
                return Err("content has structural issues".into());
            }
        }
        Command::Pages => {
            let site = config::load_config(&config_dir)?;
            let store = ContentStore::load(&cli.content, &site.content)?;
            output::print_pages(&store);
        }
        Command::Nav => {
            let site = config::load_config(&config_dir)?;
            let store = ContentStore::load(&cli.content, &site.content)?;
            output::print_navigation(&navigation_for(&store, &site.content.navigation_page));
        }
        Command::Render { output: out_dir } => {
            let site = config::load_config(&config_dir)?;
            let store = ContentStore::load(&cli.content, &site.content)?;
            println!("==> Rendering {} → {}", cli.content.display(), out_dir.display());
            let written = render::write_site(&store, &site, &out_dir)?;
            output::print_render_output(&written, &out_dir);
        }
        Command::Gradient {
            colors,
            percentages,
            opacity,
            direction,
            radial,
        } => {
            let mut options = GradientOptions::new(colors)
                .opacity(opacity)
                .direction(direction);
            if !percentages.is_empty() {
                options = options.percentages(percentages);
            }
            if let Some(shape) = radial {
                options = options.radial(shape);
            }
            println!("{}", options.build()?);
        }
        Command::Carousel {
            model,
            duration,
            step,
        } => {
            let site = config::load_config(&config_dir)?;
            let frames = match model {
                CarouselKind::Showcase => sample_poses(
                    ShowcaseMotion::new(ShowcaseModel::new(site.carousel)?),
                    duration,
                    step,
                )?,
                CarouselKind::Velocity => sample_poses(
                    VelocityMotion::new(VelocityModel::new(site.velocity)?),
                    duration,
                    step,
                )?,
            };
            output::print_carousel_frames(&frames);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
