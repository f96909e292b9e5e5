mod cli;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use sheet::ink::InkFile;
use sheet::{Config, Format, Renderer, design_pages};
use sheet_core::{PadRect, RenderedSheet, build_page_svg};
use tracing::{Level, info};
use worksheet_core::{Design, Page};

use cli::{Cli, Commands, ConfigCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::List => {
            list();
            Ok(())
        }
        Commands::Content { design, page } => content(design, page, &config),
        Commands::Render {
            design,
            page,
            output,
            format,
            ink,
            px_per_mm,
        } => {
            let format = match format.or_else(|| Format::from_path(&output)) {
                Some(f) => f,
                None => anyhow::bail!(
                    "Cannot tell the format of {}; pass --format",
                    output.display()
                ),
            };
            let ink = ink.as_deref().map(InkFile::load).transpose()?;
            let renderer = renderer(&config, px_per_mm)?;
            let pages = design_pages(design, page)?;
            let sheets = render_sheets(&renderer, &pages, ink.as_ref())?;
            write_sheets(&renderer, &pages, &sheets, format, &output, page.is_none())
        }
        Commands::Export {
            out_dir,
            format,
            px_per_mm,
        } => {
            let format = format.unwrap_or(config.render.format);
            let renderer = renderer(&config, px_per_mm)?;
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("Failed to create {}", out_dir.display()))?;
            for design in Design::ALL {
                let pages = design_pages(design, None)?;
                let sheets = render_sheets(&renderer, &pages, None)?;
                let output = out_dir.join(format!("{}.{}", design.id(), format.extension()));
                write_sheets(&renderer, &pages, &sheets, format, &output, true)?;
            }
            Ok(())
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                match cli.config.or_else(Config::default_path) {
                    Some(path) => println!("{}", path.display()),
                    None => anyhow::bail!("Could not determine config directory"),
                }
                Ok(())
            }
            ConfigCommands::Show => {
                print!("{}", config.to_toml()?);
                Ok(())
            }
        },
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn renderer(config: &Config, px_per_mm: Option<f64>) -> Result<Renderer> {
    Renderer::new(&config.fonts, px_per_mm.unwrap_or(config.render.px_per_mm))
}

fn list() {
    for design in Design::ALL {
        println!(
            "{:<9} {} {:<14} {} pages",
            design.id(),
            design.emoji(),
            design.title(),
            design.page_count()
        );
    }
}

#[derive(Serialize)]
struct PageDump<'a> {
    #[serde(flatten)]
    page: &'a Page,
    pads: Vec<PadRect>,
}

fn content(design: Design, page: Option<u32>, config: &Config) -> Result<()> {
    let pages = design_pages(design, page)?;
    let dumps: Vec<PageDump> = pages
        .iter()
        .map(|p| PageDump {
            page: p,
            pads: build_page_svg(p, config.render.px_per_mm, &[]).pads,
        })
        .collect();
    let json = match (page, dumps.as_slice()) {
        (Some(_), [one]) => serde_json::to_string_pretty(one)?,
        _ => serde_json::to_string_pretty(&dumps)?,
    };
    println!("{json}");
    Ok(())
}

/// Pads are numbered across `pages` for ink lookup.
fn render_sheets(
    renderer: &Renderer,
    pages: &[Page],
    ink: Option<&InkFile>,
) -> Result<Vec<RenderedSheet>> {
    let mut sheets = Vec::with_capacity(pages.len());
    let mut first_pad = 0;
    for page in pages {
        let plain = renderer.sheet(page, &[]);
        let sheet = match ink {
            Some(ink) if !plain.pads.is_empty() => {
                let overlays = ink.overlays(first_pad, &plain.pads, renderer.px_per_mm())?;
                renderer.sheet(page, &overlays)
            }
            _ => plain,
        };
        first_pad += sheet.pads.len();
        sheets.push(sheet);
    }
    if let Some(ink) = ink {
        ink.check_pad_count(first_pad);
    }
    Ok(sheets)
}

/// PDF is one file; SVG and PNG get one file per page, numbered when
/// `numbered` is set.
fn write_sheets(
    renderer: &Renderer,
    pages: &[Page],
    sheets: &[RenderedSheet],
    format: Format,
    output: &Path,
    numbered: bool,
) -> Result<()> {
    if format == Format::Pdf {
        return write(output, &renderer.pdf(sheets)?);
    }
    for (page, sheet) in pages.iter().zip(sheets) {
        let path = if numbered {
            numbered_path(output, page.number)
        } else {
            output.to_path_buf()
        };
        if format == Format::Png {
            write(&path, &renderer.png(sheet)?)?;
        } else {
            write(&path, sheet.svg.as_bytes())?;
        }
    }
    Ok(())
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "written");
    Ok(())
}

/// `out/page.png` -> `out/page-2.png`
fn numbered_path(path: &Path, n: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{n}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{n}"),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_path_keeps_directory_and_extension() {
        assert_eq!(
            numbered_path(Path::new("out/fox.png"), 2),
            PathBuf::from("out/fox-2.png")
        );
        assert_eq!(numbered_path(Path::new("sheet"), 1), PathBuf::from("sheet-1"));
    }
}
