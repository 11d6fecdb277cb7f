//! inkbox CLI
//!
//! Lays out a JSON box-tree document and either renders it to PNG or
//! prints the resulting lines.

mod document;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use inkbox_layout::{
    ApproximateFontMetrics, BoxTree, ColorValue, DEFAULT_FONT_FAMILY, FontDescriptor,
    FragmentContent, LayoutBox, LayoutBoxKind, LayoutEngine, LayoutOptions, Rect, TextMeasurer,
    render,
};
use inkbox_render::{FontLibrary, FontVariant, FontdueMeasurer, RasterSurface};
use owo_colors::OwoColorize;

use document::Document;

/// Box-model text layout for small documents
#[derive(Parser, Debug)]
#[command(name = "inkbox")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the lines a document breaks into at 320px
    inkbox --width 320 --dump-lines doc.json

    # Render to PNG with the system sans-serif font
    inkbox -o out.png doc.json

    # Render with a specific font file
    inkbox -o out.png --font ./fonts/Inter.ttf --font-family Inter doc.json

Set RUST_LOG=debug for layout diagnostics.
"#)]
struct Cli {
    /// Path to the JSON document
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Width of the layout area in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// Height of the layout area in pixels
    #[arg(long, default_value = "480")]
    height: u32,

    /// Render to this file (PNG format)
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Font file to load instead of searching the system
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Base font family of the document (and the family --font registers)
    #[arg(long, value_name = "NAME")]
    font_family: Option<String>,

    /// Draw content that overflows the layout area
    #[arg(long)]
    no_clip: bool,

    /// Print every laid out line (the default when no --output is given)
    #[arg(long)]
    dump_lines: bool,

    /// Keep source newlines as forced breaks under every white-space policy
    #[arg(long)]
    preserve_breaks: bool,

    /// Tab stop distance in spaces, overriding the document's options
    #[arg(long, value_name = "N")]
    tab_size: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read '{}'", cli.input.display()))?;
    let document = Document::from_json(&source)?;

    let mut options = document.options.clone();
    if let Some(tab_size) = cli.tab_size {
        options.tab_size = tab_size;
    }

    let family = cli.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY);
    let base_font = FontDescriptor::new(family, options.default_font_size);
    let tree = document.build_tree(&base_font, cli.preserve_breaks)?;

    let fonts = load_fonts(cli.font.as_deref(), family)?;
    let fontdue = FontdueMeasurer::new(&fonts);
    let measurer: &dyn TextMeasurer = if fonts.is_empty() {
        log::warn!("no fonts available; measuring with approximate metrics");
        &ApproximateFontMetrics
    } else {
        &fontdue
    };

    #[allow(clippy::cast_precision_loss)]
    let area = Rect::new(0.0, 0.0, cli.width as f32, cli.height as f32);

    let layout = if let Some(ref output_path) = cli.output {
        let layout = render_to_file(
            &tree,
            area,
            !cli.no_clip,
            measurer,
            &fonts,
            &options,
            output_path,
        )
        .with_context(|| format!("failed to render '{}'", cli.input.display()))?;
        println!("Rendered to: {}", output_path.display());
        layout
    } else {
        LayoutEngine::new(&tree, measurer)
            .with_options(options)
            .layout(tree.root(), area)
    };

    if cli.dump_lines || cli.output.is_none() {
        print_layout_box(&layout, 0);
    }
    Ok(())
}

fn load_fonts(font_path: Option<&Path>, family: &str) -> Result<FontLibrary> {
    let mut fonts = FontLibrary::new();
    match font_path {
        Some(path) => fonts.load_file(family, FontVariant::Regular, path)?,
        None => {
            let _ = fonts.load_system_fonts();
        }
    }
    Ok(fonts)
}

fn render_to_file(
    tree: &BoxTree,
    area: Rect,
    clip: bool,
    measurer: &dyn TextMeasurer,
    fonts: &FontLibrary,
    options: &LayoutOptions,
    output_path: &Path,
) -> Result<LayoutBox> {
    let (width, height) = (area.width.max(1.0), area.height.max(1.0));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut surface = RasterSurface::new(width as u32, height as u32, ColorValue::WHITE, fonts);
    let layout = render(tree, tree.root(), area, clip, measurer, &mut surface, options);
    surface.save(output_path)?;
    Ok(layout)
}

/// Recursively print a layout box and its lines
fn print_layout_box(layout_box: &LayoutBox, depth: usize) {
    let indent = "  ".repeat(depth);
    let content = layout_box.dimensions.content;
    let name = match layout_box.kind {
        LayoutBoxKind::Principal(id) => format!("{id:?}"),
        LayoutBoxKind::Anonymous => "Anonymous".to_string(),
    };

    println!(
        "{indent}[{}] {}",
        name.bold(),
        format!(
            "x={:.1} y={:.1} w={:.1} h={:.1}",
            content.x, content.y, content.width, content.height
        )
        .dimmed()
    );

    for (index, line) in layout_box.lines.iter().enumerate() {
        let text = if line.is_blank() {
            "(blank)".dimmed().to_string()
        } else {
            format!("{:?}", line.text()).green().to_string()
        };
        let overflow = if line.natural_width > content.width + 0.01 {
            " overflow".yellow().to_string()
        } else {
            String::new()
        };
        let end = if line.hard_break { " ⏎" } else { "" };
        println!(
            "{indent}  {} {} {text}{end}{overflow}",
            format!("line {index}").cyan(),
            format!(
                "y={:.1} w={:.1} h={:.1}",
                line.bounds.y, line.natural_width, line.bounds.height
            )
            .dimmed(),
        );
        for fragment in &line.fragments {
            if let FragmentContent::InlineBlock(inner) = &fragment.content {
                print_layout_box(inner, depth + 2);
            }
        }
    }

    for child in &layout_box.children {
        print_layout_box(child, depth + 1);
    }
}
