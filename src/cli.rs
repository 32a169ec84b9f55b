use crate::config::{Config, load_config};
use crate::layout::{DiagramKind, Layout, compute_layout};
use crate::layout_dump::write_layout_dump;
use crate::render::{RenderedDiagram, render_svg, write_output_svg};
use crate::spec::{Spec, parse_spec};
use crate::viewport::{Viewport, page_html, write_output_html};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "uiarch", version, about = "Render IA, swimlane flow and decision diagrams from a JSON spec")]
pub struct Args {
    /// Input spec file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file or directory. Defaults to stdout for a single SVG or HTML.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Diagram to render
    #[arg(short = 'd', long = "diagram", value_enum, default_value = "all")]
    pub diagram: DiagramSelection,

    /// Config JSON file with layout/render overrides
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Padding added around each document, in px
    #[arg(short = 'm', long = "margin")]
    pub margin: Option<f32>,

    /// Viewport zoom in percent (HTML output)
    #[arg(short = 'z', long = "zoom")]
    pub zoom: Option<u32>,

    /// Viewport height in px (HTML output)
    #[arg(short = 'H', long = "viewportHeight")]
    pub viewport_height: Option<u32>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Html,
    Layout,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Html => "html",
            OutputFormat::Layout => "json",
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramSelection {
    Ia,
    Flow,
    Decision,
    All,
}

impl DiagramSelection {
    fn kinds(self) -> Vec<DiagramKind> {
        match self {
            DiagramSelection::Ia => vec![DiagramKind::Ia],
            DiagramSelection::Flow => vec![DiagramKind::Flow],
            DiagramSelection::Decision => vec![DiagramKind::Decision],
            DiagramSelection::All => DiagramKind::ALL.to_vec(),
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(margin) = args.margin {
        config.render.margin = margin.max(0.0);
    }
    if let Some(zoom) = args.zoom {
        config.viewport.zoom_percent = zoom;
    }
    if let Some(height) = args.viewport_height {
        config.viewport.height_px = height;
    }

    let input = read_input(args.input.as_deref())?;
    let spec = parse_spec(&input)?;
    let kinds = args.diagram.kinds();
    info!(diagrams = kinds.len(), format = args.output_format.extension(); "rendering spec");

    match args.output_format {
        OutputFormat::Html => {
            let viewport = Viewport::from_config(&config.viewport)?;
            let diagrams = render_kinds(&spec, &config, &kinds);
            let html = page_html(&spec.project.title, &diagrams, &viewport);
            write_output_html(&html, args.output.as_deref())?;
        }
        OutputFormat::Layout => {
            let layouts: Vec<Layout> = kinds
                .iter()
                .map(|kind| compute_layout(*kind, &spec, &config.layout))
                .collect();
            let output = ensure_output(&args.output, "layout")?;
            write_layout_dump(&output, &layouts)?;
        }
        OutputFormat::Svg | OutputFormat::Png => {
            let diagrams = render_kinds(&spec, &config, &kinds);
            let outputs = resolve_outputs(args.output.as_deref(), args.output_format, &kinds)?;
            for (diagram, output) in diagrams.iter().zip(outputs) {
                write_diagram(diagram, output.as_deref(), args.output_format, &config)?;
            }
        }
    }

    Ok(())
}

fn render_kinds(spec: &Spec, config: &Config, kinds: &[DiagramKind]) -> Vec<RenderedDiagram> {
    kinds
        .iter()
        .map(|kind| {
            let layout = compute_layout(*kind, spec, &config.layout);
            render_svg(&layout, &config.render)
        })
        .collect()
}

fn write_diagram(
    diagram: &RenderedDiagram,
    output: Option<&Path>,
    format: OutputFormat,
    config: &Config,
) -> Result<()> {
    match format {
        OutputFormat::Png => {
            let output = output.ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_png(diagram, output, config)?;
        }
        _ => write_output_svg(&diagram.svg, output)?,
    }
    if let Some(path) = output {
        info!(kind = diagram.kind.as_str(), path:? = path; "diagram written");
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(diagram: &RenderedDiagram, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(diagram, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_diagram: &RenderedDiagram, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}

/// One output per diagram. `None` means stdout, allowed only for a single SVG.
fn resolve_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    kinds: &[DiagramKind],
) -> Result<Vec<Option<PathBuf>>> {
    let ext = format.extension();
    if kinds.len() == 1 {
        if output.is_none() && format != OutputFormat::Svg {
            return Err(anyhow::anyhow!("Output path required for {} output", ext));
        }
        if !output.is_some_and(Path::is_dir) {
            return Ok(vec![output.map(Path::to_path_buf)]);
        }
    }

    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required when rendering several diagrams"))?;
    if base.is_dir() {
        return Ok(kinds
            .iter()
            .map(|kind| Some(base.join(format!("{}.{}", kind.as_str(), ext))))
            .collect());
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("diagram");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    Ok(kinds
        .iter()
        .map(|kind| Some(parent.join(format!("{}-{}.{}", stem, kind.as_str(), ext))))
        .collect())
}
