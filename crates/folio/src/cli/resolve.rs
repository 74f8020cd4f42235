//! The `folio resolve` command.

use clap::Args;
use folio_core::{
    Config, DocumentUriResolver, FileStreamProvider, ImageResourceLoader, RenderContext,
};
use serde::Serialize;
use url::Url;

/// Arguments for the `resolve` command.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Image references: URIs, file paths, or data: strings
    #[arg(required = true)]
    pub references: Vec<String>,

    /// Base document URI for resolving relative references
    #[arg(long)]
    pub base: Option<String>,

    /// Device scale factor (dots per pixel); defaults to the configured value
    #[arg(long)]
    pub dpp: Option<f32>,

    /// Emit results as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// One resolution result, as reported to the user.
#[derive(Serialize, Debug)]
struct ResolveReport {
    reference: String,
    source: Option<String>,
    resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media_type: Option<String>,
}

/// Execute the resolve command.
pub fn execute(args: ResolveArgs, config: &Config) -> anyhow::Result<()> {
    let reports = resolve_references(&args, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            let shown = report.source.as_deref().unwrap_or("<embedded>");
            match (report.width, report.height) {
                (Some(w), Some(h)) => println!("{shown}: {w}x{h}"),
                _ => println!("{shown}: unresolved"),
            }
        }
    }

    Ok(())
}

/// Resolve every reference and collect per-reference reports.
///
/// Individual failures land in the report as `resolved: false`; only invalid
/// arguments (bad base URI, non-positive scale factor) abort the run.
fn resolve_references(args: &ResolveArgs, config: &Config) -> anyhow::Result<Vec<ResolveReport>> {
    let resolver = match &args.base {
        Some(base) => {
            let url = Url::parse(base)
                .map_err(|e| anyhow::anyhow!("invalid --base URI '{base}': {e}"))?;
            DocumentUriResolver::with_base(url)
        }
        None => DocumentUriResolver::new(),
    };
    let loader = ImageResourceLoader::new(
        config,
        Box::new(resolver),
        Box::new(FileStreamProvider::new()),
    );

    let dpp = args.dpp.unwrap_or(config.resolution.dots_per_pixel);
    anyhow::ensure!(
        dpp.is_finite() && dpp > 0.0,
        "--dpp must be a positive finite number"
    );
    let ctx = RenderContext::new(dpp);

    let mut reports = Vec::with_capacity(args.references.len());
    for reference in &args.references {
        let resource = loader.resolve(reference, &ctx);
        let (width, height) = match resource.dimensions() {
            Some((w, h)) => (Some(w), Some(h)),
            None => (None, None),
        };
        reports.push(ResolveReport {
            reference: reference.clone(),
            resolved: resource.has_image(),
            media_type: resource
                .image
                .as_ref()
                .and_then(|img| img.media_type().map(str::to_string)),
            source: resource.source,
            width,
            height,
        });
    }
    Ok(reports)
}
