use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Args;
use pagescan_core::enhance::{
    enhance_page, CropRect, PageEdit, PageFilter, PerspectiveQuad, Point, QualityTier, Rotation,
};
use pagescan_core::frame::FrameSample;
use pagescan_core::io::image_io::{load_frame, save_page};

#[derive(Args)]
pub struct EnhanceArgs {
    /// Input image (a single captured frame)
    pub input: PathBuf,

    /// Output page (.png, or .jpg for tier-dependent compression)
    #[arg(short, long, default_value = "page.png")]
    pub output: PathBuf,

    /// Page edit as TOML; individual flags below override it
    #[arg(long)]
    pub edit: Option<PathBuf>,

    /// Clockwise rotation: 0, 90, 180 or 270
    #[arg(long)]
    pub rotate: Option<u32>,

    /// Crop as normalized left,top,right,bottom
    #[arg(long, value_delimiter = ',')]
    pub crop: Option<Vec<f32>>,

    /// Perspective quad as normalized x,y pairs: TL, TR, BR, BL
    #[arg(long, value_delimiter = ',')]
    pub quad: Option<Vec<f32>>,

    /// Filter: document, original, black-white
    #[arg(long)]
    pub filter: Option<String>,

    /// Quality tier: email, balanced, print
    #[arg(long, default_value = "balanced")]
    pub tier: String,
}

impl EnhanceArgs {
    fn page_edit(&self) -> Result<PageEdit> {
        let mut edit: PageEdit = match self.edit {
            Some(ref path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read edit file: {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Failed to parse edit file: {}", path.display()))?
            }
            None => PageEdit::default(),
        };

        if let Some(degrees) = self.rotate {
            edit.rotation = Rotation::try_from(degrees)?;
        }
        if let Some(ref v) = self.crop {
            ensure!(v.len() == 4, "--crop takes 4 values, got {}", v.len());
            edit.crop = CropRect::new(v[0], v[1], v[2], v[3])?;
        }
        if let Some(ref v) = self.quad {
            ensure!(v.len() == 8, "--quad takes 8 values, got {}", v.len());
            let corners = [
                Point::new(v[0], v[1]),
                Point::new(v[2], v[3]),
                Point::new(v[4], v[5]),
                Point::new(v[6], v[7]),
            ];
            edit.perspective = Some(PerspectiveQuad::new(corners)?);
        }
        if let Some(ref name) = self.filter {
            edit.filter = name.parse::<PageFilter>()?;
        }
        Ok(edit)
    }
}

pub fn run(args: &EnhanceArgs) -> Result<()> {
    let edit = args.page_edit()?;
    let tier: QualityTier = args.tier.parse()?;

    let image = load_frame(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    println!(
        "Loaded {}x{} frame from {}",
        image.width(),
        image.height(),
        args.input.display()
    );

    let page = enhance_page(&FrameSample::new(0, image), &edit, tier)?;
    save_page(&page, &args.output)?;

    println!(
        "Saved {}x{} page ({}, {}) to {}",
        page.width(),
        page.height(),
        edit.filter,
        tier,
        args.output.display()
    );
    Ok(())
}
