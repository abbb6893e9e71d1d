use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use softrender::colors;
use softrender::{FrameBuffer, Mesh, RenderConfig, RenderMode, RenderSession, Texture};

/// Renders a textured OBJ mesh to an image file.
#[derive(Debug, Parser)]
#[command(name = "softrender", version)]
struct Args {
    /// Wavefront OBJ model to render
    #[arg(default_value = "obj/african_head.obj")]
    model: PathBuf,

    /// Diffuse texture; a plain white texture is used if it can't be loaded
    texture: Option<PathBuf>,

    /// Output image, format taken from the extension
    #[arg(default_value = "output.png")]
    output: PathBuf,

    /// TOML render configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// wireframe, flat or textured
    #[arg(short, long)]
    mode: Option<RenderMode>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,
}

fn load_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    config.validate()?;
    Ok(config)
}

fn load_texture(path: Option<&PathBuf>) -> Texture {
    let Some(path) = path else {
        return Texture::solid(colors::WHITE);
    };
    match Texture::from_file(path) {
        Ok(texture) => {
            info!("loaded texture {} ({}x{})", path.display(), texture.width(), texture.height());
            texture
        }
        Err(e) => {
            warn!("could not load texture {}: {e}; using plain white", path.display());
            Texture::solid(colors::WHITE)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let mesh = Mesh::from_obj(&args.model)
        .with_context(|| format!("loading model {}", args.model.display()))?;
    let texture = load_texture(args.texture.as_ref());

    let mut frame = FrameBuffer::new(config.width, config.height);
    let session = RenderSession::new(&mesh, &texture, config.camera_distance, config.light());
    let stats = session.render(config.mode, &mut frame);
    info!(
        "{} render: {} faces drawn, {} facing away",
        config.mode, stats.faces_drawn, stats.faces_rejected
    );

    if config.flip_vertically {
        frame.flip_vertically();
    }
    if config.output_scale.is_some() {
        let (width, height) = config.output_size();
        frame.scale(width, height);
    }

    frame
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!("wrote {} ({}x{})", args.output.display(), frame.width(), frame.height());
    Ok(())
}
