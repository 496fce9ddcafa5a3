use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ribbon::mesh::write_obj;
use ribbon::options::Options;
use ribbon::pipeline::model_ribbon;
use ribbon::structure;

/// Build a cartoon ribbon mesh from a PDB or mmCIF structure and export it
/// as Wavefront OBJ.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Structure file (.pdb, .cif, .mmcif).
    #[arg(value_name = "PATH")]
    input: PathBuf,

    /// Output OBJ path.
    #[arg(short, long, value_name = "PATH", default_value = "out.obj")]
    output: PathBuf,

    /// TOML options preset.
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// Cross-section width (overrides the preset).
    #[arg(long)]
    width: Option<f64>,

    /// Cross-section height; 0 gives a flat ribbon (overrides the preset).
    #[arg(long)]
    height: Option<f64>,

    /// Curve samples per residue (overrides the preset).
    #[arg(long)]
    density: Option<usize>,

    /// Worker threads for per-chain generation.
    #[arg(short = 'j', long, value_name = "NUM")]
    threads: Option<usize>,
}

impl Cli {
    fn options(&self) -> anyhow::Result<Options> {
        let mut options = match &self.options {
            Some(path) => Options::load(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => Options::default(),
        };
        if let Some(width) = self.width {
            options.ribbon.width = width;
        }
        if let Some(height) = self.height {
            options.ribbon.height = height;
        }
        if let Some(density) = self.density {
            options.ribbon.density = density;
        }
        options.validate()?;
        Ok(options)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let options = cli.options()?;

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("building thread pool")?;
    }

    let model = structure::load(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;
    let palette = options.colors.chain_palette()?;

    let mut mesh = model_ribbon(&model, &options.ribbon, &palette);
    let _ = options.view.apply(&mut mesh);

    let file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    write_obj(&mesh, BufWriter::new(file))?;

    log::info!(
        "wrote {}: {} triangles, {} lines",
        cli.output.display(),
        mesh.triangles.len(),
        mesh.lines.len()
    );
    Ok(())
}
