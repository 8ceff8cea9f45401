use anyhow::{bail, Context, Result};
use clap::Parser;
use image::GenericImageView;
use log::{error, info, warn};
use silhouette::{
    clamp_intensity, derive_output_path, open_image, save_png, silhouette_dynamic, Config,
    ImageFolder, SilhouetteParams,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn an image, or a folder of images, into black-and-white silhouettes")]
struct Args {
    /// Input image (png/jpg/jpeg) or a folder of images
    #[arg(short, long)]
    input: PathBuf,

    /// Silhouette intensity in [0.1, 1.0]; higher lowers the luminance cutoff
    #[arg(short = 't', long)]
    intensity: Option<f64>,

    /// Output file for a single image, output directory for a folder
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config file (intensity, suffix, recursive)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file name suffix: <stem>-<suffix>.png
    #[arg(long)]
    suffix: Option<String>,

    /// Only convert images directly inside the input folder
    #[arg(long)]
    no_recursive: bool,
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(intensity) = args.intensity {
        config.intensity = intensity;
    }
    if let Some(suffix) = &args.suffix {
        config.suffix = suffix.clone();
    }
    if args.no_recursive {
        config.recursive = false;
    }

    let clamped = clamp_intensity(config.intensity);
    if clamped != config.intensity {
        warn!(
            "intensity {} is outside [0.1, 1.0], using {clamped}",
            config.intensity
        );
        config.intensity = clamped;
    }

    Ok(config)
}

fn convert_file(input: &Path, output: &Path, params: SilhouetteParams) -> Result<()> {
    let original = open_image(input)
        .with_context(|| format!("Failed to open input image: {}", input.display()))?;
    let (w, h) = original.dimensions();
    println!("Loaded: {} ({}x{})", input.display(), w, h);

    let silhouette = silhouette_dynamic(&original, params);
    save_png(&silhouette, output)
        .with_context(|| format!("Failed to save output image: {}", output.display()))?;

    println!("Wrote: {}", output.display());
    Ok(())
}

fn is_previous_output(path: &Path, suffix: &str) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(&format!("-{suffix}")))
}

#[derive(Debug, Default, PartialEq)]
struct BatchSummary {
    converted: usize,
    skipped: usize,
    failed: usize,
}

fn batch_target(path: &Path, root: &Path, out_dir: Option<&Path>, suffix: &str) -> Result<PathBuf> {
    let derived = derive_output_path(path, suffix)?;
    Ok(match out_dir {
        Some(dir) => dir.join(derived.strip_prefix(root).unwrap_or(&derived)),
        None => derived,
    })
}

fn run_batch(folder: &ImageFolder, out_dir: Option<&Path>, config: &Config) -> BatchSummary {
    let mut summary = BatchSummary::default();
    let mut written: HashSet<PathBuf> = HashSet::new();

    for (index, path) in folder.iter().enumerate() {
        if is_previous_output(path, &config.suffix) {
            info!("skipping earlier output {}", path.display());
            summary.skipped += 1;
            continue;
        }
        if let Some(label) = folder.position_label(index) {
            info!("[{label}]");
        }

        let result = batch_target(path, folder.root(), out_dir, &config.suffix).and_then(|target| {
            if written.contains(&target) {
                bail!(
                    "{} would overwrite {} from an earlier image with the same stem",
                    path.display(),
                    target.display()
                );
            }
            convert_file(path, &target, config.params())?;
            Ok(target)
        });

        match result {
            Ok(target) => {
                written.insert(target);
                summary.converted += 1;
            }
            Err(e) => {
                error!("{e:#}");
                summary.failed += 1;
            }
        }
    }

    summary
}

fn convert_folder(root: &Path, out_dir: Option<&Path>, config: &Config) -> Result<BatchSummary> {
    let folder = ImageFolder::scan(root, config.recursive)
        .with_context(|| format!("Failed to scan folder: {}", root.display()))?;

    if folder.is_empty() {
        println!(
            "No supported images found in {} (supported: JPG, JPEG, PNG)",
            root.display()
        );
        return Ok(BatchSummary::default());
    }

    let summary = run_batch(&folder, out_dir, config);
    println!(
        "Converted {} image(s), {} skipped, {} failed",
        summary.converted, summary.skipped, summary.failed
    );
    if summary.failed > 0 {
        bail!(
            "{} image(s) under {} could not be converted",
            summary.failed,
            root.display()
        );
    }
    Ok(summary)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = resolve_config(&args)?;
    info!("intensity {:.2}", config.intensity);

    let metadata = std::fs::metadata(&args.input)
        .with_context(|| format!("Failed to read input: {}", args.input.display()))?;

    if metadata.is_dir() {
        convert_folder(&args.input, args.output.as_deref(), &config)?;
        Ok(())
    } else {
        let output = match &args.output {
            Some(path) => path.clone(),
            None => derive_output_path(&args.input, &config.suffix)?,
        };
        convert_file(&args.input, &output, config.params())
    }
}


#[cfg(test)]
mod batch_tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use silhouette::load_image;
    use std::fs;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = RgbaImage::from_pixel(width, height, Rgba([20, 20, 20, 255]));
        save_png(&img, path).unwrap();
    }

    // a.png, nested/b.png, broken.png (corrupt), old-silhouette.png (earlier output)
    fn mixed_folder() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("a.png"), 3, 3);
        write_png(&dir.path().join("nested/b.png"), 4, 2);
        write_png(&dir.path().join("old-silhouette.png"), 1, 1);
        fs::write(dir.path().join("broken.png"), b"not a png at all").unwrap();
        dir
    }

    #[test]
    fn failures_are_counted_and_the_run_continues() {
        let dir = mixed_folder();
        let folder = ImageFolder::scan(dir.path(), true).unwrap();
        let summary = run_batch(&folder, None, &Config::default());

        assert_eq!(
            summary,
            BatchSummary {
                converted: 2,
                skipped: 1,
                failed: 1,
            }
        );
        assert!(dir.path().join("a-silhouette.png").is_file());
        assert!(dir.path().join("nested/b-silhouette.png").is_file());
        assert!(!dir.path().join("broken-silhouette.png").exists());
        assert!(!dir.path().join("old-silhouette-silhouette.png").exists());
    }

    #[test]
    fn any_failure_makes_the_folder_run_an_error() {
        let dir = mixed_folder();
        let err = convert_folder(dir.path(), None, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("1 image(s)"), "{err}");
    }

    #[test]
    fn clean_folder_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("a.png"), 2, 2);
        let summary = convert_folder(dir.path(), None, &Config::default()).unwrap();
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn empty_folder_is_reported_not_failed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"hi").unwrap();
        let summary = convert_folder(dir.path(), None, &Config::default()).unwrap();
        assert_eq!(summary, BatchSummary::default());
    }

    #[test]
    fn output_dir_mirrors_the_folder_layout() {
        let dir = mixed_folder();
        let out = tempfile::tempdir().unwrap();
        let folder = ImageFolder::scan(dir.path(), true).unwrap();
        let summary = run_batch(&folder, Some(out.path()), &Config::default());

        assert_eq!(summary.converted, 2);
        assert!(out.path().join("a-silhouette.png").is_file());
        assert!(out.path().join("nested/b-silhouette.png").is_file());
        assert!(!dir.path().join("a-silhouette.png").exists());
        assert_eq!(
            load_image(&out.path().join("nested/b-silhouette.png"))
                .unwrap()
                .dimensions(),
            (4, 2)
        );
    }

    #[test]
    fn shared_stem_does_not_overwrite_earlier_output() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("moon.jpeg"), 5, 5);
        write_png(&dir.path().join("moon.png"), 2, 2);

        let folder = ImageFolder::scan(dir.path(), true).unwrap();
        let summary = run_batch(&folder, None, &Config::default());

        assert_eq!(summary.converted, 1);
        assert_eq!(summary.failed, 1);
        let kept = load_image(&dir.path().join("moon-silhouette.png")).unwrap();
        assert_eq!(kept.dimensions(), (5, 5));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_name_fails_alone() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("a.png"), 2, 2);
        write_png(&dir.path().join(OsStr::from_bytes(b"b\xff.png")), 2, 2);
        write_png(&dir.path().join("c.png"), 2, 2);

        let folder = ImageFolder::scan(dir.path(), true).unwrap();
        assert_eq!(folder.len(), 3);
        let summary = run_batch(&folder, None, &Config::default());

        assert_eq!(summary.converted, 2);
        assert_eq!(summary.failed, 1);
        assert!(dir.path().join("a-silhouette.png").is_file());
        assert!(dir.path().join("c-silhouette.png").is_file());
    }
}
