use clarity_base::init_stdout_logger;
use clarity_image::{encode_png, load_image};
use clarity_infer::{Backend, Device, ModelSource, OnnxBackend};
use clarity_pipeline::{EnhanceWorker, FrameOrchestrator, FrameReport, PipelineConfig, diagnostics};
use std::collections::VecDeque;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_MODEL_PATH: &str = "models/FSRCNN-small_x2.onnx";
const DEFAULT_FPS: f64 = 30.0;
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "webp"];

fn list_images(dir: &Path) -> std::io::Result<VecDeque<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        })
        .collect();
    paths.sort();
    Ok(paths.into())
}

/// Write the enhanced frame of a report, if any. Returns whether one was written.
async fn save(report: FrameReport, output_dir: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    let index = report.index;
    let Some(frame) = report.result.into_frame() else {
        return Ok(false);
    };
    let png = encode_png(frame).await?;
    std::fs::write(output_dir.join(format!("frame-{index:05}.png")), png)?;
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_stdout_logger();

    let mut args = env::args().skip(1);
    let (input_dir, output_dir) = match (args.next(), args.next()) {
        (Some(input), Some(output)) => (PathBuf::from(input), PathBuf::from(output)),
        _ => {
            eprintln!("usage: enhance-files <input-dir> <output-dir> [fps]");
            std::process::exit(1);
        }
    };
    let fps: f64 = match args.next() {
        Some(value) => value.parse()?,
        None => DEFAULT_FPS,
    };
    if !fps.is_finite() || fps <= 0.0 {
        return Err(format!("frame rate must be positive, got {fps}").into());
    }

    // Get config and model path from environment or use defaults
    let config = match env::var("CLARITY_CONFIG") {
        Ok(path) => {
            log::info!("config: {path}");
            PipelineConfig::from_json_file(path)?
        }
        Err(_) => PipelineConfig::default(),
    };
    let model_path: PathBuf = env::var("CLARITY_MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
        .into();

    log::info!("loading model {}", model_path.display());
    let backend = OnnxBackend::new(Device::Cpu);
    let model = backend.load_model(ModelSource::File(model_path), config.contract())?;
    log::info!("model loaded ({} backend)", backend.name());

    let mut pending = list_images(&input_dir)?;
    if pending.is_empty() {
        return Err(format!("no images in {}", input_dir.display()).into());
    }
    std::fs::create_dir_all(&output_dir)?;

    let total = pending.len() as u64;
    let mut worker = EnhanceWorker::spawn(FrameOrchestrator::new(model, config)?)?;
    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / fps));

    // every input ends up reported, dropped or unreadable
    let mut accounted = 0u64;
    let mut written = 0u64;
    while accounted < total {
        tokio::select! {
            _ = ticker.tick(), if !pending.is_empty() => {
                let Some(path) = pending.pop_front() else {
                    continue;
                };
                match load_image(&path).await {
                    Ok(raw) => worker.submit(raw)?,
                    Err(error) => {
                        log::warn!("skipping {}: {}", path.display(), error);
                        accounted += 1;
                    }
                }
            }
            report = worker.recv() => {
                let Some(report) = report else {
                    log::error!("worker stopped early");
                    break;
                };
                accounted += 1 + report.dropped;
                log::info!("{}", diagnostics::blur_score_text(report.blur_score));
                log::info!("{}", diagnostics::status_text(&report.result));
                if save(report, &output_dir).await? {
                    written += 1;
                }
            }
        }
    }

    let dropped = worker.dropped();
    worker.shutdown().await?;
    log::info!("{total} frames in, {written} enhanced, {dropped} dropped");
    Ok(())
}
