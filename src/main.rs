//! Media Service CLI
//!
//! Command-line interface for listing cameras, checking permission and
//! capturing stills through the media service.

use clap::{Parser, Subcommand};
use media_service::{
    capture::{FileConfig, MediaPlatform, MediaStreamConstraints, VideoElement},
    metrics::{MetricsRegistry, MetricsSnapshot},
    screenshot::Screenshot,
    service::{MediaService, StartOptions},
    MediaError,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "media-service", version, about = "Camera discovery and still capture")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List video inputs with their facing classification.
    Devices,
    /// Trigger the camera permission prompt and report the outcome.
    Permission,
    /// Capture one still image.
    Snapshot {
        /// Write a named image file instead of printing a data URL.
        #[arg(long)]
        file: bool,
        /// Image MIME type (defaults to the configured one).
        #[arg(long)]
        mime: Option<String>,
        /// Output path; data URLs go to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Capture from this device id.
        #[arg(long)]
        device: Option<String>,
    },
    /// Capture stills at a fixed interval until Ctrl-C.
    Watch {
        /// Milliseconds between captures.
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Directory for captured files.
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Print Prometheus metrics on exit.
        #[arg(long)]
        metrics: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("metrics error: {0}")]
    Metrics(#[from] media_service::metrics::MetricsError),
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Media Service v{}", media_service::VERSION);

    let config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    #[cfg(feature = "camera")]
    let platform = media_service::capture::NokhwaPlatform::new();
    #[cfg(not(feature = "camera"))]
    let platform = {
        info!("This is a demonstration using mock camera input");
        media_service::MockPlatform::new()
    };

    if let Err(e) = run(platform, cli.command, config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run<P: MediaPlatform>(
    platform: P,
    command: Command,
    config: FileConfig,
) -> Result<(), CliError> {
    let mut video: VideoElement<P::Stream> = VideoElement::new();
    let mut service = MediaService::new(platform, &mut video).with_config(config.media.clone());

    match command {
        Command::Devices => {
            if !service.request_permission().await? {
                warn!("Camera permission not granted; labels may be empty");
            }
            for camera in service.get_video_devices().await? {
                println!(
                    "{}\t{}\tfront={}\tback={}",
                    camera.id, camera.label, camera.is_front, camera.is_back
                );
            }
        }
        Command::Permission => {
            let granted = service.request_permission().await?;
            println!("{}", if granted { "granted" } else { "denied" });
        }
        Command::Snapshot {
            file: as_file,
            mime,
            output,
            device,
        } => {
            let constraints = match device {
                Some(id) => MediaStreamConstraints::exact_device(id),
                None => MediaStreamConstraints::any_video(),
            };
            service
                .start_camera(StartOptions {
                    constraints,
                    retry_count: None,
                })
                .await?;

            let shot = service.take_screenshot(as_file, mime.as_deref()).await;
            service.stop_camera().await?;

            match (shot?, output) {
                (Screenshot::DataUrl(url), None) => println!("{}", url),
                (Screenshot::DataUrl(url), Some(path)) => std::fs::write(path, url)?,
                (Screenshot::File(file), path) => {
                    let path = path.unwrap_or_else(|| {
                        file_path(&config.output.directory, &file.name, &file.mime_type)
                    });
                    std::fs::write(&path, &file.bytes)?;
                    info!(path = %path.display(), bytes = file.size(), "Snapshot saved");
                }
            }
        }
        Command::Watch {
            interval_ms,
            output_dir,
            metrics,
        } => {
            let running = Arc::new(AtomicBool::new(true));
            let flag = Arc::clone(&running);
            ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))?;

            let interval =
                Duration::from_millis(interval_ms.unwrap_or(config.output.snapshot_interval_ms));
            let directory = output_dir.unwrap_or_else(|| config.output.directory.clone());
            std::fs::create_dir_all(&directory)?;

            let registry = MetricsRegistry::new()?;
            #[cfg(feature = "metrics")]
            let metrics_state = spawn_metrics_server(config.output.metrics_port)?;

            service.start_camera(StartOptions::default()).await?;
            info!(interval_ms = interval.as_millis() as u64, "Watching, press Ctrl-C to stop");

            while running.load(Ordering::SeqCst) {
                match service.take_screenshot(true, None).await {
                    Ok(Screenshot::File(file)) => {
                        let path = file_path(&directory, &file.name, &file.mime_type);
                        std::fs::write(&path, &file.bytes)?;
                        info!(path = %path.display(), "Snapshot saved");
                    }
                    Ok(Screenshot::DataUrl(_)) => {}
                    Err(e) => warn!(error = %e, "Snapshot failed"),
                }

                let snapshot = MetricsSnapshot::from_service(&service);
                registry.update(&snapshot);
                #[cfg(feature = "metrics")]
                if let Some(state) = &metrics_state {
                    state.write().await.update(&snapshot);
                }

                tokio::time::sleep(interval).await;
            }

            service.stop_camera().await?;
            registry.update(&MetricsSnapshot::from_service(&service));
            info!(
                screenshots = service.stats().screenshots,
                retries = service.stats().start_retries,
                "Watch stopped"
            );
            if metrics {
                print!("{}", registry.encode()?);
            }
        }
    }

    Ok(())
}

fn file_path(directory: &Path, name: &str, mime_type: &str) -> PathBuf {
    let extension = mime_type.split('/').nth(1).unwrap_or("bin");
    directory.join(format!("{}.{}", name, extension))
}

#[cfg(feature = "metrics")]
fn spawn_metrics_server(
    port: u16,
) -> Result<
    Option<Arc<tokio::sync::RwLock<media_service::metrics::MetricsState>>>,
    CliError,
> {
    use media_service::metrics::{MetricsServer, MetricsServerConfig};

    if port == 0 {
        return Ok(None);
    }

    let server = MetricsServer::new(MetricsServerConfig::with_port(port), MetricsRegistry::new()?);
    let state = server.state();
    tokio::spawn(async move {
        if let Err(e) = server.run().await {
            warn!(error = %e, "Metrics server stopped");
        }
    });
    Ok(Some(state))
}
