use std::process::ExitCode;

use rosu_playback::{
    config::Config, import, palette::ComboPalette, processor::Playback, runner::Runner,
};

const DEFAULT_FPS: f64 = 240.0;
/// Playback starts this long before the first object
const LEAD_IN: f64 = 2000.0;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);

    let Some(path) = args.next() else {
        tracing::error!("Usage: rosu-playback <beatmap.osu> [fps] [settings.ini]");
        return ExitCode::FAILURE;
    };

    let fps = match args.next().map(|fps| fps.parse::<f64>()) {
        None => DEFAULT_FPS,
        Some(Ok(fps)) if fps > 0.0 => fps,
        Some(_) => {
            tracing::error!("fps must be a positive number");
            return ExitCode::FAILURE;
        }
    };

    let mut chart = match import::from_path(&path) {
        Ok(chart) => chart,
        Err(e) => {
            tracing::error!("Failed to load {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Without a settings file the runner plays by itself
    let config = match args.next() {
        None => Config {
            autoplay: true,
            ..Default::default()
        },
        Some(settings) => {
            let config = match Config::from_path(&settings) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Failed to read settings {settings}: {e}");
                    return ExitCode::FAILURE;
                }
            };

            match ComboPalette::from_path(&settings) {
                Ok(Some(palette)) => {
                    tracing::info!("Using {} combo colours from {settings}", palette.len());
                    chart = chart.with_palette(palette);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!("Failed to read colours from {settings}: {e}");
                    return ExitCode::FAILURE;
                }
            }

            config
        }
    };

    let mut playback = Playback::new(chart, config);
    let mut runner = Runner::new(&playback, fps, LEAD_IN);

    if !runner.is_autoplay() {
        tracing::info!("Autoplay is disabled, playing without input");
    }

    let frames = runner.run(&mut playback);

    let score = playback.score();
    tracing::info!(
        "Score {} | {} hits ({} / {} / {}) | {} misses | {:.2}% accuracy | {} frames",
        score.total(),
        score.hits(),
        score.greats(),
        score.goods(),
        score.mehs(),
        score.misses(),
        score.accuracy() * 100.0,
        frames,
    );

    ExitCode::SUCCESS
}
