use scene_client::{AppError, AssetLibrary, LogSurface, RenderContext};
use shared::SceneConfig;
use std::{
    path::PathBuf,
    process::ExitCode,
    thread,
    time::{Duration, Instant},
};

const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = SceneConfig::load_or_default(config_path.as_deref())?;
    log::info!(
        "Spawning {} objects from {} assets, tick every {:?}",
        config.num_objects,
        config.objects.len(),
        config.tick_interval()
    );

    let (link, physics) = physics_server::spawn(config.tick_interval())?;
    let run_for = config.run_duration();
    let library = AssetLibrary::new(&config.asset_dir);
    let surface = LogSurface::new(config.log_every_frames);
    let mut context = RenderContext::new(config, link, library, surface);

    let started = Instant::now();
    let outcome = loop {
        let frame_started = Instant::now();
        if let Err(err) = context.frame() {
            break Err(err);
        }
        if run_for.is_some_and(|limit| started.elapsed() >= limit) {
            break Ok(());
        }
        thread::sleep(FRAME_INTERVAL.saturating_sub(frame_started.elapsed()));
    };

    context.shutdown();
    // A failed worker explains a disconnect better than the disconnect itself.
    physics.join()?;
    outcome?;
    Ok(())
}
