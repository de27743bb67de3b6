use std::{
    io::{self, Write as _},
    thread,
    time::Duration,
};

use camaze::{
    dims::Dims,
    generator::{CellularGenerator, GenParams, GenerationError, Generated},
    progress::{Progress, ProgressHandle},
    random::RngRandomness,
};
use rand::{thread_rng, Rng as _};

use crate::settings::{MazePreset, Settings, SettingsError};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Maze generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),
    #[error("Generator thread panicked")]
    GeneratorPanicked,
    #[error("Output error: {0}")]
    Io(#[from] io::Error),
}

/// Everything needed to generate one maze, resolved from settings and command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeRequest {
    pub rows: i32,
    pub cols: i32,
    pub params: GenParams,
    pub seed: u64,
}

/// Command line overrides, all optional.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub rows: Option<u16>,
    pub cols: Option<u16>,
    pub branch: Option<u8>,
    pub turn: Option<u8>,
    pub seed: Option<u64>,
    pub preset: Option<String>,
}

impl MazeRequest {
    /// Command line wins over the preset, the preset wins over the settings defaults.
    pub fn resolve(settings: &Settings, overrides: &Overrides) -> Result<Self, AppError> {
        let preset = match &overrides.preset {
            Some(title) => Some(
                settings
                    .find_preset(Some(title))
                    .ok_or_else(|| AppError::UnknownPreset(title.clone()))?,
            ),
            None => settings.find_preset(None),
        };

        let fallback = MazePreset {
            title: String::new(),
            rows: 10,
            cols: 10,
            params: None,
            default: false,
        };
        let preset = preset.unwrap_or(fallback);

        let base = preset.params.unwrap_or_else(|| settings.get_params());
        let params = GenParams::new(
            overrides.branch.unwrap_or(base.branch_probability),
            overrides.turn.unwrap_or(base.turn_probability),
        );
        params.validate()?;

        let seed = overrides
            .seed
            .or(settings.get_seed())
            .unwrap_or_else(|| thread_rng().gen());

        Ok(Self {
            rows: overrides.rows.unwrap_or(preset.rows) as i32,
            cols: overrides.cols.unwrap_or(preset.cols) as i32,
            params,
            seed,
        })
    }

    pub fn size(&self) -> Dims {
        Dims::from_row_col(self.rows, self.cols)
    }
}

/// Generates the maze on a worker thread, calling `on_progress` while waiting for it.
pub fn generate(
    request: MazeRequest,
    mut on_progress: impl FnMut(Progress),
) -> Result<Generated, AppError> {
    const POLL_INTERVAL: Duration = Duration::from_millis(50);

    let generator = CellularGenerator::new(request.params)?;
    let progress = ProgressHandle::new();

    log::info!(
        "Generating {}x{} maze with seed {}",
        request.rows,
        request.cols,
        request.seed
    );

    let worker_progress = progress.clone();
    let handle = thread::spawn(move || {
        let mut rng = RngRandomness::seeded(request.seed);
        generator.generate(request.size(), &mut rng, worker_progress)
    });

    while !handle.is_finished() {
        on_progress(progress.progress());
        thread::sleep(POLL_INTERVAL);
    }
    on_progress(progress.progress());

    let generated = handle.join().map_err(|_| AppError::GeneratorPanicked)??;
    Ok(generated)
}

/// Progress line in the style `generating  42%`, rewritten in place.
pub fn report_progress(progress: Progress) {
    let mut stderr = io::stderr().lock();
    let _ = write!(stderr, "\rgenerating {:>3.0}%", progress.percent() * 100.0);
    if progress.is_done {
        let _ = writeln!(stderr);
    }
    let _ = stderr.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win() {
        let settings = Settings::defaults();
        let overrides = Overrides {
            rows: Some(3),
            turn: Some(90),
            seed: Some(8),
            preset: Some("corridors".into()),
            ..Default::default()
        };
        let request = MazeRequest::resolve(&settings, &overrides).unwrap();
        assert_eq!(request.rows, 3);
        assert_eq!(request.cols, 30);
        assert_eq!(request.params, GenParams::new(2, 90));
        assert_eq!(request.seed, 8);
    }

    #[test]
    fn default_preset_and_settings_params() {
        let settings = Settings::defaults();
        let request = MazeRequest::resolve(&settings, &Overrides::default()).unwrap();
        assert_eq!((request.rows, request.cols), (10, 10));
        assert_eq!(request.params, settings.get_params());
    }

    #[test]
    fn unknown_preset() {
        let overrides = Overrides {
            preset: Some("nope".into()),
            ..Default::default()
        };
        let err = MazeRequest::resolve(&Settings::defaults(), &overrides).unwrap_err();
        assert!(matches!(err, AppError::UnknownPreset(name) if name == "nope"));
    }

    #[test]
    fn out_of_range_probability() {
        let overrides = Overrides {
            branch: Some(150),
            ..Default::default()
        };
        let err = MazeRequest::resolve(&Settings::default(), &overrides).unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }

    #[test]
    fn generate_on_worker() {
        let request = MazeRequest {
            rows: 12,
            cols: 8,
            params: GenParams::default(),
            seed: 99,
        };
        let mut last = None;
        let generated = generate(request, |p| last = Some(p)).unwrap();
        assert!(generated.grid.is_complete());
        assert!(last.unwrap().is_done);

        let again = generate(request, |_| {}).unwrap();
        assert_eq!(generated.grid, again.grid);
    }

    #[test]
    fn zero_size_is_reported() {
        let request = MazeRequest {
            rows: 0,
            cols: 8,
            params: GenParams::default(),
            seed: 1,
        };
        let err = generate(request, |_| {}).unwrap_err();
        assert!(matches!(err, AppError::Generation(GenerationError::InvalidSize { .. })));
    }
}
