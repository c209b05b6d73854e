use std::path::PathBuf;

use cgmath::vec2;
use log::{debug, error, info, warn};

use crate::config::Config;
use crate::gfx::{AssetError, Image, Surface};
use crate::platform::{Event, EventKind, Platform, Viewport};
use crate::screen::{Bindings, PacedLoop, Screen, ScreenName};

/// Intro splash screen
/// Plays a numbered image sequence stretched over the whole window
pub struct IntroScreen<S: Surface> {
    surface: S,
    paths: Vec<PathBuf>,
    // One slot per path, empty where the frame failed to load
    frames: Vec<Option<S::Texture>>,
    animation: PacedLoop,
    bindings: Bindings,
}

impl<S: Surface> IntroScreen<S> {
    pub fn new(config: &Config, surface: S) -> Self {
        Self::with_paths(config.frame_paths(), config.intro_fps, surface)
    }

    pub fn with_paths(paths: Vec<PathBuf>, fps: f64, surface: S) -> Self {
        Self {
            surface,
            paths,
            frames: Vec::new(),
            animation: PacedLoop::new(fps),
            bindings: Bindings::new(),
        }
    }

    /// Decode and upload every frame
    /// Frames that fail stay empty; the error reports how many did
    pub fn load_data(&mut self) -> Result<(), AssetError> {
        let total = self.paths.len();
        let mut failed = 0;
        let decoded = Image::open_all(&self.paths);

        let surface = &mut self.surface;
        let frames: Vec<Option<S::Texture>> = decoded
            .into_iter()
            .zip(&self.paths)
            .map(|(image, path)| {
                let texture = image.and_then(|image| {
                    surface.upload(&image).map_err(|err| AssetError::Upload {
                        path: path.clone(),
                        reason: format!("{:#}", err),
                    })
                });
                match texture {
                    Ok(texture) => Some(texture),
                    Err(err) => {
                        warn!("{}", err);
                        failed += 1;
                        None
                    }
                }
            })
            .collect();
        self.frames = frames;

        info!("Loaded {} of {} intro frames", total - failed, total);
        if failed > 0 {
            return Err(AssetError::Incomplete { failed, total });
        }
        Ok(())
    }

    pub fn frame_index(&self) -> usize {
        self.animation.pacer.index()
    }

    /// Number of frames that loaded
    pub fn loaded_frames(&self) -> usize {
        self.frames.iter().filter(|frame| frame.is_some()).count()
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: Surface> Screen for IntroScreen<S> {
    fn name(&self) -> ScreenName {
        ScreenName::Intro
    }

    fn show(&mut self, platform: &mut Platform) {
        self.bindings.bind(&mut platform.events, EventKind::Resize);
        self.bindings.bind(&mut platform.events, EventKind::Click);
        self.bindings.bind(&mut platform.events, EventKind::KeyDown);

        self.resize(platform.viewport);
        if let Err(err) = self.load_data() {
            error!("Intro frames did not all load: {}", err);
        }
        self.animation.start(&mut platform.frames);
    }

    fn hide(&mut self, platform: &mut Platform) {
        self.animation.cancel(&mut platform.frames);
        self.bindings.release_all(&mut platform.events);
    }

    fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport.width, viewport.height);
    }

    fn render(&mut self, timestamp: f64) {
        let count = self.frames.len();
        let Some(index) = self.animation.pacer.tick(timestamp, count) else {
            return;
        };
        if let Some(Some(texture)) = self.frames.get(index) {
            let (width, height) = self.surface.size();
            self.surface.draw_image(
                texture,
                vec2(0.0, 0.0),
                vec2(width as f32, height as f32),
            );
            self.animation.pacer.mark_drawn();
        }
    }

    fn handle_event(&mut self, event: &Event, _platform: &mut Platform) -> Option<ScreenName> {
        if !self.bindings.handles(event.kind()) {
            return None;
        }
        match event {
            Event::Resize(viewport) => self.resize(*viewport),
            Event::Click { .. } => info!("click"),
            Event::KeyDown(key) => {
                info!("{:?}", key);
                if *key == glfw::Key::Enter {
                    debug!("Enter pressed, no screen follows the intro yet");
                }
            }
        }
        None
    }

    fn animation(&mut self) -> &mut PacedLoop {
        &mut self.animation
    }

    fn present(&mut self) {
        self.surface.present();
    }
}
