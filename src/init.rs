use glfw::{Action, MouseButton, OpenGlProfileHint, Window, WindowEvent, WindowHint};

use anyhow::Context as _;
use glfw::Context as _;
use log::{info, warn};

use crate::config::Config;
use crate::gfx::GlCanvas;
use crate::platform::{Event, EventMask, Platform, Viewport};
use crate::screen::{ScreenHost, ScreenName};

#[derive(Debug)]
pub struct App {
    config: Config,
}

impl App {
    pub fn init(config: Config) -> anyhow::Result<Self> {
        if !config.asset_dir.is_dir() {
            warn!("Asset directory {:?} does not exist", config.asset_dir);
        }
        Ok(Self { config })
    }

    pub fn run(self) -> anyhow::Result<()> {
        let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS)
            .context("Failed to initialize GLFW3")?;

        glfw.window_hint(WindowHint::Resizable(true));
        glfw.window_hint(WindowHint::SRgbCapable(true));
        glfw.window_hint(WindowHint::DoubleBuffer(true));
        glfw.window_hint(WindowHint::ContextVersion(3, 3));
        glfw.window_hint(WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));

        let (mut window, events) = glfw
            .create_window(
                self.config.window_width,
                self.config.window_height,
                &self.config.title,
                glfw::WindowMode::Windowed,
            )
            .context("Failed to create GLFW window")?;

        // Escape always quits, so keys are polled regardless of listeners
        window.set_key_polling(true);
        window.make_current();
        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        gl::load_with(|s| glfw.get_proc_address_raw(s));

        let (width, height) = window.get_framebuffer_size();
        let viewport = Viewport::new(width.max(0) as u32, height.max(0) as u32);
        info!("Window opened at {}x{}", viewport.width, viewport.height);

        let mut platform = Platform::new(viewport);
        let canvas = GlCanvas::new(viewport.width, viewport.height)?;
        let mut host = ScreenHost::new(&mut platform, ScreenName::Intro.init(&self.config, canvas));

        let mut polling = EventMask::empty();
        sync_polling(&mut window, &platform, &mut polling);

        while !window.should_close() {
            glfw.poll_events();
            for (_, window_event) in glfw::flush_messages(&events) {
                if let WindowEvent::Key(glfw::Key::Escape, _, Action::Press, _) = window_event {
                    window.set_should_close(true);
                    continue;
                }
                let Some(event) = translate(&window, &window_event) else {
                    continue;
                };
                if let Some(next) = host.dispatch(&event, &mut platform) {
                    let canvas = GlCanvas::new(platform.viewport.width, platform.viewport.height)?;
                    host.load_screen(next.init(&self.config, canvas), &mut platform);
                }
            }
            sync_polling(&mut window, &platform, &mut polling);

            let timestamp = glfw.get_time() * 1000.0;
            host.frame(timestamp, &mut platform);
            host.present();

            window.swap_buffers();
        }

        host.shutdown(&mut platform);
        Ok(())
    }
}

/// Translate a window event into a platform event
fn translate(window: &Window, event: &WindowEvent) -> Option<Event> {
    match *event {
        WindowEvent::FramebufferSize(width, height) => Some(Event::Resize(Viewport::new(
            width.max(0) as u32,
            height.max(0) as u32,
        ))),
        WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
            let (x, y) = window.get_cursor_pos();
            Some(Event::Click { x, y })
        }
        WindowEvent::Key(key, _, Action::Press, _) => Some(Event::KeyDown(key)),
        _ => None,
    }
}

/// Enable window polling for exactly the event kinds someone listens to
fn sync_polling(window: &mut Window, platform: &Platform, polling: &mut EventMask) {
    let wanted = platform.events.subscribed();
    if wanted == *polling {
        return;
    }
    window.set_framebuffer_size_polling(wanted.contains(EventMask::RESIZE));
    window.set_mouse_button_polling(wanted.contains(EventMask::CLICK));
    *polling = wanted;
}
