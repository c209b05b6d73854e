use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use splash::platform::{Event, EventKind, Platform, Viewport};
use splash::screen::{Bindings, PacedLoop, Screen, ScreenHost, ScreenName};

type Journal = Rc<RefCell<Vec<String>>>;

/// Screen that writes every lifecycle call to a shared journal
struct Journaled {
    label: &'static str,
    journal: Journal,
    animation: PacedLoop,
    bindings: Bindings,
    transition: Option<ScreenName>,
}

impl Journaled {
    fn boxed(label: &'static str, journal: &Journal) -> Box<dyn Screen> {
        Box::new(Self {
            label,
            journal: journal.clone(),
            animation: PacedLoop::new(10.0),
            bindings: Bindings::new(),
            transition: None,
        })
    }

    fn log(&self, entry: String) {
        self.journal.borrow_mut().push(format!("{} {}", self.label, entry));
    }
}

impl Screen for Journaled {
    fn name(&self) -> ScreenName {
        ScreenName::Intro
    }

    fn show(&mut self, platform: &mut Platform) {
        self.bindings.bind(&mut platform.events, EventKind::Click);
        self.log(format!("show listeners={}", platform.events.len()));
        self.animation.start(&mut platform.frames);
    }

    fn hide(&mut self, platform: &mut Platform) {
        self.animation.cancel(&mut platform.frames);
        self.bindings.release_all(&mut platform.events);
        self.log(format!("hide listeners={}", platform.events.len()));
    }

    fn resize(&mut self, viewport: Viewport) {
        self.log(format!("resize {}x{}", viewport.width, viewport.height));
    }

    fn render(&mut self, timestamp: f64) {
        self.log(format!("render {}", timestamp));
    }

    fn handle_event(&mut self, event: &Event, _platform: &mut Platform) -> Option<ScreenName> {
        if self.bindings.handles(event.kind()) {
            self.log(format!("{:?}", event.kind()));
            return self.transition;
        }
        None
    }

    fn animation(&mut self) -> &mut PacedLoop {
        &mut self.animation
    }
}

fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow_mut().drain(..).collect()
}

#[test]
fn construction_shows_and_sizes_the_initial_screen() {
    let journal = Journal::default();
    let mut platform = Platform::new(Viewport::new(1024, 768));

    let host = ScreenHost::new(&mut platform, Journaled::boxed("a", &journal));

    // The host's resize listener plus the screen's click listener
    assert_eq!(
        entries(&journal),
        vec!["a show listeners=2", "a resize 1024x768"]
    );
    assert_eq!(host.current_name(), Some(ScreenName::Intro));
}

#[test]
fn previous_screen_is_hidden_before_the_next_binds() {
    let journal = Journal::default();
    let mut platform = Platform::new(Viewport::new(640, 480));
    let mut host = ScreenHost::new(&mut platform, Journaled::boxed("a", &journal));
    entries(&journal);

    host.load_screen(Journaled::boxed("b", &journal), &mut platform);

    // Only the host's own resize listener is left when b starts binding
    assert_eq!(
        entries(&journal),
        vec![
            "a hide listeners=1",
            "b show listeners=2",
            "b resize 640x480",
        ]
    );
    assert_eq!(platform.frames.pending(), 1);
}

#[test]
fn frames_reach_only_the_active_screen() {
    let journal = Journal::default();
    let mut platform = Platform::new(Viewport::new(640, 480));
    let mut host = ScreenHost::new(&mut platform, Journaled::boxed("a", &journal));

    host.frame(16.0, &mut platform);
    host.frame(32.0, &mut platform);
    host.load_screen(Journaled::boxed("b", &journal), &mut platform);
    host.frame(48.0, &mut platform);

    let renders: Vec<String> = entries(&journal)
        .into_iter()
        .filter(|entry| entry.contains("render"))
        .collect();
    assert_eq!(renders, vec!["a render 16", "a render 32", "b render 48"]);
}

#[test]
fn frame_without_screen_is_a_no_op() {
    let mut platform = Platform::new(Viewport::new(640, 480));
    let mut host = ScreenHost::empty(&mut platform);
    platform.frames.request();

    host.frame(16.0, &mut platform);
    host.present();
    host.resize(&platform);

    assert_eq!(platform.frames.pending(), 0);
    assert_eq!(host.current_name(), None);
    assert_eq!(host.dispatch(&Event::Click { x: 1.0, y: 2.0 }, &mut platform), None);
}

#[test]
fn resize_events_update_the_viewport_and_the_screen() {
    let journal = Journal::default();
    let mut platform = Platform::new(Viewport::new(640, 480));
    let mut host = ScreenHost::new(&mut platform, Journaled::boxed("a", &journal));
    entries(&journal);

    host.dispatch(&Event::Resize(Viewport::new(1920, 1080)), &mut platform);

    assert_eq!(platform.viewport, Viewport::new(1920, 1080));
    assert_eq!(entries(&journal), vec!["a resize 1920x1080"]);
}

#[test]
fn screen_transitions_are_returned_to_the_caller() {
    let journal = Journal::default();
    let mut platform = Platform::new(Viewport::new(640, 480));
    let mut screen = Journaled {
        label: "a",
        journal: journal.clone(),
        animation: PacedLoop::new(10.0),
        bindings: Bindings::new(),
        transition: Some(ScreenName::Intro),
    };
    // Not shown, so not bound
    assert_eq!(
        screen.handle_event(&Event::Click { x: 0.0, y: 0.0 }, &mut platform),
        None
    );

    let mut host = ScreenHost::new(&mut platform, Box::new(screen));
    let next = host.dispatch(&Event::Click { x: 0.0, y: 0.0 }, &mut platform);

    assert_eq!(next, Some(ScreenName::Intro));
    // Key presses are not bound by the screen
    assert_eq!(
        host.dispatch(&Event::KeyDown(glfw::Key::Enter), &mut platform),
        None
    );
}

#[test]
fn shutdown_releases_everything() {
    let journal = Journal::default();
    let mut platform = Platform::new(Viewport::new(640, 480));
    let mut host = ScreenHost::new(&mut platform, Journaled::boxed("a", &journal));

    host.shutdown(&mut platform);
    host.shutdown(&mut platform);

    assert!(platform.events.is_empty());
    assert_eq!(platform.frames.pending(), 0);
    assert_eq!(host.current_name(), None);
}
