// Deferred command gate
// Lets the host ask for a file before the engine exists; the request is
// replayed exactly once when initialization succeeds.

use crate::engine::{Command, Engine, Property};
use crate::error::Result;
use crate::input::{translate_touch, TouchAction};
use crate::options::EngineOptions;
use crate::viewport::Viewport;
use parking_lot::{Mutex, RwLock, RwLockUpgradableReadGuard};

/// Gate state. The only transition is `Uninitialized -> Initialized`, once,
/// for the lifetime of the process.
pub enum GateState<E> {
    Uninitialized,
    Initialized(E),
}

impl<E> GateState<E> {
    pub fn is_initialized(&self) -> bool {
        matches!(self, GateState::Initialized(_))
    }
}

/// Result of an `initialize` call that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// This call built the engine
    Initialized,
    /// The engine already existed; nothing was done
    AlreadyInitialized,
}

/// Owning context for everything the host can touch.
///
/// All operations are fire-and-forget: engine failures are logged and never
/// returned to the caller, and every operation except `initialize`,
/// `set_config_dir`, `request_load` and `resize` is a no-op until the engine
/// exists.
pub struct Bridge<E: Engine> {
    state: RwLock<GateState<E>>,
    pending_load: Mutex<Option<String>>,
    config_dir: Mutex<String>,
    viewport: Viewport,
}

impl<E: Engine> Bridge<E> {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(GateState::Uninitialized),
            pending_load: Mutex::new(None),
            config_dir: Mutex::new(String::new()),
            viewport: Viewport::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().is_initialized()
    }

    /// Directory handed to the engine by the next successful `initialize`
    pub fn set_config_dir(&self, path: impl Into<String>) {
        let path = path.into();
        if self.is_initialized() {
            log::warn!("config dir set to {} after init; running engine keeps its own", path);
        } else {
            log::debug!("config dir staged: {}", path);
        }
        *self.config_dir.lock() = path;
    }

    pub fn config_dir(&self) -> String {
        self.config_dir.lock().clone()
    }

    /// Path that `initialize` will load, if no engine exists yet
    pub fn pending_load(&self) -> Option<String> {
        self.pending_load.lock().clone()
    }

    /// Build the engine if it does not exist yet.
    ///
    /// `build` receives the fixed option set with the staged config dir. On
    /// success the staged load (or an empty path when none was staged) is
    /// dispatched before the gate opens. An `Err` means the engine is
    /// unusable; the caller decides how fatal that is.
    pub fn initialize<F>(&self, build: F) -> Result<InitOutcome>
    where
        F: FnOnce(&EngineOptions) -> Result<E>,
    {
        let state = self.state.upgradable_read();
        if state.is_initialized() {
            log::debug!("initialize: engine already running");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        let options = EngineOptions::with_config_dir(self.config_dir());
        log::info!("initializing engine (config dir: {:?})", options.config_dir);
        let engine = build(&options)?;

        // Loads staged while the engine was being built hold a read lock, so
        // upgrading waits for them and the take below sees the last one.
        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        let path = self.pending_load.lock().take().unwrap_or_default();
        dispatch(&engine, &Command::LoadFile(path));
        *state = GateState::Initialized(engine);

        log::info!("engine initialized");
        Ok(InitOutcome::Initialized)
    }

    /// Load `path` now, or stage it for `initialize` replacing any earlier
    /// staged path.
    pub fn request_load(&self, path: impl Into<String>) {
        let path = path.into();
        let state = self.state.read();
        match &*state {
            GateState::Initialized(engine) => dispatch(engine, &Command::LoadFile(path)),
            GateState::Uninitialized => {
                log::debug!("engine not ready, staging load: {}", path);
                if let Some(previous) = self.pending_load.lock().replace(path) {
                    log::debug!("dropped earlier staged load: {}", previous);
                }
            }
        }
    }

    pub fn play(&self) {
        self.with_engine(|engine| set_property(engine, &Property::Pause(false)));
    }

    pub fn pause(&self) {
        self.with_engine(|engine| set_property(engine, &Property::Pause(true)));
    }

    pub fn resize(&self, width: i32, height: i32) {
        log::debug!("resize {}x{}", width, height);
        self.viewport.set(width, height);
    }

    /// Draw one frame at the current viewport size
    pub fn step(&self) {
        self.with_engine(|engine| {
            let target = self.viewport.frame_target();
            if let Err(e) = engine.render(&target) {
                log::warn!("render {}x{} failed: {}", target.width, target.height, e);
            }
        });
    }

    pub fn touch(&self, action: TouchAction, x: i32, y: i32) {
        self.with_engine(|engine| {
            for command in translate_touch(action, x, y) {
                dispatch(engine, &command);
            }
        });
    }

    fn with_engine(&self, f: impl FnOnce(&E)) {
        let state = self.state.read();
        if let GateState::Initialized(engine) = &*state {
            f(engine);
        }
    }
}

impl<E: Engine> Default for Bridge<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn dispatch<E: Engine>(engine: &E, command: &Command) {
    log::debug!("command: {:?}", command.args());
    if let Err(e) = engine.command(command) {
        log::warn!("{} failed: {}", command.name(), e);
    }
}

fn set_property<E: Engine>(engine: &E, property: &Property) {
    log::debug!("set {} = {}", property.name(), property.flag());
    if let Err(e) = engine.set_property(property) {
        log::warn!("setting {} failed: {}", property.name(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{FrameTarget, MouseButton};
    use crate::error::BridgeError;
    use std::sync::Arc;
    use std::thread;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Command(Command),
        Property(Property),
        Render(FrameTarget),
    }

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<Call>>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        fn loads(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    Call::Command(Command::LoadFile(path)) => Some(path),
                    _ => None,
                })
                .collect()
        }
    }

    struct MockEngine {
        recorder: Recorder,
        config_dir: String,
        reject_commands: bool,
    }

    impl Engine for MockEngine {
        fn command(&self, command: &Command) -> Result<()> {
            self.recorder.calls.lock().push(Call::Command(command.clone()));
            if self.reject_commands {
                Err(BridgeError::Engine("rejected".into()))
            } else {
                Ok(())
            }
        }

        fn set_property(&self, property: &Property) -> Result<()> {
            self.recorder.calls.lock().push(Call::Property(*property));
            Ok(())
        }

        fn render(&self, target: &FrameTarget) -> Result<()> {
            self.recorder.calls.lock().push(Call::Render(*target));
            Ok(())
        }
    }

    fn builder(recorder: &Recorder) -> impl FnOnce(&EngineOptions) -> Result<MockEngine> {
        let recorder = recorder.clone();
        move |options: &EngineOptions| {
            Ok(MockEngine {
                recorder,
                config_dir: options.config_dir.clone(),
                reject_commands: false,
            })
        }
    }

    fn engine_config_dir(bridge: &Bridge<MockEngine>) -> Option<String> {
        match &*bridge.state.read() {
            GateState::Initialized(engine) => Some(engine.config_dir.clone()),
            GateState::Uninitialized => None,
        }
    }

    #[test]
    fn last_staged_load_wins() {
        let recorder = Recorder::default();
        let bridge = Bridge::new();

        bridge.request_load("a.mp4");
        bridge.request_load("b.mp4");
        assert_eq!(bridge.pending_load(), Some("b.mp4".to_string()));

        let outcome = bridge.initialize(builder(&recorder)).unwrap();
        assert_eq!(outcome, InitOutcome::Initialized);
        assert_eq!(recorder.loads(), vec!["b.mp4"]);
        assert_eq!(bridge.pending_load(), None);
    }

    #[test]
    fn init_without_staged_load_dispatches_empty_path() {
        let recorder = Recorder::default();
        let bridge = Bridge::new();

        bridge.initialize(builder(&recorder)).unwrap();
        assert_eq!(recorder.loads(), vec![""]);
    }

    #[test]
    fn second_initialize_is_a_no_op() {
        let first = Recorder::default();
        let bridge = Bridge::new();

        bridge.set_config_dir("cfg");
        bridge.initialize(builder(&first)).unwrap();
        bridge.set_config_dir("cfg2");
        let outcome = bridge
            .initialize(|_: &EngineOptions| -> Result<MockEngine> {
                panic!("engine built twice")
            })
            .unwrap();

        assert_eq!(outcome, InitOutcome::AlreadyInitialized);
        assert_eq!(engine_config_dir(&bridge), Some("cfg".to_string()));
        assert_eq!(first.loads().len(), 1);
    }

    #[test]
    fn failed_build_leaves_gate_closed_and_keeps_staged_load() {
        let recorder = Recorder::default();
        let bridge: Bridge<MockEngine> = Bridge::new();
        bridge.request_load("movie.mkv");

        let err = bridge
            .initialize(|_| Err(BridgeError::Initialization("mpv init failed".into())))
            .err();
        assert_eq!(err, Some(BridgeError::Initialization("mpv init failed".into())));
        assert!(!bridge.is_initialized());
        assert_eq!(bridge.pending_load(), Some("movie.mkv".to_string()));

        bridge.initialize(builder(&recorder)).unwrap();
        assert_eq!(recorder.loads(), vec!["movie.mkv"]);
    }

    #[test]
    fn operations_before_init_do_nothing() {
        let bridge: Bridge<MockEngine> = Bridge::new();
        bridge.play();
        bridge.pause();
        bridge.touch(TouchAction::Down, 1, 2);
        bridge.touch(TouchAction::Move, 3, 4);
        bridge.touch(TouchAction::Up, 5, 6);
        bridge.step();
        assert!(!bridge.is_initialized());

        let recorder = Recorder::default();
        bridge.initialize(builder(&recorder)).unwrap();
        assert_eq!(recorder.calls(), vec![Call::Command(Command::LoadFile(String::new()))]);
    }

    #[test]
    fn loads_after_init_dispatch_once_per_call() {
        let recorder = Recorder::default();
        let bridge = Bridge::new();
        bridge.initialize(builder(&recorder)).unwrap();

        bridge.request_load("one.mp4");
        bridge.request_load("two.mp4");
        bridge.request_load("one.mp4");

        assert_eq!(recorder.loads(), vec!["", "one.mp4", "two.mp4", "one.mp4"]);
        assert_eq!(bridge.pending_load(), None);
    }

    #[test]
    fn rejected_command_is_absorbed() {
        let recorder = Recorder::default();
        let bridge = Bridge::new();
        let rec = recorder.clone();
        bridge
            .initialize(move |_| {
                Ok(MockEngine {
                    recorder: rec,
                    config_dir: String::new(),
                    reject_commands: true,
                })
            })
            .unwrap();

        bridge.request_load("missing.mp4");
        assert!(bridge.is_initialized());
        assert_eq!(recorder.loads(), vec!["", "missing.mp4"]);
    }

    #[test]
    fn play_and_pause_toggle_pause_flag() {
        let recorder = Recorder::default();
        let bridge = Bridge::new();
        bridge.initialize(builder(&recorder)).unwrap();

        bridge.pause();
        bridge.play();

        let props: Vec<_> = recorder
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Property(_)))
            .collect();
        assert_eq!(
            props,
            vec![
                Call::Property(Property::Pause(true)),
                Call::Property(Property::Pause(false))
            ]
        );
    }

    #[test]
    fn step_uses_latest_viewport() {
        let recorder = Recorder::default();
        let bridge = Bridge::new();
        bridge.resize(800, 600);
        bridge.initialize(builder(&recorder)).unwrap();
        bridge.step();
        bridge.resize(1920, 1080);
        bridge.step();

        let renders: Vec<_> = recorder
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Render(target) => Some((target.width, target.height, target.flip_y)),
                _ => None,
            })
            .collect();
        assert_eq!(renders, vec![(800, 600, true), (1920, 1080, true)]);
    }

    #[test]
    fn touch_sequence_forwards_pointer_commands() {
        let recorder = Recorder::default();
        let bridge = Bridge::new();
        bridge.initialize(builder(&recorder)).unwrap();

        bridge.touch(TouchAction::Down, 10, 20);
        bridge.touch(TouchAction::Move, 15, 25);
        bridge.touch(TouchAction::Up, 15, 25);

        let calls = recorder.calls();
        assert_eq!(
            &calls[1..],
            &[
                Call::Command(Command::MouseMove { x: 10, y: 20 }),
                Call::Command(Command::KeyDown(MouseButton::Left)),
                Call::Command(Command::MouseMove { x: 15, y: 25 }),
                Call::Command(Command::KeyUp(MouseButton::Left)),
            ]
        );
    }

    #[test]
    fn config_dir_after_init_is_stored_but_unused() {
        let recorder = Recorder::default();
        let bridge = Bridge::new();
        bridge.set_config_dir("/first");
        bridge.initialize(builder(&recorder)).unwrap();
        bridge.set_config_dir("/second");

        assert_eq!(bridge.config_dir(), "/second");
        assert_eq!(engine_config_dir(&bridge), Some("/first".to_string()));
    }

    #[test]
    fn concurrent_loads_during_init_are_never_lost() {
        for _ in 0..50 {
            let recorder = Recorder::default();
            let bridge = Arc::new(Bridge::new());

            let loader = {
                let bridge = bridge.clone();
                thread::spawn(move || bridge.request_load("late.mp4"))
            };
            bridge.initialize(builder(&recorder)).unwrap();
            loader.join().unwrap();

            let loads = recorder.loads();
            assert_eq!(loads.iter().filter(|p| *p == "late.mp4").count(), 1);
            assert_eq!(loads.len(), if loads[0] == "late.mp4" { 1 } else { 2 });
        }
    }
}
