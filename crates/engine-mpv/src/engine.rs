// libmpv-backed engine

use crate::events::EventPump;
use crate::handle::MpvHandle;
use crate::locale::pin_numeric_locale;
use crate::render::RenderContext;
use mpvbridge_core::{
    BridgeError, Command, Engine, EngineOptions, FrameTarget, Property, Result,
};
use std::sync::Arc;

/// Minimum level of engine log messages forwarded to `log`
const ENGINE_LOG_LEVEL: &str = "v";

/// A running mpv core with a GL render context.
///
/// Field order is drop order: the render context and the event pump go
/// before the handle they were created from.
pub struct MpvEngine {
    render: RenderContext,
    _events: EventPump,
    handle: Arc<MpvHandle>,
}

impl MpvEngine {
    /// Build and initialize the core. Must run on the GL thread with the
    /// host's EGL context current.
    pub fn build(options: &EngineOptions) -> Result<Self> {
        if let Err(e) = pin_numeric_locale(&options.numeric_locale) {
            log::warn!("{}", e);
        }

        let handle = Arc::new(MpvHandle::create()?);

        for (name, value) in options.pre_init() {
            if let Err(e) = handle.set_option(name, &value) {
                log::warn!("option {} ignored: {}", name, e);
            }
        }

        handle
            .initialize()
            .map_err(|e| BridgeError::Initialization(format!("mpv init failed ({})", e)))?;

        let render = RenderContext::create_opengl(&handle)?;

        for (name, value) in options.post_init() {
            handle.set_option(name, &value).map_err(|e| {
                BridgeError::Initialization(format!("failed to set {} ({})", name, e))
            })?;
        }

        let events = EventPump::start(handle.clone(), ENGINE_LOG_LEVEL)?;

        log::info!(
            "mpv ready (vo={}, ao={})",
            options.video_output,
            options.audio_output
        );
        Ok(Self {
            render,
            _events: events,
            handle,
        })
    }
}

impl Engine for MpvEngine {
    fn command(&self, command: &Command) -> Result<()> {
        self.handle.command(&command.args())
    }

    fn set_property(&self, property: &Property) -> Result<()> {
        self.handle.set_flag_property(property.name(), property.flag())
    }

    fn render(&self, target: &FrameTarget) -> Result<()> {
        self.render.render(target)
    }
}
