// Native side of is.xyz.mpv.MPVLib
// Android exposes the JNI entry points; other targets only build the logging
// setup so the workspace compiles and tests on a desktop host.

use std::sync::Once;

#[cfg(target_os = "android")]
pub mod jni_bindings;

/// Log tag shown in logcat
pub const LOG_TAG: &str = "mpv";

static INIT_LOGGER: Once = Once::new();

/// Initialize logging based on platform
pub fn init_logging() {
    INIT_LOGGER.call_once(|| {
        #[cfg(target_os = "android")]
        {
            android_logger::init_once(
                android_logger::Config::default()
                    .with_max_level(log::LevelFilter::Debug)
                    .with_tag(LOG_TAG),
            );
        }

        #[cfg(not(target_os = "android"))]
        {
            let _ = env_logger::builder()
                .is_test(cfg!(test))
                .filter_level(log::LevelFilter::Info)
                .try_init();
        }
    });
}

/// Log `msg` and terminate the process.
///
/// Used when the engine cannot be constructed: a half-built playback surface
/// cannot be driven safely, and the host has no failure path to take.
pub fn die(msg: &str) -> ! {
    log::error!("{}", msg);
    log::logger().flush();
    std::process::exit(1);
}
