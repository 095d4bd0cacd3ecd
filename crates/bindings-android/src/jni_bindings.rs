// JNI bindings for Android
// Every MPVLib method is `static native void`; nothing is returned to Java,
// failures end up in logcat.

use jni::objects::{JClass, JString};
use jni::sys::jint;
use jni::JNIEnv;
use mpvbridge_core::{Bridge, InitOutcome, Result, TouchAction};
use mpvbridge_mpv::MpvEngine;
use once_cell::sync::Lazy;

/// The one bridge for the process; never torn down
static BRIDGE: Lazy<Bridge<MpvEngine>> = Lazy::new(|| {
    crate::init_logging();
    Bridge::new()
});

fn jstring_to_string(env: &mut JNIEnv, jstr: &JString) -> Result<String> {
    let java_str = env.get_string(jstr)?;
    Ok(java_str.into())
}

#[no_mangle]
pub extern "system" fn Java_is_xyz_mpv_MPVLib_init(_env: JNIEnv, _class: JClass) {
    match BRIDGE.initialize(MpvEngine::build) {
        Ok(InitOutcome::Initialized) => log::info!("MPVLib.init done"),
        Ok(InitOutcome::AlreadyInitialized) => {}
        Err(e) => crate::die(&e.to_string()),
    }
}

#[no_mangle]
pub extern "system" fn Java_is_xyz_mpv_MPVLib_setconfigdir(
    mut env: JNIEnv,
    _class: JClass,
    path: JString,
) {
    match jstring_to_string(&mut env, &path) {
        Ok(p) => BRIDGE.set_config_dir(p),
        Err(err) => log::error!("Failed to read config dir: {}", err),
    }
}

#[no_mangle]
pub extern "system" fn Java_is_xyz_mpv_MPVLib_loadfile(
    mut env: JNIEnv,
    _class: JClass,
    path: JString,
) {
    match jstring_to_string(&mut env, &path) {
        Ok(p) => BRIDGE.request_load(p),
        Err(err) => log::error!("Failed to read path: {}", err),
    }
}

#[no_mangle]
pub extern "system" fn Java_is_xyz_mpv_MPVLib_resize(
    _env: JNIEnv,
    _class: JClass,
    width: jint,
    height: jint,
) {
    BRIDGE.resize(width, height);
}

#[no_mangle]
pub extern "system" fn Java_is_xyz_mpv_MPVLib_step(_env: JNIEnv, _class: JClass) {
    BRIDGE.step();
}

#[no_mangle]
pub extern "system" fn Java_is_xyz_mpv_MPVLib_play(_env: JNIEnv, _class: JClass) {
    BRIDGE.play();
}

#[no_mangle]
pub extern "system" fn Java_is_xyz_mpv_MPVLib_pause(_env: JNIEnv, _class: JClass) {
    BRIDGE.pause();
}

// JNI mangles '_' in method names as "_1"

#[no_mangle]
pub extern "system" fn Java_is_xyz_mpv_MPVLib_touch_1down(
    _env: JNIEnv,
    _class: JClass,
    x: jint,
    y: jint,
) {
    BRIDGE.touch(TouchAction::Down, x, y);
}

#[no_mangle]
pub extern "system" fn Java_is_xyz_mpv_MPVLib_touch_1move(
    _env: JNIEnv,
    _class: JClass,
    x: jint,
    y: jint,
) {
    BRIDGE.touch(TouchAction::Move, x, y);
}

#[no_mangle]
pub extern "system" fn Java_is_xyz_mpv_MPVLib_touch_1up(
    _env: JNIEnv,
    _class: JClass,
    x: jint,
    y: jint,
) {
    BRIDGE.touch(TouchAction::Up, x, y);
}
