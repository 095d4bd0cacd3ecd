// OpenGL render context

use crate::ffi;
use crate::handle::{check, MpvHandle};
use mpvbridge_core::{BridgeError, FrameTarget, Result};
use std::os::raw::{c_char, c_int, c_void};
use std::ptr::{self, NonNull};

/// Render context bound to the GL context current at creation.
///
/// Must be freed before the handle it was created from, and `render` must run
/// on the thread that owns that GL context.
pub struct RenderContext {
    ptr: NonNull<ffi::mpv_render_context>,
}

unsafe impl Send for RenderContext {}
unsafe impl Sync for RenderContext {}

impl RenderContext {
    pub fn create_opengl(handle: &MpvHandle) -> Result<Self> {
        let mut init = ffi::mpv_opengl_init_params {
            get_proc_address: Some(get_proc_address),
            get_proc_address_ctx: ptr::null_mut(),
        };
        let mut params = [
            param(
                ffi::MPV_RENDER_PARAM_API_TYPE,
                ffi::MPV_RENDER_API_TYPE_OPENGL.as_ptr() as *mut c_void,
            ),
            param(
                ffi::MPV_RENDER_PARAM_OPENGL_INIT_PARAMS,
                &mut init as *mut _ as *mut c_void,
            ),
            param(ffi::MPV_RENDER_PARAM_INVALID, ptr::null_mut()),
        ];

        let mut ctx = ptr::null_mut();
        let code = unsafe {
            ffi::mpv_render_context_create(&mut ctx, handle.as_ptr(), params.as_mut_ptr())
        };
        check(code, "mpv_render_context_create").map_err(|e| {
            BridgeError::Initialization(format!("failed to initialize mpv GL context ({})", e))
        })?;

        NonNull::new(ctx).map(|ptr| Self { ptr }).ok_or_else(|| {
            BridgeError::Initialization("failed to create mpv GL API handle".into())
        })
    }

    pub fn render(&self, target: &FrameTarget) -> Result<()> {
        let mut fbo = ffi::mpv_opengl_fbo {
            fbo: target.fbo,
            w: target.width,
            h: target.height,
            internal_format: 0,
        };
        let mut flip_y: c_int = target.flip_y as c_int;
        let mut params = [
            param(ffi::MPV_RENDER_PARAM_OPENGL_FBO, &mut fbo as *mut _ as *mut c_void),
            param(ffi::MPV_RENDER_PARAM_FLIP_Y, &mut flip_y as *mut _ as *mut c_void),
            param(ffi::MPV_RENDER_PARAM_INVALID, ptr::null_mut()),
        ];
        let code =
            unsafe { ffi::mpv_render_context_render(self.ptr.as_ptr(), params.as_mut_ptr()) };
        check(code, "mpv_render_context_render")
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        unsafe { ffi::mpv_render_context_free(self.ptr.as_ptr()) }
    }
}

fn param(type_: c_int, data: *mut c_void) -> ffi::mpv_render_param {
    ffi::mpv_render_param { type_, data }
}

unsafe extern "C" fn get_proc_address(_ctx: *mut c_void, name: *const c_char) -> *mut c_void {
    ffi::eglGetProcAddress(name)
}
