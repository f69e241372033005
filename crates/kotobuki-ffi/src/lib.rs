//! C FFI bindings for the Kotobuki invitation renderer.
//!
//! Exposes `kb_render_json` and `kb_string_free` for use from mini-program
//! bridges and other FFI consumers.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use kotobuki::{Kotobuki, KotobukiError, RenderOptions};

/// Render a template JSON document against wedding data JSON into HTML.
///
/// # Safety
///
/// - `template_json_utf8` must be a valid null-terminated UTF-8 JSON string.
/// - `data_json_utf8` must be a valid null-terminated UTF-8 JSON string.
/// - `asset_base_utf8_or_null` may be null, or a valid null-terminated UTF-8 string.
/// - `out_error_json_utf8` must be a valid pointer to a `*mut c_char` (initially null).
///
/// On success, returns a pointer to a null-terminated UTF-8 HTML string.
/// The caller must free it with `kb_string_free`.
///
/// On error, returns null and writes an error JSON string to `*out_error_json_utf8`.
/// The caller must free the error string with `kb_string_free`.
#[no_mangle]
pub unsafe extern "C" fn kb_render_json(
    template_json_utf8: *const c_char,
    data_json_utf8: *const c_char,
    asset_base_utf8_or_null: *const c_char,
    out_error_json_utf8: *mut *mut c_char,
) -> *mut c_char {
    // Safety: caller guarantees valid pointers
    let html = utf8_args(template_json_utf8, data_json_utf8, asset_base_utf8_or_null)
        .and_then(|(template_json, data_json, asset_base)| {
            render(template_json, data_json, asset_base)
        })
        .and_then(|html| {
            CString::new(html).map_err(|e| KotobukiError::InvalidData {
                message: format!("rendered HTML contains a NUL byte at {}", e.nul_position()),
            })
        });

    match html {
        Ok(cs) => cs.into_raw(),
        Err(err) => {
            write_kotobuki_error(out_error_json_utf8, &err);
            ptr::null_mut()
        }
    }
}

type RenderArgs<'a> = (&'a str, &'a str, Option<&'a str>);

unsafe fn utf8_args<'a>(
    template: *const c_char,
    data: *const c_char,
    asset_base_or_null: *const c_char,
) -> kotobuki::Result<RenderArgs<'a>> {
    let template = utf8_arg(template, "template")?;
    let data = utf8_arg(data, "data")?;
    let asset_base = if asset_base_or_null.is_null() {
        None
    } else {
        Some(utf8_arg(asset_base_or_null, "asset base")?)
    };
    Ok((template, data, asset_base))
}

/// Borrow a C string argument as UTF-8.
///
/// # Safety
///
/// `p` must be a valid null-terminated string that outlives the returned slice.
unsafe fn utf8_arg<'a>(p: *const c_char, name: &str) -> kotobuki::Result<&'a str> {
    CStr::from_ptr(p)
        .to_str()
        .map_err(|e| KotobukiError::InvalidData {
            message: format!("{name} is not valid UTF-8: {e}"),
        })
}

/// Free a string previously returned by `kb_render_json` or written to `out_error_json_utf8`.
///
/// # Safety
///
/// `p` must be a pointer previously returned by this crate via `CString::into_raw`,
/// or null (in which case this is a no-op).
#[no_mangle]
pub unsafe extern "C" fn kb_string_free(p: *mut c_char) {
    if !p.is_null() {
        drop(CString::from_raw(p));
    }
}

fn render(template_json: &str, data_json: &str, asset_base: Option<&str>) -> kotobuki::Result<String> {
    let mut options = RenderOptions::default();
    if let Some(base) = asset_base {
        options = options.with_asset_base(base);
    }
    let invitation = Kotobuki::from_json(template_json)?.with_options(options);
    let data: serde_json::Value = serde_json::from_str(data_json)?;
    Ok(invitation.render_html(&data))
}

/// Convert a `KotobukiError` to error JSON and write it to the output pointer.
unsafe fn write_kotobuki_error(out: *mut *mut c_char, err: &KotobukiError) {
    let error_type = match err {
        KotobukiError::TemplateError { .. } => "TemplateError",
        KotobukiError::InvalidData { .. } => "InvalidData",
        KotobukiError::Json(_) => "JsonError",
        KotobukiError::Io(_) => "IoError",
    };
    write_error(out, error_type, &err.to_string());
}

/// Write an error JSON string to the output pointer.
unsafe fn write_error(out: *mut *mut c_char, error_type: &str, message: &str) {
    let json = serde_json::json!({
        "type": error_type,
        "message": message,
    });

    if let Ok(cs) = CString::new(json.to_string()) {
        *out = cs.into_raw();
    }
}
