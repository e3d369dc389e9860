// Copyright 2026 The VkSC PCUtil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Capi
//!
//! C ABI over [`Generator`] and [`Parser`] for callers that link the cdylib.
//! Handles are opaque boxes; operations return `true`/`false` and deliver
//! results through out-parameters.  Every pointer written to an
//! out-parameter is owned by the handle that produced it and stays valid
//! until the next call on that handle or its destruction.  All functions
//! tolerate null handles and null arguments by failing, never by crashing.

// Exported names follow the C header's convention.
#![allow(non_snake_case)]

use std::ffi::{CStr, CString, c_char};
use std::ptr;

use crate::model::PipelineSnapshot;
use crate::{CodecError, Generator, Parser};

/// Opaque generator handle.
pub struct VpjGenerator {
    inner: Generator,
    // Owned copies of the last strings handed out over the ABI.
    output: Option<CString>,
    messages: Option<CString>,
}

/// Opaque parser handle.
pub struct VpjParser {
    inner: Parser,
    messages: Option<CString>,
}

fn message_cstring(err: &CodecError) -> CString {
    // Codec messages never contain interior NULs, but don't bet the ABI on it.
    CString::new(err.to_string()).unwrap_or_else(|_| c"codec error".to_owned())
}

/// Store `messages` on the handle and expose it through the out-parameter.
fn deliver_messages(slot: &mut Option<CString>, out: *mut *const c_char, messages: CString) {
    *slot = Some(messages);
    if !out.is_null() {
        unsafe {
            *out = slot.as_ref().map_or(ptr::null(), |s| s.as_ptr());
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn vpjCreateGenerator() -> *mut VpjGenerator {
    Box::into_raw(Box::new(VpjGenerator {
        inner: Generator::new(),
        output: None,
        messages: None,
    }))
}

/// Serialize `snapshot` to pipeline JSON.
///
/// On success writes the generated text to `json` and returns `true`; on
/// failure writes a diagnostic to `messages` and returns `false`.  Both
/// strings are owned by the handle.
///
/// # Safety
///
/// `generator` must be null or a live handle from [`vpjCreateGenerator`];
/// `snapshot` must be null or a valid snapshot pointer; `json` and
/// `messages` must each be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vpjGeneratePipelineJson(
    generator: *mut VpjGenerator,
    snapshot: *const PipelineSnapshot,
    json: *mut *const c_char,
    messages: *mut *const c_char,
) -> bool {
    let Some(handle) = (unsafe { generator.as_mut() }) else {
        return false;
    };
    let Some(snapshot) = (unsafe { snapshot.as_ref() }) else {
        deliver_messages(&mut handle.messages, messages, c"null snapshot".to_owned());
        return false;
    };

    match handle.inner.generate(snapshot) {
        Ok(text) => {
            let owned = CString::new(text).unwrap_or_else(|_| c"".to_owned());
            handle.messages = None;
            handle.output = Some(owned);
            if !json.is_null() {
                unsafe {
                    *json = handle.output.as_ref().map_or(ptr::null(), |s| s.as_ptr());
                }
            }
            true
        }
        Err(err) => {
            deliver_messages(&mut handle.messages, messages, message_cstring(&err));
            false
        }
    }
}

/// # Safety
///
/// `generator` must be null or a live handle from [`vpjCreateGenerator`];
/// it and every string it handed out are invalid afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vpjDestroyGenerator(generator: *mut VpjGenerator) {
    if !generator.is_null() {
        drop(unsafe { Box::from_raw(generator) });
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn vpjCreateParser() -> *mut VpjParser {
    Box::into_raw(Box::new(VpjParser {
        inner: Parser::new(),
        messages: None,
    }))
}

/// Parse a pipeline JSON document.
///
/// On success writes the parsed snapshot to `snapshot` and returns `true`;
/// on failure writes a path-qualified diagnostic to `messages` and returns
/// `false`.  The snapshot is owned by the handle and valid until the next
/// parse or destruction.
///
/// # Safety
///
/// `parser` must be null or a live handle from [`vpjCreateParser`]; `json`
/// must be null or a NUL-terminated UTF-8 string; `snapshot` and `messages`
/// must each be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vpjParsePipelineJson(
    parser: *mut VpjParser,
    json: *const c_char,
    snapshot: *mut *const PipelineSnapshot,
    messages: *mut *const c_char,
) -> bool {
    let Some(handle) = (unsafe { parser.as_mut() }) else {
        return false;
    };
    if json.is_null() {
        deliver_messages(&mut handle.messages, messages, c"null json".to_owned());
        return false;
    }

    let text = match unsafe { CStr::from_ptr(json) }.to_str() {
        Ok(text) => text,
        Err(_) => {
            deliver_messages(
                &mut handle.messages,
                messages,
                c"json is not valid UTF-8".to_owned(),
            );
            return false;
        }
    };

    match handle.inner.parse(text) {
        Ok(parsed) => {
            handle.messages = None;
            if !snapshot.is_null() {
                unsafe {
                    *snapshot = parsed as *const PipelineSnapshot;
                }
            }
            true
        }
        Err(err) => {
            deliver_messages(&mut handle.messages, messages, message_cstring(&err));
            false
        }
    }
}

/// # Safety
///
/// `parser` must be null or a live handle from [`vpjCreateParser`]; it and
/// every snapshot or string it handed out are invalid afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vpjDestroyParser(parser: *mut VpjParser) {
    if !parser.is_null() {
        drop(unsafe { Box::from_raw(parser) });
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_fixtures::graphics_snapshot;

    #[test]
    fn generate_and_reparse_over_the_abi() {
        let snapshot = graphics_snapshot();

        let generator = vpjCreateGenerator();
        let parser = vpjCreateParser();

        unsafe {
            let mut json: *const c_char = ptr::null();
            let mut messages: *const c_char = ptr::null();
            assert!(vpjGeneratePipelineJson(
                generator,
                &snapshot,
                &mut json,
                &mut messages
            ));
            assert!(!json.is_null());
            assert!(messages.is_null());

            let mut reparsed: *const PipelineSnapshot = ptr::null();
            assert!(vpjParsePipelineJson(parser, json, &mut reparsed, &mut messages));
            assert!(!reparsed.is_null());
            assert_eq!(*reparsed, snapshot);

            vpjDestroyParser(parser);
            vpjDestroyGenerator(generator);
        }
    }

    #[test]
    fn parse_failure_reports_a_message() {
        let parser = vpjCreateParser();

        unsafe {
            let mut snapshot: *const PipelineSnapshot = ptr::null();
            let mut messages: *const c_char = ptr::null();
            assert!(!vpjParsePipelineJson(
                parser,
                c"{}".as_ptr(),
                &mut snapshot,
                &mut messages
            ));
            assert!(snapshot.is_null());
            assert!(!messages.is_null());
            let text = CStr::from_ptr(messages).to_str().unwrap();
            assert!(text.contains("$"));

            vpjDestroyParser(parser);
        }
    }

    #[test]
    fn null_handles_and_out_params_are_tolerated() {
        let snapshot = graphics_snapshot();
        unsafe {
            assert!(!vpjGeneratePipelineJson(
                ptr::null_mut(),
                &snapshot,
                ptr::null_mut(),
                ptr::null_mut()
            ));
            assert!(!vpjParsePipelineJson(
                ptr::null_mut(),
                c"{}".as_ptr(),
                ptr::null_mut(),
                ptr::null_mut()
            ));
            vpjDestroyGenerator(ptr::null_mut());
            vpjDestroyParser(ptr::null_mut());

            // Out-parameters are optional even on the success path.
            let generator = vpjCreateGenerator();
            assert!(vpjGeneratePipelineJson(
                generator,
                &snapshot,
                ptr::null_mut(),
                ptr::null_mut()
            ));
            vpjDestroyGenerator(generator);
        }
    }

    #[test]
    fn null_snapshot_sets_the_message() {
        let generator = vpjCreateGenerator();
        unsafe {
            let mut messages: *const c_char = ptr::null();
            assert!(!vpjGeneratePipelineJson(
                generator,
                ptr::null(),
                ptr::null_mut(),
                &mut messages
            ));
            assert!(!messages.is_null());
            vpjDestroyGenerator(generator);
        }
    }
}
