//! C ABI for visualizers written in other languages.
//!
//! The graph is passed in CSR form (`offsets` of length `n + 1`, `targets` and
//! `weights` of length `offsets[n]`). Every call returns `0` on success or a
//! negative [`Error::code`](crate::Error::code); `-1` signals a null pointer
//! or an undersized output buffer.

use core::slice;

use crate::config::StepperConfig;
use crate::event::StepEvent;
use crate::graph::CsrGraph;
use crate::stepper::Stepper;

/// Opaque run handle.
pub struct SsspStepper {
    inner: Stepper<u32>,
}

pub const SSSP_EVENT_SELECTED_UNVISITED: i32 = 0;
pub const SSSP_EVENT_EXAMINED_EDGE: i32 = 1;
pub const SSSP_EVENT_RELAXED: i32 = 2;
pub const SSSP_EVENT_FINISHED_VERTEX: i32 = 3;

/// Flattened [`StepEvent`]. Fields not used by `kind` are zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SsspStepRecord {
    pub kind: i32,
    pub vertex: u32,      // selected / finished vertex
    pub edge_source: u32, // examined / relaxed edge
    pub edge_target: u32,
    pub edge_index: u32,
    pub weight: f64,
    pub distance: f64, // selection distance or relaxation candidate
    pub flag: i32,     // relaxed (examined) or updated (relaxed)
}

impl From<&StepEvent<u32>> for SsspStepRecord {
    fn from(ev: &StepEvent<u32>) -> Self {
        match ev {
            StepEvent::SelectedUnvisited { vertex, distance } => Self {
                kind: SSSP_EVENT_SELECTED_UNVISITED,
                vertex: *vertex,
                distance: *distance,
                ..Self::default()
            },
            StepEvent::ExaminedEdge { edge, index, relaxed } => Self {
                kind: SSSP_EVENT_EXAMINED_EDGE,
                edge_source: edge.from,
                edge_target: edge.to,
                edge_index: u32::try_from(*index).unwrap_or(u32::MAX),
                weight: edge.weight,
                flag: i32::from(*relaxed),
                ..Self::default()
            },
            StepEvent::Relaxed { edge, index, new_distance, updated } => Self {
                kind: SSSP_EVENT_RELAXED,
                edge_source: edge.from,
                edge_target: edge.to,
                edge_index: u32::try_from(*index).unwrap_or(u32::MAX),
                weight: edge.weight,
                distance: *new_distance,
                flag: i32::from(*updated),
                ..Self::default()
            },
            StepEvent::FinishedVertex { vertex } => Self {
                kind: SSSP_EVENT_FINISHED_VERTEX,
                vertex: *vertex,
                ..Self::default()
            },
        }
    }
}

#[inline(always)]
unsafe fn as_slice<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    slice::from_raw_parts(ptr, len)
}

/// # Safety
/// `out_err` must be null or writable.
unsafe fn report(out_err: *mut i32, code: i32) {
    if !out_err.is_null() {
        *out_err = code;
    }
}

/// Builds a stepper over a copy of the CSR arrays. `config_json` may be null
/// for the default configuration.
///
/// # Safety
/// `offsets` must point to `n + 1` readable `u32`s, and `targets`/`weights` to
/// `offsets[n]` elements each. `config_json`, when non-null, must be a
/// NUL-terminated UTF-8 string. `out_err` may be null.
#[no_mangle]
pub unsafe extern "C" fn sssp_stepper_new(
    n: u32,
    offsets: *const u32,
    targets: *const u32,
    weights: *const f64,
    source: u32,
    config_json: *const core::ffi::c_char,
    out_err: *mut i32,
) -> *mut SsspStepper {
    if offsets.is_null() || targets.is_null() || weights.is_null() {
        report(out_err, -1);
        return core::ptr::null_mut();
    }
    let off = as_slice(offsets, n as usize + 1);
    let m = off[n as usize] as usize;
    let tgt = as_slice(targets, m);
    let wts = as_slice(weights, m);

    let config = if config_json.is_null() {
        Ok(StepperConfig::default())
    } else {
        match core::ffi::CStr::from_ptr(config_json).to_str() {
            Ok(text) => StepperConfig::from_json(text),
            Err(_) => {
                report(out_err, -1);
                return core::ptr::null_mut();
            }
        }
    };
    let built = config.and_then(|cfg| {
        let graph = CsrGraph::new(off.to_vec(), tgt.to_vec(), wts.to_vec())?;
        Stepper::with_config(&graph, &source, cfg)
    });
    match built {
        Ok(inner) => {
            report(out_err, 0);
            Box::into_raw(Box::new(SsspStepper { inner }))
        }
        Err(e) => {
            report(out_err, e.code());
            core::ptr::null_mut()
        }
    }
}

/// # Safety
/// `handle` must come from [`sssp_stepper_new`] and not be freed.
#[no_mangle]
pub unsafe extern "C" fn sssp_stepper_has_next(handle: *const SsspStepper) -> i32 {
    match handle.as_ref() {
        Some(h) => i32::from(h.inner.has_next_step()),
        None => 0,
    }
}

/// Performs one micro-step and writes its descriptor into `out`.
///
/// # Safety
/// `handle` must be live; `out` must be writable.
#[no_mangle]
pub unsafe extern "C" fn sssp_stepper_step(handle: *mut SsspStepper, out: *mut SsspStepRecord) -> i32 {
    let (Some(h), false) = (handle.as_mut(), out.is_null()) else { return -1 };
    match h.inner.step() {
        Ok(ev) => {
            *out = SsspStepRecord::from(&ev);
            0
        }
        Err(e) => e.code(),
    }
}

/// Tentative distance of `v`; NaN for a null handle or unknown vertex.
///
/// # Safety
/// `handle` must be live or null.
#[no_mangle]
pub unsafe extern "C" fn sssp_stepper_distance(handle: *const SsspStepper, v: u32) -> f64 {
    handle
        .as_ref()
        .and_then(|h| h.inner.distance_of(&v).ok())
        .unwrap_or(f64::NAN)
}

/// Writes the source-to-`v` path into `out_buf` (capacity `cap`) and its
/// length into `out_len`. When the buffer is too small, `out_len` still
/// receives the required length and `-1` is returned.
///
/// # Safety
/// `handle` must be live; `out_buf` must hold `cap` writable `u32`s;
/// `out_len` must be writable.
#[no_mangle]
pub unsafe extern "C" fn sssp_stepper_path(
    handle: *const SsspStepper,
    v: u32,
    out_buf: *mut u32,
    cap: u32,
    out_len: *mut u32,
) -> i32 {
    let Some(h) = handle.as_ref() else { return -1 };
    if out_len.is_null() || (out_buf.is_null() && cap > 0) {
        return -1;
    }
    let path = match h.inner.path_to(&v) {
        Ok(p) => p,
        Err(e) => return e.code(),
    };
    *out_len = u32::try_from(path.len()).unwrap_or(u32::MAX);
    if path.len() > cap as usize {
        return -1;
    }
    slice::from_raw_parts_mut(out_buf, path.len()).copy_from_slice(&path);
    0
}

/// # Safety
/// `handle` must come from [`sssp_stepper_new`] and not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn sssp_stepper_free(handle: *mut SsspStepper) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

#[no_mangle]
pub extern "C" fn sssp_version() -> u32 {
    1
}
