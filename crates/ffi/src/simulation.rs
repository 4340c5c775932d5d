use firefly_core::{FireSimulation, SpreadParams};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ptr;
use std::sync::Mutex;

use crate::error::{DefaultFfiError, FireflyErrorCode};
use crate::helpers::{raw_shape, track_error, track_result};
use crate::types::{FireflyCoord, FireflySpreadParams};

/// A stepwise fire spread simulation owned by the caller.
///
/// # Thread Safety
/// The simulation sits behind a `Mutex`, so an instance may be stepped and
/// queried from any thread. Calls on one instance serialize.
pub struct FireflySimInstance {
    pub(crate) sim: Mutex<FireSimulation<StdRng>>,
    /// Copy of the burning mask handed out by `firefly_sim_get_state`.
    pub(crate) snapshot: Mutex<Vec<u8>>,
}

impl FireflySimInstance {
    pub(crate) fn new(
        ignite: FireflyCoord,
        rows: usize,
        cols: usize,
        params: FireflySpreadParams,
        seed: Option<u64>,
    ) -> Result<Box<Self>, DefaultFfiError> {
        let shape = raw_shape(rows, cols)?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let sim = FireSimulation::new(ignite.into(), shape, SpreadParams::from(params), rng)?;
        let snapshot = sim.state().as_slice().to_vec();
        Ok(Box::new(Self {
            sim: Mutex::new(sim),
            snapshot: Mutex::new(snapshot),
        }))
    }
}

/// Borrow an instance from a caller pointer.
fn instance_from_ptr<'a>(ptr: *const FireflySimInstance) -> Result<&'a FireflySimInstance, DefaultFfiError> {
    // SAFETY: non-null pointers must come from `firefly_sim_new` (caller contract)
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultFfiError::null_pointer("sim"))
}

/// Create a fire simulation with a single ignition cell.
///
/// Parameters
/// - `ignite`: initial burning cell
/// - `rows`, `cols`: grid dimensions
/// - `params`: spread parameters
/// - `seed`: pointer to a seed for reproducible runs; null draws from OS entropy
/// - `out_sim`: receives the instance, or null on failure
///
/// Returns
/// - `FireflyErrorCode::Ok` on success
/// - `FireflyErrorCode::NullPointer` if `out_sim` is null
/// - `FireflyErrorCode::InvalidInput` for a zero-area grid, an ignition cell
///   outside it, or negative / non-finite parameters
///
/// # Safety
/// - `out_sim` must be a valid, non-null pointer to writable memory.
/// - `seed` must be null or point to a readable `u64`.
/// - The instance must be released exactly once with `firefly_sim_destroy`.
#[no_mangle]
pub unsafe extern "C" fn firefly_sim_new(
    ignite: FireflyCoord,
    rows: usize,
    cols: usize,
    params: FireflySpreadParams,
    seed: *const u64,
    out_sim: *mut *mut FireflySimInstance,
) -> FireflyErrorCode {
    if out_sim.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_sim"));
    }
    // SAFETY: null or readable per the caller contract
    let seed = unsafe { seed.as_ref() }.copied();

    match track_result(FireflySimInstance::new(ignite, rows, cols, params, seed)) {
        Ok(instance) => {
            unsafe {
                *out_sim = Box::into_raw(instance);
            }
            FireflyErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_sim = ptr::null_mut();
            }
            code
        }
    }
}

/// Advance the simulation one step.
///
/// Invalidates any pointer previously returned by `firefly_sim_get_state`.
#[no_mangle]
pub extern "C" fn firefly_sim_step(sim: *const FireflySimInstance) -> FireflyErrorCode {
    let result = instance_from_ptr(sim).and_then(|instance| {
        let mut sim = instance
            .sim
            .lock()
            .map_err(|_| DefaultFfiError::lock_poisoned("simulation"))?;
        sim.step();
        Ok(())
    });
    match track_result(result) {
        Ok(()) => FireflyErrorCode::Ok,
        Err(code) => code,
    }
}

/// Borrow the current burning mask as `rows * cols` row-major bytes (1 = burning).
///
/// The pointer stays valid until the next `firefly_sim_get_state`,
/// `firefly_sim_step` or `firefly_sim_destroy` on this instance.
///
/// # Safety
/// - `sim` must come from `firefly_sim_new`.
/// - `out_len` and `out_cells` must be valid, non-null pointers to writable memory.
#[no_mangle]
pub unsafe extern "C" fn firefly_sim_get_state(
    sim: *const FireflySimInstance,
    out_len: *mut usize,
    out_cells: *mut *const u8,
) -> FireflyErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_len"));
    }
    if out_cells.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_cells"));
    }

    let result = instance_from_ptr(sim).and_then(|instance| {
        let sim = instance
            .sim
            .lock()
            .map_err(|_| DefaultFfiError::lock_poisoned("simulation"))?;
        let mut snapshot = instance
            .snapshot
            .lock()
            .map_err(|_| DefaultFfiError::lock_poisoned("snapshot"))?;
        snapshot.clear();
        snapshot.extend_from_slice(sim.state().as_slice());
        Ok((snapshot.len(), snapshot.as_ptr()))
    });

    match track_result(result) {
        Ok((len, cells)) => {
            unsafe {
                *out_len = len;
                *out_cells = cells;
            }
            FireflyErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_len = 0;
                *out_cells = ptr::null();
            }
            code
        }
    }
}

/// Destroy an instance created by `firefly_sim_new`. Null is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `firefly_sim_new` and not freed already.
#[no_mangle]
pub unsafe extern "C" fn firefly_sim_destroy(sim: *mut FireflySimInstance) {
    if sim.is_null() {
        return;
    }
    // SAFETY: created by `Box::into_raw` in `firefly_sim_new`
    unsafe {
        drop(Box::from_raw(sim));
    }
}
