use firefly_core::FireflyError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for errors crossing the FFI boundary.
///
/// - `code()` - the code returned to the caller
/// - `msg()` - the message stored for `firefly_get_last_error`
pub(crate) trait FfiError {
    fn code(&self) -> FireflyErrorCode;

    fn msg(&self) -> &str;
}

/// Default `FfiError` carrying a code and a formatted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFfiError {
    code: FireflyErrorCode,
    msg: String,
}

impl DefaultFfiError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_path"`, `"cells"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FireflyErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    ///
    /// # Arguments
    /// * `lock_name` - The name of the lock that was poisoned (e.g., `"simulation"`)
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: FireflyErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for a rejected argument.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            code: FireflyErrorCode::InvalidInput,
            msg: message.into(),
        }
    }
}

impl FfiError for DefaultFfiError {
    fn code(&self) -> FireflyErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<FireflyError> for DefaultFfiError {
    fn from(error: FireflyError) -> Self {
        let code = match error {
            FireflyError::InvalidInput { .. } => FireflyErrorCode::InvalidInput,
            FireflyError::UnsafeEntry { .. } => FireflyErrorCode::UnsafeEntry,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

/// FFI error codes returned by firefly functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireflyErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid input: bad dimensions, empty goal set, out-of-bounds cell, or
    /// bad spread parameters.
    InvalidInput = 3,

    /// The entry cell is a wall or is burning.
    UnsafeEntry = 4,
}

impl From<DefaultFfiError> for FireflyErrorCode {
    fn from(error: DefaultFfiError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (message, code).
    /// The `CString` is kept here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, FireflyErrorCode)> = const { RefCell::new((None, FireflyErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, FireflyErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, FireflyErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next firefly call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// FireflyPath path;
/// FireflyErrorCode err = firefly_find_path(cells, rows, cols, goals, 1, entry, NULL, &path);
/// if (err != Ok) {
///     const char* error = firefly_get_last_error();
///     if (error) {
///         printf("Routing failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn firefly_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code on this thread.
///
/// Returns `FireflyErrorCode::Ok` (0) if the last call succeeded.
#[no_mangle]
pub extern "C" fn firefly_get_last_error_code() -> FireflyErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
