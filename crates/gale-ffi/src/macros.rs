//! Boundary-guard macros shared by every entry point.

/// Wrap an FFI function body so panics become `GaleStatus::Panicked`
/// instead of unwinding across the C boundary. The body must evaluate to
/// the `i32` status to return; `return` inside it leaves the guard.
macro_rules! ffi_guard {
    ($body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(status) => status,
            Err(_) => $crate::status::GaleStatus::Panicked as i32,
        }
    };
}

/// Lock a global handle table, returning `InternalError` on poisoning.
///
/// Poisoning only happens after a panic in another guarded call, so the
/// process is already in a degraded state; refusing the lock is the
/// conservative answer.
macro_rules! ffi_lock {
    ($table:expr) => {
        match $table.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::GaleStatus::InternalError as i32,
        }
    };
}
