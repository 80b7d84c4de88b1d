//! Browser console logging

/// Log a formatted message to the browser console.
///
/// Messages are discarded on non-wasm targets.
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {
        $crate::logging::log(&format!($($arg)*))
    };
}

#[cfg(target_arch = "wasm32")]
pub fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log(_message: &str) {}
