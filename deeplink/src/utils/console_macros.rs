/// Macros for properly formatted console logging.
///
/// On `wasm32` these write to the browser console through `gloo_console`,
/// prefixed with a `js_sys::Date` timestamp. On every other target they go
/// through `tracing`, so native unit tests never call into JS imports.
#[macro_export]
macro_rules! console_info {
    ($($arg:tt)*) => {
        $crate::__console_emit!(info, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {
        $crate::__console_emit!(warn, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! console_error {
    ($($arg:tt)*) => {
        $crate::__console_emit!(error, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! console_debug {
    ($($arg:tt)*) => {
        $crate::__console_emit!(debug, format!($($arg)*))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __console_emit {
    ($level:ident, $message:expr) => {{
        let message: String = $message;
        #[cfg(target_arch = "wasm32")]
        {
            $crate::__private::gloo_console::$level!(format!(
                "[{}] {}",
                $crate::__private::js_sys::Date::now(),
                message
            ));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            $crate::__private::tracing::$level!("{}", message);
        }
    }};
}
