//! Logging macros for the layout pipeline.
//!
//! With the `logging` feature enabled the macros forward to the [`log`]
//! facade under the `folio_oxide` target. Without it they expand to dead
//! code that still type-checks the format arguments.

/// Log an error from the layout pipeline.
#[macro_export]
macro_rules! layout_log_error {
    ($($arg:tt)*) => {
        $crate::__layout_log!($crate::__log::Level::Error, $($arg)*)
    };
}

/// Log a warning from the layout pipeline.
#[macro_export]
macro_rules! layout_log_warn {
    ($($arg:tt)*) => {
        $crate::__layout_log!($crate::__log::Level::Warn, $($arg)*)
    };
}

/// Log an informational message from the layout pipeline.
#[macro_export]
macro_rules! layout_log_info {
    ($($arg:tt)*) => {
        $crate::__layout_log!($crate::__log::Level::Info, $($arg)*)
    };
}

/// Log a debug message from the layout pipeline.
#[macro_export]
macro_rules! layout_log_debug {
    ($($arg:tt)*) => {
        $crate::__layout_log!($crate::__log::Level::Debug, $($arg)*)
    };
}

/// Log a trace message from the layout pipeline.
#[macro_export]
macro_rules! layout_log_trace {
    ($($arg:tt)*) => {
        $crate::__layout_log!($crate::__log::Level::Trace, $($arg)*)
    };
}

#[doc(hidden)]
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! __layout_log {
    ($level:expr, $($arg:tt)*) => {
        $crate::__log::log!(target: "folio_oxide", $level, $($arg)*)
    };
}

#[doc(hidden)]
#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! __layout_log {
    ($level:expr, $($arg:tt)*) => {{
        if false {
            let _ = $level;
            let _ = ::std::format!($($arg)*);
        }
    }};
}
