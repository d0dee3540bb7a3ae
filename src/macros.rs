// A simple macro for wrapping calls to the 'log' crate. When the 'logging'
// feature is disabled, the wrapped code is removed entirely.
macro_rules! log {
    ($($tt:tt)*) => {
        #[cfg(feature = "logging")]
        {
            $($tt)*
        }
    }
}
