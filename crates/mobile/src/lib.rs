pub mod render;
pub mod state;

uniffi::setup_scaffolding!();

/// Initialize the library with proper panic handling
/// Call this once at startup from Kotlin/Swift
#[uniffi::export]
pub fn init_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        eprintln!("=== RUST PANIC ===");
        eprintln!("{panic_info}");
        eprintln!("Backtrace:\n{backtrace}");
        eprintln!("=== END PANIC ===");
    }));
}

/// Install the tracing subscriber. Call once at startup from Kotlin/Swift.
#[uniffi::export]
pub fn init_logging() {
    #[cfg(target_os = "android")]
    {
        use tracing_logcat::{LogcatMakeWriter, LogcatTag};

        let writer = LogcatMakeWriter::new(LogcatTag::Fixed("ecoroute".to_owned()))
            .expect("failed to open logcat writer");
        tracing_subscriber::fmt()
            .with_writer(writer)
            .with_ansi(false)
            .without_time()
            .init();
    }

    #[cfg(not(target_os = "android"))]
    tracing_subscriber::fmt().init();
}
