pub fn set_panic_hook() {
    // Routes panics to `console.error` instead of the opaque "unreachable" trap.
    // https://github.com/rustwasm/console_error_panic_hook#readme
    console_error_panic_hook::set_once();
}

pub fn init_logging() {
    // A second init (e.g. module re-instantiated by a dev server) is harmless.
    let _ = console_log::init_with_level(log::Level::Info);
}
