fn main() {
    if let Err(e) = app_lib::run() {
        log::error!("fatal: {} ({})", e, e.code());
        eprintln!("newsdesk: {}", e);
        std::process::exit(1);
    }
}
