//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = seamark_cli::run() {
        eprintln!("seamark: {err}");
        std::process::exit(1);
    }
}
