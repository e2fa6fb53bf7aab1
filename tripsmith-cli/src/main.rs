//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = tripsmith_cli::run() {
        eprintln!("tripsmith: {err}");
        std::process::exit(1);
    }
}
