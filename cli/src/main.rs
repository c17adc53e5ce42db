//! `htl` binary entry point.

fn main() {
    if let Err(e) = htl_cli::run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
