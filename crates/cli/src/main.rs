//! `clientgen` binary entry point.

fn main() {
    std::process::exit(clientgen_cli::run_cli(std::env::args().collect()));
}
