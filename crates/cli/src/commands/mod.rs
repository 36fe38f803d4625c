//! Subcommand implementations. Each `run` returns the process exit code.

pub mod generate;
pub mod interface;

/// Print the error and turn the outcome into an exit code.
pub fn run_inner<F>(f: F) -> i32
where
    F: FnOnce() -> Result<(), String>,
{
    match f() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}
