use std::process::ExitCode;

fn main() -> ExitCode {
    match release_stamp::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
