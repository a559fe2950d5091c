use std::process::ExitCode;

fn main() -> ExitCode {
    match slabq::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(slabq::errors::get_exit_code(&e))
        }
    }
}
