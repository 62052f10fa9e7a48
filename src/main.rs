use clap::Parser;
use segue::{app_core::Segue, cli::Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    match Segue::new(args).and_then(Segue::run) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.exit_code();
            eprintln!("ERROR {code}: {e}");
            ExitCode::from(code)
        }
    }
}
