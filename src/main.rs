use std::process::ExitCode;

fn main() -> ExitCode {
    javelin::cli::run()
}
