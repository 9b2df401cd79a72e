mod app;

use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let options = match app::build_options(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            println!("{}", app::usage_text());
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}\n\n{}", app::usage_text());
            return ExitCode::from(2);
        }
    };

    app::init_tracing();
    app::run(options)
}
