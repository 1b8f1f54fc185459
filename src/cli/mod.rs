mod handlers;
pub mod parse;

pub use parse::Cli;

use crate::core::error::HistError;

pub fn run(cli: Cli) -> Result<(), HistError> {
    match cli.cmd {
        parse::Command::Plot(a) => handlers::plot(&a),
        parse::Command::Demo(a) => handlers::demo(&a),
        parse::Command::Colors => {
            handlers::colors();
            Ok(())
        }
        parse::Command::Examples => {
            handlers::examples();
            Ok(())
        }
    }
}
