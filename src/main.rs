// slotswap: interactive value swapper with stack frame visualization

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use slotswap::config::{usage, Config};
use slotswap::logging;
use slotswap::session::engine::{Session, SessionOutcome};

fn main() -> ExitCode {
    // Parse command-line arguments
    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "slotswap".to_string());

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", usage(&program_name));
            return ExitCode::from(2);
        }
    };

    if config.show_help {
        println!("{}", usage(&program_name));
        return ExitCode::SUCCESS;
    }

    logging::init(config.log_level());

    let session_config = config.session_config(io::stderr().is_terminal());
    log::debug!("starting with {:?}", session_config);

    let stdin = io::stdin();
    let mut session = Session::new(
        stdin.lock(),
        io::stdout().lock(),
        io::stderr(),
        session_config,
    );

    match session.run() {
        Ok(SessionOutcome::Declined) => ExitCode::SUCCESS,
        Ok(SessionOutcome::InputClosed) => {
            // Leave the dangling prompt on its own line
            println!();
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Fatal swap errors were already reported by the session
            if !matches!(e, slotswap::session::errors::SessionError::Swap(_)) {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code())
        }
    }
}
