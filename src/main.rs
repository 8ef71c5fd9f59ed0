use std::process::ExitCode;

use synthetic_check::configuration::get_configuration;
use synthetic_check::startup::run;
use synthetic_check::telemetry::{get_subscriber, init_subscriber};

fn main() -> ExitCode {
    let subscriber = get_subscriber("synthetic-check".into(), "warn".into(), std::io::stderr);
    init_subscriber(subscriber);

    let code = run(
        get_configuration(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    ExitCode::from(code)
}
