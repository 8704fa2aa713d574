use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";
pub const ARG_JWT_SECRET: &str = "jwt-secret";
pub const ARG_AUTH_SERVICE_URL: &str = "auth-service-url";
pub const ARG_AUTH_SERVICE_TIMEOUT: &str = "auth-service-timeout-seconds";
pub const ARG_FRONTEND_ORIGIN: &str = "frontend-origin";
pub const ARG_VERBOSITY: &str = "verbosity";

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    Command::new("otpgate")
        .about("Login and OTP verification gateway")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("OTPGATE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_JWT_SECRET)
                .long("jwt-secret")
                .help("Secret used to sign session tokens")
                .env("OTPGATE_JWT_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_AUTH_SERVICE_URL)
                .long("auth-service-url")
                .help("Base URL of the auth service, example: https://auth.tld/api")
                .env("OTPGATE_AUTH_SERVICE_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_AUTH_SERVICE_TIMEOUT)
                .long("auth-service-timeout-seconds")
                .help("Timeout for auth service requests in seconds")
                .default_value("10")
                .env("OTPGATE_AUTH_SERVICE_TIMEOUT_SECONDS")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_FRONTEND_ORIGIN)
                .long("frontend-origin")
                .help("Allow cross-origin requests from this origin, example: https://app.tld")
                .env("OTPGATE_FRONTEND_ORIGIN"),
        )
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("OTPGATE_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
