use crate::{
    Variant,
    variant::{DEFAULT_CA, DEFAULT_DRIVER_SRC},
};
use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::{
        BoolishValueParser,
        styling::{AnsiColor, Effects, Styles},
    },
};
use std::path::PathBuf;

/// Pure clap command definitions with zero business logic
///
/// Every argument has a default matching the fixed local setup, so running
/// without arguments checks `dart@localhost:1433/dart`.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn new(variant: Variant) -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let about = match variant {
        Variant::Plain => "Check that a local SQL Server login succeeds over plain TDS",
        Variant::Tls => "Check that a local SQL Server login succeeds over TLS",
    };

    let command = Command::new(variant.bin_name())
        .about(about)
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("host")
                .default_value("localhost")
                .env("TDSCHECK_HOST")
                .help("SQL Server host name or IP address")
                .long("host")
                .short('H'),
        )
        .arg(
            Arg::new("port")
                .default_value("1433")
                .env("TDSCHECK_PORT")
                .help("SQL Server TCP port")
                .long("port")
                .short('p')
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("database")
                .default_value("dart")
                .env("TDSCHECK_DATABASE")
                .help("Database to log in to")
                .long("database")
                .short('d'),
        )
        .arg(
            Arg::new("user")
                .default_value("dart")
                .env("TDSCHECK_USER")
                .help("SQL Server login")
                .long("user")
                .short('u'),
        )
        .arg(
            Arg::new("password")
                .default_value("dart")
                .env("TDSCHECK_PASSWORD")
                .help("Password for the SQL Server login")
                .hide_default_value(true)
                .hide_env_values(true)
                .long("password"),
        )
        .arg(
            Arg::new("app-name")
                .default_value(variant.app_name())
                .env("TDSCHECK_APP_NAME")
                .help("Application name sent at login")
                .long("app-name"),
        )
        .arg(
            Arg::new("driver-src")
                .default_value(DEFAULT_DRIVER_SRC)
                .env("TDSCHECK_DRIVER_SRC")
                .help("Source tree of the driver checkout under test")
                .long("driver-src")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log")
                .default_value(variant.default_log())
                .env("TDSCHECK_LOG")
                .help("File receiving a copy of everything printed, truncated on each run")
                .long("log")
                .short('l')
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("trace-events")
                .default_value("1")
                .env("TDSCHECK_TRACE_EVENTS")
                .help("Emit verbose driver tracing events on stderr (1/0, true/false)")
                .long("trace-events")
                .value_name("BOOL")
                .value_parser(BoolishValueParser::new()),
        );

    if !variant.uses_tls() {
        return command;
    }

    command
        .arg(
            Arg::new("ca")
                .default_value(DEFAULT_CA)
                .env("TDSCHECK_TLS_CA")
                .help("CA certificate the server certificate must chain to")
                .long("ca")
                .long_help(
                    "CA certificate the server certificate must chain to.\n\
                    PEM (.pem, .crt) or DER (.der), chosen by extension.\n\
                    Without --validate-host the server certificate must carry\n\
                    the CA's own DNS name (a self-signed server certificate).\n\n\
                    Example: scripts/certificate/sqlserver.crt",
                )
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("validate-host")
                .action(ArgAction::SetTrue)
                .env("TDSCHECK_TLS_VALIDATE_HOST")
                .help("Also match the server certificate against --host")
                .long("validate-host"),
        )
}
