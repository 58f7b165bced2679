use crate::config::{DATABASE_URL, PGPROBE_FORMAT};
use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::{
        OsStringValueParser,
        styling::{AnsiColor, Effects, Styles},
    },
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("dsn")
                .env(DATABASE_URL)
                .help("postgres://<username>:<password>@<host>:<port>/<database>[?sslmode=require]")
                .long("dsn")
                .short('d')
                .hide_env_values(true)
                .value_parser(OsStringValueParser::new()),
        )
        // no `env` here, a bad value in the environment must not abort the run
        .arg(
            Arg::new("format")
                .help(format!(
                    "output format of the report line [default: ${PGPROBE_FORMAT} or text]"
                ))
                .long("format")
                .short('f')
                .value_parser(["text", "json"]),
        )
        .arg(
            Arg::new("verbose")
                .help("log to stderr, repeat for more detail (-v info, -vv debug, -vvv trace)")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count),
        )
}
