//! Purpose: `polwrap` CLI entry point.
//! Role: Binary crate root; parses args, runs the transformation, prints results.
//! Invariants: The escaped payload and command line go to stdout; diagnostics go to stderr.
//! Invariants: The wrong-argument-count usage message goes to stdout.
//! Invariants: Process exit code is derived from `core::to_exit_code`.
use std::io::{self, IsTerminal};

use clap::{CommandFactory, Parser, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;

mod ingest;

use polwrap::core::{
    DEFAULT_ATTRIBUTE, DEFAULT_QUEUE_URL, Error, ErrorKind, escaped_attribute,
    set_attributes_command, to_exit_code, validate_attribute_name,
};

const USAGE: &str = "Usage: polwrap <path_to_json_file>";

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                return Ok(RunOutcome::ok());
            }
            _ => {
                println!("{USAGE}");
                return Ok(RunOutcome::with_code(1));
            }
        },
    };

    let color_mode = cli.color;

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::aot::generate(shell, &mut cmd, "polwrap", &mut io::stdout());
        return Ok(RunOutcome::ok());
    }

    let Some(path) = cli.path else {
        println!("{USAGE}");
        return Ok(RunOutcome::with_code(1));
    };

    validate_attribute_name(&cli.attribute).map_err(|err| (err, color_mode))?;

    let document = ingest::load_document(&path)
        .map_err(add_io_hint)
        .map_err(|err| (err, color_mode))?;

    let envelope = escaped_attribute(&cli.attribute, &document);
    println!("{envelope}");
    println!();
    println!();
    println!();
    println!("{}", set_attributes_command(&cli.queue_url, &envelope));
    Ok(RunOutcome::ok())
}

#[derive(Parser)]
#[command(
    name = "polwrap",
    version,
    about = "Escape a JSON policy document for AWS CLI attribute arguments",
    help_template = r#"{about-with-newline}
{before-help}USAGE
  {usage}

ARGUMENTS
{positionals}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"Reads a JSON document, escapes every double quote, and prints the result
wrapped as a queue-attribute payload plus a ready-to-paste AWS CLI command.
"#,
    after_help = r#"EXAMPLES
  $ polwrap policy.json
  $ polwrap --attribute RedrivePolicy redrive.json
  $ polwrap --queue-url https://sqs.us-east-1.amazonaws.com/123456789012/jobs policy.json
  $ cat policy.json | polwrap -

NOTES
  - $QUEUE_URL in the default output is literal text for your shell to expand
  - Only double quotes are escaped; the serialized text is otherwise untouched"#
)]
struct Cli {
    #[arg(
        value_hint = ValueHint::FilePath,
        help = "Path to the JSON policy file (use - for stdin)"
    )]
    path: Option<String>,
    #[arg(
        long,
        default_value = DEFAULT_ATTRIBUTE,
        help = "Queue attribute name for the envelope (e.g. RedrivePolicy)"
    )]
    attribute: String,
    #[arg(
        long,
        default_value = DEFAULT_QUEUE_URL,
        help = "Queue URL placed in the printed command (emitted verbatim)"
    )]
    queue_url: String,
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,
    #[arg(
        long,
        value_name = "SHELL",
        help = "Print shell completions for SHELL and exit"
    )]
    completions: Option<Shell>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let use_color = color_mode.use_color(io::stderr().is_terminal());
    eprintln!("{}", error_text(err, use_color));
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("Error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "file not found".to_string(),
        ErrorKind::Permission => "permission denied".to_string(),
        ErrorKind::Parse => "invalid JSON".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    use std::error::Error as StdError;

    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn add_io_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::NotFound => err.with_hint("Check the path to the policy file."),
        ErrorKind::Permission => err.with_hint("Permission denied. Check the file's permissions."),
        ErrorKind::Io => err.with_hint("I/O error. Check the path and filesystem."),
        ErrorKind::Parse => {
            err.with_hint("Make sure the file contains a single valid JSON document.")
        }
        _ => err,
    }
}

#[cfg(test)]
mod tests {
    use super::{AnsiColor, Cli, ColorMode, add_io_hint, colorize_label, error_text};
    use clap::CommandFactory;
    use polwrap::core::{Error, ErrorKind};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn error_text_carries_prefix_and_context() {
        let err = Error::new(ErrorKind::NotFound)
            .with_message("failed to read policy file")
            .with_path("missing.json")
            .with_hint("Check the path to the policy file.");
        let text = error_text(&err, false);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Error: failed to read policy file"));
        assert_eq!(lines.next(), Some("hint: Check the path to the policy file."));
        assert_eq!(lines.next(), Some("path: missing.json"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn io_hints_fill_in_when_absent() {
        let err = add_io_hint(Error::new(ErrorKind::NotFound));
        assert_eq!(err.hint(), Some("Check the path to the policy file."));

        let kept = add_io_hint(Error::new(ErrorKind::NotFound).with_hint("already set"));
        assert_eq!(kept.hint(), Some("already set"));
    }

    #[test]
    fn colorized_labels_wrap_in_ansi() {
        assert_eq!(colorize_label("Error:", false, AnsiColor::Red), "Error:");
        assert_eq!(
            colorize_label("Error:", true, AnsiColor::Red),
            "\u{1b}[31mError:\u{1b}[0m"
        );
        assert!(!ColorMode::Never.use_color(true));
        assert!(ColorMode::Always.use_color(false));
    }
}
