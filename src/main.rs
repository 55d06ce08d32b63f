// tacgen: toy-language to three-address code compiler with a TAC explorer

use std::fs;
use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use tacgen::codegen;
use tacgen::parser::{lexer, printer, Parser};
use tacgen::ui::App;

/// What to print on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
    Tokens,
    Ast,
    Tac,
}

#[derive(Debug)]
struct Options {
    emit: Emit,
    view: bool,
    input_path: Option<String>,
}

fn usage(program_name: &str) -> String {
    format!(
        "Usage: {} [--emit tokens|ast|tac] [--view] [FILE]\n\
         \n\
         Reads FILE, or stdin when no FILE is given, and prints its three-address code.\n\
         \n\
         Options:\n  \
           --emit KIND   print tokens, the AST, or TAC (default)\n  \
           --view        browse the generated code next to its source\n  \
           -h, --help    show this message",
        program_name
    )
}

/// Parse `args`, program name first
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options> {
    let program_name = args.next().unwrap_or_else(|| "tacgen".to_string());

    let mut options = Options {
        emit: Emit::Tac,
        view: false,
        input_path: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--emit" | "-e" => {
                let kind = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("Missing output kind after {arg}"))?;
                options.emit = match kind.as_str() {
                    "tokens" => Emit::Tokens,
                    "ast" => Emit::Ast,
                    "tac" => Emit::Tac,
                    other => bail!("Unknown output kind '{other}'\n{}", usage(&program_name)),
                };
            }
            "--view" | "-v" => options.view = true,
            "--help" | "-h" => {
                println!("{}", usage(&program_name));
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => {
                bail!("Unknown option '{flag}'\n{}", usage(&program_name))
            }
            _ => {
                if options.input_path.is_some() {
                    bail!("Only one input file is supported");
                }
                options.input_path = Some(arg);
            }
        }
    }

    if options.view && options.emit != Emit::Tac {
        bail!("--view browses generated code and cannot be combined with --emit tokens or --emit ast");
    }

    Ok(options)
}

fn main() -> Result<()> {
    let options = parse_args(std::env::args())?;

    let (source, source_name) = match &options.input_path {
        Some(path) => (
            fs::read_to_string(path).with_context(|| format!("Reading {path}"))?,
            path.clone(),
        ),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Reading stdin")?;
            (buffer, "<stdin>".to_string())
        }
    };

    if options.emit == Emit::Tokens {
        let tokens = match lexer::tokenize(&source) {
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        };
        for token in &tokens {
            println!(
                "{}:{}\t{:?}\t{}",
                token.location.line, token.location.column, token.kind, token.text
            );
        }
        return Ok(());
    }

    eprintln!("Parsing {}...", source_name);
    let program = match Parser::from_source(&source).and_then(|mut p| p.parse_program()) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if options.emit == Emit::Ast {
        print!("{}", printer::render(&program));
        return Ok(());
    }

    let code = codegen::generate(&program);
    eprintln!("Generated {} instructions", code.len());

    if !options.view {
        print!("{}", code);
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(code, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("Running the TAC explorer")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        std::iter::once("tacgen".to_string())
            .chain(list.iter().map(|a| a.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_defaults() {
        let options = parse_args(args(&["prog.txt"])).unwrap();
        assert_eq!(options.emit, Emit::Tac);
        assert!(!options.view);
        assert_eq!(options.input_path.as_deref(), Some("prog.txt"));
    }

    #[test]
    fn test_view_with_tac() {
        let options = parse_args(args(&["--emit", "tac", "--view"])).unwrap();
        assert!(options.view);
        assert_eq!(options.input_path, None);
    }

    #[test]
    fn test_view_conflicts_with_other_outputs() {
        for kind in ["tokens", "ast"] {
            let err = parse_args(args(&["--view", "--emit", kind])).unwrap_err();
            assert!(err.to_string().contains("cannot be combined"), "{kind}");
        }
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(args(&["--emit"])).is_err());
        assert!(parse_args(args(&["--emit", "asm"])).is_err());
        assert!(parse_args(args(&["--verbose"])).is_err());
        assert!(parse_args(args(&["a.txt", "b.txt"])).is_err());
    }
}
