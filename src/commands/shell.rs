//! Interactive session over a single controller.
//!
//! Unlike the one-shot commands, the form survives between lines, so a
//! ficha can be loaded with `edit`, adjusted with `set` and saved with
//! `submit`.

use clap::Args;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use fichas::{Controller, DraftField, ReferenceSource, SyncClient};

use super::render::{empty_list_message, print_draft, print_ficha, print_table};

const HELP: &str = "\
Commands:
  list                   List fichas
  show <code>            Show one ficha
  reload                 Reload the ficha list
  new                    Start a new ficha (discards the draft)
  edit <code>            Load a ficha into the form
  set <field> <value>    Set a draft field (empty value clears it)
  draft                  Show the current draft
  submit                 Create or update from the draft
  cancel                 Leave edit mode
  delete <code>          Delete a ficha
  programs | sites | statuses
  help | quit

Fields: code, start, end-classwork, end-record, program, site, status";

/// Start an interactive session
#[derive(Args)]
pub struct ShellCommand {}

#[derive(Debug, PartialEq)]
enum ShellAction {
    List,
    Show(i64),
    Reload,
    New,
    Edit(i64),
    Set(DraftField, String),
    Draft,
    Submit,
    Cancel,
    Delete(i64),
    Programs,
    Sites,
    Statuses,
    Help,
    Quit,
}

fn parse_code(arg: Option<&str>) -> Result<i64, String> {
    let arg = arg.ok_or("missing ficha code")?;
    arg.parse()
        .map_err(|_| format!("'{}' is not a valid ficha code", arg))
}

/// Parses one input line; blank lines yield `None`.
fn parse_line(line: &str) -> Result<Option<ShellAction>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let arg = if rest.is_empty() { None } else { Some(rest) };

    let action = match command.to_lowercase().as_str() {
        "list" | "ls" => ShellAction::List,
        "show" => ShellAction::Show(parse_code(arg)?),
        "reload" => ShellAction::Reload,
        "new" => ShellAction::New,
        "edit" => ShellAction::Edit(parse_code(arg)?),
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            ShellAction::Set(DraftField::from_str(field)?, value.to_string())
        }
        "draft" => ShellAction::Draft,
        "submit" | "save" => ShellAction::Submit,
        "cancel" => ShellAction::Cancel,
        "delete" | "rm" => ShellAction::Delete(parse_code(arg)?),
        "programs" => ShellAction::Programs,
        "sites" => ShellAction::Sites,
        "statuses" => ShellAction::Statuses,
        "help" | "?" => ShellAction::Help,
        "quit" | "exit" | "q" => ShellAction::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };
    Ok(Some(action))
}

fn print_notification<C>(controller: &Controller<C>)
where
    C: SyncClient + ReferenceSource,
{
    if let Some(notification) = controller.notification().current() {
        println!("{}", notification);
    }
}

impl ShellCommand {
    pub async fn run<C>(&self, controller: &mut Controller<C>) -> Result<(), Box<dyn std::error::Error>>
    where
        C: SyncClient + ReferenceSource,
    {
        print_notification(controller);
        println!(
            "{} ficha(s) loaded. Type 'help' for commands.",
            controller.store().len()
        );

        let stdin = io::stdin();
        let mut input = String::new();

        loop {
            let prompt = if controller.form().is_editing() {
                "fichas (edit)> "
            } else {
                "fichas> "
            };
            print!("{}", prompt);
            io::stdout().flush()?;

            input.clear();
            if stdin.lock().read_line(&mut input)? == 0 {
                println!();
                break;
            }

            let action = match parse_line(&input) {
                Ok(Some(action)) => action,
                Ok(None) => continue,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };

            match action {
                ShellAction::List => {
                    if controller.store().is_empty() {
                        println!("{}", empty_list_message(controller.store()));
                    } else {
                        print_table(controller.store().records(), controller.reference());
                    }
                }
                ShellAction::Show(code) => match controller.store().get(code) {
                    Some(ficha) => print_ficha(ficha, controller.reference()),
                    None => println!("Ficha not found: {}", code),
                },
                ShellAction::Reload => {
                    if let Ok(count) = controller.reload().await {
                        println!("Loaded {} ficha(s)", count);
                    }
                    print_notification(controller);
                }
                ShellAction::New | ShellAction::Cancel => {
                    if controller.cancel_edit().is_ok() {
                        println!("Form cleared");
                    }
                    print_notification(controller);
                }
                ShellAction::Edit(code) => {
                    if controller.begin_edit(code).is_ok() {
                        print_draft(controller.form(), controller.reference());
                    } else {
                        print_notification(controller);
                    }
                }
                ShellAction::Set(field, value) => {
                    if controller.set_field(field, &value).is_err() {
                        print_notification(controller);
                    }
                }
                ShellAction::Draft => print_draft(controller.form(), controller.reference()),
                ShellAction::Submit => {
                    let _ = controller.submit().await;
                    print_notification(controller);
                }
                ShellAction::Delete(code) => {
                    let _ = controller.delete(code).await;
                    print_notification(controller);
                }
                ShellAction::Programs => {
                    for program in controller.reference().programs() {
                        println!("{:<8}  {}", program.id, program.name);
                    }
                }
                ShellAction::Sites => {
                    for site in controller.reference().sites() {
                        println!("{:<8}  {}", site.id, site.name);
                    }
                }
                ShellAction::Statuses => {
                    for status in controller.reference().statuses() {
                        println!("{}", status);
                    }
                }
                ShellAction::Help => println!("{}", HELP),
                ShellAction::Quit => break,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_line("list").unwrap(), Some(ShellAction::List));
        assert_eq!(parse_line("  SUBMIT ").unwrap(), Some(ShellAction::Submit));
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("q").unwrap(), Some(ShellAction::Quit));
    }

    #[test]
    fn test_parse_code_argument() {
        assert_eq!(parse_line("edit 12").unwrap(), Some(ShellAction::Edit(12)));
        assert_eq!(parse_line("rm 3").unwrap(), Some(ShellAction::Delete(3)));
        assert!(parse_line("edit").is_err());
        assert!(parse_line("delete abc").is_err());
    }

    #[test]
    fn test_parse_set() {
        assert_eq!(
            parse_line("set end-record 2024-07-01").unwrap(),
            Some(ShellAction::Set(
                DraftField::EndRecordDate,
                "2024-07-01".to_string()
            ))
        );
        assert_eq!(
            parse_line("set status").unwrap(),
            Some(ShellAction::Set(DraftField::Status, String::new()))
        );
        assert!(parse_line("set").is_err());
        assert!(parse_line("set colour blue").is_err());
    }

    #[test]
    fn test_parse_unknown() {
        let err = parse_line("frobnicate").unwrap_err();
        assert!(err.contains("Unknown command"));
    }
}
