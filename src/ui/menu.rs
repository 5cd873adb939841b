use crate::dispatch::{Operation, OperationRequest};
use crate::error::{Result, TaskMateError, UserFriendlyError};
use crate::TaskMate;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const MENU_TITLE: &str = "====== TASK AUTOMATION MENU ======";
pub const GOODBYE: &str = "Exiting TaskMate. Goodbye! 👋";

/// Line-oriented prompt/answer surface for the interactive loop.
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn show(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", MENU_TITLE)?;
        for operation in Operation::ALL {
            writeln!(self.output, "{}", operation)?;
        }
        Ok(())
    }

    /// Prints `label` and reads one trimmed line. `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Asks for the arguments of `operation`. `None` for [`Operation::Exit`]
    /// or when input runs out mid-way.
    pub fn read_request(&mut self, operation: Operation) -> Result<Option<OperationRequest>> {
        let request = match operation {
            Operation::MoveFiles => {
                self.say("\n=== Move matching files to another folder ===")?;
                let Some(source) = self.prompt("Enter source folder path: ")? else {
                    return Ok(None);
                };
                let Some(destination) = self.prompt("Enter destination folder path: ")? else {
                    return Ok(None);
                };
                OperationRequest::MoveFiles {
                    source: PathBuf::from(source),
                    destination: PathBuf::from(destination),
                    dry_run: false,
                }
            }
            Operation::ExtractEmails => {
                self.say("\n=== Extract all email addresses from a text file ===")?;
                let Some(input) = self.prompt("Enter input .txt file path: ")? else {
                    return Ok(None);
                };
                let Some(output) = self.prompt("Enter output file path to save emails: ")? else {
                    return Ok(None);
                };
                OperationRequest::ExtractEmails {
                    input: PathBuf::from(input),
                    output: PathBuf::from(output),
                }
            }
            Operation::ScrapeTitle => {
                self.say("\n=== Scrape the title of a webpage and save it ===")?;
                let Some(url) =
                    self.prompt("Enter webpage URL (e.g., https://www.example.com): ")?
                else {
                    return Ok(None);
                };
                let Some(output) = self.prompt("Enter output file path to save title: ")? else {
                    return Ok(None);
                };
                OperationRequest::ScrapeTitle {
                    url,
                    output: PathBuf::from(output),
                }
            }
            Operation::Exit => return Ok(None),
        };

        Ok(Some(request))
    }
}

/// Shows the menu until the user exits or input ends. A failing operation
/// is reported and the loop carries on.
///
/// Ctrl+C cancels the operation in flight. A press while the menu waits for
/// input has nothing to cancel and is forgotten once the next request is
/// read; pressing twice exits.
///
/// Input is read with blocking calls. The binary drives this future from
/// the main thread through `Runtime::block_on`, so runtime workers stay free.
pub async fn run_menu<R: BufRead, W: Write>(app: &TaskMate, menu: &mut Menu<R, W>) -> Result<()> {
    loop {
        menu.show()?;
        let Some(choice) = menu.prompt("Enter your choice (1-4): ")? else {
            break;
        };

        let operation = match Operation::from_choice(&choice) {
            Ok(Operation::Exit) => break,
            Ok(operation) => operation,
            Err(e) => {
                menu.say(&e.user_message())?;
                continue;
            }
        };

        let Some(request) = menu.read_request(operation)? else {
            break;
        };

        app.reset_shutdown();
        let outcome = app.dispatch(request).await;
        // A press that landed after the last cancellation point is spent too.
        app.reset_shutdown();

        match outcome {
            Ok(report) => app.output_formatter().print_report(&report),
            Err(TaskMateError::Cancelled) => app.output_formatter().warning("Operation cancelled"),
            Err(e) => app.handle_error(&e),
        }
    }

    menu.say(GOODBYE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run(app: &TaskMate, script: &str) -> String {
        let mut output = Vec::new();
        {
            let mut menu = Menu::new(Cursor::new(script.to_string()), &mut output);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            runtime.block_on(run_menu(app, &mut menu)).unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_exit_choice() {
        let app = TaskMate::new_for_test(Config::default());
        let transcript = run(&app, "4\n");

        assert!(transcript.contains(MENU_TITLE));
        assert!(transcript.contains("1. Move matching files"));
        assert!(transcript.trim_end().ends_with(GOODBYE));
    }

    #[test]
    fn test_end_of_input_exits() {
        let app = TaskMate::new_for_test(Config::default());
        let transcript = run(&app, "");
        assert!(transcript.contains(GOODBYE));
    }

    #[test]
    fn test_invalid_choice_loops() {
        let app = TaskMate::new_for_test(Config::default());
        let transcript = run(&app, "9\nabc\n4\n");

        assert_eq!(
            transcript.matches("Invalid choice. Please enter 1-4.").count(),
            2
        );
        assert_eq!(transcript.matches(MENU_TITLE).count(), 3);
    }

    #[test]
    fn test_extract_emails_then_exit() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "b@x.io a@x.io b@x.io").unwrap();

        let app = TaskMate::new_for_test(Config::default());
        let script = format!("2\n{}\n{}\n4\n", input.display(), output.display());
        let transcript = run(&app, &script);

        assert!(transcript.contains("Enter input .txt file path: "));
        assert_eq!(fs::read_to_string(&output).unwrap(), "a@x.io\nb@x.io\n");
    }

    #[test]
    fn test_failed_operation_keeps_looping() {
        let dir = TempDir::new().unwrap();
        let app = TaskMate::new_for_test(Config::default());
        let script = format!(
            "1\n{}\n{}\n4\n",
            dir.path().join("missing").display(),
            dir.path().join("dest").display()
        );
        let transcript = run(&app, &script);

        // Back at the menu after the failure.
        assert_eq!(transcript.matches(MENU_TITLE).count(), 2);
        assert!(transcript.contains(GOODBYE));
    }

    #[test]
    fn test_interrupt_while_idle_does_not_swallow_next_choice() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "b@x.io a@x.io").unwrap();

        let app = TaskMate::new_for_test(Config::default());
        app.request_shutdown();

        let script = format!("2\n{}\n{}\n4\n", input.display(), output.display());
        let transcript = run(&app, &script);

        assert!(transcript.contains("Enter output file path to save emails: "));
        assert_eq!(fs::read_to_string(&output).unwrap(), "a@x.io\nb@x.io\n");
        assert_eq!(transcript.matches(MENU_TITLE).count(), 2);
        assert!(app.is_running());
    }

    #[test]
    fn test_menu_is_rearmed_after_each_operation() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        fs::write(dir.path().join("in.txt"), "a@x.io").unwrap();

        let app = TaskMate::new_for_test(Config::default());
        let script = format!(
            "2\n{input}\n{first}\n2\n{input}\n{second}\n4\n",
            input = dir.path().join("in.txt").display(),
            first = first.display(),
            second = second.display()
        );
        run(&app, &script);

        assert!(first.exists());
        assert!(second.exists());
        assert!(app.is_running());
    }

    #[test]
    fn test_input_ends_mid_prompt() {
        let app = TaskMate::new_for_test(Config::default());
        let transcript = run(&app, "3\nhttps://example.com\n");

        assert!(transcript.contains("Enter output file path to save title: "));
        assert!(transcript.contains(GOODBYE));
    }
}
