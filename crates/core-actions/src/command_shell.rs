//! `:` command line: tokenizer, name -> handler registry and the built-in
//! commands.
//!
//! Handlers never touch editor internals directly. They receive a
//! `CommandContext` carrying the arguments and a `CommandTarget`, the narrow
//! capability surface a command may use (save, quit, status, file name). New
//! commands are added with `CommandShell::register`.

use ahash::AHashMap;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Command,
    Argument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

/// Split a command line into tokens. One leading `:` is stripped, the rest is
/// split on whitespace; the first word is the command.
pub fn tokenize(input: &str) -> Vec<Token> {
    let body = input.strip_prefix(':').unwrap_or(input);
    body.split_whitespace()
        .enumerate()
        .map(|(idx, word)| Token {
            kind: if idx == 0 {
                TokenKind::Command
            } else {
                TokenKind::Argument
            },
            value: word.to_string(),
        })
        .collect()
}

/// What a command is allowed to do to the editor.
pub trait CommandTarget {
    /// Save the document to its file name. Returns true on success; failures
    /// are reported through the status line by the implementor.
    fn request_save(&mut self) -> bool;
    fn request_quit(&mut self);
    fn set_status(&mut self, msg: String);
    fn file_name(&self) -> String;
}

pub struct CommandContext<'a> {
    pub args: Vec<String>,
    pub target: &'a mut dyn CommandTarget,
}

pub type CommandHandler = Box<dyn Fn(&mut CommandContext<'_>)>;

pub struct CommandShell {
    commands: AHashMap<String, CommandHandler>,
}

impl Default for CommandShell {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandShell {
    /// Shell with the built-in commands registered.
    pub fn new() -> Self {
        let mut shell = Self::empty();
        shell.register("w", |ctx| match ctx.args.first() {
            None => {
                ctx.target.request_save();
            }
            Some(path) => ctx
                .target
                .set_status(format!("Command: Save As to {path} (Not Implemented)")),
        });
        // `q !` and `q!` both quit; nothing ever blocks quitting.
        shell.register("q", |ctx| ctx.target.request_quit());
        shell.register("q!", |ctx| ctx.target.request_quit());
        shell.register("wq", |ctx| {
            if ctx.target.request_save() {
                ctx.target.request_quit();
            }
        });
        shell
    }

    pub fn empty() -> Self {
        Self {
            commands: AHashMap::new(),
        }
    }

    /// Add or replace a command. Names are case-insensitive.
    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&mut CommandContext<'_>) + 'static,
    {
        self.commands.insert(name.to_lowercase(), Box::new(handler));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(&name.to_lowercase())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run one command line against `target`. Empty input does nothing; an
    /// unknown name is reported on the status line.
    pub fn execute(&self, input: &str, target: &mut dyn CommandTarget) {
        let mut tokens = tokenize(input).into_iter();
        let Some(first) = tokens.next() else {
            return;
        };
        let name = first.value.to_lowercase();
        let args: Vec<String> = tokens.map(|t| t.value).collect();
        match self.commands.get(&name) {
            Some(handler) => {
                info!(target: "actions.command", name = name.as_str(), argc = args.len(), "command_execute");
                let mut ctx = CommandContext { args, target };
                handler(&mut ctx);
            }
            None => {
                info!(target: "actions.command", name = name.as_str(), "command_unknown");
                target.set_status(format!("Error: Unknown command: {name}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Probe {
        saves: usize,
        save_ok: bool,
        quit: bool,
        status: Option<String>,
    }

    impl CommandTarget for Probe {
        fn request_save(&mut self) -> bool {
            self.saves += 1;
            self.save_ok
        }
        fn request_quit(&mut self) {
            self.quit = true;
        }
        fn set_status(&mut self, msg: String) {
            self.status = Some(msg);
        }
        fn file_name(&self) -> String {
            "probe.txt".into()
        }
    }

    fn ok_probe() -> Probe {
        Probe {
            save_ok: true,
            ..Probe::default()
        }
    }

    #[test]
    fn tokenize_strips_prefix_and_classifies() {
        let toks = tokenize(":w  out.txt extra");
        assert_eq!(
            toks,
            vec![
                Token {
                    kind: TokenKind::Command,
                    value: "w".into()
                },
                Token {
                    kind: TokenKind::Argument,
                    value: "out.txt".into()
                },
                Token {
                    kind: TokenKind::Argument,
                    value: "extra".into()
                },
            ]
        );
        assert!(tokenize(":").is_empty());
        assert!(tokenize("   ").is_empty());
        assert_eq!(tokenize("::x")[0].value, ":x");
    }

    #[test]
    fn quit_variants() {
        let shell = CommandShell::new();
        for input in [":q", ":Q", ":q!", ":q !"] {
            let mut p = ok_probe();
            shell.execute(input, &mut p);
            assert!(p.quit, "{input} should quit");
            assert_eq!(p.saves, 0);
        }
    }

    #[test]
    fn write_with_and_without_argument() {
        let shell = CommandShell::new();
        let mut p = ok_probe();
        shell.execute(":w", &mut p);
        assert_eq!(p.saves, 1);
        shell.execute(":w other.txt", &mut p);
        assert_eq!(p.saves, 1);
        assert_eq!(
            p.status.as_deref(),
            Some("Command: Save As to other.txt (Not Implemented)")
        );
    }

    #[test]
    fn wq_quits_only_after_successful_save() {
        let shell = CommandShell::new();
        let mut p = ok_probe();
        shell.execute(":wq", &mut p);
        assert!(p.quit);
        let mut p = Probe::default();
        shell.execute(":wq", &mut p);
        assert_eq!(p.saves, 1);
        assert!(!p.quit);
    }

    #[test]
    fn unknown_command_reports_lowercased_name() {
        let shell = CommandShell::new();
        let mut p = ok_probe();
        shell.execute(":ZZ top", &mut p);
        assert_eq!(p.status.as_deref(), Some("Error: Unknown command: zz"));
        assert!(!p.quit);
    }

    #[test]
    fn empty_input_is_noop() {
        let shell = CommandShell::new();
        let mut p = ok_probe();
        shell.execute(":", &mut p);
        shell.execute("", &mut p);
        assert!(p.status.is_none());
    }

    #[test]
    fn register_custom_command() {
        let mut shell = CommandShell::new();
        shell.register("Hello", |ctx| {
            let who = ctx.args.join(" ");
            let file = ctx.target.file_name();
            ctx.target.set_status(format!("hi {who} from {file}"));
        });
        assert!(shell.contains("hello"));
        assert_eq!(shell.names(), vec!["hello", "q", "q!", "w", "wq"]);
        let mut p = ok_probe();
        shell.execute(":HELLO big world", &mut p);
        assert_eq!(p.status.as_deref(), Some("hi big world from probe.txt"));
    }
}
