use std::collections::BTreeMap;
use std::io::{self, Write};

use f2edit_core::{AttributeKind, SaveModel};
use log::{debug, info};

use crate::completion::CompletionTable;
use crate::input::LineSource;
use crate::modifier::modify_value;

pub const PROMPT: &str = "Command: ";
pub const INTRO: &str = "Fallout 2 Save Game Editor. <Tab> completion is available everywhere.\n\
                         The file is edited as soon as you make a change. ('exit' to exit.)";

const KEY_WIDTH: usize = 15;
const PERK_KEY_WIDTH: usize = 40;

/// The save being edited for the lifetime of one shell.
pub struct Session {
    model: Box<dyn SaveModel>,
}

impl Session {
    pub fn new(model: Box<dyn SaveModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &dyn SaveModel {
        self.model.as_ref()
    }

    pub fn model_mut(&mut self) -> &mut dyn SaveModel {
        self.model.as_mut()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

type Handler = fn(&mut Session, &str, &mut dyn LineSource, &mut dyn Write) -> io::Result<Flow>;
type KeyProvider = fn(&Session) -> Vec<String>;

pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    handler: Handler,
    arguments: Option<KeyProvider>,
}

pub struct Shell {
    session: Session,
    commands: BTreeMap<&'static str, Command>,
}

impl Shell {
    pub fn new(session: Session) -> Self {
        let commands = command_table()
            .into_iter()
            .map(|command| (command.name, command))
            .collect();
        Self { session, commands }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Command names plus the keys each set command accepts, taken from the
    /// model once.
    pub fn completion_table(&self) -> CompletionTable {
        let mut names: Vec<String> = self.commands.keys().map(|k| k.to_string()).collect();
        names.push("help".to_string());
        names.sort();

        let mut table = CompletionTable::new(names.clone());
        for command in self.commands.values() {
            if let Some(keys) = command.arguments {
                table.insert_arguments(command.name, keys(&self.session));
            }
        }
        table.insert_arguments("help", names);
        table
    }

    /// Print the save info and banner, then read commands until `exit` or
    /// end of input.
    pub fn run(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.session.model().info())?;
        writeln!(out, "{INTRO}")?;

        loop {
            out.flush()?;
            let Some(line) = input.read_line(PROMPT)? else {
                info!("end of input, leaving shell");
                writeln!(out)?;
                return Ok(());
            };
            if self.execute(&line, input, out)? == Flow::Exit {
                info!("exit requested");
                return Ok(());
            }
        }
    }

    pub fn execute(
        &mut self,
        line: &str,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
    ) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let (name, arg) = split_command(line);
        debug!("command {name:?} argument {arg:?}");
        if name == "help" {
            self.print_help(arg, out)?;
            return Ok(Flow::Continue);
        }

        match self.commands.get(name) {
            Some(command) => {
                let handler = command.handler;
                handler(&mut self.session, arg, input, out)
            }
            None => {
                writeln!(out, "*** Unknown syntax: {line}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn print_help(&self, topic: &str, out: &mut dyn Write) -> io::Result<()> {
        if topic.is_empty() {
            let mut names: Vec<&str> = self.commands.keys().copied().collect();
            names.push("help");
            names.sort_unstable();
            writeln!(out)?;
            writeln!(out, "Documented commands (type help <topic>):")?;
            writeln!(out, "{}", "=".repeat(40))?;
            writeln!(out, "{}", names.join("  "))?;
            return writeln!(out);
        }

        if topic == "help" {
            return writeln!(out, "help [command]\n        List commands, or show usage of one.");
        }
        match self.commands.get(topic) {
            Some(command) => writeln!(out, "{}\n        {}", command.usage, command.description),
            None => writeln!(out, "*** No help on {topic}"),
        }
    }
}

/// Split a line into the leading command word and the trimmed remainder.
/// A leading `?` is shorthand for `help`.
fn split_command(line: &str) -> (&str, &str) {
    if let Some(rest) = line.strip_prefix('?') {
        return ("help", rest.trim());
    }
    let end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(line.len());
    (&line[..end], line[end..].trim())
}

fn command_table() -> Vec<Command> {
    vec![
        Command {
            name: "skills",
            usage: "skills",
            description: "List skills and current values.",
            handler: list_skills,
            arguments: None,
        },
        Command {
            name: "perks",
            usage: "perks",
            description: "List perks and current values.",
            handler: list_perks,
            arguments: None,
        },
        Command {
            name: "stats",
            usage: "stats",
            description: "List stats and current values.",
            handler: list_stats,
            arguments: None,
        },
        Command {
            name: "set_skill",
            usage: "set_skill [skill]",
            description: "Modify skill values.",
            handler: set_skill,
            arguments: Some(skill_keys as KeyProvider),
        },
        Command {
            name: "set_perk",
            usage: "set_perk [perk]",
            description: "Modify perk values. \
                          The correct value is 1 for most perks, but some can be stacked.",
            handler: set_perk,
            arguments: Some(perk_keys as KeyProvider),
        },
        Command {
            name: "set_stat",
            usage: "set_stat [stat]",
            description: "Modify stat values. Values are limited to be in [1, 10].",
            handler: set_stat,
            arguments: Some(stat_keys as KeyProvider),
        },
        Command {
            name: "exit",
            usage: "exit",
            description: "Exit the editor.",
            handler: exit,
            arguments: None,
        },
    ]
}

fn skill_keys(session: &Session) -> Vec<String> {
    session.model().skill_names()
}

fn perk_keys(session: &Session) -> Vec<String> {
    session.model().perk_names()
}

fn stat_keys(session: &Session) -> Vec<String> {
    session.model().stat_names()
}

fn list_skills(
    session: &mut Session,
    _arg: &str,
    _input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> io::Result<Flow> {
    print_table(session.model(), AttributeKind::Skill, KEY_WIDTH, out)?;
    Ok(Flow::Continue)
}

fn list_perks(
    session: &mut Session,
    _arg: &str,
    _input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> io::Result<Flow> {
    print_table(session.model(), AttributeKind::Perk, PERK_KEY_WIDTH, out)?;
    Ok(Flow::Continue)
}

fn list_stats(
    session: &mut Session,
    _arg: &str,
    _input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> io::Result<Flow> {
    print_table(session.model(), AttributeKind::Stat, KEY_WIDTH, out)?;
    Ok(Flow::Continue)
}

fn set_skill(
    session: &mut Session,
    arg: &str,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> io::Result<Flow> {
    modify_value(
        session.model_mut(),
        arg,
        |m, name| m.get_skill(name),
        |m, name, value| m.set_skill(name, value),
        input,
        out,
    )?;
    Ok(Flow::Continue)
}

fn set_perk(
    session: &mut Session,
    arg: &str,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> io::Result<Flow> {
    modify_value(
        session.model_mut(),
        arg,
        |m, name| m.get_perk(name),
        |m, name, value| m.set_perk(name, value),
        input,
        out,
    )?;
    Ok(Flow::Continue)
}

fn set_stat(
    session: &mut Session,
    arg: &str,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> io::Result<Flow> {
    modify_value(
        session.model_mut(),
        arg,
        |m, name| m.get_stat(name),
        |m, name, value| m.set_stat(name, value),
        input,
        out,
    )?;
    Ok(Flow::Continue)
}

fn exit(
    _session: &mut Session,
    _arg: &str,
    _input: &mut dyn LineSource,
    _out: &mut dyn Write,
) -> io::Result<Flow> {
    Ok(Flow::Exit)
}

fn print_table(
    model: &dyn SaveModel,
    kind: AttributeKind,
    width: usize,
    out: &mut dyn Write,
) -> io::Result<()> {
    let entries = match model.entries(kind) {
        Ok(entries) => entries,
        Err(err) => return writeln!(out, "{err}"),
    };

    writeln!(out, "{:<width$} Value", kind.heading())?;
    writeln!(out, "{}", "-".repeat(width + 6))?;
    for (name, value) in entries {
        writeln!(out, "{name:<width$} {value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Flow, INTRO, Session, Shell, split_command};
    use crate::test_support::{MemorySave, ScriptedInput};

    fn shell() -> Shell {
        Shell::new(Session::new(Box::new(MemorySave::sample())))
    }

    fn run(shell: &mut Shell, lines: &[&str]) -> (String, ScriptedInput) {
        let mut input = ScriptedInput::new(lines);
        let mut out = Vec::new();
        shell.run(&mut input, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), input)
    }

    #[test]
    fn split_command_takes_identifier_prefix() {
        assert_eq!(split_command("set_skill  sneak "), ("set_skill", "sneak"));
        assert_eq!(split_command("skills"), ("skills", ""));
        assert_eq!(split_command("? set_perk"), ("help", "set_perk"));
        assert_eq!(split_command("!boom"), ("", "!boom"));
    }

    #[test]
    fn session_edits_and_exits() {
        let mut shell = shell();
        let (out, input) = run(
            &mut shell,
            &["set_skill small_guns", "50", "set_skill bogus", "exit", "skills"],
        );

        assert!(out.starts_with("Save Name: 'TEST'\tCharacter: 'Narg'\n"));
        assert!(out.contains(INTRO));
        assert!(out.contains("Done.\n"));
        assert!(out.contains("No skill named \"bogus\"\n"));
        // `skills` after exit is never read.
        assert!(!out.contains("Skill           Value"));
        assert_eq!(
            input.prompts,
            vec![
                "Command: ",
                "[Value: 10] New value: ",
                "Command: ",
                "Command: ",
            ]
        );
        assert_eq!(shell.session().model().get_skill("small_guns").unwrap(), 50);
    }

    #[test]
    fn listing_is_sorted_and_aligned() {
        let mut shell = shell();
        let (out, _) = run(&mut shell, &["stats", "exit"]);

        let expected = "Stat            Value\n\
                        ---------------------\n\
                        agi             6\n\
                        luc             4\n\
                        str             6\n";
        assert!(out.contains(expected), "{out}");
    }

    #[test]
    fn perk_listing_uses_wide_key_column() {
        let mut shell = shell();
        let (out, _) = run(&mut shell, &["perks", "exit"]);

        assert!(out.contains(&format!("{:<40} Value\n", "Perk")));
        assert!(out.contains(&format!("{}\n", "-".repeat(46))));
        assert!(out.contains(&format!("{:<40} 1\n", "toughness")));
    }

    #[test]
    fn unknown_command_keeps_the_session_alive() {
        let mut shell = shell();
        let (out, input) = run(&mut shell, &["frobnicate now", "", "exit"]);

        assert!(out.contains("*** Unknown syntax: frobnicate now\n"));
        assert_eq!(input.prompts.len(), 3);
    }

    #[test]
    fn end_of_input_ends_the_session() {
        let mut shell = shell();
        let (out, input) = run(&mut shell, &["stats"]);

        assert!(out.ends_with("\n"));
        assert_eq!(input.prompts, vec!["Command: ", "Command: "]);
    }

    #[test]
    fn help_lists_and_describes_commands() {
        let mut shell = shell();
        let mut input = ScriptedInput::new(&[]);
        let mut out = Vec::new();

        assert_eq!(shell.execute("help", &mut input, &mut out).unwrap(), Flow::Continue);
        shell.execute("help set_stat", &mut input, &mut out).unwrap();
        shell.execute("help set_perk", &mut input, &mut out).unwrap();
        shell.execute("help nope", &mut input, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("exit  help  perks  set_perk  set_skill  set_stat  skills  stats"));
        assert!(out.contains(
            "set_stat [stat]\n        Modify stat values. Values are limited to be in [1, 10].\n"
        ));
        assert!(out.contains("but some can be stacked.\n"));
        assert!(out.contains("*** No help on nope\n"));
    }

    #[test]
    fn completion_table_offers_model_keys() {
        let shell = shell();
        let table = shell.completion_table();

        assert_eq!(table.candidates("set_s").1, vec!["set_skill", "set_stat"]);
        assert_eq!(
            table.candidates("set_skill s").1,
            vec!["small_guns", "science", "sneak"]
        );
        assert_eq!(table.candidates("set_skill sn").1, vec!["sneak"]);
        assert_eq!(table.candidates("set_perk t").1, vec!["toughness"]);
        assert_eq!(table.candidates("help sk").1, vec!["skills"]);
    }
}
