use std::io::{self, Write};

use f2edit_core::CoreError;
use log::debug;

use crate::input::LineSource;

pub const POSITIVE_INTEGER_REQUIRED: &str = "Positive integer required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    NotAnInteger,
    Negative,
}

/// Parse a user-entered value. Surrounding whitespace is ignored.
pub fn parse_value(text: &str) -> Result<i32, ValueError> {
    let value: i32 = text.trim().parse().map_err(|_| ValueError::NotAnInteger)?;
    if value < 0 {
        return Err(ValueError::Negative);
    }
    Ok(value)
}

/// Show the current value of `name`, ask for a new one and store it.
///
/// Every failure is reported on `out` and ends the edit with the model
/// untouched; only I/O errors on the console itself are returned.
pub fn modify_value<M, G, S>(
    model: &mut M,
    name: &str,
    get: G,
    set: S,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> io::Result<()>
where
    M: ?Sized,
    G: FnOnce(&M, &str) -> Result<i32, CoreError>,
    S: FnOnce(&mut M, &str, i32) -> Result<(), CoreError>,
{
    let current = match get(model, name) {
        Ok(value) => value,
        Err(err) => return writeln!(out, "{err}"),
    };

    out.flush()?;
    let Some(answer) = input.read_line(&format!("[Value: {current}] New value: "))? else {
        return writeln!(out);
    };

    let value = match parse_value(&answer) {
        Ok(value) => value,
        Err(err) => {
            debug!("rejected {answer:?} for {name}: {err:?}");
            return writeln!(out, "{POSITIVE_INTEGER_REQUIRED}");
        }
    };

    match set(model, name, value) {
        Ok(()) => writeln!(out, "Done."),
        Err(err) => writeln!(out, "{err}"),
    }
}

#[cfg(test)]
mod tests {
    use f2edit_core::{AttributeKind, SaveModel};

    use super::{ValueError, modify_value, parse_value};
    use crate::test_support::{MemorySave, ScriptedInput};

    fn edit_skill(model: &mut MemorySave, name: &str, answers: &[&str]) -> (String, ScriptedInput) {
        let mut input = ScriptedInput::new(answers);
        let mut out = Vec::new();
        modify_value(
            model,
            name,
            |m, n| m.get_skill(n),
            |m, n, v| m.set_skill(n, v),
            &mut input,
            &mut out,
        )
        .unwrap();
        (String::from_utf8(out).unwrap(), input)
    }

    #[test]
    fn parse_value_accepts_non_negative_integers() {
        assert_eq!(parse_value("0"), Ok(0));
        assert_eq!(parse_value(" 42\n"), Ok(42));
        assert_eq!(parse_value("+7"), Ok(7));
    }

    #[test]
    fn parse_value_rejects_everything_else() {
        assert_eq!(parse_value("-1"), Err(ValueError::Negative));
        assert_eq!(parse_value(""), Err(ValueError::NotAnInteger));
        assert_eq!(parse_value("abc"), Err(ValueError::NotAnInteger));
        assert_eq!(parse_value("1.5"), Err(ValueError::NotAnInteger));
        assert_eq!(parse_value("99999999999"), Err(ValueError::NotAnInteger));
    }

    #[test]
    fn successful_edit_is_visible_to_the_getter() {
        let mut model = MemorySave::sample();
        let (out, input) = edit_skill(&mut model, "small_guns", &["50"]);

        assert_eq!(out, "Done.\n");
        assert_eq!(input.prompts, vec!["[Value: 10] New value: "]);
        assert_eq!(model.get_skill("small_guns").unwrap(), 50);
        assert_eq!(model.writes, 1);
    }

    #[test]
    fn unknown_name_reports_and_never_prompts() {
        let mut model = MemorySave::sample();
        let (out, input) = edit_skill(&mut model, "bogus", &["50"]);

        assert_eq!(out, "No skill named \"bogus\"\n");
        assert!(input.prompts.is_empty());
        assert_eq!(model.writes, 0);
    }

    #[test]
    fn invalid_answers_leave_the_model_unchanged() {
        for answer in ["-5", "lots", ""] {
            let mut model = MemorySave::sample();
            let (out, _) = edit_skill(&mut model, "small_guns", &[answer]);

            assert_eq!(out, "Positive integer required.\n");
            assert_eq!(model.get_skill("small_guns").unwrap(), 10);
            assert_eq!(model.writes, 0);
        }
    }

    #[test]
    fn model_rejection_is_reported() {
        let mut model = MemorySave::sample();
        let mut input = ScriptedInput::new(&["11"]);
        let mut out = Vec::new();
        modify_value(
            &mut model,
            "str",
            |m, n| m.get(AttributeKind::Stat, n),
            |m, n, v| m.set(AttributeKind::Stat, n, v),
            &mut input,
            &mut out,
        )
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("invalid stat value 11"), "{out}");
        assert_eq!(model.get_stat("str").unwrap(), 6);
    }

    #[test]
    fn end_of_input_aborts_the_edit() {
        let mut model = MemorySave::sample();
        let (out, _) = edit_skill(&mut model, "small_guns", &[]);

        assert_eq!(out, "\n");
        assert_eq!(model.writes, 0);
    }
}
