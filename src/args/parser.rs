//! Two-pass argument parser turning raw tokens into parsed args.
//!
//! The coarse pass only needs the positional tokens to find the command; the
//! refined pass re-reads the same tokens with that command's schema so flag
//! values come out correctly typed.

use std::iter::Peekable;
use std::slice::Iter;

use crate::args::schema::{OptionSchema, OptionType};
use crate::args::value::{ArgValue, ParsedArgs};

/// A flag value as it appeared on the command line, before typing.
#[derive(Debug, Clone, PartialEq)]
enum RawValue {
    Text(String),
    Switch(bool),
}

/// Schema-agnostic first pass.
///
/// Unknown flags are collected generically; only the global options are
/// typed. Empty input yields empty positionals.
pub fn coarse_parse(raw_args: &[String]) -> ParsedArgs {
    parse(raw_args, &OptionSchema::global())
}

/// Second pass over the same raw tokens using a command's derived schema.
///
/// The caller overwrites the positionals with the inputs left over from
/// command resolution.
pub fn refine(raw_args: &[String], schema: &OptionSchema) -> ParsedArgs {
    parse(raw_args, schema)
}

fn parse(raw_args: &[String], schema: &OptionSchema) -> ParsedArgs {
    let mut out = ParsedArgs::new();
    let mut iter = raw_args.iter().peekable();

    while let Some(arg) = iter.next() {
        if arg == "--" {
            for rest in iter.by_ref() {
                out.push_positional(rest.clone());
            }
            break;
        }

        if let Some(body) = arg.strip_prefix("--") {
            parse_long(body, schema, &mut iter, &mut out);
        } else if is_short_group(arg) {
            parse_short(&arg[1..], schema, &mut iter, &mut out);
        } else {
            out.push_positional(arg.clone());
        }
    }

    apply_defaults(schema, &mut out);
    mirror_aliases(schema, &mut out);
    out
}

fn parse_long(
    body: &str,
    schema: &OptionSchema,
    iter: &mut Peekable<Iter<'_, String>>,
    out: &mut ParsedArgs,
) {
    if let Some((key, value)) = body.split_once('=') {
        set_value(schema, key, RawValue::Text(value.to_string()), out);
        return;
    }

    // --no-foo negates foo unless "no-foo" is itself declared
    if let Some(negated) = body.strip_prefix("no-") {
        if schema.find(body).is_none() {
            set_value(schema, negated, RawValue::Switch(false), out);
            return;
        }
    }

    let value = take_value(schema, body, iter);
    set_value(schema, body, value, out);
}

fn parse_short(
    letters: &str,
    schema: &OptionSchema,
    iter: &mut Peekable<Iter<'_, String>>,
    out: &mut ParsedArgs,
) {
    let (letters, inline) = match letters.split_once('=') {
        Some((l, v)) => (l, Some(v)),
        None => (letters, None),
    };

    let keys: Vec<String> = letters.chars().map(String::from).collect();
    let Some((last, leading)) = keys.split_last() else {
        return;
    };

    for key in leading {
        set_value(schema, key, RawValue::Switch(true), out);
    }

    let value = match inline {
        Some(v) => RawValue::Text(v.to_string()),
        None => take_value(schema, last, iter),
    };
    set_value(schema, last, value, out);
}

/// Decide whether a flag consumes the following token.
fn take_value(
    schema: &OptionSchema,
    key: &str,
    iter: &mut Peekable<Iter<'_, String>>,
) -> RawValue {
    let kind = schema.find(key).map(|o| o.kind);

    match kind {
        Some(OptionType::Boolean) => match iter.peek() {
            Some(next) if next.as_str() == "true" || next.as_str() == "false" => {
                let literal = iter.next().map(|s| s == "true").unwrap_or(true);
                RawValue::Switch(literal)
            }
            _ => RawValue::Switch(true),
        },
        Some(OptionType::String) | Some(OptionType::Number) => match iter.peek() {
            Some(next) if takes_as_value(next) => {
                RawValue::Text(iter.next().cloned().unwrap_or_default())
            }
            // Declared value option with nothing after it
            _ => RawValue::Text(String::new()),
        },
        None => match iter.peek() {
            Some(next) if takes_as_value(next) => {
                RawValue::Text(iter.next().cloned().unwrap_or_default())
            }
            _ => RawValue::Switch(true),
        },
    }
}

fn set_value(schema: &OptionSchema, key: &str, raw: RawValue, out: &mut ParsedArgs) {
    let (name, kind) = match schema.find(key) {
        Some(option) => (option.name.clone(), Some(option.kind)),
        None => (key.to_string(), None),
    };

    let value = typed_value(kind, raw);

    // Booleans overwrite; everything else accumulates on repeat
    let value = match (kind, out.remove(&name)) {
        (Some(OptionType::Boolean), _) | (_, None) => value,
        (_, Some(existing)) => existing.accumulate(value),
    };
    out.insert(name, value);
}

fn typed_value(kind: Option<OptionType>, raw: RawValue) -> ArgValue {
    match (kind, raw) {
        (_, RawValue::Switch(b)) => ArgValue::Bool(b),
        (Some(OptionType::Boolean), RawValue::Text(t)) => {
            ArgValue::Bool(!matches!(t.as_str(), "false" | "0" | ""))
        }
        (Some(OptionType::String), RawValue::Text(t)) => ArgValue::String(t),
        (Some(OptionType::Number), RawValue::Text(t)) => match t.parse::<f64>() {
            Ok(n) if looks_numeric(&t) => ArgValue::Number(n),
            _ => ArgValue::String(t),
        },
        (None, RawValue::Text(t)) => coerce_undeclared(t),
    }
}

fn coerce_undeclared(text: String) -> ArgValue {
    match text.as_str() {
        "true" => ArgValue::Bool(true),
        "false" => ArgValue::Bool(false),
        _ if looks_numeric(&text) => match text.parse::<f64>() {
            Ok(n) => ArgValue::Number(n),
            Err(_) => ArgValue::String(text),
        },
        _ => ArgValue::String(text),
    }
}

fn apply_defaults(schema: &OptionSchema, out: &mut ParsedArgs) {
    for option in schema.options() {
        if out.contains(&option.name) {
            continue;
        }
        match (&option.default, option.kind) {
            (Some(default), _) => out.insert(option.name.clone(), default.clone()),
            (None, OptionType::Boolean) => out.insert(option.name.clone(), ArgValue::Bool(false)),
            (None, _) => {}
        }
    }
}

fn mirror_aliases(schema: &OptionSchema, out: &mut ParsedArgs) {
    for option in schema.options() {
        let Some(value) = out.get(&option.name).cloned() else {
            continue;
        };
        for alias in &option.aliases {
            out.insert(alias.clone(), value.clone());
        }
    }
}

/// `-x`, `-abc`, `-k=v`; a lone `-` and negative numbers are positional.
fn is_short_group(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-') && !arg.starts_with("-=") && !looks_numeric(arg)
}

fn takes_as_value(next: &str) -> bool {
    !next.starts_with('-') || next == "-" || looks_numeric(next)
}

/// Plain decimal literal: optional sign, digits, at most one dot.
fn looks_numeric(text: &str) -> bool {
    let body = text.strip_prefix(&['-', '+'][..]).unwrap_or(text);
    !body.is_empty()
        && body.chars().all(|c| c.is_ascii_digit() || c == '.')
        && body.chars().any(|c| c.is_ascii_digit())
        && body.matches('.').count() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::schema::OptionSpec;

    fn raw(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn coarse_parse_empty_input() {
        let parsed = coarse_parse(&[]);
        assert!(parsed.positional().is_empty());
        assert_eq!(parsed.get_bool("help"), Some(false));
    }

    #[test]
    fn coarse_parse_collects_positionals() {
        let parsed = coarse_parse(&raw(&["config", "set", "urls.api"]));
        assert_eq!(parsed.positional(), &raw(&["config", "set", "urls.api"])[..]);
    }

    #[test]
    fn coarse_parse_unknown_flag_takes_next_token() {
        let parsed = coarse_parse(&raw(&["deploy", "--env", "prod"]));
        assert_eq!(parsed.positional(), &raw(&["deploy"])[..]);
        assert_eq!(parsed.get_str("env"), Some("prod"));
    }

    #[test]
    fn coarse_parse_unknown_flag_before_flag_is_switch() {
        let parsed = coarse_parse(&raw(&["--verbose", "--loglevel", "debug", "start"]));
        assert_eq!(parsed.get_bool("verbose"), Some(true));
        assert_eq!(parsed.get_str("loglevel"), Some("debug"));
        assert_eq!(parsed.positional(), &raw(&["start"])[..]);
    }

    #[test]
    fn coarse_parse_coerces_undeclared_values() {
        let parsed = coarse_parse(&raw(&["--port", "8100", "--live", "false", "--name=app"]));
        assert_eq!(parsed.get_number("port"), Some(8100.0));
        assert_eq!(parsed.get_bool("live"), Some(false));
        assert_eq!(parsed.get_str("name"), Some("app"));
    }

    #[test]
    fn global_help_alias_is_mirrored() {
        let parsed = coarse_parse(&raw(&["-h", "login"]));
        assert_eq!(parsed.get_bool("help"), Some(true));
        assert_eq!(parsed.get_bool("h"), Some(true));
        assert_eq!(parsed.positional(), &raw(&["login"])[..]);
    }

    #[test]
    fn double_dash_ends_flags() {
        let parsed = coarse_parse(&raw(&["run", "--", "--not-a-flag", "-x"]));
        assert_eq!(parsed.positional(), &raw(&["run", "--not-a-flag", "-x"])[..]);
        assert!(!parsed.contains("not-a-flag"));
    }

    #[test]
    fn negated_flag() {
        let parsed = coarse_parse(&raw(&["--no-color"]));
        assert_eq!(parsed.get_bool("color"), Some(false));
    }

    #[test]
    fn negative_number_is_a_value() {
        let parsed = coarse_parse(&raw(&["--offset", "-3", "-1"]));
        assert_eq!(parsed.get_number("offset"), Some(-3.0));
        assert_eq!(parsed.positional(), &raw(&["-1"])[..]);
    }

    #[test]
    fn refine_types_declared_options() {
        let schema = OptionSchema::empty()
            .with_option(OptionSpec::new("env", OptionType::String).with_alias("e"))
            .with_option(OptionSpec::new("force", OptionType::Boolean))
            .with_option(OptionSpec::new("retries", OptionType::Number));

        let parsed = refine(
            &raw(&["deploy", "--force", "app", "-e", "123", "--retries", "4"]),
            &schema,
        );

        // declared string keeps digits as text; boolean does not swallow "app"
        assert_eq!(parsed.get_str("env"), Some("123"));
        assert_eq!(parsed.get_str("e"), Some("123"));
        assert_eq!(parsed.get_bool("force"), Some(true));
        assert_eq!(parsed.get_number("retries"), Some(4.0));
        assert_eq!(parsed.positional(), &raw(&["deploy", "app"])[..]);
    }

    #[test]
    fn refine_boolean_accepts_literal() {
        let schema =
            OptionSchema::empty().with_option(OptionSpec::new("force", OptionType::Boolean));
        let parsed = refine(&raw(&["--force", "false", "x"]), &schema);
        assert_eq!(parsed.get_bool("force"), Some(false));
        assert_eq!(parsed.positional(), &raw(&["x"])[..]);
    }

    #[test]
    fn refine_number_falls_back_to_string() {
        let schema =
            OptionSchema::empty().with_option(OptionSpec::new("port", OptionType::Number));
        let parsed = refine(&raw(&["--port", "auto"]), &schema);
        assert_eq!(parsed.get_str("port"), Some("auto"));
    }

    #[test]
    fn refine_applies_defaults() {
        let schema = OptionSchema::empty()
            .with_option(
                OptionSpec::new("env", OptionType::String).with_default(ArgValue::from("dev")),
            )
            .with_option(OptionSpec::new("force", OptionType::Boolean))
            .with_option(OptionSpec::new("name", OptionType::String));

        let parsed = refine(&[], &schema);
        assert_eq!(parsed.get_str("env"), Some("dev"));
        assert_eq!(parsed.get_bool("force"), Some(false));
        assert!(!parsed.contains("name"));
    }

    #[test]
    fn declared_string_without_value_is_empty() {
        let schema =
            OptionSchema::empty().with_option(OptionSpec::new("email", OptionType::String));
        let parsed = refine(&raw(&["--email", "--other"]), &schema);
        assert_eq!(parsed.get_str("email"), Some(""));
        assert_eq!(parsed.get_bool("other"), Some(true));
    }

    #[test]
    fn repeated_flag_accumulates() {
        let schema =
            OptionSchema::empty().with_option(OptionSpec::new("tag", OptionType::String));
        let parsed = refine(&raw(&["--tag", "a", "--tag=b"]), &schema);
        assert_eq!(
            parsed.get("tag"),
            Some(&ArgValue::List(vec![ArgValue::from("a"), ArgValue::from("b")]))
        );
    }

    #[test]
    fn short_group_sets_leading_switches() {
        let schema = OptionSchema::empty()
            .with_option(OptionSpec::new("output", OptionType::String).with_alias("o"));
        let parsed = refine(&raw(&["-vxo", "out.txt"]), &schema);
        assert_eq!(parsed.get_bool("v"), Some(true));
        assert_eq!(parsed.get_bool("x"), Some(true));
        assert_eq!(parsed.get_str("output"), Some("out.txt"));

        let parsed = refine(&raw(&["-o=dist"]), &schema);
        assert_eq!(parsed.get_str("o"), Some("dist"));
    }

    #[test]
    fn numeric_detection() {
        assert!(looks_numeric("42"));
        assert!(looks_numeric("-3.5"));
        assert!(!looks_numeric("nan"));
        assert!(!looks_numeric("inf"));
        assert!(!looks_numeric("1.2.3"));
        assert!(!looks_numeric("-"));
    }
}
