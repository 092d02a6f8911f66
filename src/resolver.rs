//! Resolution of `key:value` tokens into a [`Configuration`].

use tracing::debug;

use crate::configuration::{
    clamp_dimension, floor_total, normalize_path, parse_format, parse_int_prefix, Configuration,
};
use crate::error::ValidationError;

/// Separator between a token's key and its value.
const SEPARATOR: char = ':';

/// Number of leading invocation-identity slots (program, runner) in an argv vector.
const INVOCATION_SLOTS: usize = 2;

/// Resolve a full invocation vector, skipping the program and runner slots.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered. Unknown arguments are
/// reported after every token has been scanned, naming the last one seen.
pub fn resolve<I, S>(argv: I) -> Result<Configuration, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    resolve_arguments(argv.into_iter().skip(INVOCATION_SLOTS))
}

/// Resolve user tokens only, with no positional slots skipped.
///
/// # Errors
///
/// Same as [`resolve`].
pub fn resolve_arguments<I, S>(tokens: I) -> Result<Configuration, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut config = Configuration::default();
    let mut unknown: Option<String> = None;

    for token in tokens {
        let token = token.as_ref();
        let (key, value) = match token.split_once(SEPARATOR) {
            Some((key, value)) => (key, Some(value)),
            None => (token, None),
        };

        match key.to_lowercase().as_str() {
            "npm" | "random" => {}
            "width" => config.width = clamp_dimension(value.and_then(parse_int_prefix)),
            "height" => config.height = clamp_dimension(value.and_then(parse_int_prefix)),
            "format" => {
                let value = required(token, value)?;
                config.format = parse_format(token, value)?;
            }
            "total" => config.total_images = floor_total(value.and_then(parse_int_prefix)),
            "target" | "output" => {
                config.target_folder = normalize_path(required(token, value)?);
                debug!(target_folder = %config.target_folder, "normalized output folder");
            }
            "template" => config.name_template = required(token, value)?.to_string(),
            "help" | "?" | "/?" | "-h" | "--help" => config.help_requested = true,
            _ => match bare_count(token) {
                Some(total) => config.total_images = total,
                None => {
                    debug!(token, "unknown argument");
                    unknown = Some(token.to_string());
                }
            },
        }
    }

    match unknown {
        Some(token) => Err(ValidationError::UnknownArgument { token }),
        None => Ok(config),
    }
}

fn required<'a>(token: &str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    value.ok_or_else(|| ValidationError::MissingValue { token: token.to_string() })
}

/// A whole token that is a positive integer is shorthand for `total`.
fn bare_count(token: &str) -> Option<usize> {
    token.trim().parse::<usize>().ok().filter(|&n| n > 0)
}
