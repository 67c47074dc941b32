use nom::{
    bytes::complete::take_while,
    character::complete::satisfy,
    combinator::{map, map_res, recognize},
    error::{context, VerboseError},
    sequence::pair,
    IResult,
};

pub type ScanResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Digits and `.` in any repetition, starting with a digit.
///
/// Repeated separators are accepted; the value is read up to the second `.`.
#[tracing::instrument(level = "debug", skip(input))]
pub fn scan_number(input: &str) -> ScanResult<f64> {
    context(
        "number",
        map_res(
            recognize(pair(
                satisfy(|c| c.is_ascii_digit()),
                take_while(|c: char| c.is_ascii_digit() || c == '.'),
            )),
            |digits: &str| {
                let end = digits
                    .match_indices('.')
                    .nth(1)
                    .map(|(i, _)| i)
                    .unwrap_or(digits.len());
                digits[..end].parse::<f64>()
            },
        ),
    )(input)
}

/// A lowercase letter followed by letters and digits.
#[tracing::instrument(level = "debug", skip(input))]
pub fn scan_identifier(input: &str) -> ScanResult<String> {
    context(
        "identifier",
        map(
            recognize(pair(
                satisfy(|c| c.is_ascii_lowercase()),
                take_while(|c: char| c.is_ascii_alphanumeric()),
            )),
            |id: &str| id.to_string(),
        ),
    )(input)
}
