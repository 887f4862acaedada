//! Operator input
//!
//! [`InputReader`] pulls whitespace-delimited tokens from a line-buffered
//! reader, the same way a C++ `cin >> value` extraction does: tokens left on a
//! line after a successful read stay queued for the next prompt, while a token
//! that fails to parse throws away the rest of its line.
//!
//! Input is read as raw bytes and split on ASCII whitespace. A token that is
//! not valid UTF-8 is rejected like any other malformed answer.
//!
//! Retrying is unbounded unless a cap is configured. End of input is always an
//! error, so a closed stdin can never spin the prompt loop.

use super::constants::{CHAR_INPUT_ERROR_MESSAGE, INPUT_ERROR_MESSAGE};
use super::diagnostics::{Diagnostics, Severity};
use super::errors::SessionError;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Answer to a yes/no prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

impl Confirmation {
    /// Parse a single-character answer, case-insensitively
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match c.to_ascii_lowercase() {
            'y' => Some(Confirmation::Yes),
            'n' => Some(Confirmation::No),
            _ => None,
        }
    }
}

/// Tokenizing reader with re-prompting on malformed input
pub struct InputReader<R: BufRead> {
    reader: R,
    pending: VecDeque<Vec<u8>>,
    max_retries: Option<usize>,
}

impl<R: BufRead> InputReader<R> {
    /// Create a reader; `max_retries` of `None` retries forever
    pub fn new(reader: R, max_retries: Option<usize>) -> Self {
        InputReader {
            reader,
            pending: VecDeque::new(),
            max_retries,
        }
    }

    /// Prompt until a token parses as `T`
    pub fn read_value<T, W, E>(
        &mut self,
        prompt: &str,
        out: &mut W,
        diagnostics: &mut Diagnostics<E>,
    ) -> Result<T, SessionError>
    where
        T: FromStr,
        W: Write,
        E: Write,
    {
        self.prompt_until(prompt, out, diagnostics, INPUT_ERROR_MESSAGE, |token| {
            token.parse::<T>().ok()
        })
    }

    /// Prompt until the answer is `y` or `n` in either case
    pub fn read_confirmation<W, E>(
        &mut self,
        prompt: &str,
        out: &mut W,
        diagnostics: &mut Diagnostics<E>,
    ) -> Result<Confirmation, SessionError>
    where
        W: Write,
        E: Write,
    {
        self.prompt_until(
            prompt,
            out,
            diagnostics,
            CHAR_INPUT_ERROR_MESSAGE,
            Confirmation::from_token,
        )
    }

    fn prompt_until<T, W, E, F>(
        &mut self,
        prompt: &str,
        out: &mut W,
        diagnostics: &mut Diagnostics<E>,
        rejection: &str,
        accept: F,
    ) -> Result<T, SessionError>
    where
        W: Write,
        E: Write,
        F: Fn(&str) -> Option<T>,
    {
        let mut failures = 0;
        loop {
            out.write_all(prompt.as_bytes())?;
            out.flush()?;

            let token = self.next_token()?.ok_or_else(|| SessionError::InputClosed {
                prompt: prompt.to_string(),
            })?;

            if let Some(value) = std::str::from_utf8(&token).ok().and_then(&accept) {
                return Ok(value);
            }

            log::debug!(
                "rejected token {:?} at prompt {:?}",
                String::from_utf8_lossy(&token),
                prompt.trim_end()
            );
            self.discard_line();
            diagnostics.report(Severity::Retry, rejection)?;

            failures += 1;
            if self.max_retries.is_some_and(|max| failures > max) {
                return Err(SessionError::RetriesExhausted {
                    prompt: prompt.to_string(),
                    attempts: failures,
                });
            }
        }
    }

    /// Next token, reading more lines as needed; `None` at end of input
    fn next_token(&mut self) -> Result<Option<Vec<u8>>, SessionError> {
        while self.pending.is_empty() {
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(
                line.split(u8::is_ascii_whitespace)
                    .filter(|token| !token.is_empty())
                    .map(<[u8]>::to_vec),
            );
        }
        Ok(self.pending.pop_front())
    }

    /// Drop whatever is left of the current line
    fn discard_line(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(input: &str, max_retries: Option<usize>) -> InputReader<&[u8]> {
        InputReader::new(input.as_bytes(), max_retries)
    }

    #[test]
    fn test_reads_integer_after_malformed_token() {
        let mut input = reader("abc\n7\n", None);
        let mut out = Vec::new();
        let mut diag = Diagnostics::new(Vec::new(), false);

        let value: i32 = input.read_value("num: ", &mut out, &mut diag).unwrap();

        assert_eq!(value, 7);
        assert_eq!(String::from_utf8(out).unwrap(), "num: num: ");
        assert_eq!(
            String::from_utf8(diag.into_inner()).unwrap(),
            format!("{}\n", INPUT_ERROR_MESSAGE)
        );
    }

    #[test]
    fn test_malformed_token_discards_rest_of_line() {
        let mut input = reader("x 1 2\n3\n", None);
        let mut out = Vec::new();
        let mut diag = Diagnostics::new(Vec::new(), false);

        let value: i32 = input.read_value("num: ", &mut out, &mut diag).unwrap();
        assert_eq!(value, 3);
    }

    #[test]
    fn test_non_utf8_line_is_rejected_and_reprompted() {
        let mut input = InputReader::new(&b"\xff\xfe\n5\n"[..], None);
        let mut out = Vec::new();
        let mut diag = Diagnostics::new(Vec::new(), false);

        let value: i32 = input.read_value("num: ", &mut out, &mut diag).unwrap();

        assert_eq!(value, 5);
        assert_eq!(String::from_utf8(out).unwrap(), "num: num: ");
        assert_eq!(
            String::from_utf8(diag.into_inner()).unwrap(),
            format!("{}\n", INPUT_ERROR_MESSAGE)
        );
    }

    #[test]
    fn test_non_utf8_confirmation_is_rejected() {
        let mut input = InputReader::new(&b"y\xcc\nn\n"[..], None);
        let mut out = Vec::new();
        let mut diag = Diagnostics::new(Vec::new(), false);

        let answer = input.read_confirmation("? ", &mut out, &mut diag).unwrap();

        assert_eq!(answer, Confirmation::No);
        assert_eq!(
            String::from_utf8(diag.into_inner()).unwrap(),
            format!("{}\n", CHAR_INPUT_ERROR_MESSAGE)
        );
    }

    #[test]
    fn test_leftover_tokens_feed_next_prompt() {
        let mut input = reader("5 10\n", None);
        let mut out = Vec::new();
        let mut diag = Diagnostics::new(Vec::new(), false);

        let a: i32 = input.read_value("a: ", &mut out, &mut diag).unwrap();
        let b: i32 = input.read_value("b: ", &mut out, &mut diag).unwrap();
        assert_eq!((a, b), (5, 10));
    }

    #[test]
    fn test_partial_and_out_of_range_numbers_rejected() {
        let mut input = reader("12abc\n99999999999\n-2147483648\n", None);
        let mut out = Vec::new();
        let mut diag = Diagnostics::new(Vec::new(), false);

        let value: i32 = input.read_value("n: ", &mut out, &mut diag).unwrap();
        assert_eq!(value, i32::MIN);
        let errors = String::from_utf8(diag.into_inner()).unwrap();
        assert_eq!(errors.lines().count(), 2);
    }

    #[test]
    fn test_confirmation_is_case_insensitive() {
        let mut input = reader("Y\nn\nN\ny\n", None);
        let mut out = Vec::new();
        let mut diag = Diagnostics::new(Vec::new(), false);

        let answers: Vec<Confirmation> = (0..4)
            .map(|_| input.read_confirmation("? ", &mut out, &mut diag).unwrap())
            .collect();
        assert_eq!(
            answers,
            vec![
                Confirmation::Yes,
                Confirmation::No,
                Confirmation::No,
                Confirmation::Yes
            ]
        );
    }

    #[test]
    fn test_confirmation_rejects_everything_else() {
        let mut input = reader("x\nyes\n1\ny\n", None);
        let mut out = Vec::new();
        let mut diag = Diagnostics::new(Vec::new(), false);

        let answer = input.read_confirmation("? ", &mut out, &mut diag).unwrap();
        assert_eq!(answer, Confirmation::Yes);
        let errors = String::from_utf8(diag.into_inner()).unwrap();
        assert_eq!(
            errors,
            format!("{0}\n{0}\n{0}\n", CHAR_INPUT_ERROR_MESSAGE)
        );
    }

    #[test]
    fn test_end_of_input_is_reported() {
        let mut input = reader("abc\n", None);
        let mut out = Vec::new();
        let mut diag = Diagnostics::new(Vec::new(), false);

        let result: Result<i32, _> = input.read_value("n: ", &mut out, &mut diag);
        assert!(matches!(result, Err(SessionError::InputClosed { .. })));
    }

    #[test]
    fn test_retry_cap_stops_scripted_input() {
        let mut input = reader("a\nb\nc\n4\n", Some(2));
        let mut out = Vec::new();
        let mut diag = Diagnostics::new(Vec::new(), false);

        let result: Result<i32, _> = input.read_value("n: ", &mut out, &mut diag);
        match result {
            Err(SessionError::RetriesExhausted { attempts, .. }) => assert_eq!(attempts, 3),
            other => panic!("Expected RetriesExhausted, got {:?}", other),
        }
    }

    #[test]
    fn test_retry_cap_allows_recovery_within_budget() {
        let mut input = reader("a\nb\n4\n", Some(2));
        let mut out = Vec::new();
        let mut diag = Diagnostics::new(Vec::new(), false);

        let value: i32 = input.read_value("n: ", &mut out, &mut diag).unwrap();
        assert_eq!(value, 4);
    }
}
