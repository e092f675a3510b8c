// SPDX-License-Identifier: Apache-2.0

use crate::escape_processor::{EscapeProcessor, SurrogateTracker};
use crate::input_buffer::InputBuffer;
use crate::json_number;
use crate::scratch::ScratchText;
use crate::shared::{
    ParserInfo, StringChunk, Token, TokenType, MAX_DEPTH_LEVEL, MAX_NAME_LENGTH,
    MAX_VALUE_LENGTH, MIN_PARSER_BUFFER_SIZE,
};
use crate::tokenizer::{classify, transition, Action, State, StateStack, Transition};
use crate::utf8::{self, Utf8Validator};
use crate::Error;

/// A pull parser over JSON text fed in chunks.
///
/// Input goes in through [`set_data`](Self::set_data); [`next`](Self::next)
/// scans until one token is complete and reports its type. Values are then
/// read with the getter matching that type, once. A token reported as
/// [`TokenType::Unknown`] means the buffered input ran out: feed more and call
/// `next` again. Numbers, literals, names and escapes may be split anywhere
/// between chunks.
///
/// String values are reported as soon as their opening quote is seen. Their
/// content is then drained with [`get_string`](Self::get_string), which keeps
/// scanning the input and reports `is_partial` until the closing quote has
/// been seen and every byte has been delivered.
///
/// ```rust
/// use chunkjson::{Parser, TokenType};
///
/// let mut storage = [0u8; 64];
/// let mut parser = Parser::new(&mut storage).unwrap();
/// parser.set_data(br#"{"on": true}"#).unwrap();
///
/// assert_eq!(parser.next().unwrap().kind, TokenType::ObjectStart);
/// let token = parser.next().unwrap();
/// assert_eq!(token.kind, TokenType::Boolean);
/// assert_eq!(parser.name(), "on");
/// assert!(parser.get_boolean().unwrap());
/// assert_eq!(parser.next().unwrap().kind, TokenType::ObjectEnd);
/// assert_eq!(parser.next().unwrap().kind, TokenType::None);
/// ```
pub struct Parser<'b, const DEPTH: usize = MAX_DEPTH_LEVEL> {
    input: InputBuffer<'b>,
    stack: StateStack<DEPTH>,
    state: State,
    current_type: TokenType,
    /// Name being accumulated for the next token.
    current_name: ScratchText<MAX_NAME_LENGTH>,
    /// Name attached to the last reported token.
    token_name: ScratchText<MAX_NAME_LENGTH>,
    /// Number text, literal text or `\u` escape digits.
    current_value: ScratchText<MAX_VALUE_LENGTH>,
    record_value: bool,
    string_in_progress: bool,
    string_utf8: Utf8Validator,
    string_surrogates: SurrogateTracker,
    name_surrogates: SurrogateTracker,
}

impl<'b> Parser<'b> {
    /// Creates a parser over `buffer`, nesting up to [`MAX_DEPTH_LEVEL`].
    pub fn new(buffer: &'b mut [u8]) -> Result<Self, Error> {
        Self::with_depth(buffer)
    }
}

impl<'b, const DEPTH: usize> Parser<'b, DEPTH> {
    const DEPTH_IS_USABLE: () = assert!(DEPTH >= 2, "DEPTH must allow at least one container");

    /// Creates a parser with a custom maximum depth.
    ///
    /// The buffer must hold at least [`MIN_PARSER_BUFFER_SIZE`] bytes.
    pub fn with_depth(buffer: &'b mut [u8]) -> Result<Self, Error> {
        #[allow(clippy::let_unit_value)]
        let () = Self::DEPTH_IS_USABLE;
        if buffer.len() < MIN_PARSER_BUFFER_SIZE {
            return Err(Error::InvalidSize);
        }
        Ok(Self {
            input: InputBuffer::new(buffer),
            stack: StateStack::new(),
            state: State::Start,
            current_type: TokenType::Unknown,
            current_name: ScratchText::new(),
            token_name: ScratchText::new(),
            current_value: ScratchText::new(),
            record_value: false,
            string_in_progress: false,
            string_utf8: Utf8Validator::new(),
            string_surrogates: SurrogateTracker::new(),
            name_surrogates: SurrogateTracker::new(),
        })
    }

    /// Offers input. Returns how many bytes were accepted; offer the rest
    /// again after the parser has consumed some of what it holds.
    ///
    /// Undelivered string content is kept, so drain a current string with
    /// `get_string` to make room.
    pub fn set_data(&mut self, data: &[u8]) -> Result<usize, Error> {
        if data.is_empty() {
            return Err(Error::InvalidParameter);
        }
        let escape_open = self.string_in_progress
            && matches!(
                self.state,
                State::StringBackslash
                    | State::Unicode1
                    | State::Unicode2
                    | State::Unicode3
                    | State::Unicode4
            );
        Ok(self.input.set_data(data, escape_open))
    }

    /// Scans the buffered input for the next token.
    pub fn next(&mut self) -> Result<Token, Error> {
        self.token_name.clear();

        if self.input.string_active() && !self.skip_string()? {
            self.current_type = TokenType::Unknown;
            return Ok(Token::new(TokenType::Unknown, self.stack.level()));
        }

        if self.input.has_unread() {
            self.run_machine()?;
        } else {
            self.current_type = TokenType::Unknown;
        }

        let kind = match self.current_type {
            TokenType::Unknown if self.state == State::Finish => TokenType::None,
            kind => kind,
        };
        self.current_type = kind;

        let level = match kind {
            TokenType::ObjectStart | TokenType::ArrayStart => self.stack.level().saturating_sub(1),
            _ => self.stack.level(),
        };

        if !matches!(kind, TokenType::Unknown | TokenType::None) {
            self.token_name = self.current_name;
            self.current_name.clear();
            if !utf8::is_valid(self.token_name.as_bytes()) {
                log::debug!("name of {kind:?} token is not valid UTF-8");
                return Err(Error::InvalidUtf8Name);
            }
            log::trace!("token {:?} level {} name {:?}", kind, level, self.name());
        }

        Ok(Token::new(kind, level))
    }

    /// Name attached to the last token reported by [`next`](Self::next), or
    /// an empty string.
    pub fn name(&self) -> &str {
        core::str::from_utf8(self.token_name.as_bytes()).unwrap_or_default()
    }

    pub fn get_null(&mut self) -> Result<(), Error> {
        self.take_type(TokenType::Null)
    }

    pub fn get_boolean(&mut self) -> Result<bool, Error> {
        self.take_type(TokenType::Boolean)?;
        Ok(self.current_value.as_bytes() == b"true")
    }

    /// Value of an [`Integer`](TokenType::Integer) token.
    pub fn get_int(&mut self) -> Result<i64, Error> {
        self.expect_type(TokenType::Integer)?;
        let value = json_number::parse_i64(self.current_value.as_bytes())?;
        self.current_type = TokenType::Unknown;
        Ok(value)
    }

    /// Value of a [`UInteger`](TokenType::UInteger) token.
    pub fn get_uint(&mut self) -> Result<u64, Error> {
        self.expect_type(TokenType::UInteger)?;
        let value = json_number::parse_u64(self.current_value.as_bytes())?;
        self.current_type = TokenType::Unknown;
        Ok(value)
    }

    /// Copies the text of a [`Float`](TokenType::Float) token into `dest`.
    pub fn get_float<'d>(&mut self, dest: &'d mut [u8]) -> Result<&'d str, Error> {
        self.expect_type(TokenType::Float)?;
        let text = self.current_value.as_bytes();
        let slot = dest
            .get_mut(..text.len())
            .ok_or(Error::FloatLengthExceeded)?;
        slot.copy_from_slice(text);
        self.current_type = TokenType::Unknown;
        core::str::from_utf8(slot).map_err(|_| Error::InvalidNumber)
    }

    /// Value of a [`Float`](TokenType::Float) token.
    #[cfg(feature = "float")]
    pub fn get_f64(&mut self) -> Result<f64, Error> {
        self.expect_type(TokenType::Float)?;
        let value = json_number::parse_f64(self.current_value.as_bytes())?;
        self.current_type = TokenType::Unknown;
        Ok(value)
    }

    /// Copies the next piece of the current string value into `dest`.
    ///
    /// Escapes arrive decoded. While `is_partial` is set, call again (after
    /// feeding input if the parser has none left). The call that completes
    /// the string checks that the whole value was valid UTF-8.
    pub fn get_string(&mut self, dest: &mut [u8]) -> Result<StringChunk, Error> {
        self.expect_type(TokenType::String)?;
        if dest.is_empty() {
            return Err(Error::InvalidParameter);
        }

        if self.string_in_progress && self.input.has_unread() {
            self.run_machine()?;
            // a chunk boundary inside the string reports nothing
            self.current_type = TokenType::String;
        }

        let available = self.input.pending_string().len();
        let len = self.input.take_string(dest);
        if let Some(delivered) = dest.get(..len) {
            self.string_utf8.feed(delivered);
        }
        let is_partial = self.string_in_progress || len < available;

        if !is_partial {
            self.input.end_string();
            self.current_type = TokenType::Unknown;
            let valid = self.string_utf8.is_accepted() && !self.string_surrogates.is_broken();
            self.string_utf8.reset();
            self.string_surrogates.reset();
            if !valid {
                log::debug!("string value is not valid UTF-8");
                return Err(Error::InvalidUtf8Data);
            }
        }

        Ok(StringChunk { len, is_partial })
    }

    /// Forgets all input and state; the storage is kept.
    pub fn reset(&mut self) {
        self.input.reset();
        self.stack.clear();
        self.state = State::Start;
        self.current_type = TokenType::Unknown;
        self.current_name.clear();
        self.token_name.clear();
        self.current_value.clear();
        self.record_value = false;
        self.string_in_progress = false;
        self.string_utf8.reset();
        self.string_surrogates.reset();
        self.name_surrogates.reset();
    }

    /// Buffer positions, see [`ParserInfo`].
    pub fn info(&self, compress: bool) -> ParserInfo {
        ParserInfo {
            current_type_index: (self.current_type == TokenType::String)
                .then(|| self.input.string_start()),
            next_type_index: self.input.data_pos(),
            buffer_left: self.input.remaining(compress),
        }
    }

    pub fn stack_level(&self) -> usize {
        self.stack.level()
    }

    pub fn capacity(&self) -> usize {
        self.input.capacity()
    }

    /// Releases the caller's storage.
    pub fn into_inner(self) -> &'b mut [u8] {
        self.input.into_inner()
    }

    fn expect_type(&self, expected: TokenType) -> Result<(), Error> {
        if self.current_type == expected {
            Ok(())
        } else {
            log::debug!("expected {:?}, current {:?}", expected, self.current_type);
            Err(Error::UnexpectedType)
        }
    }

    fn take_type(&mut self, expected: TokenType) -> Result<(), Error> {
        self.expect_type(expected)?;
        self.current_type = TokenType::Unknown;
        Ok(())
    }

    /// Discards what is left of a string the caller stopped reading.
    /// Returns false if the input ran out first.
    fn skip_string(&mut self) -> Result<bool, Error> {
        loop {
            self.input.discard_string();
            if !self.string_in_progress {
                self.input.end_string();
                self.string_utf8.reset();
                self.string_surrogates.reset();
                return Ok(true);
            }
            if !self.input.has_unread() {
                return Ok(false);
            }
            self.run_machine()?;
        }
    }

    /// Feeds bytes through the state table until a token is complete or the
    /// buffered input is exhausted.
    fn run_machine(&mut self) -> Result<(), Error> {
        let mut found = false;
        while !found {
            let Some(byte) = self.input.current_byte() else {
                break;
            };
            let Some(class) = classify(byte) else {
                return Err(self.fail(Error::ParsingError, byte));
            };

            let mut consume = true;
            match transition(self.state, class) {
                Transition::To(next) => {
                    if next == State::String {
                        self.string_surrogates.interrupt();
                        self.input.keep_current_byte();
                    }
                    self.state = next;
                }
                Transition::Do(action) => {
                    found = self
                        .perform(action, byte, &mut consume)
                        .map_err(|err| self.fail(err, byte))?;
                }
                Transition::Error => return Err(self.fail(Error::ParsingError, byte)),
            }

            if consume {
                if self.record_value && self.current_value.push(byte).is_err() {
                    return Err(self.fail(Error::FloatLengthExceeded, byte));
                }
                self.input.advance();
            }
        }

        if !found {
            self.current_type = TokenType::Unknown;
        }
        Ok(())
    }

    /// Applies an action. Returns true when a token was completed.
    fn perform(&mut self, action: Action, byte: u8, consume: &mut bool) -> Result<bool, Error> {
        match action {
            Action::ObjectStart => self.open_container(State::Object, TokenType::ObjectStart),
            Action::ArrayStart => self.open_container(State::Array, TokenType::ArrayStart),
            Action::ObjectEnd => self.close_container(State::Object, TokenType::ObjectEnd),
            Action::ArrayEnd => self.close_container(State::Array, TokenType::ArrayEnd),
            Action::NameChar => {
                self.name_surrogates.interrupt();
                self.push_name(&[byte])?;
                Ok(false)
            }
            Action::NameEnd => {
                self.name_surrogates.interrupt();
                let broken = self.name_surrogates.is_broken();
                self.name_surrogates.reset();
                if broken {
                    return Err(Error::InvalidUtf8Name);
                }
                self.state = State::Colon;
                Ok(false)
            }
            Action::StringStart => {
                self.input.begin_string();
                self.string_in_progress = true;
                self.string_utf8.reset();
                self.string_surrogates.reset();
                self.state = State::String;
                self.report(TokenType::String)
            }
            Action::StringEnd => {
                self.string_surrogates.interrupt();
                self.string_in_progress = false;
                self.state = State::ValueEnd;
                self.report(TokenType::String)
            }
            Action::StringBackslash => {
                self.state = State::StringBackslash;
                self.report(TokenType::String)
            }
            Action::True => self.literal(b"true", TokenType::Boolean),
            Action::False => self.literal(b"false", TokenType::Boolean),
            Action::Null => self.literal(b"null", TokenType::Null),
            Action::Comma => {
                let top = self.stack.top()?;
                self.state = if top.next_state == State::Object {
                    State::NameStart
                } else {
                    State::Value
                };
                Ok(false)
            }
            Action::NumberMinus => self.start_number(State::Minus),
            Action::NumberZero => self.start_number(State::IntZero),
            Action::NumberDigit => self.start_number(State::IntDigits),
            Action::NumberEnd => {
                // the terminating byte starts the next token
                *consume = false;
                self.record_value = false;
                self.state = State::ValueEnd;
                self.report(json_number::classify(self.current_value.as_bytes()))
            }
            Action::Escape => {
                let decoded = EscapeProcessor::process_simple_escape(byte);
                if self.string_in_progress {
                    self.string_surrogates.interrupt();
                    self.input.push_string_bytes(&[decoded]);
                    self.state = State::String;
                } else {
                    self.name_surrogates.interrupt();
                    self.push_name(&[decoded])?;
                    self.state = State::Name;
                }
                Ok(false)
            }
            Action::UnicodeStart => {
                self.current_value.clear();
                self.record_value = true;
                self.state = State::Unicode1;
                Ok(false)
            }
            Action::UnicodeEnd => self.finish_unicode_escape(byte),
        }
    }

    fn report(&mut self, kind: TokenType) -> Result<bool, Error> {
        self.current_type = kind;
        Ok(true)
    }

    fn open_container(&mut self, next_state: State, kind: TokenType) -> Result<bool, Error> {
        self.stack.push(self.state, next_state)?;
        self.state = next_state;
        self.report(kind)
    }

    fn close_container(&mut self, expected: State, kind: TokenType) -> Result<bool, Error> {
        let top = self.stack.top()?;
        if top.next_state != expected {
            return Err(Error::ParsingError);
        }
        self.stack.pop()?;
        self.state = if top.prev_state == State::Start {
            State::Finish
        } else {
            State::ValueEnd
        };
        self.report(kind)
    }

    fn literal(&mut self, text: &[u8], kind: TokenType) -> Result<bool, Error> {
        self.current_value.clear();
        self.current_value
            .extend(text)
            .map_err(|_| Error::FloatLengthExceeded)?;
        self.state = State::ValueEnd;
        self.report(kind)
    }

    fn start_number(&mut self, state: State) -> Result<bool, Error> {
        self.current_value.clear();
        self.record_value = true;
        self.state = state;
        Ok(false)
    }

    fn finish_unicode_escape(&mut self, last_digit: u8) -> Result<bool, Error> {
        self.record_value = false;
        // recorded: the 'u' and the first three digits
        let digits = match self.current_value.as_bytes() {
            [_, a, b, c] => [*a, *b, *c, last_digit],
            _ => return Err(Error::ParsingError),
        };
        let unit = EscapeProcessor::hex_code_unit(&digits).ok_or(Error::ParsingError)?;
        self.current_value.clear();

        if self.string_in_progress {
            let outcome = self.string_surrogates.resolve(unit);
            self.input.push_string_bytes(outcome.as_bytes());
            self.state = State::String;
        } else {
            let outcome = self.name_surrogates.resolve(unit);
            self.push_name(outcome.as_bytes())?;
            self.state = State::Name;
        }
        Ok(false)
    }

    fn push_name(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.current_name
            .extend(bytes)
            .map_err(|_| Error::NameLengthExceeded)
    }

    fn fail(&self, err: Error, byte: u8) -> Error {
        log::debug!(
            "{} at offset {} (byte {:#04x}, state {:?})",
            err,
            self.input.data_pos(),
            byte,
            self.state
        );
        err
    }
}
