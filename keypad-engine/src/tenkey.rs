//! The ten-key accumulator, which turns digit keystrokes into the text of a number.

/// Supplies the text of the number currently being typed.
pub trait DigitDisplay {
    /// Returns the text of the number currently being typed. Empty if no number is being typed.
    fn digit_display(&self) -> String;
}

impl DigitDisplay for String {
    fn digit_display(&self) -> String {
        self.clone()
    }
}

/// Accumulates digit and decimal separator keystrokes into the text of one number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenKey {
    /// The text typed so far.
    display: String,

    /// The maximum number of digits the number may have. The decimal separator is not counted.
    max_digits: usize,
}

impl TenKey {
    /// Creates an empty accumulator that accepts up to `max_digits` digits.
    pub fn new(max_digits: usize) -> Self {
        Self { display: String::new(), max_digits }
    }

    /// Returns true if nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }

    /// Returns the number of digits typed.
    fn digit_count(&self) -> usize {
        self.display.bytes().filter(u8::is_ascii_digit).count()
    }

    /// Appends a digit. The digit is ignored if the maximum number of digits has been reached.
    /// A lone leading zero is replaced by the digit. Values above 9 are ignored.
    pub fn push_digit(&mut self, digit: u8) {
        let Some(digit) = char::from_digit(digit.into(), 10) else {
            return;
        };
        if self.display == "0" {
            self.display.clear();
        } else if self.digit_count() >= self.max_digits {
            return;
        }

        self.display.push(digit);
    }

    /// Appends the decimal separator, or `0.` if nothing has been typed. A second separator is
    /// ignored.
    pub fn push_separator(&mut self) {
        if self.display.contains('.') {
            return;
        }

        if self.display.is_empty() {
            self.display.push('0');
        }
        self.display.push('.');
    }

    /// Removes the last character typed.
    pub fn back(&mut self) {
        self.display.pop();
    }

    /// Clears the accumulator.
    pub fn clear(&mut self) {
        self.display.clear();
    }

    /// Replaces the accumulated text, so that typing continues an existing number.
    pub fn load(&mut self, text: &str) {
        self.display.clear();
        self.display.push_str(text);
    }
}

impl DigitDisplay for TenKey {
    fn digit_display(&self) -> String {
        self.display.clone()
    }
}
