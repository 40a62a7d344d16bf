//! Date pattern tokens driving the order of date sub-selects

use chrono::Month;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
	/// A run of one pattern letter, e.g. `MMMM` is `Field('M', 4)`
	Field(char, usize),
	Literal(String),
}

const FIELD_LETTERS: &[char] = &['d', 'M', 'y', 'H', 'm', 's'];

/// Split a pattern such as `MMMM d, y` into fields and delimiters
///
/// Text between single quotes is literal; `''` is a quote.
pub(crate) fn tokenize(pattern: &str) -> Vec<Token> {
	let mut tokens = Vec::new();
	let mut literal = String::new();
	let mut chars = pattern.chars().peekable();

	while let Some(ch) = chars.next() {
		if ch == '\'' {
			if chars.peek() == Some(&'\'') {
				chars.next();
				literal.push('\'');
				continue;
			}
			while let Some(quoted) = chars.next() {
				if quoted != '\'' {
					literal.push(quoted);
				} else if chars.peek() == Some(&'\'') {
					chars.next();
					literal.push('\'');
				} else {
					break;
				}
			}
		} else if FIELD_LETTERS.contains(&ch) {
			if !literal.is_empty() {
				tokens.push(Token::Literal(std::mem::take(&mut literal)));
			}
			let mut width = 1;
			while chars.peek() == Some(&ch) {
				chars.next();
				width += 1;
			}
			tokens.push(Token::Field(ch, width));
		} else {
			literal.push(ch);
		}
	}
	if !literal.is_empty() {
		tokens.push(Token::Literal(literal));
	}
	tokens
}

/// Drop the seconds field along with the delimiter right before it
pub(crate) fn without_seconds(tokens: Vec<Token>) -> Vec<Token> {
	let mut kept: Vec<Token> = Vec::with_capacity(tokens.len());
	for token in tokens {
		if matches!(token, Token::Field('s', _)) {
			if matches!(kept.last(), Some(Token::Literal(_))) {
				kept.pop();
			}
			continue;
		}
		kept.push(token);
	}
	kept
}

/// Option label for a numeric part value rendered at `width`
pub(crate) fn part_label(letter: char, width: usize, number: u32) -> String {
	match letter {
		'M' if width >= 3 => {
			let name = u8::try_from(number)
				.ok()
				.and_then(|month| Month::try_from(month).ok())
				.map(|month| month.name())
				.unwrap_or_default();
			if width == 3 {
				name.chars().take(3).collect()
			} else {
				name.to_string()
			}
		}
		'y' if width == 2 => format!("{:02}", number % 100),
		'y' => number.to_string(),
		_ if width == 1 => number.to_string(),
		_ => format!("{number:02}"),
	}
}
