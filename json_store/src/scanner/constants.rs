pub const OPEN_SQUARE_BRACKET: char = '[';
pub const CLOSE_SQUARE_BRACKET: char = ']';
pub const OPEN_BRACE: char = '{';
pub const CLOSE_BRACE: char = '}';

pub const PERIOD: char = '.';
pub const COMMA: char = ',';
pub const COLON: char = ':';
pub const MINUS: char = '-';
pub const DOUBLE_QUOTE: char = '"';
pub const ESCAPE: char = '\\';

/// The final path segment that asks for every child of a container.
pub const HARVEST_SEGMENT: &str = "-1";

pub fn is_structural(c: char) -> bool {
    matches!(
        c,
        OPEN_BRACE | CLOSE_BRACE | OPEN_SQUARE_BRACKET | CLOSE_SQUARE_BRACKET | COMMA | COLON
    )
}
