//! Token definitions for the Langlang lexer.

/// All token types in Langlang.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    Class,
    Def,
    Task,
    Parallel,
    Async,
    Await,
    If,
    Else,
    For,
    While,
    Return,
    And,
    Or,
    Not,
    Pass,
    Break,
    Continue,
    Print,
    True,
    False,
    Null,

    // Literals
    Identifier,
    Str,
    Number,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    EqualEqual,
    BangEqual,
    Bang,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Dot,
    Colon,
    Semicolon,

    // Layout
    Newline,
    Indent,
    Dedent,

    // Special
    Eof,
}

impl TokenKind {
    /// Check if an identifier is a keyword and return the corresponding kind.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        match ident {
            "class" => Some(TokenKind::Class),
            "def" => Some(TokenKind::Def),
            "task" => Some(TokenKind::Task),
            "parallel" => Some(TokenKind::Parallel),
            "async" => Some(TokenKind::Async),
            "await" => Some(TokenKind::Await),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "for" => Some(TokenKind::For),
            "while" => Some(TokenKind::While),
            "return" => Some(TokenKind::Return),
            "and" => Some(TokenKind::And),
            "or" => Some(TokenKind::Or),
            "not" => Some(TokenKind::Not),
            "pass" => Some(TokenKind::Pass),
            "break" => Some(TokenKind::Break),
            "continue" => Some(TokenKind::Continue),
            "print" => Some(TokenKind::Print),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "null" => Some(TokenKind::Null),
            _ => None,
        }
    }

    /// True for tokens that open a new declaration or statement. Used by the
    /// parser to resynchronize after an error.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Task
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Return
                | TokenKind::Pass
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Print
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TokenKind::Class => "class",
            TokenKind::Def => "def",
            TokenKind::Task => "task",
            TokenKind::Parallel => "parallel",
            TokenKind::Async => "async",
            TokenKind::Await => "await",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::While => "while",
            TokenKind::Return => "return",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Pass => "pass",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Print => "print",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Identifier => "identifier",
            TokenKind::Str => "string",
            TokenKind::Number => "number",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Equal => "=",
            TokenKind::EqualEqual => "==",
            TokenKind::BangEqual => "!=",
            TokenKind::Bang => "!",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Newline => "newline",
            TokenKind::Indent => "indent",
            TokenKind::Dedent => "dedent",
            TokenKind::Eof => "end of file",
        };
        write!(f, "{}", text)
    }
}

/// A token with its kind, the exact source slice it came from, and its line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    pub fn eof(line: u32) -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            line,
        }
    }
}
