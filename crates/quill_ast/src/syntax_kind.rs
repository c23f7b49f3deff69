//! SyntaxKind enum - all token and node kinds in the Quill syntax tree.
//!
//! Token kinds come first, then node kinds. Several kinds (identifiers,
//! literals, `true`/`false`/`null`, end of file) are both a token and a node.

use serde::Serialize;

/// The kind of a syntax token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown = 0,
    EndOfFileToken = 1,

    // Trivia
    SingleLineCommentTrivia = 2,
    MultiLineCommentTrivia = 3,
    NewLineTrivia = 4,
    WhitespaceTrivia = 5,
    ShebangTrivia = 6,

    // Literals
    NumericLiteral = 7,
    StringLiteral = 8,

    // Punctuation
    OpenBraceToken = 9,
    CloseBraceToken = 10,
    OpenParenToken = 11,
    CloseParenToken = 12,
    OpenBracketToken = 13,
    CloseBracketToken = 14,
    DotToken = 15,
    SemicolonToken = 16,
    CommaToken = 17,
    LessThanToken = 18,
    GreaterThanToken = 19,
    LessThanEqualsToken = 20,
    GreaterThanEqualsToken = 21,
    EqualsEqualsToken = 22,
    ExclamationEqualsToken = 23,
    EqualsEqualsEqualsToken = 24,
    ExclamationEqualsEqualsToken = 25,
    PlusToken = 26,
    MinusToken = 27,
    AsteriskToken = 28,
    AsteriskAsteriskToken = 29,
    SlashToken = 30,
    PercentToken = 31,
    PlusPlusToken = 32,
    MinusMinusToken = 33,
    LessThanLessThanToken = 34,
    GreaterThanGreaterThanToken = 35,
    GreaterThanGreaterThanGreaterThanToken = 36,
    AmpersandToken = 37,
    BarToken = 38,
    CaretToken = 39,
    ExclamationToken = 40,
    TildeToken = 41,
    AmpersandAmpersandToken = 42,
    BarBarToken = 43,
    QuestionToken = 44,
    ColonToken = 45,
    QuestionQuestionToken = 46,

    // Assignments
    EqualsToken = 47,
    PlusEqualsToken = 48,
    MinusEqualsToken = 49,
    AsteriskEqualsToken = 50,
    AsteriskAsteriskEqualsToken = 51,
    SlashEqualsToken = 52,
    PercentEqualsToken = 53,
    LessThanLessThanEqualsToken = 54,
    GreaterThanGreaterThanEqualsToken = 55,
    GreaterThanGreaterThanGreaterThanEqualsToken = 56,
    AmpersandEqualsToken = 57,
    BarEqualsToken = 58,
    CaretEqualsToken = 59,
    BarBarEqualsToken = 60,
    AmpersandAmpersandEqualsToken = 61,
    QuestionQuestionEqualsToken = 62,

    // Identifiers and keywords
    Identifier = 63,

    // Reserved words
    BreakKeyword = 64,
    CaseKeyword = 65,
    CatchKeyword = 66,
    ClassKeyword = 67,
    ConstKeyword = 68,
    ContinueKeyword = 69,
    DebuggerKeyword = 70,
    DefaultKeyword = 71,
    DeleteKeyword = 72,
    DoKeyword = 73,
    ElseKeyword = 74,
    EnumKeyword = 75,
    ExportKeyword = 76,
    ExtendsKeyword = 77,
    FalseKeyword = 78,
    FinallyKeyword = 79,
    ForKeyword = 80,
    FunctionKeyword = 81,
    IfKeyword = 82,
    ImportKeyword = 83,
    InKeyword = 84,
    InstanceOfKeyword = 85,
    NewKeyword = 86,
    NullKeyword = 87,
    ReturnKeyword = 88,
    SuperKeyword = 89,
    SwitchKeyword = 90,
    ThisKeyword = 91,
    ThrowKeyword = 92,
    TrueKeyword = 93,
    TryKeyword = 94,
    TypeOfKeyword = 95,
    VarKeyword = 96,
    VoidKeyword = 97,
    WhileKeyword = 98,
    WithKeyword = 99,

    // Strict mode reserved words
    ImplementsKeyword = 100,
    InterfaceKeyword = 101,
    LetKeyword = 102,
    PackageKeyword = 103,
    PrivateKeyword = 104,
    ProtectedKeyword = 105,
    PublicKeyword = 106,
    StaticKeyword = 107,
    YieldKeyword = 108,

    // ========================================================================
    // Nodes
    // ========================================================================
    SourceFile = 109,

    // Statements
    VariableStatement = 110,
    VariableDeclarationList = 111,
    VariableDeclaration = 112,
    ExpressionStatement = 113,
    EmptyStatement = 114,

    // Expressions
    ParenthesizedExpression = 115,
    PrefixUnaryExpression = 116,
    PostfixUnaryExpression = 117,
    BinaryExpression = 118,
    ConditionalExpression = 119,
    CallExpression = 120,
    PropertyAccessExpression = 121,
}

// Marker constants for SyntaxKind ranges.
impl SyntaxKind {
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_COMPOUND_ASSIGNMENT: SyntaxKind = SyntaxKind::PlusEqualsToken;
    pub const FIRST_RESERVED_WORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::WithKeyword;
    pub const FIRST_FUTURE_RESERVED_WORD: SyntaxKind = SyntaxKind::ImplementsKeyword;
    pub const LAST_FUTURE_RESERVED_WORD: SyntaxKind = SyntaxKind::YieldKeyword;
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_TRIVIA_TOKEN: SyntaxKind = SyntaxKind::SingleLineCommentTrivia;
    pub const LAST_TRIVIA_TOKEN: SyntaxKind = SyntaxKind::ShebangTrivia;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::YieldKeyword;
}

impl SyntaxKind {
    /// Whether this kind represents a keyword (reserved or strict-reserved).
    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_RESERVED_WORD as u16 && v <= Self::LAST_FUTURE_RESERVED_WORD as u16
    }

    /// Whether this kind is reserved in every language variant.
    #[inline]
    pub fn is_reserved_word(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_RESERVED_WORD as u16 && v <= Self::LAST_RESERVED_WORD as u16
    }

    /// Whether this kind is reserved only in strict code.
    #[inline]
    pub fn is_strict_mode_reserved_word(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_FUTURE_RESERVED_WORD as u16 && v <= Self::LAST_FUTURE_RESERVED_WORD as u16
    }

    /// Whether this kind represents a punctuation token.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_PUNCTUATION as u16 && v <= Self::LAST_PUNCTUATION as u16
    }

    /// Whether this kind represents a literal token.
    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(self, SyntaxKind::NumericLiteral | SyntaxKind::StringLiteral)
    }

    /// Whether this kind represents trivia.
    #[inline]
    pub fn is_trivia(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_TRIVIA_TOKEN as u16 && v <= Self::LAST_TRIVIA_TOKEN as u16
    }

    /// Whether this kind is produced by the scanner (as opposed to only by
    /// the parser).
    #[inline]
    pub fn is_token(self) -> bool {
        self as u16 <= Self::LAST_TOKEN as u16
    }

    /// Whether this kind represents an assignment operator.
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_ASSIGNMENT as u16 && v <= Self::LAST_ASSIGNMENT as u16
    }

    /// Whether this kind represents a compound assignment operator.
    #[inline]
    pub fn is_compound_assignment(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_COMPOUND_ASSIGNMENT as u16 && v <= Self::LAST_ASSIGNMENT as u16
    }

    /// Whether this kind represents a statement node.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::VariableStatement
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::EmptyStatement
        )
    }

    /// Whether this kind represents an expression node.
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::Identifier
                | SyntaxKind::NumericLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::ParenthesizedExpression
                | SyntaxKind::PrefixUnaryExpression
                | SyntaxKind::PostfixUnaryExpression
                | SyntaxKind::BinaryExpression
                | SyntaxKind::ConditionalExpression
                | SyntaxKind::CallExpression
                | SyntaxKind::PropertyAccessExpression
        )
    }

    /// Get the keyword text for a keyword kind, or None if not a keyword.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::BreakKeyword => Some("break"),
            SyntaxKind::CaseKeyword => Some("case"),
            SyntaxKind::CatchKeyword => Some("catch"),
            SyntaxKind::ClassKeyword => Some("class"),
            SyntaxKind::ConstKeyword => Some("const"),
            SyntaxKind::ContinueKeyword => Some("continue"),
            SyntaxKind::DebuggerKeyword => Some("debugger"),
            SyntaxKind::DefaultKeyword => Some("default"),
            SyntaxKind::DeleteKeyword => Some("delete"),
            SyntaxKind::DoKeyword => Some("do"),
            SyntaxKind::ElseKeyword => Some("else"),
            SyntaxKind::EnumKeyword => Some("enum"),
            SyntaxKind::ExportKeyword => Some("export"),
            SyntaxKind::ExtendsKeyword => Some("extends"),
            SyntaxKind::FalseKeyword => Some("false"),
            SyntaxKind::FinallyKeyword => Some("finally"),
            SyntaxKind::ForKeyword => Some("for"),
            SyntaxKind::FunctionKeyword => Some("function"),
            SyntaxKind::IfKeyword => Some("if"),
            SyntaxKind::ImportKeyword => Some("import"),
            SyntaxKind::InKeyword => Some("in"),
            SyntaxKind::InstanceOfKeyword => Some("instanceof"),
            SyntaxKind::NewKeyword => Some("new"),
            SyntaxKind::NullKeyword => Some("null"),
            SyntaxKind::ReturnKeyword => Some("return"),
            SyntaxKind::SuperKeyword => Some("super"),
            SyntaxKind::SwitchKeyword => Some("switch"),
            SyntaxKind::ThisKeyword => Some("this"),
            SyntaxKind::ThrowKeyword => Some("throw"),
            SyntaxKind::TrueKeyword => Some("true"),
            SyntaxKind::TryKeyword => Some("try"),
            SyntaxKind::TypeOfKeyword => Some("typeof"),
            SyntaxKind::VarKeyword => Some("var"),
            SyntaxKind::VoidKeyword => Some("void"),
            SyntaxKind::WhileKeyword => Some("while"),
            SyntaxKind::WithKeyword => Some("with"),
            SyntaxKind::ImplementsKeyword => Some("implements"),
            SyntaxKind::InterfaceKeyword => Some("interface"),
            SyntaxKind::LetKeyword => Some("let"),
            SyntaxKind::PackageKeyword => Some("package"),
            SyntaxKind::PrivateKeyword => Some("private"),
            SyntaxKind::ProtectedKeyword => Some("protected"),
            SyntaxKind::PublicKeyword => Some("public"),
            SyntaxKind::StaticKeyword => Some("static"),
            SyntaxKind::YieldKeyword => Some("yield"),
            _ => None,
        }
    }

    /// Look up a keyword SyntaxKind from text.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "break" => Some(SyntaxKind::BreakKeyword),
            "case" => Some(SyntaxKind::CaseKeyword),
            "catch" => Some(SyntaxKind::CatchKeyword),
            "class" => Some(SyntaxKind::ClassKeyword),
            "const" => Some(SyntaxKind::ConstKeyword),
            "continue" => Some(SyntaxKind::ContinueKeyword),
            "debugger" => Some(SyntaxKind::DebuggerKeyword),
            "default" => Some(SyntaxKind::DefaultKeyword),
            "delete" => Some(SyntaxKind::DeleteKeyword),
            "do" => Some(SyntaxKind::DoKeyword),
            "else" => Some(SyntaxKind::ElseKeyword),
            "enum" => Some(SyntaxKind::EnumKeyword),
            "export" => Some(SyntaxKind::ExportKeyword),
            "extends" => Some(SyntaxKind::ExtendsKeyword),
            "false" => Some(SyntaxKind::FalseKeyword),
            "finally" => Some(SyntaxKind::FinallyKeyword),
            "for" => Some(SyntaxKind::ForKeyword),
            "function" => Some(SyntaxKind::FunctionKeyword),
            "if" => Some(SyntaxKind::IfKeyword),
            "import" => Some(SyntaxKind::ImportKeyword),
            "in" => Some(SyntaxKind::InKeyword),
            "instanceof" => Some(SyntaxKind::InstanceOfKeyword),
            "new" => Some(SyntaxKind::NewKeyword),
            "null" => Some(SyntaxKind::NullKeyword),
            "return" => Some(SyntaxKind::ReturnKeyword),
            "super" => Some(SyntaxKind::SuperKeyword),
            "switch" => Some(SyntaxKind::SwitchKeyword),
            "this" => Some(SyntaxKind::ThisKeyword),
            "throw" => Some(SyntaxKind::ThrowKeyword),
            "true" => Some(SyntaxKind::TrueKeyword),
            "try" => Some(SyntaxKind::TryKeyword),
            "typeof" => Some(SyntaxKind::TypeOfKeyword),
            "var" => Some(SyntaxKind::VarKeyword),
            "void" => Some(SyntaxKind::VoidKeyword),
            "while" => Some(SyntaxKind::WhileKeyword),
            "with" => Some(SyntaxKind::WithKeyword),
            "implements" => Some(SyntaxKind::ImplementsKeyword),
            "interface" => Some(SyntaxKind::InterfaceKeyword),
            "let" => Some(SyntaxKind::LetKeyword),
            "package" => Some(SyntaxKind::PackageKeyword),
            "private" => Some(SyntaxKind::PrivateKeyword),
            "protected" => Some(SyntaxKind::ProtectedKeyword),
            "public" => Some(SyntaxKind::PublicKeyword),
            "static" => Some(SyntaxKind::StaticKeyword),
            "yield" => Some(SyntaxKind::YieldKeyword),
            _ => None,
        }
    }

    /// Get the punctuation text for a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::OpenBraceToken => Some("{"),
            SyntaxKind::CloseBraceToken => Some("}"),
            SyntaxKind::OpenParenToken => Some("("),
            SyntaxKind::CloseParenToken => Some(")"),
            SyntaxKind::OpenBracketToken => Some("["),
            SyntaxKind::CloseBracketToken => Some("]"),
            SyntaxKind::DotToken => Some("."),
            SyntaxKind::SemicolonToken => Some(";"),
            SyntaxKind::CommaToken => Some(","),
            SyntaxKind::LessThanToken => Some("<"),
            SyntaxKind::GreaterThanToken => Some(">"),
            SyntaxKind::LessThanEqualsToken => Some("<="),
            SyntaxKind::GreaterThanEqualsToken => Some(">="),
            SyntaxKind::EqualsEqualsToken => Some("=="),
            SyntaxKind::ExclamationEqualsToken => Some("!="),
            SyntaxKind::EqualsEqualsEqualsToken => Some("==="),
            SyntaxKind::ExclamationEqualsEqualsToken => Some("!=="),
            SyntaxKind::PlusToken => Some("+"),
            SyntaxKind::MinusToken => Some("-"),
            SyntaxKind::AsteriskToken => Some("*"),
            SyntaxKind::AsteriskAsteriskToken => Some("**"),
            SyntaxKind::SlashToken => Some("/"),
            SyntaxKind::PercentToken => Some("%"),
            SyntaxKind::PlusPlusToken => Some("++"),
            SyntaxKind::MinusMinusToken => Some("--"),
            SyntaxKind::LessThanLessThanToken => Some("<<"),
            SyntaxKind::GreaterThanGreaterThanToken => Some(">>"),
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => Some(">>>"),
            SyntaxKind::AmpersandToken => Some("&"),
            SyntaxKind::BarToken => Some("|"),
            SyntaxKind::CaretToken => Some("^"),
            SyntaxKind::ExclamationToken => Some("!"),
            SyntaxKind::TildeToken => Some("~"),
            SyntaxKind::AmpersandAmpersandToken => Some("&&"),
            SyntaxKind::BarBarToken => Some("||"),
            SyntaxKind::QuestionToken => Some("?"),
            SyntaxKind::ColonToken => Some(":"),
            SyntaxKind::QuestionQuestionToken => Some("??"),
            SyntaxKind::EqualsToken => Some("="),
            SyntaxKind::PlusEqualsToken => Some("+="),
            SyntaxKind::MinusEqualsToken => Some("-="),
            SyntaxKind::AsteriskEqualsToken => Some("*="),
            SyntaxKind::AsteriskAsteriskEqualsToken => Some("**="),
            SyntaxKind::SlashEqualsToken => Some("/="),
            SyntaxKind::PercentEqualsToken => Some("%="),
            SyntaxKind::LessThanLessThanEqualsToken => Some("<<="),
            SyntaxKind::GreaterThanGreaterThanEqualsToken => Some(">>="),
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => Some(">>>="),
            SyntaxKind::AmpersandEqualsToken => Some("&="),
            SyntaxKind::BarEqualsToken => Some("|="),
            SyntaxKind::CaretEqualsToken => Some("^="),
            SyntaxKind::BarBarEqualsToken => Some("||="),
            SyntaxKind::AmpersandAmpersandEqualsToken => Some("&&="),
            SyntaxKind::QuestionQuestionEqualsToken => Some("??="),
            _ => None,
        }
    }

    /// Source spelling of a fixed-text token, for messages like `';' expected.`
    pub fn token_text(self) -> Option<&'static str> {
        self.punctuation_text().or_else(|| self.keyword_text())
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Coarse lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenClass {
    Identifier,
    NumericLiteral,
    StringLiteral,
    Keyword,
    Punctuator,
    Comment,
    Whitespace,
    EndOfFile,
    Unknown,
}

impl TokenClass {
    pub fn of(kind: SyntaxKind) -> TokenClass {
        match kind {
            SyntaxKind::Identifier => TokenClass::Identifier,
            SyntaxKind::NumericLiteral => TokenClass::NumericLiteral,
            SyntaxKind::StringLiteral => TokenClass::StringLiteral,
            SyntaxKind::EndOfFileToken => TokenClass::EndOfFile,
            SyntaxKind::SingleLineCommentTrivia
            | SyntaxKind::MultiLineCommentTrivia
            | SyntaxKind::ShebangTrivia => TokenClass::Comment,
            SyntaxKind::NewLineTrivia | SyntaxKind::WhitespaceTrivia => TokenClass::Whitespace,
            k if k.is_keyword() => TokenClass::Keyword,
            k if k.is_punctuation() => TokenClass::Punctuator,
            _ => TokenClass::Unknown,
        }
    }

    pub fn is_trivia(self) -> bool {
        matches!(self, TokenClass::Comment | TokenClass::Whitespace)
    }
}
