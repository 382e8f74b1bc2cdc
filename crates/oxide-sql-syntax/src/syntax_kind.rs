//! Token, keyword and node kinds of the SQL syntax tree.
//!
//! One closed enumeration covers everything that can appear in the tree:
//! trivia and punctuation, every SQLite keyword, and one node kind per
//! grammar rule. The enum is `#[repr(u16)]` so it maps directly onto
//! [`rowan::SyntaxKind`].

macro_rules! syntax_kinds {
    (
        tokens { $($tok:ident => $tok_desc:literal,)* }
        keywords { $($kw:ident => $kw_text:literal,)* }
        nodes { $($node:ident,)* }
    ) => {
        /// Every kind of token and node in the SQL syntax tree.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        pub enum SyntaxKind {
            $($tok,)*
            $($kw,)*
            $($node,)*
            /// Placeholder for an opened node that was abandoned or never
            /// given a kind. It never appears in a finished tree.
            TOMBSTONE,
        }

        impl SyntaxKind {
            const ALL: &'static [Self] = &[
                $(Self::$tok,)*
                $(Self::$kw,)*
                $(Self::$node,)*
                Self::TOMBSTONE,
            ];

            /// Looks up a keyword, ignoring ASCII case.
            #[must_use]
            pub fn from_keyword(ident: &str) -> Option<Self> {
                let upper = ident.to_ascii_uppercase();
                match upper.as_str() {
                    $($kw_text => Some(Self::$kw),)*
                    _ => None,
                }
            }

            /// Returns true for keyword tokens.
            #[must_use]
            pub const fn is_keyword(self) -> bool {
                matches!(self, $(Self::$kw)|*)
            }

            /// Returns true for node kinds (including `ERROR` and `FILE`).
            #[must_use]
            pub const fn is_node(self) -> bool {
                matches!(self, $(Self::$node)|*)
            }

            /// Human-readable name used in diagnostics, e.g. `'='` or `FROM`.
            #[must_use]
            pub const fn describe(self) -> &'static str {
                match self {
                    $(Self::$tok => $tok_desc,)*
                    $(Self::$kw => $kw_text,)*
                    $(Self::$node => stringify!($node),)*
                    Self::TOMBSTONE => "TOMBSTONE",
                }
            }

            /// Inverse of `kind as u16`. Out-of-range values map to `ERROR`.
            #[must_use]
            pub fn from_raw(raw: u16) -> Self {
                Self::ALL.get(usize::from(raw)).copied().unwrap_or(Self::ERROR)
            }
        }
    };
}

syntax_kinds! {
    tokens {
        WHITESPACE => "whitespace",
        COMMENT => "comment",
        ERROR_TOKEN => "<bad character>",
        EOF => "<end of input>",
        IDENTIFIER => "<identifier>",
        BRACKET_LITERAL => "<identifier>",
        BACKTICK_LITERAL => "<identifier>",
        SINGLE_QUOTE_STRING_LITERAL => "<string>",
        DOUBLE_QUOTE_STRING_LITERAL => "<string>",
        NUMERIC_LITERAL => "<number>",
        BLOB_LITERAL => "<blob>",
        NUMBERED_PARAMETER => "<parameter>",
        NAMED_PARAMETER => "<parameter>",
        SEMICOLON => "';'",
        COMMA => "','",
        DOT => "'.'",
        L_PAREN => "'('",
        R_PAREN => "')'",
        PLUS => "'+'",
        MINUS => "'-'",
        STAR => "'*'",
        SLASH => "'/'",
        PERCENT => "'%'",
        TILDE => "'~'",
        EQ => "'='",
        EQEQ => "'=='",
        NOT_EQ => "'!='",
        LT_GT => "'<>'",
        LT => "'<'",
        LT_EQ => "'<='",
        GT => "'>'",
        GT_EQ => "'>='",
        SHL => "'<<'",
        SHR => "'>>'",
        AMP => "'&'",
        PIPE => "'|'",
        CONCAT => "'||'",
    }
    keywords {
        ABORT_KW => "ABORT",
        ACTION_KW => "ACTION",
        ADD_KW => "ADD",
        AFTER_KW => "AFTER",
        ALL_KW => "ALL",
        ALTER_KW => "ALTER",
        ANALYZE_KW => "ANALYZE",
        AND_KW => "AND",
        AS_KW => "AS",
        ASC_KW => "ASC",
        ATTACH_KW => "ATTACH",
        AUTOINCREMENT_KW => "AUTOINCREMENT",
        BEFORE_KW => "BEFORE",
        BEGIN_KW => "BEGIN",
        BETWEEN_KW => "BETWEEN",
        BY_KW => "BY",
        CASCADE_KW => "CASCADE",
        CASE_KW => "CASE",
        CAST_KW => "CAST",
        CHECK_KW => "CHECK",
        COLLATE_KW => "COLLATE",
        COLUMN_KW => "COLUMN",
        COMMIT_KW => "COMMIT",
        CONFLICT_KW => "CONFLICT",
        CONSTRAINT_KW => "CONSTRAINT",
        CREATE_KW => "CREATE",
        CROSS_KW => "CROSS",
        CURRENT_DATE_KW => "CURRENT_DATE",
        CURRENT_TIME_KW => "CURRENT_TIME",
        CURRENT_TIMESTAMP_KW => "CURRENT_TIMESTAMP",
        DATABASE_KW => "DATABASE",
        DEFAULT_KW => "DEFAULT",
        DEFERRABLE_KW => "DEFERRABLE",
        DEFERRED_KW => "DEFERRED",
        DELETE_KW => "DELETE",
        DESC_KW => "DESC",
        DETACH_KW => "DETACH",
        DISTINCT_KW => "DISTINCT",
        DROP_KW => "DROP",
        EACH_KW => "EACH",
        ELSE_KW => "ELSE",
        END_KW => "END",
        ESCAPE_KW => "ESCAPE",
        EXCEPT_KW => "EXCEPT",
        EXCLUSIVE_KW => "EXCLUSIVE",
        EXISTS_KW => "EXISTS",
        EXPLAIN_KW => "EXPLAIN",
        FAIL_KW => "FAIL",
        FOR_KW => "FOR",
        FOREIGN_KW => "FOREIGN",
        FROM_KW => "FROM",
        GLOB_KW => "GLOB",
        GROUP_KW => "GROUP",
        HAVING_KW => "HAVING",
        IF_KW => "IF",
        IGNORE_KW => "IGNORE",
        IMMEDIATE_KW => "IMMEDIATE",
        IN_KW => "IN",
        INDEX_KW => "INDEX",
        INDEXED_KW => "INDEXED",
        INITIALLY_KW => "INITIALLY",
        INNER_KW => "INNER",
        INSERT_KW => "INSERT",
        INSTEAD_KW => "INSTEAD",
        INTERSECT_KW => "INTERSECT",
        INTO_KW => "INTO",
        IS_KW => "IS",
        ISNULL_KW => "ISNULL",
        JOIN_KW => "JOIN",
        KEY_KW => "KEY",
        LEFT_KW => "LEFT",
        LIKE_KW => "LIKE",
        LIMIT_KW => "LIMIT",
        MATCH_KW => "MATCH",
        NATURAL_KW => "NATURAL",
        NO_KW => "NO",
        NOT_KW => "NOT",
        NOTNULL_KW => "NOTNULL",
        NULL_KW => "NULL",
        OF_KW => "OF",
        OFFSET_KW => "OFFSET",
        ON_KW => "ON",
        OR_KW => "OR",
        ORDER_KW => "ORDER",
        OUTER_KW => "OUTER",
        PLAN_KW => "PLAN",
        PRAGMA_KW => "PRAGMA",
        PRIMARY_KW => "PRIMARY",
        QUERY_KW => "QUERY",
        RAISE_KW => "RAISE",
        RECURSIVE_KW => "RECURSIVE",
        REFERENCES_KW => "REFERENCES",
        REGEXP_KW => "REGEXP",
        REINDEX_KW => "REINDEX",
        RELEASE_KW => "RELEASE",
        RENAME_KW => "RENAME",
        REPLACE_KW => "REPLACE",
        RESTRICT_KW => "RESTRICT",
        ROLLBACK_KW => "ROLLBACK",
        ROW_KW => "ROW",
        SAVEPOINT_KW => "SAVEPOINT",
        SELECT_KW => "SELECT",
        SET_KW => "SET",
        TABLE_KW => "TABLE",
        TEMP_KW => "TEMP",
        TEMPORARY_KW => "TEMPORARY",
        THEN_KW => "THEN",
        TO_KW => "TO",
        TRANSACTION_KW => "TRANSACTION",
        TRIGGER_KW => "TRIGGER",
        UNION_KW => "UNION",
        UNIQUE_KW => "UNIQUE",
        UPDATE_KW => "UPDATE",
        USING_KW => "USING",
        VACUUM_KW => "VACUUM",
        VALUES_KW => "VALUES",
        VIEW_KW => "VIEW",
        VIRTUAL_KW => "VIRTUAL",
        WHEN_KW => "WHEN",
        WHERE_KW => "WHERE",
        WITH_KW => "WITH",
        WITHOUT_KW => "WITHOUT",
    }
    nodes {
        FILE,
        ERROR,

        // Statements
        EXPLAIN_STATEMENT,
        SELECT_STATEMENT,
        INSERT_STATEMENT,
        UPDATE_STATEMENT,
        DELETE_STATEMENT,
        WITH_CLAUSE_STATEMENT,
        WITH_CLAUSE_SELECT_STATEMENT,
        CREATE_TABLE_STATEMENT,
        CREATE_INDEX_STATEMENT,
        CREATE_VIEW_STATEMENT,
        CREATE_TRIGGER_STATEMENT,
        CREATE_VIRTUAL_TABLE_STATEMENT,
        ALTER_TABLE_STATEMENT,
        DROP_TABLE_STATEMENT,
        DROP_INDEX_STATEMENT,
        DROP_VIEW_STATEMENT,
        DROP_TRIGGER_STATEMENT,
        ANALYZE_STATEMENT,
        ATTACH_STATEMENT,
        DETACH_STATEMENT,
        BEGIN_STATEMENT,
        COMMIT_STATEMENT,
        ROLLBACK_STATEMENT,
        SAVEPOINT_STATEMENT,
        RELEASE_STATEMENT,
        PRAGMA_STATEMENT,
        REINDEX_STATEMENT,
        VACUUM_STATEMENT,

        // SELECT
        SELECT_CORE,
        SELECT_CORE_SELECT,
        SELECT_CORE_VALUES,
        VALUES_ROW,
        COMPOUND_OPERATOR,
        RESULT_COLUMNS,
        RESULT_COLUMN,
        FROM_CLAUSE,
        WHERE_CLAUSE,
        GROUP_BY_CLAUSE,
        ORDER_CLAUSE,
        ORDERING_TERM,
        LIMIT_CLAUSE,
        JOIN_CLAUSE,
        JOIN_OPERATOR,
        JOIN_CONSTRAINT,
        TABLE_OR_SUBQUERY,
        FROM_TABLE,
        SELECT_SUBQUERY,
        INDEXED_BY,
        QUALIFIED_TABLE_NAME,
        WITH_CLAUSE,
        WITH_CLAUSE_TABLE,
        WITH_CLAUSE_TABLE_DEF,

        // INSERT / UPDATE
        INSERT_COLUMNS,
        UPDATE_ASSIGNMENT,

        // DDL
        COLUMN_DEFINITION,
        TYPE_NAME,
        COLUMN_CONSTRAINT,
        TABLE_CONSTRAINT,
        CONFLICT_CLAUSE,
        FOREIGN_KEY_CLAUSE,
        INDEXED_COLUMN,
        SIGNED_NUMBER,
        TRIGGER_BODY,
        MODULE_ARGUMENT,
        PRAGMA_VALUE,

        // Names
        DATABASE_NAME,
        DEFINED_TABLE_NAME,
        TABLE_DEFINITION_NAME,
        SELECTED_TABLE_NAME,
        TABLE_ALIAS_NAME,
        COLUMN_NAME,
        COLUMN_DEFINITION_NAME,
        COLUMN_ALIAS_NAME,
        INDEX_NAME,
        VIEW_NAME,
        TRIGGER_NAME,
        SAVEPOINT_NAME,
        MODULE_NAME,
        COLLATION_NAME,
        CONSTRAINT_NAME,
        PRAGMA_NAME,
        FUNCTION_NAME,

        // Expressions
        RAISE_FUNCTION_EXPRESSION,
        ERROR_MESSAGE,
        CASE_EXPRESSION,
        EXISTS_EXPRESSION,
        SUBQUERY_EXPRESSION,
        IN_EXPRESSION,
        ISNULL_EXPRESSION,
        LIKE_EXPRESSION,
        CAST_EXPRESSION,
        PAREN_EXPRESSION,
        FUNCTION_CALL_EXPRESSION,
        OR_EXPRESSION,
        AND_EXPRESSION,
        EQUIVALENCE_EXPRESSION,
        BETWEEN_EXPRESSION,
        COMPARISON_EXPRESSION,
        BIT_EXPRESSION,
        ADD_EXPRESSION,
        MUL_EXPRESSION,
        CONCAT_EXPRESSION,
        UNARY_EXPRESSION,
        COLLATE_EXPRESSION,
        COLUMN_REF_EXPRESSION,
        LITERAL_EXPRESSION,
        BIND_PARAMETER,
    }
}

impl SyntaxKind {
    /// Whitespace and comments.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }

    /// Keywords SQLite also accepts where a name is expected.
    ///
    /// Keywords that may legally follow a name (`INDEXED`, `ON`, `USING`,
    /// join keywords, clause keywords) are not in this set, so an optional
    /// alias never swallows the next clause.
    #[must_use]
    pub const fn is_fallback_name(self) -> bool {
        matches!(
            self,
            Self::ABORT_KW
                | Self::ACTION_KW
                | Self::AFTER_KW
                | Self::ANALYZE_KW
                | Self::ASC_KW
                | Self::ATTACH_KW
                | Self::BEFORE_KW
                | Self::BEGIN_KW
                | Self::BY_KW
                | Self::CASCADE_KW
                | Self::CONFLICT_KW
                | Self::DATABASE_KW
                | Self::DEFERRED_KW
                | Self::DESC_KW
                | Self::DETACH_KW
                | Self::EACH_KW
                | Self::END_KW
                | Self::EXCLUSIVE_KW
                | Self::EXPLAIN_KW
                | Self::FAIL_KW
                | Self::FOR_KW
                | Self::IGNORE_KW
                | Self::IMMEDIATE_KW
                | Self::INITIALLY_KW
                | Self::INSTEAD_KW
                | Self::KEY_KW
                | Self::MATCH_KW
                | Self::NO_KW
                | Self::OF_KW
                | Self::PLAN_KW
                | Self::PRAGMA_KW
                | Self::QUERY_KW
                | Self::RECURSIVE_KW
                | Self::RELEASE_KW
                | Self::RENAME_KW
                | Self::REPLACE_KW
                | Self::RESTRICT_KW
                | Self::ROW_KW
                | Self::SAVEPOINT_KW
                | Self::TEMP_KW
                | Self::TRIGGER_KW
                | Self::VACUUM_KW
                | Self::VIEW_KW
                | Self::VIRTUAL_KW
                | Self::WITHOUT_KW
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The rowan language tag for SQL trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SqlLanguage {}

impl rowan::Language for SqlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::from_raw(raw.0)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<SqlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<SqlLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<SqlLanguage>;
