//! Ordered pattern rules.
//!
//! Every table the classifier consults is a plain list of `(id, regex,
//! message)` triples compiled once at construction. Evaluation order is list
//! order: built-in rules first, then any rules supplied through config.

use crate::config::PatternSpec;
use crate::error::RuleError;
use regex::{Regex, RegexBuilder};

/// A rule baked into the binary.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinPattern {
    pub id: &'static str,
    pub pattern: &'static str,
    pub message: &'static str,
}

/// Commands that are rejected no matter how the classifier is configured.
pub const UNSAFE_PATTERNS: &[BuiltinPattern] = &[
    BuiltinPattern {
        id: "root_recursive_delete",
        pattern: concat!(
            r"\brm(?:\s+-[a-z-]+)*?\s+",
            // recursive and force, in one group or spread over the option words
            r"(?:-[a-z]*r[a-z]*f[a-z]*|-[a-z]*f[a-z]*r[a-z]*",
            r"|(?:-[a-z]*r[a-z]*|--recursive)(?:\s+-[a-z-]+)*\s+(?:-[a-z]*f[a-z]*|--force)",
            r"|(?:-[a-z]*f[a-z]*|--force)(?:\s+-[a-z-]+)*\s+(?:-[a-z]*r[a-z]*|--recursive))",
            r#"(?:\s+-[a-z-]*)*\s+["']?/+\*?["']?(?:\s|$|[;&|)])"#,
        ),
        message: "recursive delete from filesystem root",
    },
    BuiltinPattern {
        id: "no_preserve_root",
        pattern: r"\brm\b.*--no-preserve-root",
        message: "recursive delete with root protection disabled",
    },
    BuiltinPattern {
        id: "drop_database",
        pattern: r"\bdrop\s+(?:database|schema)\b",
        message: "database drop",
    },
    BuiltinPattern {
        id: "truncate_table",
        pattern: r"\btruncate\s+table\b",
        message: "table truncate",
    },
    BuiltinPattern {
        id: "disk_format",
        pattern: r"\bmkfs(?:\.[a-z0-9]+)?\b|\bformat\s+[a-z]:",
        message: "disk format",
    },
    BuiltinPattern {
        id: "raw_disk_overwrite",
        pattern: r"\bdd\b.*\bof=/dev/(?:sd|hd|vd|nvme|disk|mmcblk)",
        message: "raw write to block device",
    },
    BuiltinPattern {
        id: "fork_bomb",
        pattern: r":\(\)\s*\{\s*:\s*\|\s*:\s*&\s*\}\s*;\s*:",
        message: "fork bomb",
    },
    BuiltinPattern {
        id: "windows_recursive_delete",
        pattern: r"\b(?:rd|rmdir|del)\s+(?:/[a-z]\s+)*/s\b",
        message: "windows recursive delete",
    },
];

/// Patterns that accumulate warnings without stopping evaluation.
pub const WARN_PATTERNS: &[BuiltinPattern] = &[
    BuiltinPattern {
        id: "delete_operation",
        pattern: r"\bdelete\b",
        message: "Delete operation detected",
    },
    BuiltinPattern {
        id: "remove_operation",
        pattern: r"\b(?:rm|rmdir|remove|uninstall)\b",
        message: "Removal operation detected",
    },
    BuiltinPattern {
        id: "drop_operation",
        pattern: r"\bdrop\b",
        message: "Drop operation detected",
    },
    BuiltinPattern {
        id: "update_where",
        pattern: r"\bupdate\b.+\bwhere\b",
        message: "UPDATE ... WHERE modifies stored rows",
    },
    BuiltinPattern {
        id: "state_mutation",
        pattern: r"\b(?:install|apply|push|kill|restart|reset|chmod|chown|mv|set-\w+|new-\w+)\b",
        message: "State-mutating command detected",
    },
];

/// Read-only or auto-reversible command prefixes.
pub const SAFE_PATTERNS: &[BuiltinPattern] = &[
    BuiltinPattern {
        id: "version_control",
        pattern: r"^(?:git|svn|hg)\b",
        message: "version control invocation",
    },
    BuiltinPattern {
        id: "listing",
        pattern: r"^(?:ls|dir|pwd|tree)\b",
        message: "directory listing",
    },
    BuiltinPattern {
        id: "printing",
        pattern: r"^(?:echo|printf|cat|head|tail|less|more|type)\b",
        message: "read or print",
    },
    BuiltinPattern {
        id: "read_only_query",
        pattern: r"^(?:select|show|describe|explain)\b|^get-\w+",
        message: "read-only query",
    },
    BuiltinPattern {
        id: "inspection",
        pattern: r"^kubectl\s+(?:get|describe|logs)\b|^docker\s+(?:ps|images|inspect|logs)\b",
        message: "cluster or container inspection",
    },
];

/// One compiled, case-insensitive rule.
#[derive(Debug, Clone)]
pub struct PatternRule {
    id: String,
    message: String,
    regex: Regex,
}

impl PatternRule {
    pub fn new(
        id: impl Into<String>,
        pattern: &str,
        message: impl Into<String>,
    ) -> Result<Self, RuleError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RuleError::EmptyId);
        }
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|err| RuleError::InvalidPattern {
                id: id.clone(),
                message: err.to_string(),
            })?;
        Ok(Self {
            id,
            message: message.into(),
            regex,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

/// An ordered list of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<PatternRule>,
}

impl RuleSet {
    /// Compile the built-in table followed by the configured extras.
    pub fn compile(builtin: &[BuiltinPattern], extra: &[PatternSpec]) -> Result<Self, RuleError> {
        let mut rules = Vec::with_capacity(builtin.len() + extra.len());
        for rule in builtin {
            rules.push(PatternRule::new(rule.id, rule.pattern, rule.message)?);
        }
        for spec in extra {
            let message = spec.message.clone().unwrap_or_else(|| spec.id.clone());
            rules.push(PatternRule::new(spec.id.clone(), &spec.pattern, message)?);
        }
        Ok(Self { rules })
    }

    /// First matching rule in evaluation order.
    pub fn first_match(&self, input: &str) -> Option<&PatternRule> {
        self.rules.iter().find(|rule| rule.is_match(input))
    }

    /// Every matching rule, in evaluation order.
    pub fn matches<'a>(&'a self, input: &'a str) -> impl Iterator<Item = &'a PatternRule> + 'a {
        self.rules.iter().filter(move |rule| rule.is_match(input))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(PatternRule::id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
