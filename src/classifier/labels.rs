pub const EMPTY_COMMAND_LABEL: &str = "empty_command";
pub const EXECUTE_LABEL_PREFIX: &str = "execute_";

const PRIVILEGE_PREFIXES: &[&str] = &["sudo", "doas", "runas"];

/// How a label rule matches the leading command token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatcher {
    Exact(&'static str),
    Prefix(&'static str),
}

impl TokenMatcher {
    fn matches(self, token: &str) -> bool {
        match self {
            Self::Exact(expected) => token == expected,
            Self::Prefix(prefix) => token.starts_with(prefix),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    pub matcher: TokenMatcher,
    pub label: &'static str,
}

const fn exact(token: &'static str, label: &'static str) -> LabelRule {
    LabelRule {
        matcher: TokenMatcher::Exact(token),
        label,
    }
}

const fn prefix(token: &'static str, label: &'static str) -> LabelRule {
    LabelRule {
        matcher: TokenMatcher::Prefix(token),
        label,
    }
}

/// Leading token → intent label. First match wins.
pub const LABEL_RULES: &[LabelRule] = &[
    exact("git", "version_control"),
    exact("svn", "version_control"),
    exact("hg", "version_control"),
    exact("npm", "package_management"),
    exact("yarn", "package_management"),
    exact("pnpm", "package_management"),
    exact("pip", "package_management"),
    exact("pip3", "package_management"),
    exact("cargo", "package_management"),
    exact("apt", "package_management"),
    exact("apt-get", "package_management"),
    exact("brew", "package_management"),
    exact("dnf", "package_management"),
    exact("yum", "package_management"),
    exact("docker", "container_management"),
    exact("podman", "container_management"),
    exact("kubectl", "cluster_management"),
    exact("helm", "cluster_management"),
    exact("aws", "cloud_management"),
    exact("gcloud", "cloud_management"),
    exact("az", "cloud_management"),
    exact("ls", "list_files"),
    exact("dir", "list_files"),
    exact("cd", "change_directory"),
    exact("cat", "read_file"),
    exact("less", "read_file"),
    exact("more", "read_file"),
    exact("head", "read_file"),
    exact("tail", "read_file"),
    exact("echo", "output_text"),
    exact("printf", "output_text"),
    prefix("get-", "powershell_query"),
    prefix("set-", "powershell_modification"),
    prefix("new-", "powershell_modification"),
    prefix("remove-", "powershell_modification"),
];

/// Skip leading environment variable assignments (e.g. `FOO=bar cmd args`).
/// Returns the remainder starting at the first non-assignment word.
pub(crate) fn skip_env_assignments(s: &str) -> &str {
    let mut rest = s;
    loop {
        let Some(word) = rest.split_whitespace().next() else {
            return rest;
        };
        if word.contains('=')
            && word
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        {
            rest = rest[word.len()..].trim_start();
        } else {
            return rest;
        }
    }
}

fn base_name(token: &str) -> String {
    token
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(token)
        .to_lowercase()
}

/// Leading command token with env assignments and one privilege prefix removed.
///
/// A bare privilege prefix (`sudo` with nothing after it) is returned as-is.
pub(crate) fn leading_token(command: &str) -> Option<String> {
    let rest = skip_env_assignments(command.trim_start());
    let mut words = rest.split_whitespace();
    let first = base_name(words.next()?);
    if PRIVILEGE_PREFIXES.contains(&first.as_str()) {
        return Some(words.next().map_or(first, base_name));
    }
    Some(first)
}

/// Look up the label for a leading token, synthesizing `execute_<token>`.
pub fn label_for_token(token: &str) -> String {
    LABEL_RULES
        .iter()
        .find(|rule| rule.matcher.matches(token))
        .map_or_else(
            || format!("{EXECUTE_LABEL_PREFIX}{token}"),
            |rule| rule.label.to_string(),
        )
}

pub fn extract_label(command: &str) -> String {
    match leading_token(command) {
        Some(token) => label_for_token(&token),
        None => EMPTY_COMMAND_LABEL.to_string(),
    }
}
