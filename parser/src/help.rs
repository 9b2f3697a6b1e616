//! Usage and help text rendering.
//!
//! The formatter is stateless apart from its line width. Every block is
//! word-wrapped with a hanging indent: the first line continues whatever
//! prefix precedes it (`Usage: `, `Error: `, or a padded option name) and
//! continuation lines are indented to the column where that first line's
//! text started.
//!
//! ```text
//! Error: Unknown parameter 'colour'
//!
//! Usage: tool run --count=<value> [--label=<value>]
//!
//! Run the job.
//!
//! Options:
//!   --count  Number of repetitions. Allowed values: 1 to 10.
//!   --label  (Optional) Label attached to the run. The default value is 'x'.
//! ```

use argschema_core::{Command, Parameter, ParameterContainer, Subcommand};

/// Default terminal width in columns.
pub const DEFAULT_WIDTH: usize = 80;

const ERROR_PREFIX: &str = "Error: ";
const USAGE_PREFIX: &str = "Usage: ";
const TABLE_MARGIN: &str = "  ";
const TABLE_GUTTER: &str = "  ";

/// Renders usage blocks for a [`Command`] schema.
///
/// # Examples
///
/// ```
/// use argschema_core::{Command, Parameter};
/// use argschema_parser::HelpFormatter;
///
/// let schema = Command::new("greet", "Prints a greeting.")
///     .with_parameter(Parameter::string("name", "Who to greet.", Vec::<String>::new()))
///     .unwrap();
///
/// let help = HelpFormatter::default().help(&schema);
/// assert!(help.starts_with("Usage: greet --name=<value>\n"));
/// assert!(help.contains("  --name  Who to greet.\n"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpFormatter {
    width: usize,
}

impl Default for HelpFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl HelpFormatter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Root usage block without an error line.
    pub fn help(&self, command: &Command) -> String {
        self.usage(command, None, None)
    }

    /// Renders the usage block for `command`, scoped to `subcommand` when
    /// one was already resolved, optionally headed by an error line.
    pub fn usage(
        &self,
        command: &Command,
        subcommand: Option<&Subcommand>,
        error: Option<&str>,
    ) -> String {
        let mut out = String::new();

        if let Some(message) = error {
            self.push_block(&mut out, ERROR_PREFIX, message_words(message));
            out.push('\n');
        }

        self.push_block(&mut out, USAGE_PREFIX, synopsis(command, subcommand));
        out.push('\n');

        let (description, parameters) = match subcommand {
            Some(sub) => (sub.description(), sub.parameters()),
            None => (command.description(), command.parameters()),
        };
        self.push_block(&mut out, "", description.split_whitespace());

        if !parameters.is_empty() {
            out.push_str("\nOptions:\n");
            let rows = parameters
                .iter()
                .map(|p| (format!("--{}", p.name()), parameter_words(p)))
                .collect();
            self.push_table(&mut out, rows);
        }

        if subcommand.is_none() && command.has_subcommands() {
            out.push_str("\nSubcommands:\n");
            let rows = command
                .subcommands()
                .iter()
                .map(|s| {
                    let words = s.description().split_whitespace().map(String::from).collect();
                    (s.name().to_string(), words)
                })
                .collect();
            self.push_table(&mut out, rows);
        }

        out
    }

    /// Greedily packs `words` into lines of at most `width` columns.
    ///
    /// `offset` is the column where the first word starts (the length of
    /// whatever prefix precedes the returned text). Continuation lines start
    /// with `indent` spaces. A word too long for any line is split at the
    /// width, starting on the current line when there is room.
    ///
    /// # Examples
    ///
    /// ```
    /// use argschema_parser::HelpFormatter;
    ///
    /// let formatter = HelpFormatter::new(20);
    /// let text = formatter.wrap("one two three four five".split(' '), 4, 10);
    /// assert_eq!(text, "one two\n    three four five");
    /// ```
    pub fn wrap<I, S>(&self, words: I, indent: usize, offset: usize) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::new();
        let mut column = offset;
        let mut line_started = false;

        for word in words {
            let word = word.as_ref();
            let len = word.chars().count();

            if !line_started {
                line_started = true;
                if column + len <= self.width {
                    out.push_str(word);
                    column += len;
                    continue;
                }
            } else if column + 1 + len <= self.width {
                out.push(' ');
                out.push_str(word);
                column += 1 + len;
                continue;
            } else if indent + len <= self.width || column + 1 >= self.width {
                out.push('\n');
                out.push_str(&" ".repeat(indent));
                column = indent;
                if indent + len <= self.width {
                    out.push_str(word);
                    column += len;
                    continue;
                }
            } else {
                out.push(' ');
                column += 1;
            }

            column = self.push_split(&mut out, word, column, indent);
        }

        out
    }

    /// Writes `word` character by character, breaking to a new indented
    /// line at the width. Every line takes at least one character.
    fn push_split(&self, out: &mut String, word: &str, mut column: usize, indent: usize) -> usize {
        for ch in word.chars() {
            if column >= self.width && column > indent {
                out.push('\n');
                out.push_str(&" ".repeat(indent));
                column = indent;
            }
            out.push(ch);
            column += 1;
        }
        column
    }

    fn push_block<I, S>(&self, out: &mut String, prefix: &str, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let indent = prefix.chars().count();
        out.push_str(prefix);
        out.push_str(&self.wrap(words, indent, indent));
        out.push('\n');
    }

    /// Two-column table: names padded to the widest sibling so all
    /// descriptions start in the same column.
    fn push_table(&self, out: &mut String, rows: Vec<(String, Vec<String>)>) {
        let name_width = rows
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);

        for (name, words) in rows {
            let prefix = format!("{TABLE_MARGIN}{name:<name_width$}{TABLE_GUTTER}");
            self.push_block(out, &prefix, words);
        }
    }
}

/// Splits an error message on single spaces. Extra spaces stay attached to
/// the preceding word, so quoted user values keep their spacing.
fn message_words(message: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for piece in message.trim_start_matches(' ').split(' ') {
        match words.last_mut() {
            Some(last) if piece.is_empty() => last.push(' '),
            _ => words.push(piece.to_string()),
        }
    }
    words
}

/// Synopsis words following `Usage: `.
fn synopsis(command: &Command, subcommand: Option<&Subcommand>) -> Vec<String> {
    let mut words = vec![command.name().to_string()];

    match subcommand {
        Some(sub) => {
            words.push(sub.name().to_string());
            words.extend(flag_words(sub));
        }
        None if command.has_subcommands() => {
            words.push("<subcommand>".to_string());
            words.push("[<args>]".to_string());
        }
        None => words.extend(flag_words(command)),
    }

    words
}

/// Mandatory flags first, then optional ones in brackets, each group
/// sorted by name.
fn flag_words(container: &impl ParameterContainer) -> Vec<String> {
    let mandatory = container
        .mandatory_parameters()
        .into_iter()
        .map(|p| format!("--{}=<value>", p.name()));
    let optional = container
        .optional_parameters()
        .into_iter()
        .map(|p| format!("[--{}=<value>]", p.name()));
    mandatory.chain(optional).collect()
}

fn parameter_words(parameter: &Parameter) -> Vec<String> {
    let mut words = Vec::new();

    if !parameter.is_mandatory() {
        words.push("(Optional)".to_string());
    }
    words.extend(parameter.description().split_whitespace().map(String::from));

    let allowed = parameter.allowed_values();
    if !allowed.is_empty() {
        words.push("Allowed".to_string());
        words.push("values:".to_string());
        words.push(format!("{allowed}."));
    }

    if !parameter.is_mandatory() {
        if let Some(default) = parameter.value() {
            let sentence = format!("The default value is '{default}'.");
            words.extend(sentence.split_whitespace().map(String::from));
        }
    }

    words
}
