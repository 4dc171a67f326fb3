//! Terminal rendering of the inspector's tagged markup.
//!
//! Markup is plain text with `[tag]...[/]` spans, `[br]` line breaks and
//! `[tab]` indentation. Colour tags map to terminal colours; the semantic
//! tags (`success`, `error`, `warning`, `info`, `verbose`) expand to
//! prefixed status lines. Unknown tags are printed as they were written.

use colored::{Color, Colorize};
use serde::Deserialize;
use std::io::{self, IsTerminal};

pub const DEFAULT_TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colour when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn color(tag: &str) -> Option<Color> {
    let color = match tag {
        "white" => Color::BrightWhite,
        "dim" => Color::BrightBlack,
        "gray" => Color::White,
        "black" => Color::Black,
        "red" => Color::BrightRed,
        "maroon" => Color::Red,
        "green" => Color::BrightGreen,
        "olive" => Color::Green,
        "sky" => Color::BrightBlue,
        "blue" => Color::Blue,
        "aqua" => Color::BrightCyan,
        "teal" => Color::Cyan,
        "gold" => Color::BrightYellow,
        "yellow" => Color::Yellow,
        "pink" => Color::BrightMagenta,
        "purple" => Color::Magenta,
        _ => return None,
    };
    Some(color)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Semantic {
    Success,
    Error,
    Warning,
    Info,
    Verbose,
}

impl Semantic {
    fn parse(tag: &str) -> Option<Self> {
        match tag {
            "success" => Some(Semantic::Success),
            "error" => Some(Semantic::Error),
            "warning" => Some(Semantic::Warning),
            "info" => Some(Semantic::Info),
            "verbose" => Some(Semantic::Verbose),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Break,
    Tab,
    Colored(Color, Vec<Node>),
    Semantic(Semantic, Vec<Node>),
    /// A tag we don't know, kept verbatim.
    Unknown {
        open: String,
        children: Vec<Node>,
        closed: bool,
    },
}

enum Frame {
    Colored(Color),
    Semantic(Semantic),
    Unknown(String),
}

fn is_tag_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn close(frame: Frame, children: Vec<Node>, closed: bool) -> Node {
    match frame {
        Frame::Colored(color) => Node::Colored(color, children),
        Frame::Semantic(semantic) => Node::Semantic(semantic, children),
        Frame::Unknown(open) => Node::Unknown {
            open,
            children,
            closed,
        },
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}

fn parse(markup: &str) -> Vec<Node> {
    let mut stack: Vec<(Frame, Vec<Node>)> = Vec::new();
    let mut current: Vec<Node> = Vec::new();
    let mut rest = markup;

    while let Some(start) = rest.find('[') {
        push_text(&mut current, &rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find(']') else {
            push_text(&mut current, &rest[start..]);
            rest = "";
            break;
        };
        let name = &after[..end];
        let raw = &rest[start..start + end + 2];
        rest = &after[end + 1..];

        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "br" => current.push(Node::Break),
            "tab" => current.push(Node::Tab),
            "/" => match stack.pop() {
                Some((frame, parent)) => {
                    let node = close(frame, std::mem::replace(&mut current, parent), true);
                    current.push(node);
                }
                None => push_text(&mut current, raw),
            },
            tag => {
                let frame = if let Some(c) = color(tag) {
                    Some(Frame::Colored(c))
                } else if let Some(s) = Semantic::parse(tag) {
                    Some(Frame::Semantic(s))
                } else if is_tag_name(tag) {
                    Some(Frame::Unknown(raw.to_string()))
                } else {
                    None
                };
                match frame {
                    Some(frame) => stack.push((frame, std::mem::take(&mut current))),
                    None => push_text(&mut current, raw),
                }
            }
        }
    }
    push_text(&mut current, rest);

    while let Some((frame, parent)) = stack.pop() {
        let node = close(frame, std::mem::replace(&mut current, parent), false);
        current.push(node);
    }
    current.retain(|n| !matches!(n, Node::Text(t) if t.is_empty()));
    current
}

/// Turns markup into terminal text.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub color: bool,
    pub verbose: bool,
    pub tab_width: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            color: false,
            verbose: true,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl Renderer {
    pub fn new(color: bool, verbose: bool, tab_width: usize) -> Self {
        Self {
            color,
            verbose,
            tab_width,
        }
    }

    pub fn render(&self, markup: &str) -> String {
        let mut out = String::new();
        for node in parse(markup) {
            self.render_node(&node, None, &mut out);
        }
        out
    }

    fn paint(&self, text: &str, color: Option<Color>, out: &mut String) {
        match color {
            Some(c) if self.color && !text.is_empty() => out.push_str(&text.color(c).to_string()),
            _ => out.push_str(text),
        }
    }

    fn render_all(&self, nodes: &[Node], color: Option<Color>, out: &mut String) {
        for node in nodes {
            self.render_node(node, color, out);
        }
    }

    fn render_node(&self, node: &Node, color: Option<Color>, out: &mut String) {
        match node {
            Node::Text(text) => self.paint(text, color, out),
            Node::Break => out.push('\n'),
            Node::Tab => out.push_str(&" ".repeat(self.tab_width)),
            Node::Colored(c, children) => self.render_all(children, Some(*c), out),
            Node::Semantic(semantic, children) => self.render_semantic(*semantic, children, out),
            Node::Unknown {
                open,
                children,
                closed,
            } => {
                self.paint(open, color, out);
                self.render_all(children, color, out);
                if *closed {
                    self.paint("[/]", color, out);
                }
            }
        }
    }

    fn render_semantic(&self, semantic: Semantic, children: &[Node], out: &mut String) {
        match semantic {
            Semantic::Success => {
                self.paint("+", Some(Color::Green), out);
                out.push(' ');
                self.render_all(children, Some(Color::BrightGreen), out);
                out.push('\n');
            }
            Semantic::Error => {
                out.push('\n');
                self.paint("x", Some(Color::Red), out);
                out.push(' ');
                self.paint("Error : ", Some(Color::BrightRed), out);
                self.render_all(children, Some(Color::BrightRed), out);
                out.push('\n');
            }
            Semantic::Warning => {
                self.paint("!", Some(Color::Yellow), out);
                out.push(' ');
                self.paint("Warning : ", Some(Color::BrightYellow), out);
                self.render_all(children, Some(Color::BrightYellow), out);
                out.push('\n');
            }
            Semantic::Info => {
                self.paint("i", Some(Color::Blue), out);
                out.push(' ');
                self.render_all(children, Some(Color::BrightBlue), out);
                out.push('\n');
            }
            Semantic::Verbose => {
                if self.verbose {
                    self.render_all(children, Some(Color::BrightBlack), out);
                }
            }
        }
    }

    /// Render to stdout.
    pub fn print(&self, markup: &str) {
        print!("{}", self.render(markup));
    }

    /// Render to stderr.
    pub fn eprint(&self, markup: &str) {
        eprint!("{}", self.render(markup));
    }

    pub fn error(&self, msg: &str) {
        self.eprint(&format!("[error]{}[/]", msg));
    }

    pub fn warning(&self, msg: &str) {
        self.eprint(&format!("[warning]{}[/]", msg));
    }

    pub fn info(&self, msg: &str) {
        self.print(&format!("[info]{}[/]", msg));
    }

    pub fn success(&self, msg: &str) {
        self.print(&format!("[success]{}[/]", msg));
    }

    /// Only shown with `--verbose`.
    pub fn verbose(&self, msg: &str) {
        self.print(&format!("[verbose]{}[/]", msg));
    }
}

/// Check if stdout is a terminal (TTY)
pub fn is_terminal() -> bool {
    io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Renderer {
        Renderer::default()
    }

    #[test]
    fn test_layout_tags() {
        assert_eq!(plain().render("a[br][tab]b"), "a\n    b");
        assert_eq!(Renderer::new(false, true, 2).render("[tab]x"), "  x");
    }

    #[test]
    fn test_color_tags_are_stripped_without_color() {
        assert_eq!(plain().render("[blue]public[/] [pink]Int32[/] [sky]x[/]"), "public Int32 x");
        assert_eq!(plain().render("[BLUE]x[/]"), "x");
    }

    #[test]
    fn test_nested_tags() {
        assert_eq!(plain().render("[dim]>> [teal]Invoking:[/] x[/]"), ">> Invoking: x");
    }

    #[test]
    fn test_unknown_tags_pass_through() {
        assert_eq!(plain().render("[foo]bar[/]"), "[foo]bar[/]");
        assert_eq!(plain().render("Int32[] values"), "Int32[] values");
        assert_eq!(plain().render("stray [/] close"), "stray [/] close");
        assert_eq!(plain().render("open [ bracket"), "open [ bracket");
        assert_eq!(plain().render("[a b]"), "[a b]");
    }

    #[test]
    fn test_semantic_tags() {
        assert_eq!(plain().render("[success]done[/]"), "+ done\n");
        assert_eq!(plain().render("[error]boom[/]"), "\nx Error : boom\n");
        assert_eq!(plain().render("[warning]careful[/]"), "! Warning : careful\n");
        assert_eq!(plain().render("[info]note[/]"), "i note\n");
    }

    #[test]
    fn test_verbose_only_when_enabled() {
        let quiet = Renderer::new(false, false, 4);
        assert_eq!(quiet.render("a[verbose](inherited) [/]b"), "ab");
        assert_eq!(plain().render("a[verbose](inherited) [/]b"), "a(inherited) b");
    }

    #[test]
    fn test_unclosed_color_still_renders() {
        assert_eq!(plain().render("[red]oops"), "oops");
        assert_eq!(plain().render("[foo]oops"), "[foo]oops");
    }

    #[test]
    fn test_color_output() {
        colored::control::set_override(true);
        let out = Renderer::new(true, true, 4).render("[red]x[/]");
        assert!(out.contains("\u{1b}["));
        assert!(out.contains('x'));
    }
}
