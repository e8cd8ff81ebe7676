/*!
 * Script segmentation.
 *
 * Splits a narration script into an intro, a list of numbered news items and
 * an outro, then rewrites every section for speech while keeping the text as
 * authored alongside.
 *
 * Section boundaries are best-effort:
 * - Blank lines never appear in any section, but they end a paragraph.
 * - An item whose title is never followed by content is dropped; its title
 *   is reported in `ParsedScript::incomplete_titles`.
 * - Text after a paragraph break in the last item is read as the outro once
 *   `outro_threshold` items are complete. A later numbered title puts that
 *   text back into the item body. Shorter scripts need an explicit
 *   `outro_marker` line to get an outro.
 * - After an `outro_marker` line everything is outro, numbered lines included.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::app_config::{Config, SegmenterConfig};
use crate::errors::RuleError;
use crate::rewriter::Rewriter;

/// A numbered item line: digits, a period, whitespace
static NUMBERED_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\s+").expect("Invalid numbered line regex")
});

/// Anything that merely looks numbered (`1.Title`, `2) Title`)
static LOOSE_NUMBERING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\s*[.)]").expect("Invalid loose numbering regex")
});

static DEFAULT_SEGMENTER: Lazy<ScriptSegmenter> = Lazy::new(ScriptSegmenter::default);

/// Top-level script region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Intro,
    NewsItem,
    Outro,
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Intro => write!(f, "intro"),
            SectionKind::NewsItem => write!(f, "news item"),
            SectionKind::Outro => write!(f, "outro"),
        }
    }
}

/// A numbered news item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Position in the parsed list, starting at 1
    pub ordinal: usize,

    /// The full numbered line
    pub title: String,

    /// Content lines joined with newlines
    pub body: String,
}

/// Intro, items and outro as plain strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSections {
    pub intro: String,
    pub items: Vec<NewsItem>,
    pub outro: String,
}

/// A segmented script with rewritten sections and the originals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedScript {
    pub intro: String,
    pub items: Vec<NewsItem>,
    pub outro: String,

    /// Sections before rewriting
    pub originals: ScriptSections,

    /// Titles of numbered lines dropped for lack of content
    #[serde(default)]
    pub incomplete_titles: Vec<String>,
}

/// One section flattened to an (original, rewritten) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionText {
    pub kind: SectionKind,
    pub label: String,
    pub original: String,
    pub rewritten: String,
}

impl ParsedScript {
    /// Flatten into intro, one entry per item (title and body), outro
    pub fn sections(&self) -> Vec<SectionText> {
        let mut sections = Vec::with_capacity(self.items.len() + 2);

        sections.push(SectionText {
            kind: SectionKind::Intro,
            label: SectionKind::Intro.to_string(),
            original: self.originals.intro.clone(),
            rewritten: self.intro.clone(),
        });

        for (item, original) in self.items.iter().zip(&self.originals.items) {
            sections.push(SectionText {
                kind: SectionKind::NewsItem,
                label: format!("{} {}", SectionKind::NewsItem, item.ordinal),
                original: join_item(original),
                rewritten: join_item(item),
            });
        }

        sections.push(SectionText {
            kind: SectionKind::Outro,
            label: SectionKind::Outro.to_string(),
            original: self.originals.outro.clone(),
            rewritten: self.outro.clone(),
        });

        sections
    }

    /// Rewritten sections in reading order, separated by blank lines
    pub fn speech_text(&self) -> String {
        self.sections()
            .into_iter()
            .map(|section| section.rewritten)
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn is_empty(&self) -> bool {
        self.originals.intro.is_empty() && self.originals.items.is_empty() && self.originals.outro.is_empty()
    }
}

fn join_item(item: &NewsItem) -> String {
    if item.body.is_empty() {
        item.title.clone()
    } else {
        format!("{}\n{}", item.title, item.body)
    }
}

/// Item whose title has been read
#[derive(Debug)]
struct OpenItem {
    title: String,
    body: Vec<String>,
    paragraph_closed: bool,

    /// Lines after a paragraph break that become the outro if no title follows
    trailing: Vec<String>,
}

impl OpenItem {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            body: Vec::new(),
            paragraph_closed: false,
            trailing: Vec::new(),
        }
    }
}

/// Segmenter state: the open item lives inside the `NewsItem` state
#[derive(Debug)]
enum Cursor {
    Intro,
    NewsItem(OpenItem),
    Outro,
}

/// Why the open item is being closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemEnd {
    NextTitle,
    OutroMarker,
    EndOfInput,
}

/// Line-by-line walk over a script
struct SectionWalker<'a> {
    config: &'a SegmenterConfig,
    cursor: Cursor,
    intro: Vec<String>,
    completed: Vec<(String, Vec<String>)>,
    outro: Vec<String>,
    incomplete_titles: Vec<String>,
}

impl<'a> SectionWalker<'a> {
    fn new(config: &'a SegmenterConfig) -> Self {
        Self {
            config,
            cursor: Cursor::Intro,
            intro: Vec::new(),
            completed: Vec::new(),
            outro: Vec::new(),
            incomplete_titles: Vec::new(),
        }
    }

    fn is_outro_marker(&self, line: &str) -> bool {
        self.config
            .outro_marker
            .as_deref()
            .is_some_and(|marker| line == marker.trim())
    }

    fn feed(&mut self, line: &str) {
        if line.is_empty() {
            if let Cursor::NewsItem(open) = &mut self.cursor {
                if !open.body.is_empty() {
                    open.paragraph_closed = true;
                }
            }
            return;
        }

        if self.is_outro_marker(line) {
            self.close_item(ItemEnd::OutroMarker);
            self.cursor = Cursor::Outro;
            return;
        }

        if matches!(self.cursor, Cursor::Outro) {
            self.outro.push(line.to_string());
            return;
        }

        if NUMBERED_LINE_REGEX.is_match(line) {
            self.close_item(ItemEnd::NextTitle);
            self.cursor = Cursor::NewsItem(OpenItem::new(line));
            return;
        }

        if LOOSE_NUMBERING_REGEX.is_match(line) {
            debug!("Line looks numbered but is not an item title: {}", line);
        }

        let threshold_met = self.completed.len() + 1 >= self.config.outro_threshold;
        match &mut self.cursor {
            Cursor::Intro => self.intro.push(line.to_string()),
            Cursor::NewsItem(open) => {
                if !open.trailing.is_empty() {
                    open.trailing.push(line.to_string());
                } else if open.paragraph_closed && threshold_met {
                    debug!("Possible outro after item '{}': {}", open.title, line);
                    open.trailing.push(line.to_string());
                } else {
                    open.body.push(line.to_string());
                    open.paragraph_closed = false;
                }
            }
            Cursor::Outro => self.outro.push(line.to_string()),
        }
    }

    /// Move the open item to the completed list.
    ///
    /// Trailing lines return to the body unless the input ends here, in which
    /// case they are the outro. An item without content is kept when another
    /// title follows it and dropped when the list ends.
    fn close_item(&mut self, reason: ItemEnd) {
        let Cursor::NewsItem(mut open) = std::mem::replace(&mut self.cursor, Cursor::Intro) else {
            return;
        };

        if reason == ItemEnd::EndOfInput {
            self.outro.append(&mut open.trailing);
        } else {
            open.body.append(&mut open.trailing);
        }

        if reason != ItemEnd::NextTitle && open.body.is_empty() {
            warn!("Dropping numbered item without content: {}", open.title);
            self.incomplete_titles.push(open.title);
        } else {
            self.completed.push((open.title, open.body));
        }
    }

    fn finish(mut self) -> (ScriptSections, Vec<String>) {
        self.close_item(ItemEnd::EndOfInput);

        let items = self
            .completed
            .into_iter()
            .enumerate()
            .map(|(index, (title, body))| NewsItem {
                ordinal: index + 1,
                title,
                body: body.join("\n"),
            })
            .collect();

        let sections = ScriptSections {
            intro: self.intro.join("\n"),
            items,
            outro: self.outro.join("\n"),
        };
        (sections, self.incomplete_titles)
    }
}

/// Splits scripts into sections and rewrites each one
#[derive(Debug, Clone, Default)]
pub struct ScriptSegmenter {
    rewriter: Rewriter,
    config: SegmenterConfig,
}

impl ScriptSegmenter {
    pub fn new(rewriter: Rewriter, config: SegmenterConfig) -> Self {
        Self { rewriter, config }
    }

    /// Build from the application configuration
    pub fn from_config(config: &Config) -> Result<Self, RuleError> {
        Ok(Self::new(Rewriter::from_config(&config.rewrite)?, config.segmenter.clone()))
    }

    pub fn rewriter(&self) -> &Rewriter {
        &self.rewriter
    }

    /// Split a script into sections without rewriting
    pub fn split_sections(&self, raw_script: &str) -> ScriptSections {
        self.walk(raw_script).0
    }

    /// Segment a script and rewrite every section independently
    pub fn segment(&self, raw_script: &str) -> ParsedScript {
        let (originals, incomplete_titles) = self.walk(raw_script);

        let items = originals
            .items
            .iter()
            .map(|item| NewsItem {
                ordinal: item.ordinal,
                title: self.rewriter.rewrite_section(&item.title),
                body: self.rewriter.rewrite_section(&item.body),
            })
            .collect();

        debug!(
            "Segmented script: intro {} chars, {} items, outro {} chars",
            originals.intro.chars().count(),
            originals.items.len(),
            originals.outro.chars().count()
        );

        ParsedScript {
            intro: self.rewriter.rewrite_section(&originals.intro),
            items,
            outro: self.rewriter.rewrite_section(&originals.outro),
            originals,
            incomplete_titles,
        }
    }

    fn walk(&self, raw_script: &str) -> (ScriptSections, Vec<String>) {
        let normalized = normalize_line_endings(raw_script);
        let mut walker = SectionWalker::new(&self.config);
        for line in normalized.split('\n') {
            walker.feed(line.trim());
        }
        walker.finish()
    }
}

/// Segment a script with the built-in rules and settings
pub fn segment(raw_script: &str) -> ParsedScript {
    DEFAULT_SEGMENTER.segment(raw_script)
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
