//! Subcommand implementations.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use docmark_core::ast::Block;
use docmark_core::{tokenize, Renderer};
use tracing::{info, warn};

use crate::config::{CliSettings, Config};
use crate::diagram::ScratchSource;
use crate::error::CliError;
use crate::store::{fetch_with_retry, DocumentStore, FsStore, HiddenIndex};

/// Arguments for commands that read a single page file.
#[derive(Args)]
pub(crate) struct FileArgs {
    /// Page file to read.
    file: PathBuf,

    /// Output JSON instead of text.
    #[arg(short, long)]
    json: bool,
}

/// Arguments for `docmark render`.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    input: FileArgs,

    /// Fence tag drawn as a diagram (overrides config).
    #[arg(long)]
    diagram_lang: Option<String>,
}

/// Arguments for `docmark hidden`.
#[derive(Args)]
pub(crate) struct HiddenArgs {
    /// Pages directory (overrides config).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// List every page with its visibility.
    #[arg(short, long)]
    all: bool,

    /// Output JSON instead of text.
    #[arg(short, long)]
    json: bool,
}

/// Arguments for `docmark page`.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Page path, e.g. `motion/move`.
    path: String,

    /// Pages directory (overrides config).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Fence tag drawn as a diagram (overrides config).
    #[arg(long)]
    diagram_lang: Option<String>,
}

fn read_input(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// Tokens Command
// =============================================================================

impl FileArgs {
    /// Print the block tokens of a page.
    pub(crate) fn tokens(&self) -> Result<(), CliError> {
        let input = read_input(&self.file)?;
        let blocks = tokenize(&input);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&blocks)?);
        } else {
            print!("{}", format_blocks(&blocks));
        }
        Ok(())
    }

    /// Print block counts and size statistics.
    pub(crate) fn stats(&self, config_path: Option<&Path>) -> Result<(), CliError> {
        let config = Config::load(config_path, &CliSettings::default())?;
        let input = read_input(&self.file)?;
        let stats = DocumentStats::from_blocks(&tokenize(&input), &input, &config.render.diagram_lang);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            print!("{}", stats.report());
        }
        Ok(())
    }
}

fn format_blocks(blocks: &[Block<'_>]) -> String {
    let mut out = format!("Blocks: {}\n", blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        out.push_str(&format!("  [{}] {}\n", i + 1, describe_block(block)));
    }
    out
}

fn describe_block(block: &Block<'_>) -> String {
    match block {
        Block::FrontMatterNote(note) => format!("FrontMatterNote (hidden: {})", note.hidden),
        Block::Heading(h) => format!("Heading (level {}): {}", h.level, preview(&h.text)),
        Block::UnorderedList(l) => {
            let items: Vec<&str> = l.items.iter().map(|item| item.as_ref()).collect();
            format!("List ({} items): {}", l.items.len(), preview(&items.join(" | ")))
        }
        Block::FencedCode(c) => format!(
            "FencedCode (lang: {}): {}",
            c.lang.as_deref().unwrap_or("none"),
            preview(&c.code)
        ),
        Block::Image(img) => format!("Image (src: {}): {}", img.src, preview(&img.alt)),
        Block::Callout(c) => format!("Callout ({}): {}", c.kind, preview(&c.text)),
        Block::Paragraph(p) => format!("Paragraph: {}", preview(&p.text)),
    }
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 60;
    let head: String = text.chars().take(LIMIT).collect();
    let ellipsis = if text.chars().nth(LIMIT).is_some() {
        "..."
    } else {
        ""
    };
    format!("{}{}", head.replace('\n', "\\n"), ellipsis)
}

// =============================================================================
// Stats Command
// =============================================================================

#[derive(Debug, Default, PartialEq, Eq, serde::Serialize)]
struct DocumentStats {
    total_blocks: usize,
    headings: usize,
    paragraphs: usize,
    lists: usize,
    list_items: usize,
    code_blocks: usize,
    diagrams: usize,
    images: usize,
    callouts: usize,
    hidden: bool,
    chars: usize,
    words: usize,
    lines: usize,
}

impl DocumentStats {
    fn from_blocks(blocks: &[Block<'_>], input: &str, diagram_lang: &str) -> Self {
        let mut stats = Self {
            total_blocks: blocks.len(),
            chars: input.chars().count(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
            ..Self::default()
        };

        for block in blocks {
            match block {
                Block::FrontMatterNote(note) => stats.hidden |= note.hidden,
                Block::Heading(_) => stats.headings += 1,
                Block::Paragraph(_) => stats.paragraphs += 1,
                Block::UnorderedList(l) => {
                    stats.lists += 1;
                    stats.list_items += l.items.len();
                }
                Block::FencedCode(c) if c.is_lang(diagram_lang) => stats.diagrams += 1,
                Block::FencedCode(_) => stats.code_blocks += 1,
                Block::Image(_) => stats.images += 1,
                Block::Callout(_) => stats.callouts += 1,
            }
        }
        stats
    }

    fn report(&self) -> String {
        format!(
            "Document Statistics
-------------------
Hidden:         {}

Content:
  Total blocks:   {}
  Headings:       {}
  Paragraphs:     {}
  Lists:          {} ({} items)
  Code blocks:    {}
  Diagrams:       {}
  Images:         {}
  Callouts:       {}

Size:
  Characters:     {}
  Words (est.):   {}
  Lines:          {}
",
            self.hidden,
            self.total_blocks,
            self.headings,
            self.paragraphs,
            self.lists,
            self.list_items,
            self.code_blocks,
            self.diagrams,
            self.images,
            self.callouts,
            self.chars,
            self.words,
            self.lines,
        )
    }
}

// =============================================================================
// Render Command
// =============================================================================

impl RenderArgs {
    /// Render a page file to HTML or a JSON node tree.
    pub(crate) fn execute(&self, config_path: Option<&Path>) -> Result<(), CliError> {
        let settings = CliSettings {
            diagram_lang: self.diagram_lang.clone(),
            ..Default::default()
        };
        let config = Config::load(config_path, &settings)?;
        let input = read_input(&self.input.file)?;

        let renderer = Renderer::new(ScratchSource).with_diagram_lang(&config.render.diagram_lang);
        let tree = renderer.render(&tokenize(&input));

        if self.input.json {
            println!("{}", serde_json::to_string_pretty(&tree)?);
        } else {
            print!("{}", tree.to_html());
        }
        Ok(())
    }
}

// =============================================================================
// Hidden Command
// =============================================================================

impl HiddenArgs {
    /// List the pages whose front matter hides them.
    pub(crate) fn execute(&self, config_path: Option<&Path>) -> Result<(), CliError> {
        let settings = CliSettings {
            root: self.root.clone(),
            ..Default::default()
        };
        let config = Config::load(config_path, &settings)?;
        let store = FsStore::new(&config.store.root);
        let index = HiddenIndex::scan(&store)?;

        if self.all {
            let pages: Vec<PageVisibility> = store
                .list()?
                .into_iter()
                .map(|path| PageVisibility {
                    visible: index.is_visible(&path),
                    path,
                })
                .collect();
            if self.json {
                println!("{}", serde_json::to_string_pretty(&pages)?);
            } else {
                for page in &pages {
                    let status = if page.visible { "visible" } else { "hidden" };
                    println!("{status:<8} {}", page.path);
                }
            }
        } else if self.json {
            let hidden: Vec<&str> = index.hidden().collect();
            println!("{}", serde_json::to_string_pretty(&hidden)?);
        } else {
            println!("Hidden pages under {}: {}", store.root().display(), index.len());
            for path in index.hidden() {
                println!("  {path}");
            }
        }
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct PageVisibility {
    path: String,
    visible: bool,
}

// =============================================================================
// Page Command
// =============================================================================

impl PageArgs {
    /// Load a page from the store and render it to HTML.
    pub(crate) fn execute(&self, config_path: Option<&Path>) -> Result<(), CliError> {
        let settings = CliSettings {
            root: self.root.clone(),
            diagram_lang: self.diagram_lang.clone(),
        };
        let config = Config::load(config_path, &settings)?;
        let store = FsStore::new(&config.store.root);

        let fetched = fetch_with_retry(&store, &self.path, config.store.retry_policy());
        if fetched.is_placeholder() {
            warn!(path = %self.path, root = %store.root().display(), "page unavailable, rendering placeholder");
        } else {
            info!(path = %self.path, "rendering page");
        }

        let renderer = Renderer::new(ScratchSource).with_diagram_lang(&config.render.diagram_lang);
        print!("{}", renderer.render(&tokenize(fetched.text())).to_html());
        Ok(())
    }
}
