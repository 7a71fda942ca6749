//! Command-line interface of the `catalog-client` binary

use clap::{Args, Parser, Subcommand};

use crate::models::{BookFormat, BookKind, FileFormat};
use crate::view_model::FilterKind;

#[derive(Parser, Debug)]
#[command(name = "catalog-client")]
#[command(about = "Browse and manage a book catalog service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show one page of the collection
    #[command(visible_alias = "ls")]
    List {
        /// all, available, borrowed, physical, digital, audio
        #[arg(short, long)]
        filter: Option<FilterKind>,

        /// Page to display (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Books per page (overrides configuration)
        #[arg(long)]
        page_size: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search the loaded collection by title, author or ISBN
    Search {
        query: String,
    },

    /// Look a book up on the server
    Show {
        isbn: String,
    },

    /// Add a book by ISBN; the server fetches the bibliographic data
    Add {
        isbn: String,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Add a book with its bibliographic data entered by hand
    AddManual {
        isbn: String,

        #[arg(long)]
        title: String,

        /// Author, repeat for several
        #[arg(short, long = "author", required = true)]
        authors: Vec<String>,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Delete a book
    #[command(visible_alias = "rm")]
    Delete {
        isbn: String,
    },

    /// Borrow a book
    Borrow {
        isbn: String,
    },

    /// Return a borrowed book
    Return {
        isbn: String,
    },

    /// Borrow or return depending on the book's current state
    Toggle {
        isbn: String,
    },

    /// Check whether the catalog service is reachable
    Status,
}

/// Type-specific attributes of a new book
#[derive(Args, Debug, Clone, Default)]
pub struct FormatArgs {
    /// Physical, Digital or Audio (case-insensitive, default: Physical)
    #[arg(short = 't', long = "type", value_parser = parse_kind)]
    pub kind: Option<BookKind>,

    /// Shelf location of a physical book
    #[arg(long)]
    pub shelf: Option<String>,

    /// File size of a digital book in MB
    #[arg(long)]
    pub file_size: Option<f64>,

    /// File format of a digital book (PDF, EPUB, MOBI, ...)
    #[arg(long)]
    pub file_format: Option<String>,

    /// Duration of an audiobook in minutes
    #[arg(long)]
    pub duration: Option<u32>,

    /// Narrator of an audiobook
    #[arg(long)]
    pub narrator: Option<String>,
}

impl FormatArgs {
    /// Keep only the attributes that belong to the chosen type
    pub fn into_format(self) -> BookFormat {
        match self.kind.unwrap_or(BookKind::Physical) {
            BookKind::Physical => BookFormat::Physical {
                shelf_location: self.shelf,
            },
            BookKind::Digital => BookFormat::Digital {
                file_size_mb: self.file_size,
                file_format: self.file_format.map(FileFormat::from),
            },
            BookKind::Audio => BookFormat::Audio {
                duration_minutes: self.duration,
                narrator: self.narrator,
            },
        }
    }
}

fn parse_kind(s: &str) -> Result<BookKind, String> {
    [BookKind::Physical, BookKind::Digital, BookKind::Audio]
        .into_iter()
        .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| format!("Unknown book type: {} (expected Physical, Digital or Audio)", s))
}
