use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfutils")]
#[command(about = "Some simple PDF utilities")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert images to PDF
    #[command(name = "imgs2pdf")]
    Imgs2pdf {
        /// Input image file(s)
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Output PDF file
        output: PathBuf,

        /// Set this flag to load truncated images
        #[arg(long)]
        load_truncated: bool,
    },

    /// Join multiple PDFs into one
    Join {
        /// Input PDF file(s) to join
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output PDF file
        output: PathBuf,
    },

    /// Pick specific pages from a PDF
    Pick {
        /// Input PDF file
        input: PathBuf,

        /// Page numbers to pick
        #[arg(required = true)]
        pages: Vec<u32>,

        /// Output PDF file
        output: PathBuf,
    },

    /// Remove specific pages from a PDF
    Remove {
        /// Input PDF file
        input: PathBuf,

        /// Page numbers to remove
        #[arg(required = true, allow_negative_numbers = true)]
        pages: Vec<i64>,

        /// Output PDF file
        output: PathBuf,
    },

    /// Insert a PDF into another PDF
    Insert {
        /// Input PDF file
        input: PathBuf,

        /// PDF to be inserted
        insert: PathBuf,

        /// Page number to insert at
        #[arg(allow_negative_numbers = true)]
        page: i64,

        /// Output PDF file
        output: PathBuf,
    },

    /// Scale specific pages in a PDF
    Scale {
        /// Input PDF file
        input: PathBuf,

        /// Page numbers and scales. e.g. 1 0.7 2 1.5 ...
        #[arg(required = true, value_name = "page-scales", allow_negative_numbers = true)]
        page_scales: Vec<String>,

        /// Output PDF file
        output: PathBuf,
    },

    /// Rotate specific pages in a PDF
    Rotate {
        /// Input PDF file
        input: PathBuf,

        /// Page numbers and angles. e.g. 1 90 2 270 ...
        #[arg(required = true, value_name = "page-angles", allow_negative_numbers = true)]
        page_angles: Vec<String>,

        /// Output PDF file
        output: PathBuf,
    },

    /// Search for text in a PDF
    Search {
        /// Input PDF file
        input: PathBuf,

        /// Text/regex to search
        pattern: String,

        /// Case insensitive search
        #[arg(short = 'i', long = "case_insensitive", visible_alias = "case-insensitive")]
        case_insensitive: bool,
    },
}

impl Commands {
    /// The file this command writes, if any
    pub fn output(&self) -> Option<&Path> {
        match self {
            Commands::Imgs2pdf { output, .. }
            | Commands::Join { output, .. }
            | Commands::Pick { output, .. }
            | Commands::Remove { output, .. }
            | Commands::Insert { output, .. }
            | Commands::Scale { output, .. }
            | Commands::Rotate { output, .. } => Some(output.as_path()),
            Commands::Search { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("pdfutils").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_last_positional_is_output() {
        match parse(&["pick", "in.pdf", "3", "1", "3", "out.pdf"]) {
            Commands::Pick {
                input,
                pages,
                output,
            } => {
                assert_eq!(input, PathBuf::from("in.pdf"));
                assert_eq!(pages, vec![3, 1, 3]);
                assert_eq!(output, PathBuf::from("out.pdf"));
            }
            _ => panic!("expected pick"),
        }

        match parse(&["join", "a.pdf", "b.pdf", "c.pdf", "out.pdf"]) {
            Commands::Join { inputs, output } => {
                assert_eq!(inputs.len(), 3);
                assert_eq!(output, PathBuf::from("out.pdf"));
            }
            _ => panic!("expected join"),
        }
    }

    #[test]
    fn test_negative_angles() {
        match parse(&["rotate", "in.pdf", "1", "-90", "2", "180", "out.pdf"]) {
            Commands::Rotate { page_angles, .. } => {
                assert_eq!(page_angles, vec!["1", "-90", "2", "180"]);
            }
            _ => panic!("expected rotate"),
        }
    }

    #[test]
    fn test_negative_page_numbers() {
        match parse(&["remove", "in.pdf", "-1", "2", "out.pdf"]) {
            Commands::Remove { pages, output, .. } => {
                assert_eq!(pages, vec![-1, 2]);
                assert_eq!(output, PathBuf::from("out.pdf"));
            }
            _ => panic!("expected remove"),
        }

        match parse(&["insert", "a.pdf", "b.pdf", "-1", "out.pdf"]) {
            Commands::Insert { page, output, .. } => {
                assert_eq!(page, -1);
                assert_eq!(output, PathBuf::from("out.pdf"));
            }
            _ => panic!("expected insert"),
        }
    }

    #[test]
    fn test_flags() {
        match parse(&["imgs2pdf", "a.png", "b.jpg", "out.pdf", "--load-truncated"]) {
            Commands::Imgs2pdf {
                images,
                load_truncated,
                ..
            } => {
                assert_eq!(images.len(), 2);
                assert!(load_truncated);
            }
            _ => panic!("expected imgs2pdf"),
        }

        for flag in ["-i", "--case_insensitive", "--case-insensitive"] {
            match parse(&["search", "in.pdf", "foo", flag]) {
                Commands::Search {
                    case_insensitive, ..
                } => assert!(case_insensitive),
                _ => panic!("expected search"),
            }
        }
    }

    #[test]
    fn test_output_target() {
        let insert = parse(&["insert", "a.pdf", "b.pdf", "2", "out.pdf"]);
        assert_eq!(insert.output(), Some(Path::new("out.pdf")));

        let search = parse(&["search", "in.pdf", "foo"]);
        assert_eq!(search.output(), None);
    }

    #[test]
    fn test_missing_output() {
        let args = ["pdfutils", "pick", "in.pdf"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
