// src/cli.rs
use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};

use crate::{
    assemble::Output,
    config::{self, consts::SENTINEL_MAX, AppOptions, Format},
    core::catalog,
    downloader::Downloader,
    extractor::{Extractor, FileExtractor},
    log,
    progress::LogProgress,
};

#[derive(Parser, Debug)]
#[command(name = "verse_scrape", version)]
#[command(about = "Download Bible passages into JSON/YAML/XML/CSV, or print them")]
pub struct Cli {
    /// YAML options file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a range and write it as a document
    Download {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        flags: Flags,
        /// Output format
        #[arg(short, long)]
        format: Option<Format>,
        /// Output file or directory
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Print a range as text, or one passage per line
    Extract {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        flags: Flags,
        /// Read from a downloaded document instead of the web
        #[arg(long)]
        file: Option<PathBuf>,
        /// Print one passage per line
        #[arg(long)]
        list: bool,
    },
    /// List books and chapter counts for a translation
    Books {
        #[arg(short, long)]
        translation: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct Target {
    /// Book name, e.g. "1 John"
    pub book: String,
    /// First chapter[:passage]
    #[arg(long)]
    pub from: Option<Position>,
    /// Last chapter[:passage]
    #[arg(long)]
    pub to: Option<Position>,
    #[arg(short, long)]
    pub translation: Option<String>,
}

#[derive(Args, Debug)]
pub struct Flags {
    /// Fetch chapters one at a time
    #[arg(long)]
    pub sequential: bool,
    #[arg(long)]
    pub workers: Option<usize>,
    /// Hide passage numbers
    #[arg(long)]
    pub no_numbers: bool,
    /// Trim whitespace around each passage
    #[arg(long)]
    pub strip: bool,
    /// Curly quotes and dashes to ASCII
    #[arg(long)]
    pub ascii: bool,
}

/// `3` or `3:16`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub chapter: i64,
    pub passage: Option<i64>,
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let num = |v: &str| v.trim().parse::<i64>().map_err(|_| format!("not a number: {v:?}"));
        match s.split_once(':') {
            Some((c, p)) => Ok(Position { chapter: num(c)?, passage: Some(num(p)?) }),
            None => Ok(Position { chapter: num(s)?, passage: None }),
        }
    }
}

/// `(chapter_from, passage_from, chapter_to, passage_to)` from optional positions.
pub fn resolve_range(from: Option<Position>, to: Option<Position>, last_chapter: u32) -> (i64, i64, i64, i64) {
    let end = i64::from(SENTINEL_MAX);
    match (from, to) {
        (None, None) => (1, 1, i64::from(last_chapter), end),
        (Some(f), None) => (f.chapter, f.passage.unwrap_or(1), f.chapter, f.passage.unwrap_or(end)),
        (None, Some(t)) => (1, 1, t.chapter, t.passage.unwrap_or(end)),
        (Some(f), Some(t)) => (f.chapter, f.passage.unwrap_or(1), t.chapter, t.passage.unwrap_or(end)),
    }
}

impl Flags {
    fn apply(&self, opts: &mut AppOptions) {
        let fetch = &mut opts.fetch;
        if self.sequential { fetch.use_concurrency = false; }
        if let Some(w) = self.workers { fetch.workers = w.max(1); }
        if self.no_numbers { fetch.show_passage_numbers = false; }
        if self.strip { fetch.strip_excess_whitespace = true; }
        if self.ascii { fetch.use_ascii_punctuation = true; }
    }
}

pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<()> {
    log::init(log::level_for(cli.verbose));

    let mut opts = match &cli.config {
        Some(path) => config::load(path)?,
        None => AppOptions::default(),
    };

    match cli.command {
        Command::Books { translation } => {
            let code = translation.unwrap_or(opts.translation);
            let tr = catalog::translation(&code).ok_or_else(|| eyre!("{code} is an unsupported translation"))?;
            for (book, chapters) in tr.books() {
                println!("{book}\t{chapters}");
            }
        }

        Command::Download { target, flags, format, out } => {
            flags.apply(&mut opts);
            if let Some(t) = &target.translation { opts.translation = t.clone(); }
            if let Some(f) = format { opts.export.format = f; }

            let last = catalog::chapter_count(&target.book, &opts.translation);
            let (cf, pf, ct, pt) = resolve_range(target.from, target.to, last);

            let default_path = opts.export.out_path(&catalog::normalize(&target.book));
            let path = crate::file::resolve_out_path(out.as_deref().unwrap_or(""), &default_path)?;

            let downloader = Downloader::new(&opts.translation, opts.fetch.clone(), opts.export.clone());
            let mut progress = LogProgress::default();
            let written = downloader.download_passage_range(
                &target.book, cf, pf, ct, pt, Some(path.as_path()), Some(&mut progress),
            )?;
            println!("{}", written.display());
        }

        Command::Extract { target, flags, file, list } => {
            flags.apply(&mut opts);
            if let Some(t) = &target.translation { opts.translation = t.clone(); }
            opts.fetch.output_as_list = list;

            let last = catalog::chapter_count(&target.book, &opts.translation);
            let (cf, pf, ct, pt) = resolve_range(target.from, target.to, last);

            let output = match file {
                Some(path) => {
                    let format = path
                        .extension()
                        .and_then(|e| e.to_str())
                        .and_then(Format::from_ext)
                        .unwrap_or(opts.export.format);
                    FileExtractor::new(&opts.translation, opts.fetch.clone(), format, &opts.export.out_dir)
                        .get_passage_range(&target.book, cf, pf, ct, pt, Some(path.as_path()))?
                }
                None => Extractor::new(&opts.translation, opts.fetch.clone())
                    .get_passage_range(&target.book, cf, pf, ct, pt)?,
            };

            match output {
                Output::Text(text) => println!("{text}"),
                Output::List(items) => items.iter().for_each(|p| println!("{p}")),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions() {
        assert_eq!("3:16".parse::<Position>(), Ok(Position { chapter: 3, passage: Some(16) }));
        assert_eq!("3".parse::<Position>(), Ok(Position { chapter: 3, passage: None }));
        assert!("x:1".parse::<Position>().is_err());
    }

    #[test]
    fn ranges_from_positions() {
        let p = |c, v| Some(Position { chapter: c, passage: v });
        assert_eq!(resolve_range(None, None, 16), (1, 1, 16, 9000));
        assert_eq!(resolve_range(p(3, Some(16)), None, 21), (3, 16, 3, 16));
        assert_eq!(resolve_range(p(3, None), None, 21), (3, 1, 3, 9000));
        assert_eq!(resolve_range(p(3, Some(16)), p(4, None), 21), (3, 16, 4, 9000));
    }

    #[test]
    fn parses_download_command() {
        let cli = Cli::try_parse_from([
            "verse_scrape", "download", "Romans", "--from", "16:23", "--to", "16:25",
            "-t", "ASV", "-f", "yaml", "--sequential",
        ]).unwrap();
        match cli.command {
            Command::Download { target, flags, format, .. } => {
                assert_eq!(target.book, "Romans");
                assert_eq!(format, Some(Format::Yaml));
                assert!(flags.sequential);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
