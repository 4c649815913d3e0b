use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use clap::Parser;
use itertools::Itertools;
use log::warn;
use majsoul_scraping::schema::ArchiveFileName;

#[derive(Parser)]
struct Opts {
    archive_dirs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder().format_timestamp_nanos().init();

    let opts = Opts::parse();
    for dir in opts.archive_dirs {
        println!("{dir:?}");
        let mut files = vec![];
        collect_files(&dir, &mut files)?;
        let mut per_day = BTreeMap::<NaiveDate, (usize, usize)>::new();
        for path in files.iter().sorted() {
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            match name.parse::<ArchiveFileName>() {
                Ok(parsed) => {
                    let entry = per_day.entry(parsed.start().date()).or_default();
                    entry.0 += 1;
                    entry.1 += parsed.match_count();
                }
                Err(e) => warn!("Skipping {path:?}: {e}"),
            }
        }
        let mut total = 0;
        for (date, (file_count, match_count)) in &per_day {
            println!("{date} => {match_count} matches in {file_count} files");
            total += *match_count;
        }
        println!("Total: {total} matches");
    }
    Ok(())
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in fs_err::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            collect_files(&entry.path(), files)?;
        } else {
            files.push(entry.path());
        }
    }
    Ok(())
}
