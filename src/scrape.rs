// src/scrape.rs
//
// Runs fetch units against a source, one at a time or on a worker pool, and
// hands back numbered chapters in unit order.
use std::{
    sync::{mpsc, atomic::{AtomicUsize, Ordering}},
    thread,
};

use tracing::debug;

use crate::{
    document::Chapter,
    error::{Error, Result},
    omission::{self, OmissionTable},
    progress::Progress,
    range::FetchUnit,
    source::PassageSource,
};

/// What every unit of one request shares.
pub struct Job<'a> {
    pub source: &'a dyn PassageSource,
    pub translation: &'a str,
    pub show_numbers: bool,
    pub omissions: &'a OmissionTable,
}

/// One unit's passages after reconciliation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedChapter {
    pub chapter: u32,
    pub passages: Chapter,
}

/// Fetch and number a single unit. An empty fetch is an error.
pub fn fetch_unit(job: &Job, unit: &FetchUnit) -> Result<FetchedChapter> {
    let raw = job.source.fetch(unit, job.translation, job.show_numbers)?;
    if raw.is_empty() {
        return Err(Error::NoResultsForUnit {
            book: unit.book.clone(),
            chapter: unit.chapter,
            passage_from: unit.passage_from,
            passage_to: unit.passage_to,
            translation: s!(job.translation),
        });
    }
    debug!(book = %unit.book, chapter = unit.chapter, passages = raw.len(), "unit fetched");
    let passages = omission::reconcile(unit, raw, job.translation, job.show_numbers, job.omissions);
    Ok(FetchedChapter { chapter: unit.chapter, passages })
}

/// Fetch `units` and return their chapters in the same order.
///
/// With `workers > 1` the units are spread over a scoped pool. All units run
/// to completion; if any failed, the error of the earliest failing unit is
/// returned and the rest are only logged. Sequential runs stop at the first
/// failure.
pub fn run(
    job: &Job,
    units: &[FetchUnit],
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<FetchedChapter>> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(units.len());
    }

    let result = if workers > 1 && units.len() > 1 {
        run_pool(job, units, workers.min(units.len()), progress.as_deref_mut())
    } else {
        run_sequential(job, units, progress.as_deref_mut())
    };

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    result
}

fn run_sequential(
    job: &Job,
    units: &[FetchUnit],
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<Vec<FetchedChapter>> {
    let mut out = Vec::with_capacity(units.len());
    for unit in units {
        let chapter = fetch_unit(job, unit)?;
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(unit.chapter);
        }
        out.push(chapter);
    }
    Ok(out)
}

fn run_pool(
    job: &Job,
    units: &[FetchUnit],
    workers: usize,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<Vec<FetchedChapter>> {
    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<FetchedChapter>)>();
    let mut slots: Vec<Option<Result<FetchedChapter>>> = (0..units.len()).map(|_| None).collect();

    // Scope joins every worker before returning, on success and on failure.
    thread::scope(|scope| {
        for _ in 0..workers {
            let idx = &counter;
            let tx = res_tx.clone();
            scope.spawn(move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= units.len() {
                        break;
                    }
                    let _ = tx.send((i, fetch_unit(job, &units[i])));
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, result) in res_rx.iter() {
            if let Some(p) = progress.as_deref_mut() {
                match &result {
                    Ok(_) => p.item_done(units[i].chapter),
                    Err(e) => p.log(&format!("Chapter {}: {e}", units[i].chapter)),
                }
            }
            slots[i] = Some(result);
        }
    });

    // A panicking worker re-raises at the end of the scope, so every slot is filled here.
    let mut out = Vec::with_capacity(units.len());
    let mut first_err: Option<Error> = None;
    for (unit, result) in units.iter().zip(slots.into_iter().flatten()) {
        match result {
            Ok(chapter) => out.push(chapter),
            Err(e) if first_err.is_none() => first_err = Some(e),
            Err(e) => debug!(chapter = unit.chapter, error = %e, "additional unit failure"),
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(out),
    }
}
