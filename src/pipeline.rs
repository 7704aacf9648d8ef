// pipeline.rs
use crate::config::Config;
use crate::dataset::{concat, write_parquet};
use crate::domain::{normalize_source, EstateAgent};
use crate::errors::PipelineError;
use crate::scraper::{with_session, PropertyScraper, ScrapeBatch};
use crate::upload::{object_key, sink_from_config, ObjectSink};
use chrono::{Local, NaiveDate};
use tracing::info;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub key: String,
    pub location: String,
    pub bytes: usize,
    pub rows: usize,
    pub per_agent: Vec<(EstateAgent, usize)>,
}

/// One full run: scrape, clean, stack, serialize, upload.
pub fn run(config: &Config) -> Result<RunSummary, PipelineError> {
    let today = Local::now().date_naive();
    let sink = sink_from_config(&config.sink)?;

    let timings = config.timings;
    let batch = with_session(&config.browser, |browser| {
        PropertyScraper::new(browser, timings).scrape_all()
    })?;
    info!(listings = batch.total(), "Browser released");

    publish(batch, today, sink.as_ref())
}

/// Everything after the browser is released.
pub fn publish(
    batch: ScrapeBatch,
    today: NaiveDate,
    sink: &dyn ObjectSink,
) -> Result<RunSummary, PipelineError> {
    let tables = vec![
        normalize_source(EstateAgent::StowBros, &batch.stow_bros, today),
        normalize_source(EstateAgent::Central, &batch.central, today),
        normalize_source(EstateAgent::Foxtons, &batch.foxtons, today),
    ];
    let per_agent: Vec<(EstateAgent, usize)> = tables.iter().map(|t| (t.agent, t.len())).collect();

    let dataset = concat(tables)?;
    let body = write_parquet(&dataset)?;

    let key = object_key(today);
    sink.put(&key, &body)?;

    let summary = RunSummary {
        location: sink.describe(&key),
        key,
        bytes: body.len(),
        rows: dataset.len(),
        per_agent,
    };

    info!(
        rows = summary.rows,
        bytes = summary.bytes,
        location = %summary.location,
        "📦 Dataset published"
    );
    Ok(summary)
}
