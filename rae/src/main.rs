use std::io::{self, BufRead};
use std::path::PathBuf;

use argh::FromArgs;
use miette::WrapErr;
use tracing::{debug, info, warn};

use rae::query::Keyword;
use rae::render::{self, Format};
use rae::{Cache, Config, Coordinator, Error, PageSource, Preferences, http};

/// Look up words in the dictionary of the Real Academia Española.
///
/// Without a query, queries are read from stdin, one per line.
#[derive(Debug, FromArgs)]
struct Opts {
    /// path to a TOML config file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,
    /// change a preference, as ID=VALUE
    #[argh(option)]
    set: Vec<String>,
    /// write results as JSON lines
    #[argh(switch)]
    json: bool,
    /// the query, e.g. `rae casa` or `casa`
    #[argh(positional)]
    query: Vec<String>,
}

/// Applies each `ID=VALUE` assignment to `preferences`, in order.
///
/// A value rejected by [`Preferences::update`] is logged and the previous preferences stay in
/// effect. Only an assignment without `=` is an error.
fn apply_assignments(
    preferences: Preferences,
    assignments: &[String],
) -> Result<Preferences, Error> {
    assignments.iter().try_fold(preferences, |preferences, assignment| {
        let (id, value) = assignment
            .split_once('=')
            .ok_or_else(|| Error::PreferenceAssignment(assignment.clone()))?;
        let id = id.trim();

        match preferences.update(id, value) {
            Ok(updated) => Ok(updated),
            Err(err) => {
                warn!(%id, %value, error = %err, "preference rejected, keeping previous value");

                Ok(preferences)
            }
        }
    })
}

/// Looks up the word of `query` and writes its results to stdout.
async fn answer<S: PageSource>(
    coordinator: &Coordinator<S>,
    keyword: &Keyword,
    preferences: &Preferences,
    format: Format,
    query: &str,
) -> Result<(), Error> {
    let word = keyword.word(query);

    debug!(%query, ?word, "answering query");

    let results = coordinator.lookup(word, preferences).await;

    render::write_results(io::stdout().lock(), format, query, &results)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    let opts: Opts = argh::from_env();

    let config = Config::load(opts.config.as_deref()).map_err(Error::from)?;

    rae::tracing::try_init(&config.tracing)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "{} starting",
        env!("CARGO_PKG_NAME")
    );

    let preferences = apply_assignments(config.preferences.clone(), &opts.set)?;

    let cache = match &config.cache.path {
        Some(path) => Cache::load(path).map_err(|source| Error::LoadCache {
            path: path.display().to_string(),
            source,
        })?,
        None => Cache::default(),
    };

    let client = http::build_client(&config.http)?;
    let source = dle::Client::with_client(client).with_base_url(preferences.base_url.as_str());
    let coordinator = Coordinator::new(cache, source);
    let keyword = Keyword::new(&preferences.keyword);
    let format = if opts.json { Format::Json } else { Format::Text };

    if !opts.query.is_empty() {
        let query = opts.query.join(" ");

        answer(&coordinator, &keyword, &preferences, format, &query)
            .await
            .wrap_err("could not answer query")?;

        return Ok(());
    }

    debug!("reading queries from stdin");

    for line in io::stdin().lock().lines() {
        let query = line.map_err(Error::ReadQuery)?;

        answer(&coordinator, &keyword, &preferences, format, &query).await?;
    }

    Ok(())
}
