use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};

use homescout::{
    Bounds, JsonFileSource, Listing, MemoryNavigator, Navigator, SearchEvent, SearchSession,
    SortKey,
};

use crate::cli::CliArgs;
use crate::settings::ResolvedConfig;

/// Coordinates one headless run of the search session: hydrate from the
/// query string, load the snapshot, optionally report a viewport, collect
/// the results.
pub(crate) struct SearchWorkflow {
    session: SearchSession<MemoryNavigator>,
}

/// What a finished run hands to the output layer.
pub(crate) struct SearchSummary {
    /// The query string after State → Address synchronization.
    pub(crate) address: String,
    pub(crate) total: usize,
    pub(crate) filtered: Vec<Listing>,
    pub(crate) visible: Vec<Listing>,
}

impl SearchWorkflow {
    pub(crate) fn from_config(settings: ResolvedConfig, cli: &CliArgs) -> Result<Self> {
        let navigator = MemoryNavigator::new(cli.query.clone().unwrap_or_default());
        let mut session = SearchSession::new(navigator).with_quiet_period(settings.quiet_period);

        // The address wins over the configured default ordering.
        if session.state().sort_key == SortKey::None && settings.default_sort != SortKey::None {
            session.dispatch(SearchEvent::SortChanged(settings.default_sort));
        }

        session.load_from(&JsonFileSource::new(&cli.listings));

        if let Some(spec) = &cli.viewport {
            let bounds = parse_viewport(spec)?;
            if cli.in_area {
                session.dispatch(SearchEvent::SearchInAreaToggled(true));
            }
            let now = Instant::now();
            session.dispatch_at(SearchEvent::ViewportChanged(bounds), now);
            // Headless run: jump past the quiet period instead of sleeping.
            session.tick_at(now + settings.quiet_period + Duration::from_millis(1));
        } else if cli.in_area {
            bail!("--in-area requires --viewport");
        }

        Ok(Self { session })
    }

    pub(crate) fn run(self) -> SearchSummary {
        let filtered = self
            .session
            .filtered_listings()
            .into_iter()
            .cloned()
            .collect();
        let visible = self
            .session
            .visible_listings()
            .into_iter()
            .cloned()
            .collect();
        SearchSummary {
            address: self.session.navigator().query(),
            total: self.session.state().listings.len(),
            filtered,
            visible,
        }
    }
}

/// Parse `west,east,south,north` degrees into a [`Bounds`].
fn parse_viewport(spec: &str) -> Result<Bounds> {
    let parts: Vec<f64> = spec
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid viewport component '{part}'"))
        })
        .collect::<Result<_>>()?;
    let [west, east, south, north] = parts.as_slice() else {
        bail!("viewport must have exactly four components: west,east,south,north");
    };
    Ok(Bounds::new(*west, *east, *south, *north))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_spec_parses_four_components() {
        let bounds = parse_viewport("10, 11, 50, 51").expect("bounds");
        assert_eq!(bounds.west, 10.0);
        assert_eq!(bounds.north, 51.0);
    }

    #[test]
    fn short_viewport_specs_are_rejected() {
        assert!(parse_viewport("10,11,50").is_err());
        assert!(parse_viewport("10,11,50,x").is_err());
    }
}
