//! Live page streams (Server-Sent Events).
//!
//! Each public page that shows shared data opens one stream. The stream
//! holds a change subscription for as long as the browser keeps the page
//! open; when the connection closes the stream is dropped and the
//! subscription with it.
//!
//! On every matching change the stream reloads through the page's loader
//! and pushes the re-rendered fragment as a `refresh` event, which the page
//! swaps in place. A failed reload pushes nothing.

use std::convert::Infallible;

use askama::Template;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use sqlx::PgPool;

use crate::realtime::{ChangeFilter, Signal};
use crate::services::{AboutCopy, CatalogLoader, HomeCopy, SettingsLoader};
use crate::state::AppState;

/// SSE event name the pages swap on.
pub const REFRESH_EVENT: &str = "refresh";

/// Home hero fragment.
#[derive(Template)]
#[template(path = "partials/home_hero.html")]
pub struct HomeHeroTemplate {
    pub copy: HomeCopy,
}

/// About header fragment.
#[derive(Template)]
#[template(path = "partials/about_copy.html")]
pub struct AboutCopyTemplate {
    pub copy: AboutCopy,
}

/// Catalog grid fragment.
#[derive(Template)]
#[template(path = "partials/catalog.html")]
pub struct CatalogTemplate {
    pub catalog: CatalogLoader,
}

/// The loader behind one live page.
#[derive(Debug)]
pub enum LivePage {
    Home(SettingsLoader<HomeCopy>),
    About(SettingsLoader<AboutCopy>),
    Store(CatalogLoader),
}

impl LivePage {
    /// Changes this page reacts to.
    #[must_use]
    pub const fn filter(&self) -> ChangeFilter {
        match self {
            Self::Home(_) | Self::About(_) => ChangeFilter::SETTINGS_UPDATES,
            Self::Store(_) => ChangeFilter::PRODUCTS,
        }
    }

    async fn reload(&mut self, pool: &PgPool) -> bool {
        match self {
            Self::Home(loader) => loader.reload(pool).await,
            Self::About(loader) => loader.reload(pool).await,
            Self::Store(loader) => loader.reload(pool).await,
        }
    }

    /// Render the page's live fragment from the loader's current state.
    ///
    /// # Errors
    ///
    /// Returns the template error if rendering fails.
    pub fn render(&self) -> askama::Result<String> {
        match self {
            Self::Home(loader) => HomeHeroTemplate {
                copy: loader.view().clone(),
            }
            .render(),
            Self::About(loader) => AboutCopyTemplate {
                copy: loader.view().clone(),
            }
            .render(),
            Self::Store(loader) => CatalogTemplate {
                catalog: loader.clone(),
            }
            .render(),
        }
    }
}

/// Build the event stream for a page.
///
/// The subscription is opened before this returns, so no change that lands
/// between the page render and the first poll is lost.
pub fn live_stream(
    state: &AppState,
    mut page: LivePage,
) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static + use<> {
    let mut subscription = state.changes().subscribe(page.filter());
    let pool = state.pool().clone();

    async_stream::stream! {
        // Seed the loader so blank fields fall back to what the page shows.
        page.reload(&pool).await;

        while let Some(signal) = subscription.next().await {
            if let Signal::Missed(missed) = signal {
                tracing::warn!(missed, filter = ?subscription.filter(), "Live page fell behind, reloading");
            }

            if !page.reload(&pool).await {
                continue;
            }

            match page.render() {
                Ok(html) => yield Ok(Event::default().event(REFRESH_EVENT).data(html)),
                Err(e) => tracing::error!(error = %e, "Failed to render live fragment"),
            }
        }
    }
}

/// Live stream for the home hero.
pub async fn home(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let page = LivePage::Home(SettingsLoader::new());
    Sse::new(live_stream(&state, page)).keep_alive(KeepAlive::default())
}

/// Live stream for the about header.
pub async fn about(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let page = LivePage::About(SettingsLoader::new());
    Sse::new(live_stream(&state, page)).keep_alive(KeepAlive::default())
}

/// Live stream for the store catalog.
pub async fn store(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let page = LivePage::Store(CatalogLoader::new());
    Sse::new(live_stream(&state, page)).keep_alive(KeepAlive::default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tehtehair_core::{ChangeKind, Table};

    use super::*;
    use crate::realtime::EventScope;

    #[test]
    fn test_pages_subscribe_to_their_tables() {
        let home = LivePage::Home(SettingsLoader::new()).filter();
        assert_eq!(home.table, Table::StoreSettings);
        assert_eq!(home.scope, EventScope::Only(ChangeKind::Update));

        let store = LivePage::Store(CatalogLoader::new()).filter();
        assert_eq!(store.table, Table::Products);
        assert_eq!(store.scope, EventScope::All);
    }

    #[test]
    fn test_fragments_render_defaults() {
        let home = LivePage::Home(SettingsLoader::new()).render().unwrap();
        assert!(home.contains("TehTehAir Store"));
        assert!(home.contains("Explore Store"));
        assert!(home.contains("/static/images/hero-banner.svg"));

        let about = LivePage::About(SettingsLoader::new()).render().unwrap();
        assert!(about.contains("We deliver fast and safe."));

        let store = LivePage::Store(CatalogLoader::new()).render().unwrap();
        assert!(store.contains("No products available at the moment"));
    }
}
