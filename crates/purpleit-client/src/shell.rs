//! Top-level navigation and the shared search box.

use std::sync::Arc;

use purpleit_core::ports::SecretService;
use purpleit_infra::Argon2SecretService;

use crate::api::BoardApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpBoardApi;
use crate::notice::Notice;
use crate::route::Route;
use crate::views::{CreateForm, DetailView, EditForm, ListView};

/// The view behind the current route.
pub enum Screen {
    List(ListView),
    Create(CreateForm),
    Edit(EditForm),
    Detail(DetailView),
    NotFound(String),
}

/// Owns the current route, its view and the search text.
pub struct Shell {
    api: Arc<dyn BoardApi>,
    secrets: Arc<dyn SecretService>,
    route: Route,
    search: String,
    screen: Screen,
    flash: Option<Notice>,
}

impl Shell {
    pub fn new(api: Arc<dyn BoardApi>, secrets: Arc<dyn SecretService>) -> Self {
        let screen = Screen::List(ListView::new(Arc::clone(&api)));
        Self {
            api,
            secrets,
            route: Route::List,
            search: String::new(),
            screen,
            flash: None,
        }
    }

    /// Talk to the HTTP backend and verify secrets with Argon2.
    pub fn connect(config: &ClientConfig) -> Result<Self, ApiError> {
        let api = HttpBoardApi::new(config)?;
        tracing::info!(api_url = %config.api_url, "Board client ready");
        Ok(Self::new(Arc::new(api), Arc::new(Argon2SecretService::new())))
    }

    /// Switch to `route` and load its view.
    ///
    /// A notice pending on the view being left is kept for the next
    /// `take_notice`.
    pub async fn navigate(&mut self, route: Route) {
        if let Some(notice) = self.screen_notice() {
            self.flash = Some(notice);
        }
        tracing::debug!(route = %route, "Navigating");

        self.screen = match &route {
            Route::List => {
                self.search.clear();
                let mut view = ListView::new(Arc::clone(&self.api));
                view.enter().await;
                Screen::List(view)
            }
            Route::Create => Screen::Create(CreateForm::new(Arc::clone(&self.api))),
            Route::Edit(id) => {
                let mut form = EditForm::new(Arc::clone(&self.api), Arc::clone(&self.secrets), *id);
                form.enter().await;
                Screen::Edit(form)
            }
            Route::Detail(id) => {
                let mut view =
                    DetailView::new(Arc::clone(&self.api), Arc::clone(&self.secrets), *id);
                view.enter().await;
                Screen::Detail(view)
            }
            Route::NotFound(path) => {
                tracing::warn!(path = %path, "No route matches path");
                Screen::NotFound(path.clone())
            }
        };
        self.route = route;
    }

    pub async fn open(&mut self, path: &str) {
        self.navigate(Route::parse(path)).await;
    }

    /// Navigate if a view action produced a route.
    pub async fn follow(&mut self, next: Option<Route>) {
        if let Some(route) = next {
            self.navigate(route).await;
        }
    }

    /// Update the search text and re-filter the list when it is showing.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        if let Screen::List(view) = &mut self.screen {
            view.apply_query(&self.search);
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.flash.take().or_else(|| self.screen_notice())
    }

    fn screen_notice(&mut self) -> Option<Notice> {
        match &mut self.screen {
            Screen::List(view) => view.take_notice(),
            Screen::Create(form) => form.take_notice(),
            Screen::Edit(form) => form.take_notice(),
            Screen::Detail(view) => view.take_notice(),
            Screen::NotFound(_) => None,
        }
    }
}
