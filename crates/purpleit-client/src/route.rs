//! Navigable client routes.

use std::fmt;

use uuid::Uuid;

/// A client-side location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` - browse, search and sort posts.
    List,
    /// `/create` - new post form.
    Create,
    /// `/edit/:id` - secret-gated edit form.
    Edit(Uuid),
    /// `/:id` - post detail.
    Detail(Uuid),
    /// Any path that matches none of the above.
    NotFound(String),
}

impl Route {
    /// Parse a path. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        match segments.as_slice() {
            [] => Route::List,
            ["create"] => Route::Create,
            ["edit", id] => match Uuid::parse_str(id) {
                Ok(id) => Route::Edit(id),
                Err(_) => Route::NotFound(path.to_string()),
            },
            [id] => match Uuid::parse_str(id) {
                Ok(id) => Route::Detail(id),
                Err(_) => Route::NotFound(path.to_string()),
            },
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Create => "/create".to_string(),
            Route::Edit(id) => format!("/edit/{id}"),
            Route::Detail(id) => format!("/{id}"),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
