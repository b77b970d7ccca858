//! Current-user privilege lookup.

use folio_core::{CURRENT_USER_PATH, CurrentUser};

use crate::client::ApiClient;

impl ApiClient {
    /// Look up the signed-in user.
    ///
    /// Never fails: anonymous sessions, server errors and transport problems
    /// all mean "no privileged user" and yield `None`.
    pub async fn current_user(&self) -> Option<CurrentUser> {
        let request = self.client.get(self.url(CURRENT_USER_PATH));
        match self.fetch_json::<CurrentUser>(request, "current user", None).await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!("current user unavailable: {e}");
                None
            },
        }
    }

    /// Whether the signed-in user may manage projects.
    pub async fn is_privileged(&self) -> bool {
        self.current_user().await.is_some_and(|user| user.is_superuser)
    }
}
