//! Application Layer
//!
//! Every operation resolves its caller through the shared session registry.

pub mod comment;
pub mod config;
pub mod favorite;
pub mod get_post;
pub mod list_posts;

pub use comment::CommentUseCase;
pub use config::ContentConfig;
pub use favorite::FavoriteUseCase;
pub use get_post::{GetPostUseCase, PostDetail};
pub use list_posts::{ListPostsUseCase, PostListing};

use auth::domain::authorize::require_authenticated;
use auth::{Principal, SessionRegistry};

use crate::error::{ContentError, ContentResult};

/// Resolve the token, failing with `Unauthenticated` for anonymous callers.
pub(crate) fn require_principal(
    sessions: &SessionRegistry,
    session_token: Option<&str>,
) -> ContentResult<Principal> {
    let caller = sessions.caller(session_token);
    // Anonymous is the only way this can fail.
    let principal = require_authenticated(&caller).map_err(|_| ContentError::Unauthenticated)?;
    Ok(principal.clone())
}
