use juniper::FieldResult;
use tracing::debug;

use crate::domains::auth::actions;
use crate::domains::auth::data::ViewerData;
use crate::server::graphql::GraphQLContext;

/// Current account, or null when signed out or the session is gone
pub async fn viewer(ctx: &GraphQLContext) -> FieldResult<Option<ViewerData>> {
    let Some(user) = ctx.auth_user.as_ref() else {
        return Ok(None);
    };

    match actions::viewer(user, &ctx.deps).await {
        Ok(account) => Ok(Some(account.into())),
        Err(e) => {
            debug!(uid = %user.uid, error = %e, "No viewer for token");
            Ok(None)
        }
    }
}
