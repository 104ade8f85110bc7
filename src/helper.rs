//! Miscellaneous convenience methods

use crate::{commands::Reply, context::Context};
use anyhow::Result;
use serenity::{
    all::{
        CommandInteraction, CreateInteractionResponse, CreateInteractionResponseMessage, Http,
        UserId,
    },
    model::ModelError,
};
use std::sync::Arc;

#[serenity::async_trait]
pub trait UserIdHelper {
    async fn display_name(&self, http: &Arc<Http>) -> String;
}

#[serenity::async_trait]
impl UserIdHelper for UserId {
    /// The name Discord shows for this user, or a placeholder with the raw id if the lookup fails
    /// (deleted account, network trouble).
    async fn display_name(&self, http: &Arc<Http>) -> String {
        match self.to_user(http).await {
            Ok(user) => user.display_name().to_owned(),
            Err(_) => format!("Unknown User ({})", self),
        }
    }
}

#[serenity::async_trait]
pub trait CommandHelper {
    fn user_option(&self, name: &str) -> Option<UserId>;
    fn str_option(&self, name: &str) -> Option<&str>;
    fn bool_option(&self, name: &str) -> Option<bool>;
    async fn respond(&self, ctx: &Context, reply: Reply) -> Result<()>;
}

#[serenity::async_trait]
impl CommandHelper for CommandInteraction {
    fn user_option(&self, name: &str) -> Option<UserId> {
        self.data
            .options
            .iter()
            .find(|option| option.name == name)
            .and_then(|option| option.value.as_user_id())
    }

    fn str_option(&self, name: &str) -> Option<&str> {
        self.data
            .options
            .iter()
            .find(|option| option.name == name)
            .and_then(|option| option.value.as_str())
    }

    fn bool_option(&self, name: &str) -> Option<bool> {
        self.data
            .options
            .iter()
            .find(|option| option.name == name)
            .and_then(|option| option.value.as_bool())
    }

    async fn respond(&self, ctx: &Context, reply: Reply) -> Result<()> {
        let message = CreateInteractionResponseMessage::new()
            .content(reply.content)
            .ephemeral(reply.ephemeral);

        self.create_response(ctx.cache_http, CreateInteractionResponse::Message(message))
            .await?;
        Ok(())
    }
}

/// Whether Discord refused a request because the bot lacks access or permissions in the channel,
/// as opposed to some transport failure.
pub fn is_permission_error(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(http_err) => {
            http_err.status_code().map(|status| status.as_u16()) == Some(403)
        }
        serenity::Error::Model(ModelError::InvalidPermissions { .. }) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::{all::Permissions, http::ErrorResponse};

    async fn http_error(status: u16, body: &str) -> serenity::Error {
        let response = http::Response::builder()
            .status(status)
            .body(body.to_owned())
            .unwrap();
        let response = ErrorResponse::from_response(response.into(), reqwest::Method::POST).await;
        serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(response))
    }

    #[test]
    fn missing_permissions_are_permission_errors() {
        let err = serenity::Error::Model(ModelError::InvalidPermissions {
            required: Permissions::ADD_REACTIONS,
            present: Permissions::empty(),
        });
        assert!(is_permission_error(&err));
    }

    #[tokio::test]
    async fn forbidden_responses_are_permission_errors() {
        let err = http_error(403, r#"{"code": 50013, "message": "Missing Permissions"}"#).await;
        assert!(is_permission_error(&err));
    }

    #[tokio::test]
    async fn other_http_failures_are_not_permission_errors() {
        for status in [400, 404, 429, 500] {
            let err = http_error(status, "{}").await;
            assert!(!is_permission_error(&err), "status {}", status);
        }
    }

    #[test]
    fn other_failures_are_not_permission_errors() {
        assert!(!is_permission_error(&serenity::Error::Other("gateway closed")));
        assert!(!is_permission_error(&serenity::Error::Model(
            ModelError::MessageTooLong(2100)
        )));
    }
}
