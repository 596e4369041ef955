use identity::IdpCredential;
use juniper::FieldResult;

use crate::domains::auth::actions;
use crate::domains::auth::data::{
    ActionResult, AuthPayload, SignUpInput, VerificationData, ViewerData,
};
use crate::server::graphql::{to_field_error, GraphQLContext};

pub async fn sign_up_with_email(ctx: &GraphQLContext, input: SignUpInput) -> FieldResult<AuthPayload> {
    actions::sign_up_with_email(input, &ctx.deps)
        .await
        .map(Into::into)
        .map_err(to_field_error)
}

pub async fn sign_in_with_email(
    ctx: &GraphQLContext,
    email: String,
    password: String,
) -> FieldResult<AuthPayload> {
    actions::sign_in_with_email(email, password, &ctx.deps)
        .await
        .map(Into::into)
        .map_err(to_field_error)
}

/// Google ID token obtained by the client
pub async fn sign_in_with_google(ctx: &GraphQLContext, id_token: String) -> FieldResult<AuthPayload> {
    actions::sign_in_with_google(IdpCredential::GoogleIdToken(id_token), &ctx.deps)
        .await
        .map(Into::into)
        .map_err(to_field_error)
}

pub async fn send_phone_otp(
    ctx: &GraphQLContext,
    phone_number: String,
    recaptcha_token: Option<String>,
) -> FieldResult<VerificationData> {
    actions::send_phone_otp(phone_number, recaptcha_token, &ctx.deps)
        .await
        .map(VerificationData::sent)
        .map_err(to_field_error)
}

pub async fn confirm_phone_otp(
    ctx: &GraphQLContext,
    verification_id: String,
    code: String,
) -> FieldResult<AuthPayload> {
    actions::confirm_phone_otp(verification_id, code, &ctx.deps)
        .await
        .map(Into::into)
        .map_err(to_field_error)
}

pub async fn send_phone_otp_for_linking(
    ctx: &GraphQLContext,
    phone_number: String,
    recaptcha_token: Option<String>,
) -> FieldResult<VerificationData> {
    let user = ctx.require_auth()?;
    actions::send_phone_otp_for_linking(user, phone_number, recaptcha_token, &ctx.deps)
        .await
        .map(VerificationData::sent)
        .map_err(to_field_error)
}

pub async fn confirm_phone_link(
    ctx: &GraphQLContext,
    verification_id: String,
    code: String,
) -> FieldResult<AuthPayload> {
    let user = ctx.require_auth()?;
    actions::confirm_phone_link(user, verification_id, code, &ctx.deps)
        .await
        .map(Into::into)
        .map_err(to_field_error)
}

pub async fn start_mfa_enrollment(
    ctx: &GraphQLContext,
    phone_number: String,
    recaptcha_token: Option<String>,
) -> FieldResult<VerificationData> {
    let user = ctx.require_auth()?;
    actions::start_mfa_enrollment(user, phone_number, recaptcha_token, &ctx.deps)
        .await
        .map(|id| VerificationData {
            verification_id: id,
            message: "Code sent. Enter verification code.".to_string(),
        })
        .map_err(to_field_error)
}

pub async fn complete_mfa_enrollment(
    ctx: &GraphQLContext,
    verification_id: String,
    code: String,
    display_name: Option<String>,
) -> FieldResult<ViewerData> {
    let user = ctx.require_auth()?;
    actions::complete_mfa_enrollment(user, verification_id, code, display_name, &ctx.deps)
        .await
        .map(Into::into)
        .map_err(to_field_error)
}

pub async fn start_mfa_sign_in(
    ctx: &GraphQLContext,
    pending_credential: String,
    enrollment_id: String,
    recaptcha_token: Option<String>,
) -> FieldResult<VerificationData> {
    actions::start_mfa_sign_in(pending_credential, enrollment_id, recaptcha_token, &ctx.deps)
        .await
        .map(VerificationData::sent)
        .map_err(to_field_error)
}

pub async fn finalize_mfa_sign_in(
    ctx: &GraphQLContext,
    pending_credential: String,
    verification_id: String,
    code: String,
) -> FieldResult<AuthPayload> {
    actions::finalize_mfa_sign_in(pending_credential, verification_id, code, &ctx.deps)
        .await
        .map(Into::into)
        .map_err(to_field_error)
}

pub async fn send_password_reset(ctx: &GraphQLContext, email: String) -> FieldResult<ActionResult> {
    let message = actions::send_password_reset(email, &ctx.deps)
        .await
        .map_err(to_field_error)?;

    Ok(ActionResult {
        success: true,
        message: Some(message),
    })
}

pub async fn resend_email_verification(ctx: &GraphQLContext) -> FieldResult<bool> {
    let user = ctx.require_auth()?;
    actions::resend_email_verification(user, &ctx.deps)
        .await
        .map_err(to_field_error)
}

/// Drop the caller's session
pub async fn sign_out(ctx: &GraphQLContext) -> FieldResult<bool> {
    let user = ctx.require_auth()?;
    actions::sign_out(user, &ctx.deps)
        .await
        .map_err(to_field_error)
}
